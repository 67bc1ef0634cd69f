//! Timer-backed `Delay` for the simulated backend.
//!
//! Uses `gloo-timers` in the browser; SSR and native tests resolve
//! immediately so server rendering never waits on simulated latency.

use std::time::Duration;

use careerforge::backend::Delay;

#[derive(Clone, Copy, Debug, Default)]
pub struct TimerDelay;

#[async_trait::async_trait(?Send)]
impl Delay for TimerDelay {
    async fn sleep(&self, duration: Duration) {
        #[cfg(feature = "hydrate")]
        {
            gloo_timers::future::sleep(duration).await;
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = duration;
        }
    }
}
