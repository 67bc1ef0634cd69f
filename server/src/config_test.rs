use super::*;

#[test]
fn parse_port_defaults_when_unset_or_blank() {
    assert_eq!(parse_port(None), Ok(DEFAULT_PORT));
    assert_eq!(parse_port(Some("  ")), Ok(DEFAULT_PORT));
}

#[test]
fn parse_port_accepts_trimmed_number() {
    assert_eq!(parse_port(Some(" 8080 ")), Ok(8080));
}

#[test]
fn parse_port_rejects_garbage() {
    assert_eq!(
        parse_port(Some("eighty")),
        Err(ConfigError::Invalid { var: "PORT", value: "eighty".to_owned() })
    );
}

#[test]
fn parse_port_rejects_out_of_range() {
    assert!(parse_port(Some("70000")).is_err());
}

#[test]
fn bind_addr_joins_host_and_port() {
    let cfg = ServerConfig { host: "127.0.0.1".to_owned(), port: 4000 };
    assert_eq!(cfg.bind_addr(), "127.0.0.1:4000");
}
