use super::*;

// =============================================================================
// display_name_from_email
// =============================================================================

#[test]
fn display_name_uses_local_part() {
    assert_eq!(display_name_from_email("ada@example.com"), "ada");
}

#[test]
fn display_name_stops_at_first_at_sign() {
    assert_eq!(display_name_from_email("a@b@c"), "a");
}

#[test]
fn display_name_without_at_sign_is_whole_input() {
    assert_eq!(display_name_from_email("plainuser"), "plainuser");
}

#[test]
fn display_name_with_empty_local_part_falls_back() {
    assert_eq!(display_name_from_email("@example.com"), "@example.com");
}

// =============================================================================
// avatar_for_seed
// =============================================================================

#[test]
fn avatar_is_deterministic() {
    assert_eq!(avatar_for_seed("ada@example.com"), avatar_for_seed("ada@example.com"));
}

#[test]
fn avatar_embeds_seed_verbatim() {
    assert_eq!(
        avatar_for_seed("ada@example.com"),
        "https://api.dicebear.com/7.x/avataaars/svg?seed=ada@example.com"
    );
}

// =============================================================================
// Identity construction
// =============================================================================

#[test]
fn from_email_derives_name_and_avatar() {
    let identity = Identity::from_email("ada@example.com").unwrap();
    assert_eq!(identity.id, LOCAL_IDENTITY_ID);
    assert_eq!(identity.email, "ada@example.com");
    assert_eq!(identity.name, "ada");
    assert_eq!(identity.avatar.as_deref(), Some(avatar_for_seed("ada@example.com").as_str()));
}

#[test]
fn from_email_rejects_empty_email() {
    assert_eq!(Identity::from_email(""), Err(IdentityError::EmptyField("email")));
}

#[test]
fn with_name_keeps_explicit_name() {
    let identity = Identity::with_name("grace@example.com", "Grace Hopper").unwrap();
    assert_eq!(identity.name, "Grace Hopper");
    assert_eq!(identity.email, "grace@example.com");
}

#[test]
fn with_name_rejects_blank_name() {
    assert_eq!(Identity::with_name("grace@example.com", "   "), Err(IdentityError::EmptyField("name")));
}

#[test]
fn new_rejects_empty_id() {
    assert_eq!(Identity::new("", "a@b.c", "a", None), Err(IdentityError::EmptyField("id")));
}

#[test]
fn federated_placeholder_is_valid() {
    let identity = Identity::federated_placeholder();
    assert!(identity.validate().is_ok());
    assert_eq!(identity.id, "google_1");
    assert_eq!(identity.email, "user@gmail.com");
    assert_eq!(identity.name, "Google User");
    assert_eq!(identity.avatar, Some(avatar_for_seed("google")));
}

// =============================================================================
// Serialization
// =============================================================================

#[test]
fn serializes_without_absent_avatar() {
    let identity = Identity::new("1", "a@b.c", "a", None).unwrap();
    let json = serde_json::to_value(&identity).unwrap();
    assert_eq!(json, serde_json::json!({ "id": "1", "email": "a@b.c", "name": "a" }));
}

#[test]
fn deserializes_null_avatar_as_none() {
    let identity: Identity =
        serde_json::from_str(r#"{"id":"1","email":"a@b.c","name":"a","avatar":null}"#).unwrap();
    assert!(identity.avatar.is_none());
}
