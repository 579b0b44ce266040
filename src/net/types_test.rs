use super::*;
use serde_json::json;

fn admin_json() -> serde_json::Value {
    json!({
        "id": 7,
        "email": "ana@spa.test",
        "firstName": "Ana",
        "lastName": "Kovac",
        "phone": "+385 1 234",
        "role": "ADMIN",
        "membershipName": null,
        "membershipStatus": null
    })
}

// =============================================================================
// Role
// =============================================================================

#[test]
fn role_deserializes_known_values() {
    assert_eq!(serde_json::from_value::<Role>(json!("USER")).unwrap(), Role::User);
    assert_eq!(serde_json::from_value::<Role>(json!("CLIENT")).unwrap(), Role::Client);
    assert_eq!(serde_json::from_value::<Role>(json!("ADMIN")).unwrap(), Role::Admin);
}

#[test]
fn role_unknown_wire_value_collapses_to_user() {
    assert_eq!(serde_json::from_value::<Role>(json!("SUPERUSER")).unwrap(), Role::User);
    assert_eq!(Role::from_wire("admin"), Role::User);
}

#[test]
fn role_serializes_uppercase() {
    assert_eq!(serde_json::to_value(Role::Client).unwrap(), json!("CLIENT"));
}

#[test]
fn role_from_str_is_case_insensitive_and_strict() {
    assert_eq!("admin".parse::<Role>(), Ok(Role::Admin));
    assert_eq!(" Client ".parse::<Role>(), Ok(Role::Client));
    assert!("owner".parse::<Role>().is_err());
}

// =============================================================================
// Identity
// =============================================================================

#[test]
fn identity_parses_camel_case_without_membership() {
    let identity: Identity = serde_json::from_value(admin_json()).unwrap();
    assert_eq!(identity.id, 7);
    assert_eq!(identity.email, "ana@spa.test");
    assert_eq!(identity.first_name, "Ana");
    assert_eq!(identity.last_name, "Kovac");
    assert_eq!(identity.phone, "+385 1 234");
    assert_eq!(identity.role, Role::Admin);
    assert!(identity.membership.is_none());
}

#[test]
fn identity_parses_full_membership() {
    let mut value = admin_json();
    value["role"] = json!("USER");
    value["membershipName"] = json!("Gold");
    value["membershipStatus"] = json!("PENDING");
    let identity: Identity = serde_json::from_value(value).unwrap();
    assert_eq!(
        identity.membership,
        Some(Membership { name: "Gold".to_owned(), status: MembershipStatus::Pending })
    );
}

#[test]
fn identity_drops_half_present_membership() {
    let mut value = admin_json();
    value["membershipStatus"] = json!("INACTIVE");
    let identity: Identity = serde_json::from_value(value).unwrap();
    assert!(identity.membership.is_none());

    let mut value = admin_json();
    value["membershipName"] = json!("Silver");
    let identity: Identity = serde_json::from_value(value).unwrap();
    assert!(identity.membership.is_none());
}

#[test]
fn identity_null_or_missing_optional_strings_become_empty() {
    let identity: Identity = serde_json::from_value(json!({
        "id": 1,
        "email": "x@y.z",
        "firstName": "Xi",
        "lastName": null,
        "role": "CLIENT"
    }))
    .unwrap();
    assert_eq!(identity.last_name, "");
    assert_eq!(identity.phone, "");
    assert_eq!(identity.role, Role::Client);
}

#[test]
fn identity_with_unknown_membership_status_parses_without_membership() {
    let mut value = admin_json();
    value["membershipName"] = json!("Gold");
    value["membershipStatus"] = json!("SUSPENDED");
    let identity: Identity = serde_json::from_value(value).unwrap();
    assert_eq!(identity.id, 7);
    assert_eq!(identity.role, Role::Admin);
    assert!(identity.membership.is_none());
}

#[test]
fn membership_status_from_wire_knows_every_backend_value() {
    for status in [
        MembershipStatus::Active,
        MembershipStatus::Pending,
        MembershipStatus::Rejected,
        MembershipStatus::Inactive,
    ] {
        assert_eq!(MembershipStatus::from_wire(status.as_str()), Some(status));
    }
    assert_eq!(MembershipStatus::from_wire("active"), None);
}

#[test]
fn identity_serializes_back_to_wire_shape() {
    let identity: Identity = serde_json::from_value(admin_json()).unwrap();
    assert_eq!(serde_json::to_value(&identity).unwrap(), admin_json());
}

#[test]
fn display_name_joins_names_or_falls_back_to_email() {
    let mut identity: Identity = serde_json::from_value(admin_json()).unwrap();
    assert_eq!(identity.display_name(), "Ana Kovac");
    identity.last_name.clear();
    assert_eq!(identity.display_name(), "Ana");
    identity.first_name = "  ".to_owned();
    assert_eq!(identity.display_name(), "ana@spa.test");
}

// =============================================================================
// Request payloads
// =============================================================================

#[test]
fn register_request_serializes_camel_case_with_role() {
    let req = RegisterRequest {
        email: "a@b.com".to_owned(),
        password: "secret1".to_owned(),
        first_name: "A".to_owned(),
        last_name: "B".to_owned(),
        phone: "123".to_owned(),
        role: Role::Client,
    };
    assert_eq!(
        serde_json::to_value(&req).unwrap(),
        json!({
            "email": "a@b.com",
            "password": "secret1",
            "firstName": "A",
            "lastName": "B",
            "phone": "123",
            "role": "CLIENT"
        })
    );
}

#[test]
fn request_debug_redacts_password() {
    let login = LoginRequest { email: "a@b.com".to_owned(), password: "hunter2".to_owned() };
    let rendered = format!("{login:?}");
    assert!(rendered.contains("a@b.com"));
    assert!(!rendered.contains("hunter2"));

    let register = RegisterRequest {
        email: "a@b.com".to_owned(),
        password: "hunter2".to_owned(),
        first_name: "A".to_owned(),
        last_name: String::new(),
        phone: String::new(),
        role: Role::User,
    };
    assert!(!format!("{register:?}").contains("hunter2"));
}
