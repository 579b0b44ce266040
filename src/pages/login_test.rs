use super::*;
use crate::net::api::AuthError;
use crate::net::types::Role;
use crate::net::types::test_helpers::identity;
use crate::pages::form::test_helpers::RecordingNavigator;
use crate::services::auth::test_helpers::{MockAuthApi, unauthorized};
use crate::state::session::{SessionState, SessionStore};

use std::time::Duration;

use tokio::sync::Notify;

struct Harness {
    page: LoginPage,
    api: Arc<MockAuthApi>,
    nav: Arc<RecordingNavigator>,
    store: SessionStore,
}

fn harness(api: MockAuthApi) -> Harness {
    let api = Arc::new(api);
    let nav = Arc::new(RecordingNavigator::default());
    let store = SessionStore::new();
    let gateway = AuthGateway::new(api.clone(), store.clone());
    Harness { page: LoginPage::new(gateway, nav.clone()), api, nav, store }
}

// =============================================================================
// validate_login_input
// =============================================================================

#[test]
fn validate_login_input_trims_email_and_requires_both() {
    assert_eq!(
        validate_login_input("  a@b.com ", "x"),
        Ok(LoginRequest { email: "a@b.com".into(), password: "x".into() })
    );
    assert_eq!(validate_login_input("   ", "x"), Err("Enter both email and password."));
    assert_eq!(validate_login_input("a@b.com", ""), Err("Enter both email and password."));
}

#[test]
fn validate_login_input_keeps_password_whitespace() {
    let request = validate_login_input("a@b.com", " pw ").unwrap();
    assert_eq!(request.password, " pw ");
}

// =============================================================================
// submit: role routing
// =============================================================================

#[tokio::test]
async fn admin_login_authenticates_and_navigates_to_admin() {
    let h = harness(MockAuthApi::new().with_login(Ok(identity(1, Role::Admin))));

    assert_eq!(h.page.submit("a@b.com", "x").await, Some(Area::Admin));
    assert_eq!(h.store.current_state(), SessionState::Authenticated(identity(1, Role::Admin)));
    assert_eq!(h.nav.paths(), vec!["/admin"]);
    assert_eq!(h.page.status(), FormStatus::default());
}

#[tokio::test]
async fn client_login_navigates_to_client() {
    let h = harness(MockAuthApi::new().with_login(Ok(identity(2, Role::Client))));
    assert_eq!(h.page.submit("a@b.com", "x").await, Some(Area::Client));
    assert_eq!(h.nav.paths(), vec!["/client"]);
}

#[tokio::test]
async fn user_login_navigates_to_user() {
    let h = harness(MockAuthApi::new().with_login(Ok(identity(3, Role::User))));
    assert_eq!(h.page.submit("a@b.com", "x").await, Some(Area::User));
    assert_eq!(h.nav.paths(), vec!["/user"]);
}

#[tokio::test]
async fn unrecognized_role_navigates_to_user() {
    let mut odd = identity(4, Role::User);
    odd.role = Role::from_wire("STAFF");
    let h = harness(MockAuthApi::new().with_login(Ok(odd)));
    h.page.submit("a@b.com", "x").await;
    assert_eq!(h.nav.paths(), vec!["/user"]);
}

// =============================================================================
// submit: failures
// =============================================================================

#[tokio::test]
async fn failed_login_keeps_state_and_shows_error() {
    let h = harness(
        MockAuthApi::new()
            .with_me(Ok(Some(identity(9, Role::User))))
            .with_login(Err(unauthorized())),
    );
    AuthGateway::new(h.api.clone(), h.store.clone())
        .check_status()
        .await;
    let before = h.store.current_state();

    assert_eq!(h.page.submit("a@b.com", "x").await, None);
    assert_eq!(h.store.current_state(), before);
    let status = h.page.status();
    assert!(!status.busy);
    assert_eq!(status.error, LOGIN_FAILED_MESSAGE);
    assert!(h.nav.paths().is_empty());
}

#[tokio::test]
async fn network_error_shows_same_fixed_message() {
    let h = harness(MockAuthApi::new().with_login(Err(AuthError::Request("connection refused".into()))));
    h.page.submit("a@b.com", "x").await;
    assert_eq!(h.page.status().error, LOGIN_FAILED_MESSAGE);
    assert_eq!(h.store.current_state(), SessionState::Unauthenticated);
}

#[tokio::test]
async fn retry_after_failure_clears_error() {
    let h = harness(
        MockAuthApi::new()
            .with_login(Err(unauthorized()))
            .with_login(Ok(identity(1, Role::Client))),
    );
    h.page.submit("a@b.com", "bad").await;
    assert!(!h.page.status().error.is_empty());

    h.page.submit("a@b.com", "good").await;
    assert_eq!(h.page.status(), FormStatus::default());
    assert_eq!(h.nav.paths(), vec!["/client"]);
}

#[tokio::test]
async fn invalid_input_never_reaches_gateway() {
    let h = harness(MockAuthApi::new());
    assert_eq!(h.page.submit("", "").await, None);
    assert_eq!(h.page.status().error, "Enter both email and password.");
    assert!(!h.page.status().busy);
    assert!(h.api.calls().is_empty());
}

// =============================================================================
// submit: busy flag
// =============================================================================

#[tokio::test]
async fn busy_while_in_flight_and_duplicate_submit_ignored() {
    let gate = Arc::new(Notify::new());
    let h = harness(
        MockAuthApi::new()
            .with_login(Ok(identity(1, Role::Admin)))
            .gated(gate.clone()),
    );
    let mut status = h.page.watch_status();

    let (first, ()) = tokio::join!(h.page.submit("a@b.com", "x"), async {
        status.wait_for(|s| s.busy).await.unwrap();
        assert_eq!(h.page.submit("a@b.com", "x").await, None);
        gate.notify_one();
    });

    assert_eq!(first, Some(Area::Admin));
    assert!(!h.page.status().busy);
    assert_eq!(h.api.calls(), vec!["login"]);
    assert_eq!(h.nav.paths(), vec!["/admin"]);
}

#[tokio::test]
async fn cancelled_submission_clears_busy_and_allows_retry() {
    let gate = Arc::new(Notify::new());
    let h = harness(
        MockAuthApi::new()
            .with_login(Ok(identity(1, Role::Client)))
            .gated(gate.clone()),
    );

    let cancelled = tokio::time::timeout(Duration::from_millis(20), h.page.submit("a@b.com", "x")).await;
    assert!(cancelled.is_err());
    assert!(!h.page.status().busy);
    assert!(h.nav.paths().is_empty());

    gate.notify_one();
    assert_eq!(h.page.submit("a@b.com", "x").await, Some(Area::Client));
    assert_eq!(h.api.calls(), vec!["login", "login"]);
    assert_eq!(h.nav.paths(), vec!["/client"]);
}
