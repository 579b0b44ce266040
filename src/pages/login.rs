//! Login page: email + password sign-in with role-based landing.

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

use std::sync::Arc;

use tokio::sync::watch;

use super::form::{FormController, FormStatus};
use crate::net::types::LoginRequest;
use crate::services::auth::AuthGateway;
use crate::util::routing::{Area, Navigator};

pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials and try again.";
const MISSING_CREDENTIALS_MESSAGE: &str = "Enter both email and password.";

pub struct LoginPage {
    gateway: AuthGateway,
    form: FormController,
}

impl LoginPage {
    #[must_use]
    pub fn new(gateway: AuthGateway, navigator: Arc<dyn Navigator>) -> Self {
        Self { gateway, form: FormController::new(navigator) }
    }

    #[must_use]
    pub fn status(&self) -> FormStatus {
        self.form.status()
    }

    #[must_use]
    pub fn watch_status(&self) -> watch::Receiver<FormStatus> {
        self.form.watch()
    }

    /// Sign in and navigate to the user's area. Returns the area on success.
    pub async fn submit(&self, email: &str, password: &str) -> Option<Area> {
        if self.form.is_busy() {
            return None;
        }
        let request = match validate_login_input(email, password) {
            Ok(request) => request,
            Err(message) => {
                self.form.reject(message);
                return None;
            }
        };
        self.form
            .run("login", LOGIN_FAILED_MESSAGE, self.gateway.login(request))
            .await
    }
}

fn validate_login_input(email: &str, password: &str) -> Result<LoginRequest, &'static str> {
    let email = email.trim();
    if email.is_empty() || password.is_empty() {
        return Err(MISSING_CREDENTIALS_MESSAGE);
    }
    Ok(LoginRequest { email: email.to_owned(), password: password.to_owned() })
}
