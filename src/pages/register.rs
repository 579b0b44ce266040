//! Registration page. Validates the same constraints the backend enforces
//! before spending a request.

#[cfg(test)]
#[path = "register_test.rs"]
mod register_test;

use std::sync::Arc;

use tokio::sync::watch;

use super::form::{FormController, FormStatus};
use crate::net::types::RegisterRequest;
use crate::services::auth::AuthGateway;
use crate::util::routing::{Area, Navigator};

pub const REGISTER_FAILED_MESSAGE: &str = "Registration failed. Please try again.";
const MIN_PASSWORD_CHARS: usize = 6;

pub struct RegisterPage {
    gateway: AuthGateway,
    form: FormController,
}

impl RegisterPage {
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

    /// Create the account, then navigate to the new user's area.
    pub async fn submit(&self, details: RegisterRequest) -> Option<Area> {
        if self.form.is_busy() {
            return None;
        }
        let request = match validate_register_input(details) {
            Ok(request) => request,
            Err(message) => {
                self.form.reject(message);
                return None;
            }
        };
        self.form
            .run("register", REGISTER_FAILED_MESSAGE, self.gateway.register(request))
            .await
    }
}

fn validate_register_input(details: RegisterRequest) -> Result<RegisterRequest, &'static str> {
    let email = details.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err("Enter a valid email address.");
    }
    if details.password.chars().count() < MIN_PASSWORD_CHARS {
        return Err("Password must be at least 6 characters.");
    }
    let first_name = details.first_name.trim();
    if first_name.is_empty() {
        return Err("First name is required.");
    }
    Ok(RegisterRequest {
        email: email.to_owned(),
        first_name: first_name.to_owned(),
        last_name: details.last_name.trim().to_owned(),
        phone: details.phone.trim().to_owned(),
        ..details
    })
}
