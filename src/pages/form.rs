//! Submission lifecycle shared by the login and registration pages.
//!
//! SYSTEM CONTEXT
//! ==============
//! Both pages track a busy flag and an error line, call the gateway once per
//! submission, and on success route the user to their role's area. This
//! module owns that lifecycle; the pages only validate input and pick the
//! gateway call.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::watch;

use crate::net::api::AuthError;
use crate::net::types::Identity;
use crate::util::routing::{Area, Navigator, landing_path};

/// Observable per-form state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormStatus {
    /// True from submission until the gateway call settles.
    pub busy: bool,
    /// Empty unless the last attempt failed.
    pub error: String,
}

pub(crate) struct FormController {
    status: watch::Sender<FormStatus>,
    navigator: Arc<dyn Navigator>,
}

impl FormController {
    pub(crate) fn new(navigator: Arc<dyn Navigator>) -> Self {
        let (status, _) = watch::channel(FormStatus::default());
        Self { status, navigator }
    }

    pub(crate) fn status(&self) -> FormStatus {
        self.status.borrow().clone()
    }

    pub(crate) fn watch(&self) -> watch::Receiver<FormStatus> {
        self.status.subscribe()
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.status.borrow().busy
    }

    /// Show a validation message without touching the network.
    pub(crate) fn reject(&self, message: &str) {
        self.status.send_modify(|s| s.error = message.to_owned());
    }

    /// Drive one submission: busy on, await `call`, busy off, then navigate
    /// or show `failure_message`. Dropping the returned future mid-call also
    /// clears the busy flag.
    pub(crate) async fn run<F>(&self, form: &'static str, failure_message: &str, call: F) -> Option<Area>
    where
        F: Future<Output = Result<Identity, AuthError>>,
    {
        let started = self.status.send_if_modified(|s| {
            if s.busy {
                return false;
            }
            s.busy = true;
            s.error.clear();
            true
        });
        if !started {
            tracing::debug!(form, "submission ignored while busy");
            return None;
        }

        let busy = BusyGuard { status: &self.status };
        match call.await {
            Ok(identity) => {
                busy.finish(None);
                let path = landing_path(identity.role);
                tracing::info!(form, user_id = identity.id, path, "navigating after auth");
                self.navigator.navigate(path);
                Some(Area::for_role(identity.role))
            }
            Err(e) => {
                tracing::error!(form, error = %e, "submission failed");
                busy.finish(Some(failure_message));
                None
            }
        }
    }
}

/// Clears the busy flag when a submission ends, including when the
/// submitting future is dropped before the gateway call settles.
struct BusyGuard<'a> {
    status: &'a watch::Sender<FormStatus>,
}

impl BusyGuard<'_> {
    fn finish(self, error: Option<&str>) {
        self.status.send_modify(|s| {
            s.busy = false;
            if let Some(message) = error {
                message.clone_into(&mut s.error);
            }
        });
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        let cancelled = self.status.send_if_modified(|s| std::mem::replace(&mut s.busy, false));
        if cancelled {
            tracing::debug!("submission dropped before completion; busy cleared");
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
