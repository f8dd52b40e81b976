//! Login flow state machine and the password-reset modal.
//!
//! # State Machine
//!
//! ```text
//! anonymous ──submit──▶ submitting ──ok──────▶ authenticated
//!     ▲                     │
//!     │                     └──rejected──▶ failed(reason) ──submit──▶ submitting
//! ```
//!
//! Only one submission can be in flight. `authenticated` is terminal, and so is an
//! unmounted instance: once the user leaves the login route the instance ignores
//! every late response. Re-entering the login route mounts a fresh instance.
//!
//! The reset modal is an independent sub-flow. Opening or closing it never reads or
//! writes the [`AuthSession`], and closing it never navigates.

use crate::backend::{BackendRequest, RequestCounter, RequestId};
use crate::domain::{AuthFailureReason, Credentials};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuthSession {
    #[default]
    Anonymous,
    Submitting { request: RequestId },
    Authenticated,
    Failed { reason: AuthFailureReason },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

/// Progress of a reset-link request. Only receipt is modelled.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ResetLinkStatus {
    #[default]
    Idle,
    Sending { request: RequestId },
    Sent { email: String },
    Failed { reason: String },
}

/// One mounted instance of the login page's flow.
#[derive(Debug, Clone)]
pub struct AuthFlow {
    session: AuthSession,
    modal: ModalState,
    reset: ResetLinkStatus,
    mounted: bool,
}

impl Default for AuthFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthFlow {
    #[must_use]
    pub fn new() -> Self {
        Self {
            session: AuthSession::Anonymous,
            modal: ModalState::Closed,
            reset: ResetLinkStatus::Idle,
            mounted: true,
        }
    }

    /// Submits credentials.
    ///
    /// Accepted only from `anonymous` or `failed`, on a mounted instance, with both
    /// fields filled in. Returns the login request to post.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stayview::app::auth::{AuthFlow, AuthSession};
    /// use stayview::backend::RequestCounter;
    /// use stayview::domain::Credentials;
    ///
    /// let mut requests = RequestCounter::default();
    /// let mut flow = AuthFlow::new();
    /// let request = flow.submit(Credentials::new("a@b.c", "pw"), &mut requests);
    ///
    /// assert!(request.is_some());
    /// assert!(matches!(flow.session(), AuthSession::Submitting { .. }));
    /// assert!(flow.submit(Credentials::new("a@b.c", "pw"), &mut requests).is_none());
    /// ```
    pub fn submit(&mut self, credentials: Credentials, requests: &mut RequestCounter) -> Option<BackendRequest> {
        if !self.mounted {
            tracing::debug!("login submit ignored, flow unmounted");
            return None;
        }

        match self.session {
            AuthSession::Anonymous | AuthSession::Failed { .. } => {}
            AuthSession::Submitting { request } => {
                tracing::debug!(request_id = %request, "login submit ignored, submission in flight");
                return None;
            }
            AuthSession::Authenticated => {
                tracing::debug!("login submit ignored, already authenticated");
                return None;
            }
        }

        if !credentials.is_complete() {
            tracing::debug!("login submit ignored, form incomplete");
            return None;
        }

        let id = requests.next_id();
        self.session = AuthSession::Submitting { request: id };
        tracing::debug!(request_id = %id, email = %credentials.email, "login submitted");

        Some(BackendRequest::Login { id, credentials })
    }

    fn awaiting(&self, id: RequestId) -> bool {
        let awaiting = self.mounted && self.session == AuthSession::Submitting { request: id };
        if !awaiting {
            tracing::debug!(request_id = %id, session = ?self.session, mounted = self.mounted, "stale login response dropped");
        }
        awaiting
    }

    /// Applies a successful login. When this returns `true` the caller must navigate
    /// away from the login route.
    pub fn apply_login_succeeded(&mut self, id: RequestId) -> bool {
        if !self.awaiting(id) {
            return false;
        }
        self.session = AuthSession::Authenticated;
        tracing::debug!(request_id = %id, "login succeeded");
        true
    }

    /// Applies a rejected login. The user stays on the login route.
    pub fn apply_login_failed(&mut self, id: RequestId, reason: AuthFailureReason) -> bool {
        if !self.awaiting(id) {
            return false;
        }
        self.session = AuthSession::Failed { reason };
        tracing::warn!(request_id = %id, reason = %reason, "login failed");
        true
    }

    /// Marks the instance as navigated away from. Terminal.
    pub fn unmount(&mut self) {
        if let AuthSession::Submitting { request } = self.session {
            tracing::debug!(request_id = %request, "login flow unmounted with submission in flight");
        }
        self.mounted = false;
        self.modal = ModalState::Closed;
        self.reset = ResetLinkStatus::Idle;
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub const fn session(&self) -> AuthSession {
        self.session
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        matches!(self.session, AuthSession::Submitting { .. })
    }

    /// Failure message to show, only while still on the login route.
    #[must_use]
    pub const fn message(&self, on_login_route: bool) -> Option<&'static str> {
        match self.session {
            AuthSession::Failed { reason } if on_login_route && self.mounted => Some(reason.message()),
            _ => None,
        }
    }

    pub fn open_reset_modal(&mut self) -> bool {
        if !self.mounted || self.modal == ModalState::Open {
            return false;
        }
        self.modal = ModalState::Open;
        tracing::debug!("reset modal opened");
        true
    }

    /// Closes the modal and forgets any reset progress.
    pub fn close_reset_modal(&mut self) -> bool {
        if self.modal == ModalState::Closed {
            return false;
        }
        self.modal = ModalState::Closed;
        self.reset = ResetLinkStatus::Idle;
        tracing::debug!("reset modal closed");
        true
    }

    #[must_use]
    pub const fn modal(&self) -> ModalState {
        self.modal
    }

    /// Requests a reset link from inside the open modal.
    pub fn send_reset_link(&mut self, email: &str, requests: &mut RequestCounter) -> Option<BackendRequest> {
        let email = email.trim();
        if self.modal != ModalState::Open || email.is_empty() {
            tracing::debug!(modal = ?self.modal, "reset link request ignored");
            return None;
        }
        if let ResetLinkStatus::Sending { request } = self.reset {
            tracing::debug!(request_id = %request, "reset link already sending");
            return None;
        }

        let id = requests.next_id();
        self.reset = ResetLinkStatus::Sending { request: id };
        tracing::debug!(request_id = %id, "reset link requested");

        Some(BackendRequest::SendResetLink {
            id,
            email: email.to_string(),
        })
    }

    fn reset_awaiting(&self, id: RequestId) -> bool {
        matches!(self.reset, ResetLinkStatus::Sending { request } if request == id)
    }

    pub fn apply_reset_acknowledged(&mut self, id: RequestId, email: String) -> bool {
        if !self.reset_awaiting(id) {
            tracing::debug!(request_id = %id, "stale reset acknowledgement dropped");
            return false;
        }
        self.reset = ResetLinkStatus::Sent { email };
        true
    }

    pub fn apply_reset_failed(&mut self, id: RequestId, reason: String) -> bool {
        if !self.reset_awaiting(id) {
            tracing::debug!(request_id = %id, "stale reset failure dropped");
            return false;
        }
        tracing::warn!(request_id = %id, reason = %reason, "reset link request failed");
        self.reset = ResetLinkStatus::Failed { reason };
        true
    }

    #[must_use]
    pub const fn reset_status(&self) -> &ResetLinkStatus {
        &self.reset
    }
}
