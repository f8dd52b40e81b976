//! Login credentials and failure classification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Email and password submitted from the login form.
///
/// `Debug` never prints the password.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Whether the form would pass its `required` checks.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Why the auth collaborator refused a login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthFailureReason {
    InvalidCredentials,
    UnknownUser,
    NetworkError,
}

impl AuthFailureReason {
    /// Message rendered under the login form for this reason.
    ///
    /// # Examples
    ///
    /// ```
    /// use stayview::domain::AuthFailureReason;
    ///
    /// assert!(AuthFailureReason::UnknownUser.message().to_lowercase().contains("user not found"));
    /// ```
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidCredentials => "Invalid credentials. Check your email and password.",
            Self::UnknownUser => "User not found. Check the email or sign up.",
            Self::NetworkError => "Login failed. Check your connection and try again.",
        }
    }
}

impl fmt::Display for AuthFailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            Self::InvalidCredentials => "invalid_credentials",
            Self::UnknownUser => "unknown_user",
            Self::NetworkError => "network_error",
        };
        f.write_str(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_output_hides_password() {
        let credentials = Credentials::new("a@example.com", "hunter2");
        let debug = format!("{credentials:?}");
        assert!(debug.contains("a@example.com"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn reasons_use_snake_case_on_the_wire() {
        let json = serde_json::to_string(&AuthFailureReason::InvalidCredentials).unwrap();
        assert_eq!(json, "\"invalid_credentials\"");
        let reason: AuthFailureReason = serde_json::from_str("\"unknown_user\"").unwrap();
        assert_eq!(reason, AuthFailureReason::UnknownUser);
    }

    #[test]
    fn every_message_matches_the_login_error_vocabulary() {
        for reason in [
            AuthFailureReason::InvalidCredentials,
            AuthFailureReason::UnknownUser,
            AuthFailureReason::NetworkError,
        ] {
            let message = reason.message().to_lowercase();
            assert!(
                ["invalid credentials", "login failed", "user not found"]
                    .iter()
                    .any(|needle| message.contains(needle)),
                "unexpected message: {message}"
            );
        }
    }

    #[test]
    fn blank_fields_are_incomplete() {
        assert!(!Credentials::new("   ", "x").is_complete());
        assert!(!Credentials::new("a@b.c", "").is_complete());
        assert!(Credentials::new("a@b.c", "x").is_complete());
    }
}
