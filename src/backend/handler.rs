//! Executes collaborator requests and translates every outcome into a response.
//!
//! The worker is the component boundary for collaborator faults: whatever the
//! [`Backend`] returns, the core receives a [`BackendResponse`], never an error.

use crate::backend::service::{Backend, LoginOutcome};
use crate::backend::{BackendRequest, BackendResponse};
use crate::domain::error::Result;
use crate::domain::AuthFailureReason;

/// Runs [`BackendRequest`]s against a [`Backend`].
#[derive(Debug)]
pub struct BackendWorker<B> {
    backend: B,
}

impl<B: Backend> BackendWorker<B> {
    pub const fn new(backend: B) -> Self {
        Self { backend }
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Helper for handling collaborator results with consistent logging.
    fn handle_result<T, F, E>(operation: &str, result: Result<T>, on_success: F, on_error: E) -> BackendResponse
    where
        F: FnOnce(T) -> BackendResponse,
        E: FnOnce(String) -> BackendResponse,
    {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "backend call succeeded");
                on_success(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "backend call failed");
                on_error(e.to_string())
            }
        }
    }

    /// Handles one request and produces its response.
    pub fn handle(&mut self, request: BackendRequest) -> BackendResponse {
        let _span = tracing::debug_span!(
            "backend_request",
            request_id = %request.id(),
            operation = request.operation()
        )
        .entered();

        match request {
            BackendRequest::FetchListings { id, query, cursor } => Self::handle_result(
                "fetch listings",
                self.backend.fetch_listings(query.as_deref(), cursor.as_ref()),
                |page| {
                    tracing::debug!(
                        listing_count = page.listings.len(),
                        has_more = page.has_more,
                        "page fetched"
                    );
                    BackendResponse::ListingsLoaded { id, page }
                },
                |reason| BackendResponse::ListingsFailed { id, reason },
            ),
            BackendRequest::SetFavorite { id, listing, favorited } => {
                let result = self.backend.set_favorite(&listing, favorited);
                let failed_listing = listing.clone();
                Self::handle_result(
                    "set favorite",
                    result,
                    |()| BackendResponse::FavoriteSaved { id, listing, favorited },
                    |reason| BackendResponse::FavoriteFailed {
                        id,
                        listing: failed_listing,
                        favorited,
                        reason,
                    },
                )
            }
            BackendRequest::Login { id, credentials } => Self::handle_result(
                "login",
                self.backend.login(&credentials),
                |outcome| match outcome {
                    LoginOutcome::Accepted => BackendResponse::LoginSucceeded { id },
                    LoginOutcome::Rejected(reason) => BackendResponse::LoginFailed { id, reason },
                },
                |_| BackendResponse::LoginFailed {
                    id,
                    reason: AuthFailureReason::NetworkError,
                },
            ),
            BackendRequest::SendResetLink { id, email } => {
                let result = self.backend.send_reset_link(&email);
                Self::handle_result(
                    "send reset link",
                    result,
                    |()| BackendResponse::ResetLinkAcknowledged { id, email },
                    |reason| BackendResponse::ResetLinkFailed { id, reason },
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::RequestId;
    use crate::domain::{CatalogPage, Credentials, Cursor, ListingId, PropertyListing, StayviewError};

    #[derive(Default)]
    struct Scripted {
        unreachable: bool,
    }

    impl Backend for Scripted {
        fn fetch_listings(&mut self, _query: Option<&str>, _cursor: Option<&Cursor>) -> Result<CatalogPage> {
            if self.unreachable {
                return Err(StayviewError::Unreachable);
            }
            Ok(CatalogPage::last(vec![PropertyListing::new("1", "Loft")]))
        }

        fn set_favorite(&mut self, _listing: &ListingId, _favorited: bool) -> Result<()> {
            Err(StayviewError::Backend("favorites offline".to_string()))
        }

        fn login(&mut self, credentials: &Credentials) -> Result<LoginOutcome> {
            if self.unreachable {
                return Err(StayviewError::Unreachable);
            }
            if credentials.password == "ok" {
                Ok(LoginOutcome::Accepted)
            } else {
                Ok(LoginOutcome::Rejected(AuthFailureReason::InvalidCredentials))
            }
        }

        fn send_reset_link(&mut self, _email: &str) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn fetch_failure_becomes_listings_failed() {
        let mut worker = BackendWorker::new(Scripted { unreachable: true });
        let response = worker.handle(BackendRequest::FetchListings {
            id: RequestId(1),
            query: None,
            cursor: None,
        });
        assert_eq!(
            response,
            BackendResponse::ListingsFailed {
                id: RequestId(1),
                reason: "Backend unreachable".to_string(),
            }
        );
    }

    #[test]
    fn login_transport_error_is_a_network_error() {
        let mut worker = BackendWorker::new(Scripted { unreachable: true });
        let response = worker.handle(BackendRequest::Login {
            id: RequestId(2),
            credentials: Credentials::new("a@b.c", "ok"),
        });
        assert_eq!(
            response,
            BackendResponse::LoginFailed {
                id: RequestId(2),
                reason: AuthFailureReason::NetworkError,
            }
        );
    }

    #[test]
    fn login_verdicts_pass_through() {
        let mut worker = BackendWorker::new(Scripted::default());
        let accepted = worker.handle(BackendRequest::Login {
            id: RequestId(3),
            credentials: Credentials::new("a@b.c", "ok"),
        });
        assert_eq!(accepted, BackendResponse::LoginSucceeded { id: RequestId(3) });

        let rejected = worker.handle(BackendRequest::Login {
            id: RequestId(4),
            credentials: Credentials::new("a@b.c", "nope"),
        });
        assert_eq!(
            rejected,
            BackendResponse::LoginFailed {
                id: RequestId(4),
                reason: AuthFailureReason::InvalidCredentials,
            }
        );
    }

    #[test]
    fn favorite_failure_echoes_the_intent() {
        let mut worker = BackendWorker::new(Scripted::default());
        let response = worker.handle(BackendRequest::SetFavorite {
            id: RequestId(5),
            listing: ListingId::new("1"),
            favorited: true,
        });
        assert!(matches!(
            response,
            BackendResponse::FavoriteFailed { favorited: true, ref listing, .. } if listing.as_str() == "1"
        ));
    }
}
