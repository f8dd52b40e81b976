//! Collaborator layer: request/response messages and the code that executes them.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with request identity
//! - `service`: The [`Backend`] trait the HTTP backend or a fixture implements
//! - `handler`: [`BackendWorker`], turning requests into responses
//! - `fixture`: [`FixtureBackend`], a JSON-fixture implementation

pub mod fixture;
pub mod handler;
pub mod messages;
pub mod service;

pub use fixture::{FixtureAccount, FixtureBackend};
pub use handler::BackendWorker;
pub use messages::{BackendRequest, BackendResponse, RequestCounter, RequestId};
pub use service::{Backend, LoginOutcome};
