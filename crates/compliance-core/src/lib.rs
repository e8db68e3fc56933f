//! Compliance Core - credential flows and the session state machine.
//!
//! - [`flow`] picks exactly one authentication path from the supplied inputs
//! - [`login`] runs the selected path and commits the session on success only
//! - [`guard`] is the cheap "is there a session" precondition
//! - [`logout`] revokes remotely when required and always clears local state
//! - [`http`] and [`api`] talk to the remote service

pub mod api;
pub mod error;
pub mod flow;
pub mod guard;
pub mod http;
pub mod login;
pub mod logout;

#[cfg(test)]
pub(crate) mod testing;

pub use api::{ComplianceApi, Profile, ProfileListing};
pub use error::{ApiError, InputError, LoginError, LogoutError};
pub use flow::{AutomateCredentials, Credentials, Flow, FlowKind};
pub use guard::{active_session, require_session};
pub use http::{HttpClients, HttpExchanger};
pub use login::{LoginOrchestrator, SessionSummary};
pub use logout::LogoutOrchestrator;
