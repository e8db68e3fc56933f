//! Compliance Traits - Session model and collaborator boundaries.
//!
//! This crate provides the shared interfaces used across the workspace:
//! - Session record (tagged over the backend flavor) and server version info
//! - SessionStore trait for the singleton persisted session
//! - TokenExchanger trait for the remote credential exchange
//! - Store error type shared by every storage backend

pub mod error;
pub mod exchange;
pub mod session;
pub mod store;
pub mod version;

// ── Top-level re-exports ─────────────────────────────────────────────

pub use error::StoreError;
pub use exchange::{Exchange, ExchangeRejected, TokenExchanger};
pub use session::{AutomateInfo, Flavor, ServerType, Session, TokenType};
pub use store::SessionStore;
pub use version::{Feature, ServerVersion, VersionNumber};
