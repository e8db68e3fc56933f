//! Session store abstraction.
//!
//! Implementations are provided by downstream crates (e.g., compliance-storage).

use crate::error::StoreError;
use crate::session::Session;

/// Owner of the singleton persisted session record.
///
/// Only login writes and only logout destroys; everything else reads.
pub trait SessionStore: Send + Sync {
    /// Load the current session. Returns `Ok(None)` if no session exists.
    fn read(&self) -> Result<Option<Session>, StoreError>;

    /// Replace the current session with `session`.
    ///
    /// Either the full record is committed or the previous record is left
    /// untouched.
    fn write(&self, session: &Session) -> Result<(), StoreError>;

    /// Remove the persisted record entirely. Idempotent.
    fn destroy(&self) -> Result<(), StoreError>;
}
