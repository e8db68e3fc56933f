//! Session precondition for commands that talk to the service.

use compliance_traits::{Session, SessionStore};

/// Whether a usable session exists.
///
/// Local check only: the stored token is not validated remotely. A record
/// that cannot be read counts as no session.
pub fn require_session(store: &dyn SessionStore) -> bool {
    active_session(store).is_some()
}

/// The current session if one with a configured server exists.
pub fn active_session(store: &dyn SessionStore) -> Option<Session> {
    match store.read() {
        Ok(session) => session.filter(Session::is_configured),
        Err(e) => {
            tracing::warn!(error = %e, "Ignoring unreadable session record");
            None
        }
    }
}
