//! In-memory session store for tests and embedding.

use compliance_traits::{Session, SessionStore, StoreError};
use parking_lot::Mutex;

#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `session`.
    pub fn with_session(session: Session) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn read(&self) -> Result<Option<Session>, StoreError> {
        Ok(self.session.lock().clone())
    }

    fn write(&self, session: &Session) -> Result<(), StoreError> {
        *self.session.lock() = Some(session.clone());
        Ok(())
    }

    fn destroy(&self) -> Result<(), StoreError> {
        self.session.lock().take();
        Ok(())
    }
}
