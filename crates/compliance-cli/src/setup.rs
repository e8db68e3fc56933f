//! CLI setup module
//!
//! Wires the file-backed session store and the HTTP exchanger together.

use anyhow::{Result, bail};
use compliance_core::{
    ComplianceApi, HttpClients, HttpExchanger, LoginOrchestrator, LogoutOrchestrator,
    active_session,
};
use compliance_storage::FileSessionStore;
use compliance_traits::{SessionStore, TokenExchanger};
use std::sync::Arc;

pub const NOT_LOGGED_IN: &str = "You need to login first with `compliance login`";

pub struct Context {
    store: Arc<dyn SessionStore>,
    clients: HttpClients,
    exchanger: Arc<dyn TokenExchanger>,
}

impl Context {
    pub fn prepare() -> Result<Self> {
        let store = FileSessionStore::open_default()?;
        tracing::debug!(path = %store.path().display(), "Using session store");
        let clients = HttpClients::new()?;
        let exchanger = Arc::new(HttpExchanger::new(clients.clone()));

        Ok(Self {
            store: Arc::new(store),
            clients,
            exchanger,
        })
    }

    pub fn store(&self) -> &dyn SessionStore {
        self.store.as_ref()
    }

    pub fn login(&self) -> LoginOrchestrator {
        LoginOrchestrator::new(self.store.clone(), self.exchanger.clone())
    }

    pub fn logout(&self) -> LogoutOrchestrator {
        LogoutOrchestrator::new(self.store.clone(), self.exchanger.clone())
    }

    /// API client for the stored session; fails when nobody is logged in.
    pub fn api(&self) -> Result<ComplianceApi> {
        let Some(session) = active_session(self.store()) else {
            bail!(NOT_LOGGED_IN);
        };
        Ok(ComplianceApi::new(
            session,
            self.clients.clone(),
            self.exchanger.clone(),
        ))
    }
}
