//! Test doubles shared by the orchestrator tests.

use async_trait::async_trait;
use compliance_traits::{
    Exchange, ExchangeRejected, ServerVersion, Session, SessionStore, StoreError, TokenExchanger,
};
use parking_lot::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Password { url: String, user: String },
    Refresh { url: String, refresh_token: String },
    Version { url: String },
    Revoke { url: String, token: String, basic_auth: bool },
}

/// Exchanger that records every call and answers from fixed settings.
pub struct RecordingExchanger {
    reject: bool,
    version: Option<ServerVersion>,
    calls: Mutex<Vec<Call>>,
}

impl RecordingExchanger {
    pub fn accepting() -> Self {
        Self {
            reject: false,
            version: Some(ServerVersion::new("1.6.2")),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn rejecting() -> Self {
        Self {
            reject: true,
            ..Self::accepting()
        }
    }

    pub fn with_version(mut self, version: Option<ServerVersion>) -> Self {
        self.version = version;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().push(call);
    }

    fn answer(&self, token: &str) -> Result<Exchange, ExchangeRejected> {
        if self.reject {
            return Err(ExchangeRejected(
                "Failed to authenticate to https://compliance.example.com/api\nResponse code: 401"
                    .into(),
            ));
        }
        Ok(Exchange {
            message: "Successfully fetched an API access token".into(),
            token: token.into(),
        })
    }
}

#[async_trait]
impl TokenExchanger for RecordingExchanger {
    async fn exchange_password(
        &self,
        url: &str,
        user: &str,
        _password: &str,
        _insecure: bool,
    ) -> Result<Exchange, ExchangeRejected> {
        self.record(Call::Password {
            url: url.into(),
            user: user.into(),
        });
        self.answer("minted-from-password")
    }

    async fn exchange_refresh_token(
        &self,
        url: &str,
        refresh_token: &str,
        _insecure: bool,
    ) -> Result<Exchange, ExchangeRejected> {
        self.record(Call::Refresh {
            url: url.into(),
            refresh_token: refresh_token.into(),
        });
        self.answer("minted-from-refresh")
    }

    async fn fetch_version(&self, url: &str, _insecure: bool) -> Option<ServerVersion> {
        self.record(Call::Version { url: url.into() });
        self.version.clone()
    }

    async fn revoke(&self, url: &str, token: &str, _insecure: bool, basic_auth: bool) {
        self.record(Call::Revoke {
            url: url.into(),
            token: token.into(),
            basic_auth,
        });
    }
}

/// Store whose mutations always fail; reads return a fixed value.
pub struct FailingStore {
    pub session: Option<Session>,
    pub corrupt: bool,
}

fn failure() -> StoreError {
    StoreError::io(
        "/readonly/session.json",
        std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only file system"),
    )
}

impl SessionStore for FailingStore {
    fn read(&self) -> Result<Option<Session>, StoreError> {
        if self.corrupt {
            return Err(failure());
        }
        Ok(self.session.clone())
    }

    fn write(&self, _session: &Session) -> Result<(), StoreError> {
        Err(failure())
    }

    fn destroy(&self) -> Result<(), StoreError> {
        Err(failure())
    }
}
