//! Logout orchestration.
//!
//! Remote revocation is best effort and only applies to compliance servers
//! that predate oidc. Local state is cleared no matter what happened
//! remotely.

use compliance_traits::{Feature, Session, SessionStore, TokenExchanger};
use std::sync::Arc;

use crate::error::LogoutError;

pub const LOGGED_OUT: &str = "Successfully logged out";
pub const LOGOUT_FAILED: &str = "Could not log out";

pub struct LogoutOrchestrator {
    store: Arc<dyn SessionStore>,
    exchanger: Arc<dyn TokenExchanger>,
}

impl LogoutOrchestrator {
    pub fn new(store: Arc<dyn SessionStore>, exchanger: Arc<dyn TokenExchanger>) -> Self {
        Self { store, exchanger }
    }

    pub async fn logout(&self) -> Result<(), LogoutError> {
        let session = self.store.read().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Session record unreadable, clearing it anyway");
            None
        });

        if let Some(session) = &session {
            self.revoke_if_required(session).await;
        }

        self.store.destroy().inspect_err(|e| {
            tracing::error!(error = %e, "Failed to clear session record");
        })?;
        tracing::info!("Session cleared");
        Ok(())
    }

    async fn revoke_if_required(&self, session: &Session) {
        let oidc = session.supports(Feature::Oidc);
        if session.is_automate() || oidc {
            tracing::debug!(
                server_type = %session.server_type(),
                oidc,
                "Skipping remote revocation"
            );
            return;
        }

        let Some(token) = session.token() else {
            tracing::debug!("No access token to revoke");
            return;
        };

        let url = format!("{}/logout", session.server.trim_end_matches('/'));
        // Pre-oidc servers only accept the token as a basic-auth user.
        self.exchanger.revoke(&url, token, session.insecure, true).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guard::require_session;
    use crate::testing::{Call, FailingStore, RecordingExchanger};
    use compliance_storage::MemorySessionStore;
    use compliance_traits::{AutomateInfo, Flavor, ServerVersion, TokenType};

    fn compliance(token: Option<&str>, version: Option<&str>) -> Session {
        Session::new(
            "https://c.example.com/api",
            false,
            Flavor::Compliance {
                token: token.map(Into::into),
                refresh_token: Some("refresh-1".into()),
            },
        )
        .with_user("alice")
        .with_version(version.map(ServerVersion::new))
    }

    async fn run(session: Option<Session>) -> (Arc<MemorySessionStore>, Vec<Call>) {
        let store = Arc::new(match session {
            Some(session) => MemorySessionStore::with_session(session),
            None => MemorySessionStore::new(),
        });
        let exchanger = Arc::new(RecordingExchanger::accepting());
        LogoutOrchestrator::new(store.clone(), exchanger.clone())
            .logout()
            .await
            .unwrap();
        (store, exchanger.calls())
    }

    #[tokio::test]
    async fn test_old_server_revokes_with_basic_auth() {
        let (store, calls) = run(Some(compliance(Some("access-1"), Some("0.16.0")))).await;

        assert_eq!(
            calls,
            vec![Call::Revoke {
                url: "https://c.example.com/api/logout".into(),
                token: "access-1".into(),
                basic_auth: true,
            }]
        );
        assert!(store.read().unwrap().is_none());
        assert!(!require_session(store.as_ref()));
    }

    #[tokio::test]
    async fn test_unknown_version_revokes() {
        let (_, calls) = run(Some(compliance(Some("access-1"), None))).await;
        assert_eq!(calls.len(), 1);
    }

    #[tokio::test]
    async fn test_oidc_server_skips_revocation() {
        let (store, calls) = run(Some(compliance(Some("access-1"), Some("1.6.2")))).await;
        assert!(calls.is_empty());
        assert!(store.read().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_refresh_only_session_skips_revocation() {
        let (store, calls) = run(Some(compliance(None, Some("0.16.0")))).await;
        assert!(calls.is_empty());
        assert!(store.read().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_automate_session_skips_revocation() {
        let session = Session::new(
            "https://a.example.com/compliance/profiles",
            false,
            Flavor::Automate {
                token: "abc".into(),
                automate: AutomateInfo {
                    ent: "default".into(),
                    token_type: TokenType::Dctoken,
                },
            },
        )
        .with_user("alice");

        let (store, calls) = run(Some(session)).await;
        assert!(calls.is_empty());
        assert!(store.read().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_no_session_is_ok() {
        let (store, calls) = run(None).await;
        assert!(calls.is_empty());
        assert!(store.read().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_logout_twice() {
        let store = Arc::new(MemorySessionStore::with_session(compliance(
            Some("access-1"),
            None,
        )));
        let logout =
            LogoutOrchestrator::new(store.clone(), Arc::new(RecordingExchanger::accepting()));

        logout.logout().await.unwrap();
        logout.logout().await.unwrap();
        assert!(store.read().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_destroy_failure_is_reported_after_revocation() {
        let exchanger = Arc::new(RecordingExchanger::accepting());
        let store = Arc::new(FailingStore {
            session: Some(compliance(Some("access-1"), Some("0.1.0"))),
            corrupt: false,
        });

        let err = LogoutOrchestrator::new(store, exchanger.clone())
            .logout()
            .await
            .unwrap_err();
        assert!(matches!(err, LogoutError::Persistence(_)));
        assert_eq!(exchanger.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_record_still_attempts_destroy() {
        let exchanger = Arc::new(RecordingExchanger::accepting());
        let store = Arc::new(FailingStore {
            session: None,
            corrupt: true,
        });

        let result = LogoutOrchestrator::new(store, exchanger.clone())
            .logout()
            .await;
        assert!(result.is_err());
        assert!(exchanger.calls().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_cleared() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "garbage").unwrap();

        let store = Arc::new(compliance_storage::FileSessionStore::new(path.clone()));
        LogoutOrchestrator::new(store, Arc::new(RecordingExchanger::accepting()))
            .logout()
            .await
            .unwrap();
        assert!(!path.exists());
    }
}
