//! Login orchestration.
//!
//! Runs the selected [`Flow`], builds the complete session record and commits
//! it in a single store write. Nothing is written before every required
//! field is known, so a rejected exchange leaves the previous record intact.

use compliance_traits::{
    AutomateInfo, Flavor, ServerType, ServerVersion, Session, SessionStore, TokenExchanger,
};
use serde::Serialize;
use std::sync::Arc;

use crate::error::LoginError;
use crate::flow::{Flow, FlowKind};

pub const ACCESS_TOKEN_STORED: &str = "API access token stored";
pub const REFRESH_TOKEN_STORED: &str = "API refresh token stored";

const COMPLIANCE_API_PATH: &str = "/api";
const AUTOMATE_PROFILES_PATH: &str = "/compliance/profiles";

/// What a successful login stored
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub message: String,
    pub server: String,
    pub server_type: ServerType,
    pub flow: FlowKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// API base for the compliance flavor
pub fn compliance_url(server: &str) -> String {
    format!("{}{COMPLIANCE_API_PATH}", server.trim_end_matches('/'))
}

/// Profiles endpoint for the Automate flavor
pub fn automate_url(server: &str) -> String {
    format!("{}{AUTOMATE_PROFILES_PATH}", server.trim_end_matches('/'))
}

pub struct LoginOrchestrator {
    store: Arc<dyn SessionStore>,
    exchanger: Arc<dyn TokenExchanger>,
}

impl LoginOrchestrator {
    pub fn new(store: Arc<dyn SessionStore>, exchanger: Arc<dyn TokenExchanger>) -> Self {
        Self { store, exchanger }
    }

    pub async fn login(
        &self,
        server: &str,
        insecure: bool,
        flow: Flow,
    ) -> Result<SessionSummary, LoginError> {
        let kind = flow.kind();
        tracing::info!(flow = %kind, insecure, "Starting login");

        let (session, message) = match flow {
            Flow::Password { user, password } => {
                let url = compliance_url(server);
                let exchange = self
                    .exchanger
                    .exchange_password(&url, &user, &password, insecure)
                    .await
                    .inspect_err(|e| tracing::warn!(server = %url, error = %e, "Password exchange rejected"))?;
                let version = self.best_effort_version(&url, insecure).await;
                let session = compliance_session(url, insecure, Some(exchange.token), None)
                    .with_user(user)
                    .with_version(version);
                (session, exchange.message)
            }
            Flow::AccessToken { user, token } => {
                let url = compliance_url(server);
                let version = self.best_effort_version(&url, insecure).await;
                let session = compliance_session(url, insecure, Some(token), None)
                    .with_user(user)
                    .with_version(version);
                (session, ACCESS_TOKEN_STORED.to_string())
            }
            Flow::RefreshTokenUnverified {
                user,
                refresh_token,
            } => {
                // The refresh token is trusted as given; it is first exchanged
                // when a session-dependent command needs an access token.
                let url = compliance_url(server);
                let version = self.best_effort_version(&url, insecure).await;
                let session = compliance_session(url, insecure, None, Some(refresh_token))
                    .with_user(user)
                    .with_version(version);
                (session, REFRESH_TOKEN_STORED.to_string())
            }
            Flow::RefreshTokenVerified { refresh_token } => {
                let url = compliance_url(server);
                let exchange = self
                    .exchanger
                    .exchange_refresh_token(&url, &refresh_token, insecure)
                    .await
                    .inspect_err(|e| tracing::warn!(server = %url, error = %e, "Refresh token exchange rejected"))?;
                let version = self.best_effort_version(&url, insecure).await;
                let session = compliance_session(url, insecure, Some(exchange.token), None)
                    .with_version(version);
                (session, exchange.message)
            }
            Flow::Automate {
                user,
                ent,
                token,
                token_type,
            } => {
                let url = automate_url(server);
                let message = format!(
                    "Stored configuration for Chef Automate: '{url}' with user: '{user}', ent: '{ent}' and your {}",
                    token_type.description()
                );
                let flavor = Flavor::Automate {
                    token,
                    automate: AutomateInfo { ent, token_type },
                };
                (Session::new(url, insecure, flavor).with_user(user), message)
            }
        };

        self.store.write(&session)?;
        tracing::info!(
            server = %session.server,
            server_type = %session.server_type(),
            flow = %kind,
            "Session stored"
        );

        Ok(SessionSummary {
            message,
            server: session.server.clone(),
            server_type: session.server_type(),
            flow: kind,
            user: session.user.clone(),
        })
    }

    async fn best_effort_version(&self, url: &str, insecure: bool) -> Option<ServerVersion> {
        let version = self.exchanger.fetch_version(url, insecure).await;
        if version.is_none() {
            tracing::debug!(server = %url, "Continuing login without server version");
        }
        version
    }
}

fn compliance_session(
    url: String,
    insecure: bool,
    token: Option<String>,
    refresh_token: Option<String>,
) -> Session {
    Session::new(
        url,
        insecure,
        Flavor::Compliance {
            token,
            refresh_token,
        },
    )
}
