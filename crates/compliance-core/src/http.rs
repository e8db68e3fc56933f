//! HTTP implementation of the token exchanger.

use async_trait::async_trait;
use compliance_traits::{Exchange, ExchangeRejected, ServerVersion, TokenExchanger};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::json;

const USER_AGENT: &str = concat!("compliance-cli/", env!("CARGO_PKG_VERSION"));

/// One client with certificate validation, one without.
#[derive(Debug, Clone)]
pub struct HttpClients {
    verified: Client,
    unverified: Client,
}

impl HttpClients {
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self {
            verified: build_client(false)?,
            unverified: build_client(true)?,
        })
    }

    pub fn get(&self, insecure: bool) -> &Client {
        if insecure {
            &self.unverified
        } else {
            &self.verified
        }
    }
}

fn build_client(insecure: bool) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(USER_AGENT)
        .danger_accept_invalid_certs(insecure)
        .build()
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
}

#[derive(Debug, Clone)]
pub struct HttpExchanger {
    clients: HttpClients,
}

impl HttpExchanger {
    pub fn new(clients: HttpClients) -> Self {
        Self { clients }
    }

    async fn post_login(
        &self,
        url: &str,
        body: serde_json::Value,
        insecure: bool,
    ) -> Result<String, ExchangeRejected> {
        let endpoint = format!("{url}/login");
        let response = self
            .clients
            .get(insecure)
            .post(&endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %endpoint, error = %e, "Login request failed");
                ExchangeRejected(format!("Failed to authenticate to {url}\nError: {e}"))
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            tracing::warn!(url = %endpoint, status = status.as_u16(), "Login rejected");
            return Err(rejection(url, status, &text));
        }

        response.text().await.map_err(|e| {
            tracing::warn!(url = %endpoint, error = %e, "Failed to read login response");
            ExchangeRejected(format!("Failed to authenticate to {url}\nError: {e}"))
        })
    }

    async fn get_version(&self, url: &str, insecure: bool) -> Result<ServerVersion, reqwest::Error> {
        self.clients
            .get(insecure)
            .get(format!("{url}/version"))
            .send()
            .await?
            .error_for_status()?
            .json::<ServerVersion>()
            .await
    }
}

fn rejection(url: &str, status: StatusCode, body: &str) -> ExchangeRejected {
    ExchangeRejected(format!(
        "Failed to authenticate to {url}\nResponse code: {}\nBody: {body}",
        status.as_u16()
    ))
}

#[async_trait]
impl TokenExchanger for HttpExchanger {
    async fn exchange_password(
        &self,
        url: &str,
        user: &str,
        password: &str,
        insecure: bool,
    ) -> Result<Exchange, ExchangeRejected> {
        let body = self
            .post_login(url, json!({ "userid": user, "password": password }), insecure)
            .await?;

        let token = body.trim();
        if token.is_empty() {
            tracing::warn!(server = %url, "Login answered without an access token");
            return Err(ExchangeRejected(format!(
                "Failed to authenticate to {url}\nError: the server returned no access token"
            )));
        }

        Ok(Exchange {
            message: "Successfully fetched an API access token valid for 12 hours".to_string(),
            token: token.to_string(),
        })
    }

    async fn exchange_refresh_token(
        &self,
        url: &str,
        refresh_token: &str,
        insecure: bool,
    ) -> Result<Exchange, ExchangeRejected> {
        let body = self
            .post_login(url, json!({ "token": refresh_token }), insecure)
            .await?;

        let parsed: RefreshResponse = serde_json::from_str(&body).map_err(|e| {
            ExchangeRejected(format!(
                "Failed to parse the access token returned by {url}: {e}"
            ))
        })?;

        if parsed.access_token.trim().is_empty() {
            tracing::warn!(server = %url, "Refresh answered without an access token");
            return Err(ExchangeRejected(format!(
                "Failed to authenticate to {url}\nError: the server returned no access token"
            )));
        }

        Ok(Exchange {
            message: "Successfully fetched an API access token".to_string(),
            token: parsed.access_token,
        })
    }

    async fn fetch_version(&self, url: &str, insecure: bool) -> Option<ServerVersion> {
        match self.get_version(url, insecure).await {
            Ok(version) => Some(version),
            Err(e) => {
                tracing::warn!(server = %url, error = %e, "Could not determine server version");
                None
            }
        }
    }

    async fn revoke(&self, url: &str, token: &str, insecure: bool, basic_auth: bool) {
        let request = self.clients.get(insecure).post(url);
        let request = if basic_auth {
            request.basic_auth(token, Some(""))
        } else {
            request.bearer_auth(token)
        };

        match request.send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(url = %url, "Token revoked");
            }
            Ok(response) => {
                tracing::warn!(url = %url, status = response.status().as_u16(), "Token revocation rejected");
            }
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "Token revocation failed");
            }
        }
    }
}
