//! Remote credential exchange boundary.

use async_trait::async_trait;

use crate::version::ServerVersion;

/// A successful exchange: the minted access token and the server's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub message: String,
    pub token: String,
}

/// The remote service refused the credential. The message is surfaced verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ExchangeRejected(pub String);

/// Performs the network round trips login and logout depend on.
///
/// `url` is always the flavor's API base (e.g. `https://host/api`); endpoint
/// paths are appended by the implementation, except for [`revoke`] which
/// receives the full endpoint.
///
/// [`revoke`]: TokenExchanger::revoke
#[async_trait]
pub trait TokenExchanger: Send + Sync {
    /// Trade a username and password for an access token.
    async fn exchange_password(
        &self,
        url: &str,
        user: &str,
        password: &str,
        insecure: bool,
    ) -> Result<Exchange, ExchangeRejected>;

    /// Trade a refresh token for an access token.
    async fn exchange_refresh_token(
        &self,
        url: &str,
        refresh_token: &str,
        insecure: bool,
    ) -> Result<Exchange, ExchangeRejected>;

    /// Best-effort version lookup. Failures yield `None`.
    async fn fetch_version(&self, url: &str, insecure: bool) -> Option<ServerVersion>;

    /// Fire-and-forget token revocation. With `basic_auth` the token is sent
    /// as the basic-auth user, otherwise as a bearer token.
    async fn revoke(&self, url: &str, token: &str, insecure: bool, basic_auth: bool);
}
