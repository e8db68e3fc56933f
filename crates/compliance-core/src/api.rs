//! Operations that run against a live session.
//!
//! Callers obtain the session through [`crate::guard::active_session`] first;
//! nothing here checks whether a login happened.

use compliance_traits::{ServerVersion, Session, TokenExchanger, TokenType};
use reqwest::{RequestBuilder, StatusCode, multipart};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;

use crate::error::ApiError;
use crate::http::HttpClients;

const UNAUTHORIZED: &str = "401 Unauthorized. Please check your token.";

/// A compliance profile as listed by the server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub version: String,
    #[serde(default, alias = "owner")]
    pub owner_id: String,
}

impl Profile {
    pub fn id(&self) -> String {
        format!("{}/{}", self.owner_id, self.name)
    }
}

impl std::fmt::Display for Profile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{} ({})", self.title, self.version, self.id())
    }
}

/// Result of a profile listing. `message` is set when the server refused.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileListing {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub profiles: Vec<Profile>,
}

impl ProfileListing {
    fn refused(status: StatusCode) -> Self {
        Self {
            message: Some(status_message(status)),
            profiles: Vec::new(),
        }
    }
}

fn status_message(status: StatusCode) -> String {
    if status == StatusCode::UNAUTHORIZED {
        UNAUTHORIZED.to_string()
    } else {
        format!("An unexpected error occurred (HTTP {})", status.as_u16())
    }
}

pub struct ComplianceApi {
    session: Session,
    clients: HttpClients,
    exchanger: Arc<dyn TokenExchanger>,
}

impl ComplianceApi {
    pub fn new(session: Session, clients: HttpClients, exchanger: Arc<dyn TokenExchanger>) -> Self {
        Self {
            session,
            clients,
            exchanger,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn server(&self) -> &str {
        self.session.server.trim_end_matches('/')
    }

    /// Access token for the next request.
    ///
    /// A stored refresh token is exchanged every time; the minted access
    /// token is not written back to the session record.
    pub async fn access_token(&self) -> Result<String, ApiError> {
        if let Some(refresh_token) = self.session.refresh_token() {
            tracing::debug!(server = %self.server(), "Minting access token from refresh token");
            let exchange = self
                .exchanger
                .exchange_refresh_token(self.server(), refresh_token, self.session.insecure)
                .await
                .map_err(|e| ApiError::TokenRefresh(e.0))?;
            return Ok(exchange.token);
        }

        self.session
            .token()
            .map(str::to_owned)
            .ok_or(ApiError::MissingCredential("access token"))
    }

    pub async fn auth_headers(&self) -> Result<Vec<(&'static str, String)>, ApiError> {
        let Some(automate) = self.session.automate() else {
            let token = self.access_token().await?;
            return Ok(vec![("Authorization", format!("Bearer {token}"))]);
        };

        let token = self
            .session
            .token()
            .ok_or(ApiError::MissingCredential("token"))?
            .to_string();
        let mut headers = vec![("chef-delivery-enterprise", automate.ent.clone())];
        match automate.token_type {
            TokenType::Dctoken => headers.push(("x-data-collector-token", token)),
            TokenType::Usertoken => {
                headers.push(("chef-delivery-user", self.user()?.to_string()));
                headers.push(("chef-delivery-token", token));
            }
        }
        Ok(headers)
    }

    fn user(&self) -> Result<&str, ApiError> {
        self.session
            .user
            .as_deref()
            .ok_or(ApiError::MissingCredential("user"))
    }

    async fn request(&self, builder: RequestBuilder) -> Result<RequestBuilder, ApiError> {
        let headers = self.auth_headers().await?;
        Ok(headers
            .into_iter()
            .fold(builder, |builder, (name, value)| builder.header(name, value)))
    }

    pub async fn profiles(&self) -> Result<ProfileListing, ApiError> {
        let url = if self.session.is_automate() {
            format!("{}/{}", self.server(), self.user()?)
        } else {
            format!("{}/user/compliance", self.server())
        };

        let client = self.clients.get(self.session.insecure);
        let response = self.request(client.get(&url)).await?.send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %url, status = status.as_u16(), "Profile listing refused");
            return Ok(ProfileListing::refused(status));
        }

        let body: Value = response.json().await?;
        let mut profiles = if self.session.is_automate() {
            let owner = self.user()?;
            parse_automate_profiles(body, owner)
        } else {
            parse_compliance_profiles(body)
        };
        profiles.sort_by(|a, b| a.name.cmp(&b.name));
        tracing::debug!(count = profiles.len(), "Listed profiles");

        Ok(ProfileListing {
            message: None,
            profiles,
        })
    }

    pub async fn version(&self) -> Option<ServerVersion> {
        self.exchanger
            .fetch_version(self.server(), self.session.insecure)
            .await
    }

    /// Upload an already packaged profile archive.
    pub async fn upload(&self, archive: &Path, name: Option<&str>) -> Result<String, ApiError> {
        if !archive.is_file() {
            return Err(ApiError::InvalidArchive(format!(
                "{} does not exist",
                archive.display()
            )));
        }
        let name = match name {
            Some(name) => name.to_string(),
            None => profile_name(archive)?,
        };
        let owner = self.user()?.to_string();
        let bytes = tokio::fs::read(archive).await?;
        let client = self.clients.get(self.session.insecure);

        let builder = if self.session.is_automate() {
            let file_name = archive
                .file_name()
                .map(|f| f.to_string_lossy().into_owned())
                .unwrap_or_else(|| format!("{name}.tar.gz"));
            let part = multipart::Part::bytes(bytes).file_name(file_name);
            client
                .post(format!("{}/{owner}", self.server()))
                .multipart(multipart::Form::new().part("file", part))
        } else {
            client
                .post(format!(
                    "{}/owners/{owner}/compliance/{name}/tar",
                    self.server()
                ))
                .body(bytes)
        };

        let response = self.request(builder).await?.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), profile = %name, "Upload rejected");
            let message = if body.trim().is_empty() {
                status_message(status)
            } else {
                body
            };
            return Err(ApiError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        tracing::info!(owner = %owner, profile = %name, "Profile uploaded");
        Ok(format!("Successfully uploaded profile {owner}/{name}"))
    }
}

/// Profile name derived from the archive file name.
fn profile_name(archive: &Path) -> Result<String, ApiError> {
    let file_name = archive
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    let stem = [".tar.gz", ".tgz", ".zip"]
        .iter()
        .find_map(|ext| file_name.strip_suffix(ext))
        .unwrap_or(&file_name);
    if stem.is_empty() {
        return Err(ApiError::InvalidArchive(format!(
            "cannot derive a profile name from {}",
            archive.display()
        )));
    }
    Ok(stem.to_string())
}

// Listing is keyed by owner, then by profile name; older servers answer
// with an array per owner.
fn parse_compliance_profiles(body: Value) -> Vec<Profile> {
    let Value::Object(owners) = body else {
        return Vec::new();
    };

    let mut profiles = Vec::new();
    for (owner, entries) in owners {
        let entries: Vec<(Option<String>, Value)> = match entries {
            Value::Object(map) => map.into_iter().map(|(k, v)| (Some(k), v)).collect(),
            Value::Array(items) => items.into_iter().map(|v| (None, v)).collect(),
            _ => continue,
        };
        for (key, value) in entries {
            let Ok(mut profile) = serde_json::from_value::<Profile>(value) else {
                continue;
            };
            if profile.owner_id.is_empty() {
                profile.owner_id = owner.clone();
            }
            if let (true, Some(key)) = (profile.name.is_empty(), key) {
                profile.name = key;
            }
            profiles.push(profile);
        }
    }
    profiles
}

fn parse_automate_profiles(body: Value, owner: &str) -> Vec<Profile> {
    let Value::Array(items) = body else {
        return Vec::new();
    };
    items
        .into_iter()
        .filter_map(|value| serde_json::from_value::<Profile>(value).ok())
        .map(|mut profile| {
            profile.owner_id = owner.to_string();
            profile
        })
        .collect()
}
