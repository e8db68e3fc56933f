//! Persisted session record.
//!
//! Exactly one session exists at a time. Fields that only make sense for one
//! backend flavor live inside [`Flavor`], so an Automate session can never
//! carry a refresh token and a compliance session never carries Automate
//! metadata. On disk the record is a flat JSON object keyed by
//! `server_type`.

use serde::{Deserialize, Serialize};

use crate::version::{Feature, ServerVersion};

/// Backend flavor a session targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServerType {
    Compliance,
    Automate,
}

impl std::fmt::Display for ServerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ServerType::Compliance => write!(f, "compliance"),
            ServerType::Automate => write!(f, "automate"),
        }
    }
}

/// Which kind of Automate token the user supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    /// Data collector token
    Dctoken,
    /// Per-user API token
    Usertoken,
}

impl TokenType {
    /// Human readable name used in confirmation messages
    pub fn description(self) -> &'static str {
        match self {
            TokenType::Dctoken => "data collector token",
            TokenType::Usertoken => "user token",
        }
    }
}

impl std::fmt::Display for TokenType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenType::Dctoken => write!(f, "dctoken"),
            TokenType::Usertoken => write!(f, "usertoken"),
        }
    }
}

/// Automate-only metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomateInfo {
    /// Enterprise name
    pub ent: String,
    pub token_type: TokenType,
}

/// Flavor-dependent part of the session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "server_type", rename_all = "snake_case")]
pub enum Flavor {
    Compliance {
        /// Access token valid for API requests
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<String>,
        /// Long-lived token used to mint access tokens
        #[serde(default, skip_serializing_if = "Option::is_none")]
        refresh_token: Option<String>,
    },
    Automate {
        /// Raw dctoken/usertoken, stored verbatim
        token: String,
        automate: AutomateInfo,
    },
}

/// The single active authenticated context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Base URL including the API path of the flavor
    pub server: String,
    #[serde(flatten)]
    pub flavor: Flavor,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Whether TLS certificate validation is disabled
    #[serde(default)]
    pub insecure: bool,
    /// Server version captured at login time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<ServerVersion>,
}

impl Session {
    pub fn new(server: impl Into<String>, insecure: bool, flavor: Flavor) -> Self {
        Self {
            server: server.into(),
            flavor,
            user: None,
            insecure,
            version: None,
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_version(mut self, version: Option<ServerVersion>) -> Self {
        self.version = version;
        self
    }

    pub fn server_type(&self) -> ServerType {
        match self.flavor {
            Flavor::Compliance { .. } => ServerType::Compliance,
            Flavor::Automate { .. } => ServerType::Automate,
        }
    }

    pub fn is_automate(&self) -> bool {
        self.server_type() == ServerType::Automate
    }

    /// Whether a server is configured at all
    pub fn is_configured(&self) -> bool {
        !self.server.trim().is_empty()
    }

    pub fn token(&self) -> Option<&str> {
        match &self.flavor {
            Flavor::Compliance { token, .. } => token.as_deref(),
            Flavor::Automate { token, .. } => Some(token),
        }
    }

    pub fn refresh_token(&self) -> Option<&str> {
        match &self.flavor {
            Flavor::Compliance { refresh_token, .. } => refresh_token.as_deref(),
            Flavor::Automate { .. } => None,
        }
    }

    pub fn automate(&self) -> Option<&AutomateInfo> {
        match &self.flavor {
            Flavor::Automate { automate, .. } => Some(automate),
            Flavor::Compliance { .. } => None,
        }
    }

    /// Whether the server behind this session supports `feature`.
    ///
    /// Version-gated features only exist on the compliance flavor.
    pub fn supports(&self, feature: Feature) -> bool {
        !self.is_automate() && feature.supported_by(self.version.as_ref())
    }

    /// Display-safe token (first and last four characters)
    pub fn masked_token(&self) -> Option<String> {
        self.token().or(self.refresh_token()).map(mask)
    }
}

fn mask(value: &str) -> String {
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}
