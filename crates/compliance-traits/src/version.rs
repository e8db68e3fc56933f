//! Remote server version and the features gated on it.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Version information reported by the `/version` endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerVersion {
    /// API flavor the server reports (e.g. "compliance")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<String>,
    /// Server release version (e.g. "1.6.0")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ServerVersion {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            api: None,
            version: Some(version.into()),
        }
    }

    /// Parsed release number, if the server reported one.
    pub fn number(&self) -> Option<VersionNumber> {
        self.version.as_deref().and_then(VersionNumber::parse)
    }
}

/// Dotted release number (`major.minor.patch`, optional pre-release tag).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionNumber {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub prerelease: Option<String>,
}

impl VersionNumber {
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            prerelease: None,
        }
    }

    /// Parse a version string ("1.2.3", "1.2" or "1.2.3-beta.1").
    ///
    /// Missing minor/patch components count as zero.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let (version_part, prerelease) = match s.split_once('-') {
            Some((version, pre)) => (version, Some(pre.to_string())),
            None => (s, None),
        };

        let parts: Vec<&str> = version_part.split('.').collect();
        if parts.is_empty() || parts.len() > 3 {
            return None;
        }

        let component = |idx: usize| -> Option<u32> {
            match parts.get(idx) {
                Some(part) => part.parse().ok(),
                None => Some(0),
            }
        };

        Some(Self {
            major: component(0)?,
            minor: component(1)?,
            patch: component(2)?,
            prerelease,
        })
    }
}

impl Ord for VersionNumber {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.prerelease, &other.prerelease) {
                // Prerelease versions are lower than release versions
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
                (None, None) => Ordering::Equal,
            })
    }
}

impl PartialOrd for VersionNumber {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{pre}")?;
        }
        Ok(())
    }
}

/// Server capabilities that depend on the release the session logged into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// OpenID Connect login; the server drops tokens itself on sign-out.
    Oidc,
}

impl Feature {
    /// First server release that ships the feature.
    pub fn min_version(self) -> VersionNumber {
        match self {
            Feature::Oidc => VersionNumber::new(0, 16, 19),
        }
    }

    /// Whether a server at `version` supports this feature.
    ///
    /// An unknown or unparseable version never supports anything.
    pub fn supported_by(self, version: Option<&ServerVersion>) -> bool {
        version
            .and_then(ServerVersion::number)
            .is_some_and(|number| number >= self.min_version())
    }
}
