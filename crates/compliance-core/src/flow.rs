//! Credential flow selection.
//!
//! Compliance inputs overlap, so the flows are an ordered rule table: each
//! rule either builds its flow from the inputs or passes, and the first rule
//! that builds wins. Empty strings count as absent.

use compliance_traits::TokenType;
use serde::Serialize;

use crate::error::InputError;

/// Options accepted by `login`
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub user: Option<String>,
    pub password: Option<String>,
    pub token: Option<String>,
    pub refresh_token: Option<String>,
}

/// Options accepted by `login-automate`
#[derive(Debug, Clone, Default)]
pub struct AutomateCredentials {
    pub user: Option<String>,
    pub ent: Option<String>,
    pub dctoken: Option<String>,
    pub usertoken: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowKind {
    Password,
    AccessToken,
    RefreshTokenUnverified,
    RefreshTokenVerified,
    Automate,
}

impl std::fmt::Display for FlowKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowKind::Password => write!(f, "password"),
            FlowKind::AccessToken => write!(f, "access_token"),
            FlowKind::RefreshTokenUnverified => write!(f, "refresh_token_unverified"),
            FlowKind::RefreshTokenVerified => write!(f, "refresh_token_verified"),
            FlowKind::Automate => write!(f, "automate"),
        }
    }
}

/// The one authentication path a login runs, with the inputs it needs.
#[derive(Clone, PartialEq, Eq)]
pub enum Flow {
    /// Exchange user + password for an access token
    Password { user: String, password: String },
    /// Store a user-supplied access token as is
    AccessToken { user: String, token: String },
    /// Store a refresh token without a verification round trip
    RefreshTokenUnverified { user: String, refresh_token: String },
    /// Exchange a refresh token for an access token right away
    RefreshTokenVerified { refresh_token: String },
    /// Store an Automate dctoken/usertoken verbatim
    Automate {
        user: String,
        ent: String,
        token: String,
        token_type: TokenType,
    },
}

impl Flow {
    pub fn kind(&self) -> FlowKind {
        match self {
            Flow::Password { .. } => FlowKind::Password,
            Flow::AccessToken { .. } => FlowKind::AccessToken,
            Flow::RefreshTokenUnverified { .. } => FlowKind::RefreshTokenUnverified,
            Flow::RefreshTokenVerified { .. } => FlowKind::RefreshTokenVerified,
            Flow::Automate { .. } => FlowKind::Automate,
        }
    }

    pub fn user(&self) -> Option<&str> {
        match self {
            Flow::Password { user, .. }
            | Flow::AccessToken { user, .. }
            | Flow::RefreshTokenUnverified { user, .. }
            | Flow::Automate { user, .. } => Some(user),
            Flow::RefreshTokenVerified { .. } => None,
        }
    }
}

// Secrets stay out of logs.
impl std::fmt::Debug for Flow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Flow")
            .field("kind", &self.kind())
            .field("user", &self.user())
            .finish_non_exhaustive()
    }
}

type Rule = fn(&Credentials) -> Option<Flow>;

/// Compliance flows in precedence order.
static RULES: [(FlowKind, Rule); 4] = [
    (FlowKind::Password, password_rule),
    (FlowKind::AccessToken, access_token_rule),
    (FlowKind::RefreshTokenUnverified, stored_refresh_rule),
    (FlowKind::RefreshTokenVerified, refresh_rule),
];

fn present(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_owned)
}

fn password_rule(c: &Credentials) -> Option<Flow> {
    Some(Flow::Password {
        user: present(&c.user)?,
        password: present(&c.password)?,
    })
}

fn access_token_rule(c: &Credentials) -> Option<Flow> {
    Some(Flow::AccessToken {
        user: present(&c.user)?,
        token: present(&c.token)?,
    })
}

fn stored_refresh_rule(c: &Credentials) -> Option<Flow> {
    Some(Flow::RefreshTokenUnverified {
        user: present(&c.user)?,
        refresh_token: present(&c.refresh_token)?,
    })
}

fn refresh_rule(c: &Credentials) -> Option<Flow> {
    Some(Flow::RefreshTokenVerified {
        refresh_token: present(&c.refresh_token)?,
    })
}

/// The order in which compliance flows are tried.
pub fn precedence() -> impl Iterator<Item = FlowKind> {
    RULES.iter().map(|(kind, _)| *kind)
}

/// Select the compliance flow for `credentials`.
pub fn select(credentials: &Credentials) -> Result<Flow, InputError> {
    RULES
        .iter()
        .find_map(|(_, rule)| rule(credentials))
        .ok_or_else(|| missing_flags(credentials))
}

fn missing_flags(c: &Credentials) -> InputError {
    if present(&c.user).is_some() {
        InputError::Missing("--password, --token or --refresh_token")
    } else if present(&c.password).is_some() || present(&c.token).is_some() {
        InputError::Missing("--user")
    } else {
        InputError::Missing(
            "--user and --password, --user and --token, --user and --refresh_token, or --refresh_token",
        )
    }
}

/// Select the Automate flow: user, enterprise and exactly one token kind.
pub fn select_automate(credentials: &AutomateCredentials) -> Result<Flow, InputError> {
    let user = present(&credentials.user).ok_or(InputError::Missing("--user"))?;
    let ent = present(&credentials.ent).ok_or(InputError::Missing("--ent"))?;

    let (token, token_type) = match (
        present(&credentials.dctoken),
        present(&credentials.usertoken),
    ) {
        (Some(token), None) => (token, TokenType::Dctoken),
        (None, Some(token)) => (token, TokenType::Usertoken),
        (Some(_), Some(_)) => {
            return Err(InputError::Conflict(
                "only one of --dctoken or --usertoken may be given",
            ));
        }
        (None, None) => return Err(InputError::Missing("--dctoken or --usertoken")),
    };

    Ok(Flow::Automate {
        user,
        ent,
        token,
        token_type,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds(
        user: Option<&str>,
        password: Option<&str>,
        token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> Credentials {
        Credentials {
            user: user.map(Into::into),
            password: password.map(Into::into),
            token: token.map(Into::into),
            refresh_token: refresh_token.map(Into::into),
        }
    }

    #[test]
    fn test_precedence_order() {
        let order: Vec<FlowKind> = precedence().collect();
        assert_eq!(
            order,
            vec![
                FlowKind::Password,
                FlowKind::AccessToken,
                FlowKind::RefreshTokenUnverified,
                FlowKind::RefreshTokenVerified,
            ]
        );
    }

    #[test]
    fn test_user_and_password_selects_password_flow() {
        let flow = select(&creds(Some("alice"), Some("secret"), None, None)).unwrap();
        assert_eq!(
            flow,
            Flow::Password {
                user: "alice".into(),
                password: "secret".into()
            }
        );
    }

    #[test]
    fn test_password_wins_over_every_token() {
        let flow = select(&creds(Some("alice"), Some("secret"), Some("t"), Some("r"))).unwrap();
        assert_eq!(flow.kind(), FlowKind::Password);
    }

    #[test]
    fn test_token_and_refresh_token_selects_access_token_flow() {
        let flow = select(&creds(Some("alice"), None, Some("t"), Some("r"))).unwrap();
        assert_eq!(
            flow,
            Flow::AccessToken {
                user: "alice".into(),
                token: "t".into()
            }
        );
    }

    #[test]
    fn test_user_and_refresh_token_is_unverified() {
        let flow = select(&creds(Some("alice"), None, None, Some("r"))).unwrap();
        assert_eq!(flow.kind(), FlowKind::RefreshTokenUnverified);
    }

    #[test]
    fn test_bare_refresh_token_is_verified() {
        let flow = select(&creds(None, None, None, Some("r"))).unwrap();
        assert_eq!(
            flow,
            Flow::RefreshTokenVerified {
                refresh_token: "r".into()
            }
        );
        assert_eq!(flow.user(), None);
    }

    #[test]
    fn test_token_without_user_is_input_error() {
        let err = select(&creds(None, None, Some("t"), None)).unwrap_err();
        assert_eq!(err, InputError::Missing("--user"));

        let err = select(&creds(None, Some("secret"), None, None)).unwrap_err();
        assert_eq!(err, InputError::Missing("--user"));
    }

    #[test]
    fn test_user_alone_names_missing_secret() {
        let err = select(&creds(Some("alice"), None, None, None)).unwrap_err();
        assert_eq!(
            err,
            InputError::Missing("--password, --token or --refresh_token")
        );
    }

    #[test]
    fn test_nothing_supplied() {
        let err = select(&Credentials::default()).unwrap_err();
        assert!(err.to_string().starts_with("missing --user and --password"));
    }

    #[test]
    fn test_empty_strings_are_absent() {
        let flow = select(&creds(Some("alice"), Some(""), Some("t"), None)).unwrap();
        assert_eq!(flow.kind(), FlowKind::AccessToken);

        assert!(select(&creds(Some(""), Some("secret"), None, None)).is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let flow = select(&creds(Some("alice"), Some("hunter2"), None, None)).unwrap();
        let debug = format!("{flow:?}");
        assert!(debug.contains("alice"));
        assert!(!debug.contains("hunter2"));
    }

    fn automate(
        user: Option<&str>,
        ent: Option<&str>,
        dctoken: Option<&str>,
        usertoken: Option<&str>,
    ) -> AutomateCredentials {
        AutomateCredentials {
            user: user.map(Into::into),
            ent: ent.map(Into::into),
            dctoken: dctoken.map(Into::into),
            usertoken: usertoken.map(Into::into),
        }
    }

    #[test]
    fn test_automate_dctoken() {
        let flow = select_automate(&automate(Some("alice"), Some("default"), Some("abc"), None))
            .unwrap();
        assert_eq!(
            flow,
            Flow::Automate {
                user: "alice".into(),
                ent: "default".into(),
                token: "abc".into(),
                token_type: TokenType::Dctoken,
            }
        );
    }

    #[test]
    fn test_automate_usertoken() {
        let flow = select_automate(&automate(Some("alice"), Some("default"), None, Some("u")))
            .unwrap();
        assert_eq!(flow.kind(), FlowKind::Automate);
        assert!(matches!(
            flow,
            Flow::Automate {
                token_type: TokenType::Usertoken,
                ..
            }
        ));
    }

    #[test]
    fn test_automate_input_errors() {
        assert_eq!(
            select_automate(&automate(None, Some("default"), Some("abc"), None)).unwrap_err(),
            InputError::Missing("--user")
        );
        assert_eq!(
            select_automate(&automate(Some("alice"), None, Some("abc"), None)).unwrap_err(),
            InputError::Missing("--ent")
        );
        assert_eq!(
            select_automate(&automate(Some("alice"), Some("default"), None, None)).unwrap_err(),
            InputError::Missing("--dctoken or --usertoken")
        );
        assert!(matches!(
            select_automate(&automate(Some("alice"), Some("default"), Some("a"), Some("b"))),
            Err(InputError::Conflict(_))
        ));
    }
}
