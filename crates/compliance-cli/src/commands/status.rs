use anyhow::{Result, bail};
use compliance_core::active_session;
use compliance_traits::{Feature, Session};
use serde_json::json;

use crate::output::table::{details_table, print_table};
use crate::output::{OutputFormat, json::print_json};
use crate::setup::{Context, NOT_LOGGED_IN};

pub async fn run(ctx: &Context, format: OutputFormat) -> Result<()> {
    let Some(session) = active_session(ctx.store()) else {
        bail!(NOT_LOGGED_IN);
    };

    if format.is_json() {
        return print_json(&json!({
            "server": session.server,
            "server_type": session.server_type(),
            "user": session.user,
            "insecure": session.insecure,
            "token": session.masked_token(),
            "version": session.version.as_ref().and_then(|v| v.version.clone()),
            "oidc": session.supports(Feature::Oidc),
        }));
    }

    print_table(details_table(&rows(&session)))
}

fn rows(session: &Session) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("Server", session.server.clone()),
        ("Type", session.server_type().to_string()),
        ("User", session.user.clone().unwrap_or_else(|| "-".into())),
    ];
    if let Some(automate) = session.automate() {
        rows.push(("Enterprise", automate.ent.clone()));
        rows.push(("Token type", automate.token_type.to_string()));
    }
    let token_label = if session.token().is_none() && session.refresh_token().is_some() {
        "Refresh token"
    } else {
        "Token"
    };
    rows.push((
        token_label,
        session.masked_token().unwrap_or_else(|| "-".into()),
    ));
    if let Some(version) = session.version.as_ref().and_then(|v| v.version.clone()) {
        rows.push(("Server version", version));
    }
    if session.insecure {
        rows.push(("TLS", "verification disabled".into()));
    }
    rows
}
