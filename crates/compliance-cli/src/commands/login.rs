use anyhow::{Context as _, Result, anyhow};
use compliance_core::flow::{self, AutomateCredentials, Credentials};
use compliance_core::{Flow, SessionSummary};
use url::Url;

use crate::cli::{LoginArgs, LoginAutomateArgs};
use crate::config::CliConfig;
use crate::output::{OutputFormat, json::print_json};
use crate::setup::Context;

pub async fn run(
    ctx: &Context,
    config: &CliConfig,
    args: LoginArgs,
    format: OutputFormat,
) -> Result<()> {
    let server = resolve_server(config, args.server)?;
    let flow = flow::select(&Credentials {
        user: args.user,
        password: args.password,
        token: args.token,
        refresh_token: args.refresh_token,
    })?;

    login(ctx, &server, config.insecure(args.insecure), flow, format).await
}

pub async fn run_automate(
    ctx: &Context,
    config: &CliConfig,
    args: LoginAutomateArgs,
    format: OutputFormat,
) -> Result<()> {
    let server = resolve_server(config, args.server)?;
    let flow = flow::select_automate(&AutomateCredentials {
        user: args.user,
        ent: args.ent,
        dctoken: args.dctoken,
        usertoken: args.usertoken,
    })?;

    login(ctx, &server, config.insecure(args.insecure), flow, format).await
}

async fn login(
    ctx: &Context,
    server: &str,
    insecure: bool,
    flow: Flow,
    format: OutputFormat,
) -> Result<()> {
    let summary = ctx.login().login(server, insecure, flow).await?;
    print_summary(&summary, format)
}

fn print_summary(summary: &SessionSummary, format: OutputFormat) -> Result<()> {
    if format.is_json() {
        return print_json(summary);
    }
    println!("{}", summary.message);
    Ok(())
}

fn resolve_server(config: &CliConfig, arg: Option<String>) -> Result<String> {
    let server = config
        .server(arg)
        .ok_or_else(|| anyhow!("missing SERVER (pass it or set default.server in the config file)"))?;
    normalize_server(&server)
}

/// Validate the server URL and drop any trailing slash.
fn normalize_server(server: &str) -> Result<String> {
    let url = Url::parse(server.trim()).with_context(|| format!("invalid server URL '{server}'"))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(anyhow!(
            "invalid server URL '{server}': expected an http or https URL"
        ));
    }
    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_server() {
        assert_eq!(
            normalize_server("https://c.example.com/").unwrap(),
            "https://c.example.com"
        );
        assert_eq!(
            normalize_server(" https://a.example.com/base/ ").unwrap(),
            "https://a.example.com/base"
        );
        assert!(normalize_server("c.example.com").is_err());
        assert!(normalize_server("ftp://c.example.com").is_err());
    }

    #[test]
    fn test_server_falls_back_to_config() {
        let mut config = CliConfig::default();
        assert!(resolve_server(&config, None).is_err());

        config.default.server = Some("https://default.example.com".into());
        assert_eq!(
            resolve_server(&config, None).unwrap(),
            "https://default.example.com"
        );
    }
}
