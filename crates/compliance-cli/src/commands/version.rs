use anyhow::{Result, bail};
use serde_json::json;

use crate::output::{OutputFormat, json::print_json};
use crate::setup::Context;

pub async fn run(ctx: &Context, format: OutputFormat) -> Result<()> {
    let api = ctx.api()?;
    let version = api.version().await.and_then(|v| v.version);

    let Some(version) = version else {
        bail!("Could not determine server version.");
    };

    if format.is_json() {
        return print_json(&json!({ "version": version }));
    }
    println!("Server version: {version}");
    Ok(())
}
