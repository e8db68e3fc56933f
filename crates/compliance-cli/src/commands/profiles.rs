use anyhow::{Result, bail};

use crate::output::table::{print_table, profiles_table};
use crate::output::{OutputFormat, json::print_json};
use crate::setup::Context;

pub async fn run(ctx: &Context, format: OutputFormat) -> Result<()> {
    let api = ctx.api()?;
    let listing = api.profiles().await?;

    if format.is_json() {
        print_json(&listing)?;
    } else if listing.profiles.is_empty() && listing.message.is_none() {
        println!("No profiles found.");
    } else if !listing.profiles.is_empty() {
        print_table(profiles_table(&listing.profiles))?;
    }

    if let Some(message) = listing.message {
        bail!(message);
    }
    Ok(())
}
