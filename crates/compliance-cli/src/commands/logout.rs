use anyhow::Result;
use compliance_core::logout::{LOGGED_OUT, LOGOUT_FAILED};

use crate::output::{OutputFormat, json::print_outcome};
use crate::setup::Context;

pub async fn run(ctx: &Context, format: OutputFormat) -> Result<()> {
    match ctx.logout().logout().await {
        Ok(()) => print_outcome(format, true, LOGGED_OUT),
        Err(e) => {
            tracing::error!(error = %e, "Logout failed");
            print_outcome(format, false, LOGOUT_FAILED)?;
            Err(e.into())
        }
    }
}
