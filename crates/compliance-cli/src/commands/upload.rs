use anyhow::Result;

use crate::cli::UploadArgs;
use crate::output::{OutputFormat, json::print_outcome};
use crate::setup::Context;

pub async fn run(ctx: &Context, args: UploadArgs, format: OutputFormat) -> Result<()> {
    let api = ctx.api()?;
    let message = api.upload(&args.archive, args.name.as_deref()).await?;
    print_outcome(format, true, &message)
}
