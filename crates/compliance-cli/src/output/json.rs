use anyhow::Result;
use serde::Serialize;
use serde_json::json;

use super::OutputFormat;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value)?;
    println!("{output}");
    Ok(())
}

/// Print a one-line outcome as text or as `{"success": .., "message": ..}`.
pub fn print_outcome(format: OutputFormat, success: bool, message: &str) -> Result<()> {
    if format.is_json() {
        return print_json(&json!({ "success": success, "message": message }));
    }
    if success {
        println!("{message}");
    } else {
        eprintln!("{message}");
    }
    Ok(())
}
