//! Path utilities for data directory resolution.

use compliance_traits::StoreError;
use std::path::PathBuf;

const COMPLIANCE_DIR: &str = ".compliance";
const SESSION_FILE: &str = "session.json";
const LOG_DIR: &str = "logs";

/// Environment variable to override the data directory.
pub const COMPLIANCE_DIR_ENV: &str = "COMPLIANCE_DIR";

/// Resolve the data directory.
/// Priority: COMPLIANCE_DIR env var > ~/.compliance/
pub fn resolve_compliance_dir() -> Result<PathBuf, StoreError> {
    resolve_from(std::env::var(COMPLIANCE_DIR_ENV).ok(), dirs::home_dir())
}

fn resolve_from(env_dir: Option<String>, home: Option<PathBuf>) -> Result<PathBuf, StoreError> {
    if let Some(dir) = env_dir
        && !dir.trim().is_empty()
    {
        return Ok(PathBuf::from(dir));
    }
    home.map(|h| h.join(COMPLIANCE_DIR))
        .ok_or(StoreError::HomeDirUnavailable)
}

/// Get the session document path: ~/.compliance/session.json
pub fn session_path() -> Result<PathBuf, StoreError> {
    Ok(resolve_compliance_dir()?.join(SESSION_FILE))
}

/// Get the log directory: ~/.compliance/logs
pub fn log_dir() -> Result<PathBuf, StoreError> {
    Ok(resolve_compliance_dir()?.join(LOG_DIR))
}

/// Ensure the log directory exists and return its path.
pub fn ensure_log_dir() -> Result<PathBuf, StoreError> {
    let dir = log_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
    Ok(dir)
}
