//! File-backed session store.

use compliance_traits::{Session, SessionStore, StoreError};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::paths;

/// Singleton session document on disk.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store backed by an explicit file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location (`$COMPLIANCE_DIR/session.json`).
    pub fn open_default() -> Result<Self, StoreError> {
        Ok(Self::new(paths::session_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }

    fn write_temp(&self, temp_path: &Path, data: &[u8]) -> Result<(), StoreError> {
        let mut file = open_private(temp_path).map_err(|e| StoreError::io(temp_path, e))?;
        file.write_all(data)
            .and_then(|_| file.write_all(b"\n"))
            .and_then(|_| file.sync_all())
            .map_err(|e| StoreError::io(temp_path, e))
    }
}

/// Create `path` readable by the owner only before any byte is written.
fn open_private(path: &Path) -> std::io::Result<fs::File> {
    // A leftover temp file would keep its old mode.
    match fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(path)
}

impl SessionStore for FileSessionStore {
    fn read(&self) -> Result<Option<Session>, StoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        if content.trim().is_empty() {
            return Ok(None);
        }

        let session = serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: self.path.clone(),
            source,
        })?;
        Ok(Some(session))
    }

    fn write(&self, session: &Session) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }

        let data = serde_json::to_vec_pretty(session).map_err(StoreError::Serialize)?;
        let temp_path = self.temp_path();

        if let Err(e) = self.write_temp(&temp_path, &data) {
            let _ = fs::remove_file(&temp_path);
            return Err(e);
        }

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::io(&self.path, e));
        }

        tracing::debug!(path = %self.path.display(), "Session record written");
        Ok(())
    }

    fn destroy(&self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = %self.path.display(), "Session record removed");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }
}
