//! Compliance Storage - Persistence for the active session
//!
//! The session is a singleton JSON document under the data directory:
//!
//! ```text
//! ~/.compliance/            (or $COMPLIANCE_DIR)
//!   session.json            (mode 0600)
//!   logs/compliance.log.*   (written by the CLI)
//! ```
//!
//! Writes go through a temporary file and a rename so readers never observe
//! a torn record.

pub mod file;
pub mod memory;
pub mod paths;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;
