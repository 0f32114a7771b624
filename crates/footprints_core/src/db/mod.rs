//! Submission store: connection bootstrap, SQL helpers and schema migrations.
//!
//! # Responsibility
//! - Hand out connections that are migrated and carry the SQL helper functions.
//! - Report store problems with the schema version or migration they concern.
//!
//! # Invariants
//! - The store's schema version lives in `PRAGMA user_version`.
//! - Repositories never see a connection whose migrations failed.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub(crate) mod functions;
pub mod migrations;
mod open;

pub use functions::UNICODE_LOWER;
pub use open::{open_db, open_db_in_memory};

pub type DbResult<T> = Result<T, DbError>;

/// Failure while opening or upgrading the submission store.
#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    /// The file was written by a newer footprints build.
    SchemaTooNew { found: u32, supported: u32 },
    /// One migration script failed; the whole upgrade was rolled back.
    Migration {
        version: u32,
        name: &'static str,
        source: rusqlite::Error,
    },
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "submission store error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "submission store is at schema v{found}, this build only knows up to v{supported}"
            ),
            Self::Migration {
                version,
                name,
                source,
            } => write!(
                f,
                "submission store migration v{version} ({name}) failed: {source}"
            ),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) | Self::Migration { source: err, .. } => Some(err),
            Self::SchemaTooNew { .. } => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
