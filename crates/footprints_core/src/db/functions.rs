//! SQL helper functions registered on every store connection.
//!
//! SQLite's built-in `lower()` only folds ASCII letters, so "Ärger" would never
//! match a search for "ärger". Search filters go through [`UNICODE_LOWER`] instead.

use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

/// `unicode_lower(text)`: full Unicode lowercase; `NULL` stays `NULL`.
pub const UNICODE_LOWER: &str = "unicode_lower";

pub(crate) fn register(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        UNICODE_LOWER,
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| {
            let value: Option<String> = ctx.get(0)?;
            Ok(value.map(|text| text.to_lowercase()))
        },
    )
}
