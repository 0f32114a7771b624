//! Submission repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide create/get/list/count/status APIs over the `submissions` table.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - Write paths call `Submission::validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - List ordering is `created_at DESC, id ASC`.

use crate::db::migrations::{current_version, latest_version};
use crate::db::{functions, DbError, UNICODE_LOWER};
use crate::model::emotion::Emotion;
use crate::model::submission::{
    Submission, SubmissionId, SubmissionStatus, SubmissionValidationError,
};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const SUBMISSION_SELECT_SQL: &str = "SELECT
    id,
    message,
    emotion,
    location,
    status,
    created_at
FROM submissions";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for submission persistence and queries.
#[derive(Debug)]
pub enum RepoError {
    Validation(SubmissionValidationError),
    Db(DbError),
    NotFound(SubmissionId),
    InvalidData(String),
    /// Connection was not produced by `open_db*` or is on another schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "submission not found: {id}"),
            Self::InvalidData(message) => {
                write!(f, "invalid persisted submission data: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) | Self::UninitializedConnection { .. } => {
                None
            }
        }
    }
}

impl From<SubmissionValidationError> for RepoError {
    fn from(value: SubmissionValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Which moderation states a query returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(SubmissionStatus),
}

impl StatusFilter {
    /// Parses `all` or a status name.
    pub fn parse(value: &str) -> Option<Self> {
        if value.trim().eq_ignore_ascii_case("all") {
            return Some(Self::All);
        }
        SubmissionStatus::parse(value).map(Self::Only)
    }
}

/// Columns a free-text search looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchScope {
    /// Message and location (public gallery).
    #[default]
    MessageAndLocation,
    /// Message, location and emotion name (moderation).
    IncludeEmotion,
}

/// Filter and pagination options for listing submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionListQuery {
    pub status: StatusFilter,
    /// Empty means any emotion.
    pub emotions: Vec<Emotion>,
    /// Case-insensitive substring; blank is ignored.
    pub search: Option<String>,
    pub search_scope: SearchScope,
    pub limit: Option<u32>,
    pub offset: u32,
}

/// Repository interface for submission storage.
pub trait SubmissionRepository {
    fn create_submission(&self, submission: &Submission) -> RepoResult<SubmissionId>;
    fn get_submission(&self, id: SubmissionId) -> RepoResult<Option<Submission>>;
    fn list_submissions(&self, query: &SubmissionListQuery) -> RepoResult<Vec<Submission>>;
    /// Counts rows matching the filter part of `query`; pagination is ignored.
    fn count_submissions(&self, query: &SubmissionListQuery) -> RepoResult<u64>;
    fn set_status(&self, id: SubmissionId, status: SubmissionStatus) -> RepoResult<()>;
}

/// SQLite-backed submission repository.
pub struct SqliteSubmissionRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSubmissionRepository<'conn> {
    /// Wraps a connection that has all migrations applied and registers the SQL helpers on it.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version = current_version(conn)?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        // Connections migrated outside `open_db*` lack the search helper.
        functions::register(conn)?;
        Ok(Self { conn })
    }
}

impl SubmissionRepository for SqliteSubmissionRepository<'_> {
    fn create_submission(&self, submission: &Submission) -> RepoResult<SubmissionId> {
        submission.validate()?;

        self.conn.execute(
            "INSERT INTO submissions (
                id,
                message,
                emotion,
                location,
                status,
                created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                submission.id.to_string(),
                submission.message.as_str(),
                submission.emotion.as_str(),
                submission.location.as_str(),
                submission.status.as_str(),
                submission.created_at,
            ],
        )?;

        Ok(submission.id)
    }

    fn get_submission(&self, id: SubmissionId) -> RepoResult<Option<Submission>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SUBMISSION_SELECT_SQL} WHERE id = ?1;"))?;
        let row = stmt
            .query_row([id.to_string()], |row| Ok(parse_submission_row(row)))
            .optional()?;
        row.transpose()
    }

    fn list_submissions(&self, query: &SubmissionListQuery) -> RepoResult<Vec<Submission>> {
        let (where_sql, mut bind_values) = build_where_clause(query);
        let mut sql = format!("{SUBMISSION_SELECT_SQL}{where_sql} ORDER BY created_at DESC, id ASC");

        if let Some(limit) = query.limit {
            sql.push_str(" LIMIT ?");
            bind_values.push(Value::Integer(i64::from(limit)));
            if query.offset > 0 {
                sql.push_str(" OFFSET ?");
                bind_values.push(Value::Integer(i64::from(query.offset)));
            }
        } else if query.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            bind_values.push(Value::Integer(i64::from(query.offset)));
        }

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut submissions = Vec::new();
        while let Some(row) = rows.next()? {
            submissions.push(parse_submission_row(row)?);
        }

        Ok(submissions)
    }

    fn count_submissions(&self, query: &SubmissionListQuery) -> RepoResult<u64> {
        let (where_sql, bind_values) = build_where_clause(query);
        let count: i64 = self.conn.query_row(
            &format!("SELECT COUNT(*) FROM submissions{where_sql}"),
            params_from_iter(bind_values),
            |row| row.get(0),
        )?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative submission count {count}")))
    }

    fn set_status(&self, id: SubmissionId, status: SubmissionStatus) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE submissions
             SET
                status = ?1,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?2;",
            params![status.as_str(), id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn build_where_clause(query: &SubmissionListQuery) -> (String, Vec<Value>) {
    let mut sql = String::from(" WHERE 1 = 1");
    let mut bind_values = Vec::new();

    if let StatusFilter::Only(status) = query.status {
        sql.push_str(" AND status = ?");
        bind_values.push(Value::Text(status.as_str().to_string()));
    }

    if !query.emotions.is_empty() {
        let placeholders = vec!["?"; query.emotions.len()].join(", ");
        sql.push_str(&format!(" AND emotion IN ({placeholders})"));
        bind_values.extend(
            query
                .emotions
                .iter()
                .map(|emotion| Value::Text(emotion.as_str().to_string())),
        );
    }

    if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let mut columns = vec!["message", "location"];
        if query.search_scope == SearchScope::IncludeEmotion {
            columns.push("emotion");
        }
        let matches: Vec<String> = columns
            .iter()
            .map(|column| format!("instr({UNICODE_LOWER}({column}), ?) > 0"))
            .collect();
        sql.push_str(&format!(" AND ({})", matches.join(" OR ")));
        let needle = search.to_lowercase();
        bind_values.extend(columns.iter().map(|_| Value::Text(needle.clone())));
    }

    (sql, bind_values)
}

fn parse_submission_row(row: &Row<'_>) -> RepoResult<Submission> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in submissions.id"))
    })?;

    let emotion_text: String = row.get("emotion")?;
    let emotion = Emotion::parse(&emotion_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid emotion `{emotion_text}` in submissions.emotion"
        ))
    })?;

    let status_text: String = row.get("status")?;
    let status = SubmissionStatus::parse(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid status `{status_text}` in submissions.status"
        ))
    })?;

    let submission = Submission {
        id,
        message: row.get("message")?,
        emotion,
        location: row.get("location")?,
        status,
        created_at: row.get("created_at")?,
    };
    submission.validate().map_err(|err| {
        RepoError::InvalidData(format!("submission {id} violates invariants: {err}"))
    })?;
    Ok(submission)
}
