//! Submission domain model.
//!
//! # Responsibility
//! - Define the persisted record for one visitor footprint.
//! - Define the public gallery projection and paging envelope.
//!
//! # Invariants
//! - `id` is a non-nil UUID and never reused.
//! - `message` is 1..=128 characters after trimming.
//! - `location` is 1..=64 characters after trimming.
//! - New submissions always start as `pending`.

use crate::model::emotion::Emotion;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Maximum message length in characters.
pub const MAX_MESSAGE_CHARS: usize = 128;
/// Maximum location length in characters.
pub const MAX_LOCATION_CHARS: usize = 64;

/// Stable identifier for one submission.
pub type SubmissionId = Uuid;

/// Moderation state of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Waiting for a moderator.
    Pending,
    /// Visible in the public gallery.
    Approved,
    /// Hidden permanently.
    Rejected,
}

impl SubmissionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }
}

impl Display for SubmissionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for submission invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionValidationError {
    NilId,
    EmptyMessage,
    MessageTooLong { chars: usize },
    EmptyLocation,
    LocationTooLong { chars: usize },
    UnknownEmotion(String),
}

impl Display for SubmissionValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "submission id must not be nil"),
            Self::EmptyMessage => write!(f, "message must not be empty"),
            Self::MessageTooLong { chars } => write!(
                f,
                "message has {chars} characters; at most {MAX_MESSAGE_CHARS} allowed"
            ),
            Self::EmptyLocation => write!(f, "location must not be empty"),
            Self::LocationTooLong { chars } => write!(
                f,
                "location has {chars} characters; at most {MAX_LOCATION_CHARS} allowed"
            ),
            Self::UnknownEmotion(value) => write!(f, "unknown emotion `{value}`"),
        }
    }
}

impl Error for SubmissionValidationError {}

/// Persisted footprint submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SubmissionRecord")]
pub struct Submission {
    pub id: SubmissionId,
    /// Trimmed message text.
    pub message: String,
    pub emotion: Emotion,
    /// Trimmed free-text location. Matching elsewhere is exact, so this is not case-folded.
    pub location: String,
    pub status: SubmissionStatus,
    /// Unix epoch milliseconds.
    pub created_at: i64,
}

impl Submission {
    /// Creates a pending submission with a generated id.
    ///
    /// Message and location are trimmed before validation.
    pub fn new(
        message: &str,
        emotion: Emotion,
        location: &str,
        created_at: i64,
    ) -> Result<Self, SubmissionValidationError> {
        Self::with_id(Uuid::new_v4(), message, emotion, location, created_at)
    }

    /// Creates a pending submission with a caller-provided id.
    pub fn with_id(
        id: SubmissionId,
        message: &str,
        emotion: Emotion,
        location: &str,
        created_at: i64,
    ) -> Result<Self, SubmissionValidationError> {
        let submission = Self {
            id,
            message: message.trim().to_string(),
            emotion,
            location: location.trim().to_string(),
            status: SubmissionStatus::Pending,
            created_at,
        };
        submission.validate()?;
        Ok(submission)
    }

    /// Checks the record invariants without modifying it.
    pub fn validate(&self) -> Result<(), SubmissionValidationError> {
        if self.id.is_nil() {
            return Err(SubmissionValidationError::NilId);
        }

        let message = self.message.trim();
        if message.is_empty() {
            return Err(SubmissionValidationError::EmptyMessage);
        }
        let chars = message.chars().count();
        if chars > MAX_MESSAGE_CHARS {
            return Err(SubmissionValidationError::MessageTooLong { chars });
        }

        let location = self.location.trim();
        if location.is_empty() {
            return Err(SubmissionValidationError::EmptyLocation);
        }
        let chars = location.chars().count();
        if chars > MAX_LOCATION_CHARS {
            return Err(SubmissionValidationError::LocationTooLong { chars });
        }

        Ok(())
    }

    pub fn is_public(&self) -> bool {
        self.status == SubmissionStatus::Approved
    }
}

#[derive(Deserialize)]
struct SubmissionRecord {
    id: SubmissionId,
    message: String,
    emotion: Emotion,
    location: String,
    status: SubmissionStatus,
    created_at: i64,
}

impl TryFrom<SubmissionRecord> for Submission {
    type Error = SubmissionValidationError;

    fn try_from(value: SubmissionRecord) -> Result<Self, Self::Error> {
        let submission = Self {
            id: value.id,
            message: value.message,
            emotion: value.emotion,
            location: value.location,
            status: value.status,
            created_at: value.created_at,
        };
        submission.validate()?;
        Ok(submission)
    }
}

/// Public projection of an approved submission.
///
/// Tags are optional because locally generated placeholder items may lack them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    pub id: String,
    pub message: String,
    pub emotion: Option<Emotion>,
    pub location: Option<String>,
    pub created_at: i64,
}

impl From<&Submission> for GalleryItem {
    fn from(value: &Submission) -> Self {
        Self {
            id: value.id.to_string(),
            message: value.message.clone(),
            emotion: Some(value.emotion),
            location: Some(value.location.clone()),
            created_at: value.created_at,
        }
    }
}

/// One page of results plus totals for pagination controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    /// 1-based page number.
    pub page: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, page: u32, limit: u32) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            u32::try_from(total.div_ceil(u64::from(limit))).unwrap_or(u32::MAX)
        };
        Self {
            items,
            total,
            page,
            total_pages,
        }
    }
}
