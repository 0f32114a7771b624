//! Core domain logic for Footprints.
//! Submission intake, moderation, gallery paging and the wandering-dot stage.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod motion;
pub mod repo;
pub mod service;

pub use config::{ConfigError, FootprintsConfig, GalleryConfig, PlacementConfig};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, LoggingError};
pub use model::dot::{Dot, Position, Size};
pub use model::emotion::Emotion;
pub use model::submission::{
    GalleryItem, Page, Submission, SubmissionId, SubmissionStatus, SubmissionValidationError,
};
pub use motion::placement::{Placement, PlacementEngine, SafeArea};
pub use motion::relations::RelationshipRenderer;
pub use motion::stage::Stage;
pub use repo::submission_repo::{
    RepoError, RepoResult, SqliteSubmissionRepository, StatusFilter, SubmissionListQuery,
    SubmissionRepository,
};
pub use service::auth::{AdminGate, AuthError, ModeratorToken};
pub use service::error::{ServiceError, ServiceResult};
pub use service::gallery_service::{GalleryQuery, GalleryService};
pub use service::moderation_service::{ModerationQuery, ModerationService};
pub use service::submission_service::{SubmissionForm, SubmissionService};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
