//! Service-layer error shared by submission, gallery and moderation use-cases.

use crate::model::submission::{SubmissionId, SubmissionValidationError};
use crate::repo::submission_repo::RepoError;
use crate::service::auth::AuthError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug)]
pub enum ServiceError {
    /// Input rejected before reaching storage.
    Validation(SubmissionValidationError),
    Unauthorized(AuthError),
    NotFound(SubmissionId),
    Repo(RepoError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Unauthorized(err) => write!(f, "unauthorized: {err}"),
            Self::NotFound(id) => write!(f, "submission not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Unauthorized(err) => Some(err),
            Self::NotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<SubmissionValidationError> for ServiceError {
    fn from(value: SubmissionValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<AuthError> for ServiceError {
    fn from(value: AuthError) -> Self {
        Self::Unauthorized(value)
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}
