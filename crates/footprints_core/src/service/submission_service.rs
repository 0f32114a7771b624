//! Submission intake use-case.
//!
//! # Responsibility
//! - Validate raw form input and persist a `pending` submission.
//! - Notify moderators about the new submission.
//!
//! # Invariants
//! - Only validated submissions reach the repository.
//! - A failed notification is logged and never fails the submission.

use crate::model::emotion::Emotion;
use crate::model::submission::{Submission, SubmissionValidationError};
use crate::repo::submission_repo::SubmissionRepository;
use crate::service::clock::{Clock, SystemClock};
use crate::service::error::ServiceResult;
use crate::service::notify::SubmissionNotifier;
use log::{error, info, warn};
use serde::{Deserialize, Serialize};

/// Raw submit-form payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionForm {
    pub message: String,
    pub emotion: String,
    pub location: String,
}

pub struct SubmissionService<R, N, C = SystemClock> {
    repo: R,
    notifier: N,
    clock: C,
}

impl<R: SubmissionRepository, N: SubmissionNotifier> SubmissionService<R, N> {
    pub fn new(repo: R, notifier: N) -> Self {
        Self::with_clock(repo, notifier, SystemClock)
    }
}

impl<R: SubmissionRepository, N: SubmissionNotifier, C: Clock> SubmissionService<R, N, C> {
    pub fn with_clock(repo: R, notifier: N, clock: C) -> Self {
        Self {
            repo,
            notifier,
            clock,
        }
    }

    /// Validates `form` and stores it as a pending submission.
    ///
    /// # Errors
    /// - `Validation` for blank/oversized fields or an unknown emotion.
    /// - `Repo` when persistence fails.
    pub fn submit(&self, form: &SubmissionForm) -> ServiceResult<Submission> {
        let emotion = Emotion::parse(&form.emotion)
            .ok_or_else(|| SubmissionValidationError::UnknownEmotion(form.emotion.trim().to_string()))?;
        let submission = Submission::new(
            &form.message,
            emotion,
            &form.location,
            self.clock.now_ms(),
        )?;

        if let Err(err) = self.repo.create_submission(&submission) {
            error!(
                "event=submission_create module=service status=error submission_id={} error={err}",
                submission.id
            );
            return Err(err.into());
        }
        info!(
            "event=submission_create module=service status=ok submission_id={} emotion={}",
            submission.id, submission.emotion
        );

        if let Err(err) = self.notifier.notify_submitted(&submission) {
            warn!(
                "event=submission_notify module=service status=error submission_id={} error={err}",
                submission.id
            );
        }

        Ok(submission)
    }
}
