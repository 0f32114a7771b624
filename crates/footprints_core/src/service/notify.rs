//! New-submission notification seam.

use crate::model::submission::Submission;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyError(pub String);

impl Display for NotifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "notification failed: {}", self.0)
    }
}

impl Error for NotifyError {}

/// Told about every accepted submission so a moderator can review it.
pub trait SubmissionNotifier {
    fn notify_submitted(&self, submission: &Submission) -> Result<(), NotifyError>;
}

/// Emits a metadata-only log event. Message text is never logged.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl SubmissionNotifier for LogNotifier {
    fn notify_submitted(&self, submission: &Submission) -> Result<(), NotifyError> {
        info!(
            "event=submission_received module=notify status=ok submission_id={} emotion={} submission_status={} message_chars={}",
            submission.id,
            submission.emotion,
            submission.status,
            submission.message.chars().count()
        );
        Ok(())
    }
}

impl<N: SubmissionNotifier + ?Sized> SubmissionNotifier for &N {
    fn notify_submitted(&self, submission: &Submission) -> Result<(), NotifyError> {
        (**self).notify_submitted(submission)
    }
}
