//! Moderation queue use-case.
//!
//! # Responsibility
//! - Gate access behind the admin password.
//! - List submissions by status with free-text search.
//! - Apply approve/reject decisions.
//!
//! # Invariants
//! - Every operation except `login` requires a `ModeratorToken`.
//! - Status changes drop every cached listing.

use crate::config::GalleryConfig;
use crate::model::submission::{Page, Submission, SubmissionId, SubmissionStatus};
use crate::repo::submission_repo::{
    SearchScope, StatusFilter, SubmissionListQuery, SubmissionRepository,
};
use crate::service::auth::{AdminGate, ModeratorToken};
use crate::service::cache::TtlCache;
use crate::service::clock::{Clock, SystemClock};
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::gallery_service::normalized_search;
use log::info;

/// Moderation listing filters. Defaults to the pending queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModerationQuery {
    pub status: StatusFilter,
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl Default for ModerationQuery {
    fn default() -> Self {
        Self {
            status: StatusFilter::Only(SubmissionStatus::Pending),
            search: None,
            page: None,
            limit: None,
        }
    }
}

impl ModerationQuery {
    fn cache_key(&self, page: u32, limit: u32) -> String {
        let status = match self.status {
            StatusFilter::All => "all",
            StatusFilter::Only(status) => status.as_str(),
        };
        let search = normalized_search(self.search.as_deref()).unwrap_or_default();
        format!("moderation:limit={limit}&page={page}&search={search}&status={status}")
    }
}

pub struct ModerationService<R, C = SystemClock> {
    repo: R,
    gate: AdminGate,
    config: GalleryConfig,
    cache: TtlCache<String, Page<Submission>, C>,
}

impl<R: SubmissionRepository> ModerationService<R> {
    pub fn new(repo: R, gate: AdminGate, config: GalleryConfig) -> Self {
        Self::with_clock(repo, gate, config, SystemClock)
    }
}

impl<R: SubmissionRepository, C: Clock> ModerationService<R, C> {
    pub fn with_clock(repo: R, gate: AdminGate, config: GalleryConfig, clock: C) -> Self {
        let cache = TtlCache::new(config.cache_ttl_ms, clock);
        Self {
            repo,
            gate,
            config,
            cache,
        }
    }

    /// Checks the moderator password.
    pub fn login(&self, password: &str) -> ServiceResult<ModeratorToken> {
        Ok(self.gate.verify(password)?)
    }

    /// Lists submissions for review, newest first.
    pub fn list(
        &mut self,
        _token: &ModeratorToken,
        query: &ModerationQuery,
    ) -> ServiceResult<Page<Submission>> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = self.config.normalize_limit(query.limit);
        let key = query.cache_key(page, limit);

        if let Some(cached) = self.cache.get(&key) {
            return Ok(cached);
        }

        let list_query = SubmissionListQuery {
            status: query.status,
            emotions: Vec::new(),
            search: normalized_search(query.search.as_deref()),
            search_scope: SearchScope::IncludeEmotion,
            limit: Some(limit),
            offset: (page - 1).saturating_mul(limit),
        };
        let items = self.repo.list_submissions(&list_query)?;
        let total = self.repo.count_submissions(&list_query)?;

        let result = Page::new(items, total, page, limit);
        self.cache.insert(key, result.clone());
        Ok(result)
    }

    /// Sets the moderation status and returns the updated record.
    pub fn set_status(
        &mut self,
        _token: &ModeratorToken,
        id: SubmissionId,
        status: SubmissionStatus,
    ) -> ServiceResult<Submission> {
        self.repo.set_status(id, status)?;
        self.cache.invalidate_all();

        let updated = self
            .repo
            .get_submission(id)?
            .ok_or(ServiceError::NotFound(id))?;
        info!(
            "event=submission_moderate module=service status=ok submission_id={id} new_status={status}"
        );
        Ok(updated)
    }
}
