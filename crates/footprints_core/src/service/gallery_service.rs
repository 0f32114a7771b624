//! Public gallery query use-case.
//!
//! # Invariants
//! - Only `approved` submissions are ever returned.
//! - Responses are cached per normalized query for the configured TTL.

use crate::config::GalleryConfig;
use crate::model::emotion::Emotion;
use crate::model::submission::{GalleryItem, Page, SubmissionStatus};
use crate::repo::submission_repo::{
    SearchScope, StatusFilter, SubmissionListQuery, SubmissionRepository,
};
use crate::service::cache::TtlCache;
use crate::service::clock::{Clock, SystemClock};
use crate::service::error::ServiceResult;
use log::debug;

/// Public gallery filters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GalleryQuery {
    /// Empty means every emotion.
    pub emotions: Vec<Emotion>,
    pub search: Option<String>,
    /// 1-based; defaults to 1.
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl GalleryQuery {
    /// Cache key with sorted parameters, so equivalent queries share an entry.
    pub fn cache_key(&self, page: u32, limit: u32) -> String {
        let mut emotions: Vec<&str> = self.emotions.iter().map(|e| e.as_str()).collect();
        emotions.sort_unstable();
        emotions.dedup();

        let mut params = Vec::new();
        if !emotions.is_empty() {
            params.push(format!("emotions={}", emotions.join(",")));
        }
        params.push(format!("limit={limit}"));
        params.push(format!("page={page}"));
        if let Some(search) = normalized_search(self.search.as_deref()) {
            params.push(format!("search={search}"));
        }
        format!("gallery:{}", params.join("&"))
    }
}

pub(crate) fn normalized_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_lowercase)
}

pub struct GalleryService<R, C = SystemClock> {
    repo: R,
    config: GalleryConfig,
    cache: TtlCache<String, Page<GalleryItem>, C>,
}

impl<R: SubmissionRepository> GalleryService<R> {
    pub fn new(repo: R, config: GalleryConfig) -> Self {
        Self::with_clock(repo, config, SystemClock)
    }
}

impl<R: SubmissionRepository, C: Clock> GalleryService<R, C> {
    pub fn with_clock(repo: R, config: GalleryConfig, clock: C) -> Self {
        let cache = TtlCache::new(config.cache_ttl_ms, clock);
        Self {
            repo,
            config,
            cache,
        }
    }

    /// Lists approved items, newest first.
    pub fn list(&mut self, query: &GalleryQuery) -> ServiceResult<Page<GalleryItem>> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = self.config.normalize_limit(query.limit);
        let key = query.cache_key(page, limit);

        if let Some(cached) = self.cache.get(&key) {
            debug!("event=gallery_list module=service status=ok cache=hit");
            return Ok(cached);
        }

        let list_query = SubmissionListQuery {
            status: StatusFilter::Only(SubmissionStatus::Approved),
            emotions: query.emotions.clone(),
            search: normalized_search(query.search.as_deref()),
            search_scope: SearchScope::MessageAndLocation,
            limit: Some(limit),
            offset: (page - 1).saturating_mul(limit),
        };
        let items: Vec<GalleryItem> = self
            .repo
            .list_submissions(&list_query)?
            .iter()
            .map(GalleryItem::from)
            .collect();
        let total = self.repo.count_submissions(&list_query)?;

        let result = Page::new(items, total, page, limit);
        debug!(
            "event=gallery_list module=service status=ok cache=miss items={} total={total}",
            result.items.len()
        );
        self.cache.insert(key, result.clone());
        Ok(result)
    }

    /// Drops cached pages, e.g. after a moderation decision.
    pub fn invalidate(&mut self) {
        self.cache.invalidate_all();
    }
}
