//! Request counters and statistics snapshot

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// Lock-free request counters shared by concurrent callers
#[derive(Debug, Default)]
pub(crate) struct Counters {
    total_requests: AtomicU64,
    cache_hits: AtomicU64,
    template_matches: AtomicU64,
    no_matches: AtomicU64,
}

impl Counters {
    pub(crate) fn request(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn cache_hit(&self) {
        self.cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn outcome(&self, success: bool) {
        let counter = if success {
            &self.template_matches
        } else {
            &self.no_matches
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> (u64, u64, u64, u64) {
        (
            self.total_requests.load(Ordering::Relaxed),
            self.cache_hits.load(Ordering::Relaxed),
            self.template_matches.load(Ordering::Relaxed),
            self.no_matches.load(Ordering::Relaxed),
        )
    }
}

/// Service statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStats {
    /// Every call, including cache hits and errors
    pub total_requests: u64,
    /// Calls answered from the cache
    pub cache_hits: u64,
    /// Computed results that cleared their threshold
    pub template_matches: u64,
    /// Computed results below their threshold
    pub no_matches: u64,
    /// `cache_hits / total_requests`, e.g. `"50.0%"`
    pub cache_hit_rate: String,
    /// `template_matches / total_requests`, e.g. `"33.3%"`
    pub success_rate: String,
    /// Entries currently cached
    pub cache_size: u64,
    /// Dish categories, declaration order
    pub supported_categories: Vec<String>,
    /// Whole-name dish templates
    pub total_templates: usize,
}

/// Percentage with one decimal, `"0%"` when nothing was requested
#[allow(clippy::cast_precision_loss)]
pub(crate) fn percent(part: u64, total: u64) -> String {
    if total == 0 {
        return "0%".to_string();
    }
    format!("{:.1}%", part as f64 / total as f64 * 100.0)
}
