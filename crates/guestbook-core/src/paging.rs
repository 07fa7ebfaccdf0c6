//! Pagination primitives shared by every list endpoint.

use serde::{Deserialize, Serialize};

/// Page size used when the client does not supply one.
pub const DEFAULT_PAGE_SIZE: u64 = 20;

/// Upper bound applied when the server config does not override it.
pub const DEFAULT_MAX_PAGE_SIZE: u64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

/// Client-supplied pagination request.
///
/// Pages are 1-based. The sort field is a plain string here; it is
/// resolved against a per-entity allow-list before it ever reaches a
/// query, and unknown fields are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Pager {
    pub page: u64,
    pub size: u64,
    pub sort_by: Option<String>,
    pub sort_dir: SortDirection,
}

impl Default for Pager {
    fn default() -> Self {
        Self {
            page: 1,
            size: DEFAULT_PAGE_SIZE,
            sort_by: None,
            sort_dir: SortDirection::Desc,
        }
    }
}

impl Pager {
    /// Effective page size, clamped to the configured maximum.
    pub fn limit(&self, max_size: u64) -> u64 {
        self.size.clamp(1, max_size.max(1))
    }

    /// Row offset for a 1-based page number.
    pub fn offset(&self, max_size: u64) -> u64 {
        (self.page.max(1) - 1) * self.limit(max_size)
    }
}

/// One page of records, echoing the filter that produced it.
///
/// `records` is always present; an empty page is an empty vec.
#[derive(Debug, Clone, Serialize)]
pub struct Page<F, T> {
    pub filter: F,
    #[serde(rename = "data")]
    pub records: Vec<T>,
}

impl<F, T> Page<F, T> {
    pub fn new(filter: F, records: Vec<T>) -> Self {
        Self { filter, records }
    }
}
