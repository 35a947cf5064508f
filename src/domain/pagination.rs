//! Page windows and next/previous metadata for list endpoints.

use serde::Serialize;

/// Page-size bounds applied when reading `page`/`limit` from a query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingDefaults {
    pub default_limit: u32,
    pub max_limit: u32,
}

impl Default for PagingDefaults {
    fn default() -> Self {
        Self {
            default_limit: 25,
            max_limit: 100,
        }
    }
}

/// A 1-based page number and a page size, both at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Builds a request, clamping zero values up to 1.
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    pub fn first(defaults: PagingDefaults) -> Self {
        Self::new(1, defaults.default_limit)
    }

    /// Reads raw `page`/`limit` values.
    ///
    /// Absent or non-numeric values fall back to page 1 and the default page
    /// size. Values below 1 are clamped to 1 and `limit` is capped at
    /// `defaults.max_limit`; the request never fails.
    pub fn from_params(page: Option<&str>, limit: Option<&str>, defaults: PagingDefaults) -> Self {
        let page = parse_number(page).map_or(1, |p| clamp_u32(p, 1, u32::MAX));

        let max_limit = defaults.max_limit.max(1);
        let limit = parse_number(limit).map_or(defaults.default_limit.clamp(1, max_limit), |l| {
            clamp_u32(l, 1, max_limit)
        });

        Self { page, limit }
    }

    /// Index of the first row on this page.
    pub fn start_index(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Index one past the last row on this page.
    pub fn end_index(&self) -> u64 {
        u64::from(self.page) * u64::from(self.limit)
    }
}

fn parse_number(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
}

fn clamp_u32(value: i64, min: u32, max: u32) -> u32 {
    value.clamp(i64::from(min), i64::from(max)) as u32
}

/// Pointer to a neighbouring page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageLink {
    pub page: u32,
    pub limit: u32,
}

/// `previous`/`next` links, each omitted when there is no such page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Pagination {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<PageLink>,
}

impl Pagination {
    /// Computes neighbour links for `request` given `total` matching rows.
    pub fn compute(total: u64, request: PageRequest) -> Self {
        let next = (request.end_index() < total).then(|| PageLink {
            page: request.page.saturating_add(1),
            limit: request.limit,
        });

        let previous = (request.start_index() > 0).then(|| PageLink {
            page: request.page - 1,
            limit: request.limit,
        });

        Self { next, previous }
    }
}

/// One page of results plus the total used to derive its links.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub request: PageRequest,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            request,
            pagination: Pagination::compute(total, request),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            request: self.request,
            pagination: self.pagination,
        }
    }
}
