//! List view query: search, status filter, sort and pagination
//!
//! Runs in memory over the full list fetched from the store.

use serde::{Deserialize, Serialize};

use crate::models::{Reservation, ReservationStatus};

/// Rows per page in the reservation list
pub const PAGE_SIZE: u32 = 6;

/// Status filter of the list view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ReservationStatus),
}

impl StatusFilter {
    /// Unknown values fall back to [`StatusFilter::All`]
    pub fn parse(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .and_then(|s| s.parse::<ReservationStatus>().ok())
            .map_or(Self::All, Self::Only)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }

    pub fn matches(&self, status: ReservationStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

/// Query string of the list page (`?q=&status=&page=`)
///
/// Everything is kept as text so malformed values degrade to defaults
/// instead of rejecting the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListQuery {
    pub q: Option<String>,
    pub status: Option<String>,
    pub page: Option<String>,
}

impl ListQuery {
    /// Trimmed, lowercased search term; empty when absent
    pub fn search(&self) -> String {
        self.q
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .unwrap_or_default()
    }

    pub fn status_filter(&self) -> StatusFilter {
        StatusFilter::parse(self.status.as_deref())
    }

    /// Requested page, at least 1
    pub fn requested_page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .unwrap_or(1)
            .max(1)
    }

    /// Filter, sort by `reserved_at` ascending and cut out the requested page.
    ///
    /// The page number is clamped into `[1, total_pages]`.
    pub fn apply(&self, reservations: Vec<Reservation>) -> PaginatedResponse<Reservation> {
        let needle = self.search();
        let filter = self.status_filter();

        let mut matched: Vec<Reservation> = reservations
            .into_iter()
            .filter(|r| filter.matches(r.status))
            .filter(|r| {
                needle.is_empty()
                    || r.customer_name.to_lowercase().contains(&needle)
                    || r.phone.to_lowercase().contains(&needle)
            })
            .collect();
        matched.sort_by_key(|r| r.reserved_at);

        PaginatedResponse::paginate(matched, self.requested_page(), PAGE_SIZE)
    }
}

/// One page of a list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    /// Rows on this page
    pub data: Vec<T>,
    /// Rows across all pages
    pub total: u64,
    /// Current page, 1-based
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Always at least 1
    pub total_pages: u32,
}

impl<T> PaginatedResponse<T> {
    /// Slice `rows` into the given page, clamping the page number.
    pub fn paginate(rows: Vec<T>, page: u32, limit: u32) -> Self {
        let limit = limit.max(1);
        let total = rows.len() as u64;
        let total_pages = total.div_ceil(u64::from(limit)).max(1) as u32;
        let page = page.clamp(1, total_pages);
        let skip = ((page - 1) * limit) as usize;

        let data = rows.into_iter().skip(skip).take(limit as usize).collect();

        Self {
            data,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// 1-based index of the first row on this page, 0 when empty
    pub fn first_index(&self) -> u64 {
        if self.total == 0 {
            0
        } else {
            u64::from(self.page - 1) * u64::from(self.limit) + 1
        }
    }

    /// 1-based index of the last row on this page
    pub fn last_index(&self) -> u64 {
        (u64::from(self.page) * u64::from(self.limit)).min(self.total)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}
