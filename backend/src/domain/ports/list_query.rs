//! Filters and paging accepted by repository list operations.

use chrono::{DateTime, Utc};

use crate::domain::{
    AppointmentStatus, BrandId, CategoryId, Role, ServiceCategoryId, UserId,
};

/// Default number of rows returned by one list call.
pub const DEFAULT_PAGE_LIMIT: u32 = 50;
/// Upper bound on the rows one list call may request.
pub const MAX_PAGE_LIMIT: u32 = 500;

/// Offset-based window over an ordered result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    limit: u32,
    offset: u32,
}

impl Page {
    /// Build a page, clamping `limit` to `1..=MAX_PAGE_LIMIT`.
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: limit.clamp(1, MAX_PAGE_LIMIT),
            offset,
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u32 {
        self.offset
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_LIMIT, 0)
    }
}

/// Normalise free-text search input; blank input means "no search".
fn search_term(raw: Option<String>) -> Option<String> {
    raw.map(|term| term.trim().to_owned())
        .filter(|term| !term.is_empty())
}

/// Filters for listing user accounts.
///
/// `search` matches username, e-mail, first and last name, and phone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserListQuery {
    pub role: Option<Role>,
    pub search: Option<String>,
    pub page: Page,
}

impl UserListQuery {
    /// Attach a free-text search.
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search_term(search);
        self
    }
}

/// Filters for listing bookable services.
///
/// `search` matches the service name and its category name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceListQuery {
    pub category_id: Option<ServiceCategoryId>,
    pub active_only: bool,
    pub search: Option<String>,
    pub page: Page,
}

impl ServiceListQuery {
    /// Attach a free-text search.
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search_term(search);
        self
    }
}

/// Filters for listing appointments, newest date first then by start time.
///
/// `search` matches the customer's username and phone and the service name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentListQuery {
    pub status: Option<AppointmentStatus>,
    pub is_paid: Option<bool>,
    pub customer_id: Option<UserId>,
    pub staff_id: Option<UserId>,
    pub from: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub search: Option<String>,
    pub page: Page,
}

impl AppointmentListQuery {
    /// Attach a free-text search.
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search_term(search);
        self
    }
}

/// Filters for listing shop products, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListQuery {
    pub active_only: bool,
    pub featured_only: bool,
    pub category_id: Option<CategoryId>,
    pub brand_id: Option<BrandId>,
    pub search: Option<String>,
    pub page: Page,
}

impl ProductListQuery {
    /// Attach a free-text search over product names.
    pub fn with_search(mut self, search: Option<String>) -> Self {
        self.search = search_term(search);
        self
    }
}
