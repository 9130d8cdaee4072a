//! # Query Pipeline
//!
//! Turns the full record set plus a `QuerySpec` into the page of customers
//! the list view shows.
//!
//! ```text
//! records ──▶ filter (search AND status) ──▶ stable sort ──▶ paginate ──▶ VisiblePage
//! ```
//!
//! Everything here is a pure function of `(records, spec)`. The list view
//! recomputes on every frame; nothing is cached.
//!
//! ## Stability
//!
//! Sorting uses `slice::sort_by`, which is stable. `Desc` flips the
//! comparator instead of reversing the output, so customers with equal
//! keys keep their record-set order in both directions. Pagination relies
//! on this: the same spec always yields the same pages.

use std::cmp::Ordering;

use crate::core::model::{Customer, CustomerStatus};

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(CustomerStatus),
}

impl StatusFilter {
    /// Cycles All → Active → Prospect → Inactive → All
    pub fn next(self) -> StatusFilter {
        match self {
            StatusFilter::All => StatusFilter::Only(CustomerStatus::Active),
            StatusFilter::Only(CustomerStatus::Active) => {
                StatusFilter::Only(CustomerStatus::Prospect)
            }
            StatusFilter::Only(CustomerStatus::Prospect) => {
                StatusFilter::Only(CustomerStatus::Inactive)
            }
            StatusFilter::Only(CustomerStatus::Inactive) => StatusFilter::All,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All Status",
            StatusFilter::Only(status) => status.label(),
        }
    }

    fn accepts(self, status: CustomerStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Value,
    CreatedAt,
    LastContact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

/// A named (key, direction) pair offered by the sort selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortPreset {
    pub key: SortKey,
    pub direction: SortDirection,
    pub label: &'static str,
}

pub const SORT_PRESETS: [SortPreset; 7] = [
    SortPreset { key: SortKey::Name, direction: SortDirection::Asc, label: "Name A-Z" },
    SortPreset { key: SortKey::Name, direction: SortDirection::Desc, label: "Name Z-A" },
    SortPreset { key: SortKey::Value, direction: SortDirection::Desc, label: "Value High-Low" },
    SortPreset { key: SortKey::Value, direction: SortDirection::Asc, label: "Value Low-High" },
    SortPreset { key: SortKey::CreatedAt, direction: SortDirection::Desc, label: "Newest First" },
    SortPreset { key: SortKey::CreatedAt, direction: SortDirection::Asc, label: "Oldest First" },
    SortPreset { key: SortKey::LastContact, direction: SortDirection::Desc, label: "Recent Contact" },
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub search: String,
    pub status: StatusFilter,
    pub sort: SortKey,
    pub direction: SortDirection,
    /// 1-based. Clamped by `compute_visible`, so out-of-range values are harmless.
    pub page: usize,
    pub page_size: usize,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl QuerySpec {
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            search: String::new(),
            status: StatusFilter::All,
            sort: SortKey::Name,
            direction: SortDirection::Asc,
            page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Search AND status predicate.
    pub fn matches(&self, customer: &Customer) -> bool {
        self.status.accepts(customer.status) && matches_search(customer, &self.search)
    }

    /// Label of the active sort, if it is one of the presets.
    pub fn sort_label(&self) -> &'static str {
        SORT_PRESETS
            .iter()
            .find(|p| p.key == self.sort && p.direction == self.direction)
            .map(|p| p.label)
            .unwrap_or("Custom")
    }

    /// Advance to the preset after the current one (first preset if the
    /// current sort is not a preset).
    pub fn next_sort_preset(&self) -> SortPreset {
        let current = SORT_PRESETS
            .iter()
            .position(|p| p.key == self.sort && p.direction == self.direction);
        match current {
            Some(i) => SORT_PRESETS[(i + 1) % SORT_PRESETS.len()],
            None => SORT_PRESETS[0],
        }
    }
}

fn matches_search(customer: &Customer, search: &str) -> bool {
    if search.is_empty() {
        return true;
    }
    let needle = search.to_lowercase();
    customer.name.to_lowercase().contains(&needle)
        || customer.email.to_lowercase().contains(&needle)
        || customer.company.to_lowercase().contains(&needle)
}

fn compare(a: &Customer, b: &Customer, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Value => a.value.total_cmp(&b.value),
        SortKey::CreatedAt => a.created_at.cmp(&b.created_at),
        SortKey::LastContact => a.last_contact.cmp(&b.last_contact),
    }
}

/// Number of pages for `matches` records. Zero matches means zero pages.
pub fn total_pages(matches: usize, page_size: usize) -> usize {
    matches.div_ceil(page_size.max(1))
}

/// Clamp a 1-based page into `[1, max(total_pages, 1)]`.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// One page of query results.
#[derive(Debug)]
pub struct VisiblePage<'a> {
    pub rows: Vec<&'a Customer>,
    pub total_matches: usize,
    pub total_pages: usize,
    /// The page actually shown, after clamping.
    pub page: usize,
    pub page_size: usize,
}

impl VisiblePage<'_> {
    /// "Showing 11 to 20 of 42 results"
    pub fn range_label(&self) -> String {
        if self.total_matches == 0 {
            return "0 results".to_string();
        }
        let start = (self.page - 1) * self.page_size + 1;
        let end = (self.page * self.page_size).min(self.total_matches);
        format!("Showing {start} to {end} of {} results", self.total_matches)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Filter, stable-sort, and paginate `records` according to `spec`.
pub fn compute_visible<'a>(records: &'a [Customer], spec: &QuerySpec) -> VisiblePage<'a> {
    let mut matched: Vec<&Customer> = records.iter().filter(|c| spec.matches(c)).collect();

    matched.sort_by(|a, b| {
        let ordering = compare(a, b, spec.sort);
        match spec.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    let page_size = spec.page_size.max(1);
    let total_matches = matched.len();
    let total_pages = total_pages(total_matches, page_size);
    let page = clamp_page(spec.page, total_pages);

    let rows = matched
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    VisiblePage {
        rows,
        total_matches,
        total_pages,
        page,
        page_size,
    }
}

/// An entry in the pager strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageLink {
    Page(usize),
    /// Pages were skipped between the neighbours of this marker.
    Gap,
}

/// Pager strip: first page, last page, and the current page's neighbours,
/// with a `Gap` wherever shown pages are not consecutive.
pub fn page_window(current: usize, total: usize) -> Vec<PageLink> {
    let mut links = Vec::new();
    let mut previous: Option<usize> = None;
    for page in 1..=total {
        let shown = page == 1
            || page == total
            || (page + 1 >= current && page <= current + 1);
        if !shown {
            continue;
        }
        if let Some(prev) = previous
            && prev + 1 != page
        {
            links.push(PageLink::Gap);
        }
        links.push(PageLink::Page(page));
        previous = Some(page);
    }
    links
}
