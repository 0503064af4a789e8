// In crates/view/src/types.rs

use core_types::{StockItem, StockStatus};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::{Error, Result};

/// Rows per page. Only the sizes offered by the page-size picker are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(usize);

impl PageSize {
    pub const ALLOWED: [usize; 8] = [5, 10, 15, 20, 25, 30, 50, 100];

    pub fn get(&self) -> usize {
        self.0
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self(25)
    }
}

impl TryFrom<usize> for PageSize {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        if Self::ALLOWED.contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::InvalidPageSize(value))
        }
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.0
    }
}

/// The status column filter. Selecting the active status again clears it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    Unset,
    Equals(StockStatus),
}

impl StatusFilter {
    pub fn toggle(&mut self, status: StockStatus) {
        *self = match *self {
            StatusFilter::Equals(active) if active == status => StatusFilter::Unset,
            _ => StatusFilter::Equals(status),
        };
    }

    pub fn matches(&self, status: StockStatus) -> bool {
        match self {
            StatusFilter::Unset => true,
            StatusFilter::Equals(wanted) => *wanted == status,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    ItemName,
    Bought,
    MinimumPrice,
    ListPrice,
    Owned,
    Status,
    UpdatedAt,
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "item_name" | "name" => Ok(SortField::ItemName),
            "bought" => Ok(SortField::Bought),
            "minimum_price" => Ok(SortField::MinimumPrice),
            "list_price" => Ok(SortField::ListPrice),
            "owned" => Ok(SortField::Owned),
            "status" => Ok(SortField::Status),
            "updated_at" => Ok(SortField::UpdatedAt),
            _ => Err(Error::UnknownSortField(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: SortField,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Orders two items by the sort field. Missing prices sort first when
    /// ascending; names compare case-insensitively.
    pub fn compare(&self, a: &StockItem, b: &StockItem) -> Ordering {
        let ordering = match self.field {
            SortField::ItemName => a
                .item_name
                .to_lowercase()
                .cmp(&b.item_name.to_lowercase()),
            SortField::Bought => a.bought.cmp(&b.bought),
            SortField::MinimumPrice => a.minimum_price.cmp(&b.minimum_price),
            SortField::ListPrice => a.list_price.cmp(&b.list_price),
            SortField::Owned => a.owned.cmp(&b.owned),
            SortField::Status => a.status.cmp(&b.status),
            SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }
}

/// The table's ephemeral view state.
///
/// Changing what is shown (query, status filter, page size) returns to the
/// first page. Pages are 1-based; page 0 is treated as page 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    page: usize,
    page_size: PageSize,
    query: String,
    status_filter: StatusFilter,
    sort: SortSpec,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: PageSize::default(),
            query: String::new(),
            status_filter: StatusFilter::Unset,
            sort: SortSpec::default(),
        }
    }
}

impl ViewState {
    pub fn with_page_size(page_size: PageSize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> PageSize {
        self.page_size
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn sort(&self) -> SortSpec {
        self.sort
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page.max(1);
    }

    pub fn set_page_size(&mut self, page_size: PageSize) {
        self.page_size = page_size;
        self.page = 1;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    pub fn toggle_status(&mut self, status: StockStatus) {
        self.status_filter.toggle(status);
        self.page = 1;
    }

    pub fn clear_status_filter(&mut self) {
        self.status_filter = StatusFilter::Unset;
        self.page = 1;
    }

    pub fn set_sort(&mut self, sort: SortSpec) {
        self.sort = sort;
    }
}

/// The rows the table displays plus the count the paginator needs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DerivedRows {
    pub rows: Vec<StockItem>,
    /// Matching records before pagination.
    pub total_records: usize,
    pub page: usize,
    pub page_size: usize,
}

impl DerivedRows {
    pub fn page_count(&self) -> usize {
        crate::page_count(self.total_records, self.page_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_size_accepts_only_the_offered_sizes() {
        for size in PageSize::ALLOWED {
            assert_eq!(PageSize::try_from(size).map(|s| s.get()), Ok(size));
        }
        assert_eq!(PageSize::try_from(7), Err(Error::InvalidPageSize(7)));
        assert_eq!(PageSize::try_from(0), Err(Error::InvalidPageSize(0)));
        assert_eq!(PageSize::default().get(), 25);
    }

    #[test]
    fn toggling_same_status_twice_clears_filter() {
        let mut filter = StatusFilter::Unset;
        filter.toggle(StockStatus::Live);
        assert_eq!(filter, StatusFilter::Equals(StockStatus::Live));
        filter.toggle(StockStatus::Live);
        assert_eq!(filter, StatusFilter::Unset);
    }

    #[test]
    fn toggling_other_status_switches_filter() {
        let mut filter = StatusFilter::Equals(StockStatus::Live);
        filter.toggle(StockStatus::Pending);
        assert_eq!(filter, StatusFilter::Equals(StockStatus::Pending));
    }

    #[test]
    fn narrowing_the_view_returns_to_first_page() {
        let mut state = ViewState::default();
        state.set_page(4);
        state.set_query("prime");
        assert_eq!(state.page(), 1);

        state.set_page(3);
        state.toggle_status(StockStatus::Live);
        assert_eq!(state.page(), 1);

        state.set_page(0);
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn sort_field_parses_cli_names() {
        assert_eq!("list_price".parse::<SortField>(), Ok(SortField::ListPrice));
        assert_eq!("Name".parse::<SortField>(), Ok(SortField::ItemName));
        assert!("price".parse::<SortField>().is_err());
    }
}
