// In crates/view/src/lib.rs

use core_types::StockItem;

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    DerivedRows, PageSize, SortDirection, SortField, SortSpec, StatusFilter, ViewState,
};

/// Runs the table pipeline: text filter, status filter, sort, page slice.
///
/// `total_records` counts the filtered rows before slicing. A page past the
/// end yields an empty slice rather than an error.
pub fn apply(items: &[StockItem], state: &ViewState) -> DerivedRows {
    let query = state.query().to_lowercase();
    let status_filter = state.status_filter();

    let mut filtered: Vec<&StockItem> = items
        .iter()
        .filter(|item| query.is_empty() || item.item_name.to_lowercase().contains(&query))
        .filter(|item| status_filter.matches(item.status))
        .collect();
    let total_records = filtered.len();

    // `sort_by` is stable, so ties keep the store's order.
    let sort = state.sort();
    filtered.sort_by(|a, b| sort.compare(a, b));

    let page_size = state.page_size().get();
    let start = (state.page() - 1).saturating_mul(page_size);
    let rows: Vec<StockItem> = filtered
        .into_iter()
        .skip(start)
        .take(page_size)
        .cloned()
        .collect();

    tracing::trace!(
        total_records,
        page = state.page(),
        page_size,
        shown = rows.len(),
        "Recomputed stock table rows."
    );

    DerivedRows {
        rows,
        total_records,
        page: state.page(),
        page_size,
    }
}

/// Number of pages needed for `total_records`; zero when there is nothing to show.
pub fn page_count(total_records: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_records.div_ceil(page_size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::StockStatus;

    fn named(id: i64, name: &str) -> StockItem {
        StockItem::new(id, name)
    }

    fn numbered(count: i64) -> Vec<StockItem> {
        (1..=count)
            .map(|i| StockItem {
                bought: i,
                ..named(i, &format!("Item {:02}", i))
            })
            .collect()
    }

    fn ids(rows: &[StockItem]) -> Vec<i64> {
        rows.iter().map(|item| item.id).collect()
    }

    #[test]
    fn query_matches_name_substring_ignoring_case() {
        let items = vec![named(1, "Vectis Prime"), named(2, "Braton")];
        let mut state = ViewState::default();
        state.set_query("vec");

        let derived = apply(&items, &state);

        assert_eq!(derived.total_records, 1);
        assert_eq!(derived.rows[0].item_name, "Vectis Prime");
    }

    #[test]
    fn empty_query_keeps_everything() {
        let items = vec![named(1, "Vectis Prime"), named(2, "Braton")];
        let derived = apply(&items, &ViewState::default());
        assert_eq!(derived.total_records, 2);
    }

    #[test]
    fn status_filter_is_exact() {
        let mut items = vec![named(1, "A"), named(2, "B"), named(3, "C")];
        items[1].status = StockStatus::Live;
        let mut state = ViewState::default();
        state.toggle_status(StockStatus::Live);

        let derived = apply(&items, &state);
        assert_eq!(ids(&derived.rows), [2]);

        state.toggle_status(StockStatus::Live);
        assert_eq!(apply(&items, &state).total_records, 3);
    }

    #[test]
    fn second_page_of_twelve() {
        let items = numbered(12);
        let mut state = ViewState::with_page_size(PageSize::try_from(5).unwrap());
        state.set_sort(SortSpec::new(SortField::Bought, SortDirection::Ascending));
        state.set_page(2);

        let derived = apply(&items, &state);

        assert_eq!(derived.total_records, 12);
        assert_eq!(ids(&derived.rows), [6, 7, 8, 9, 10]);
        assert_eq!(derived.page_count(), 3);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let items = numbered(12);
        let mut state = ViewState::with_page_size(PageSize::try_from(5).unwrap());
        state.set_page(9);

        let derived = apply(&items, &state);
        assert!(derived.rows.is_empty());
        assert_eq!(derived.total_records, 12);
    }

    #[test]
    fn empty_collection() {
        let derived = apply(&[], &ViewState::default());
        assert_eq!(derived.total_records, 0);
        assert!(derived.rows.is_empty());
        assert_eq!(derived.page_count(), 0);
    }

    #[test]
    fn pages_reassemble_the_sorted_set() {
        let mut items = numbered(23);
        items.reverse();
        let mut all = ViewState::with_page_size(PageSize::try_from(100).unwrap());
        all.set_sort(SortSpec::new(SortField::Bought, SortDirection::Descending));
        let expected = ids(&apply(&items, &all).rows);

        for size in PageSize::ALLOWED {
            let mut state = ViewState::with_page_size(PageSize::try_from(size).unwrap());
            state.set_sort(all.sort());
            let pages = page_count(items.len(), size);

            let mut seen = Vec::new();
            for page in 1..=pages {
                state.set_page(page);
                let derived = apply(&items, &state);
                assert!(derived.rows.len() <= size);
                assert_eq!(derived.total_records, items.len());
                seen.extend(ids(&derived.rows));
            }
            assert_eq!(seen, expected, "page size {}", size);
        }
    }

    #[test]
    fn total_records_ignores_pagination() {
        let items = numbered(40);
        let mut state = ViewState::default();
        state.set_query("item 1");
        let expected = apply(&items, &state).total_records;
        assert_eq!(expected, 10);

        for size in [5, 10, 50] {
            state.set_page_size(PageSize::try_from(size).unwrap());
            for page in 1..=4 {
                state.set_page(page);
                assert_eq!(apply(&items, &state).total_records, expected);
            }
        }
    }

    #[test]
    fn sort_is_stable_for_ties() {
        let mut items = vec![named(1, "b"), named(2, "a"), named(3, "c")];
        for item in &mut items {
            item.bought = 5;
        }
        let mut state = ViewState::default();
        state.set_sort(SortSpec::new(SortField::Bought, SortDirection::Ascending));
        assert_eq!(ids(&apply(&items, &state).rows), [1, 2, 3]);
    }

    #[test]
    fn missing_list_price_sorts_first_ascending() {
        let mut items = vec![named(1, "a"), named(2, "b")];
        items[0].list_price = Some(30);
        let mut state = ViewState::default();
        state.set_sort(SortSpec::new(SortField::ListPrice, SortDirection::Ascending));
        assert_eq!(ids(&apply(&items, &state).rows), [2, 1]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let items = vec![named(1, "braton"), named(2, "Ack & Brunt"), named(3, "Cernos")];
        let derived = apply(&items, &ViewState::default());
        assert_eq!(ids(&derived.rows), [2, 1, 3]);
    }
}
