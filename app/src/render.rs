// In app/src/render.rs

use analytics::InventorySummary;
use core_types::StockItem;
use events::Translator;
use view::DerivedRows;

fn price(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

/// Helper function to print one page of the stock table.
pub fn print_rows(rows: &DerivedRows) {
    println!(
        "{:>5}  {:<32} {:<14} {:>7} {:>7} {:>7} {:>6}  {:<6} {}",
        "id", "name", "status", "bought", "min", "list", "owned", "hidden", "updated"
    );
    for item in &rows.rows {
        print_item_row(item);
    }
    println!(
        "-- page {} of {} ({} matching, {} per page)",
        rows.page,
        rows.page_count().max(1),
        rows.total_records,
        rows.page_size
    );
}

fn print_item_row(item: &StockItem) {
    println!(
        "{:>5}  {:<32} {:<14} {:>7} {:>7} {:>7} {:>6}  {:<6} {}",
        item.id,
        item.item_name,
        item.status.as_str(),
        item.bought,
        price(item.minimum_price),
        price(item.list_price),
        item.owned,
        if item.is_hidden { "yes" } else { "no" },
        item.updated_at.format("%Y-%m-%d %H:%M"),
    );
}

pub fn print_item(item: &StockItem) {
    println!(
        "#{} {} | status {} | bought {} | min {} | list {} | owned {}{}",
        item.id,
        item.item_name,
        item.status,
        item.bought,
        price(item.minimum_price),
        price(item.list_price),
        item.owned,
        if item.is_hidden { " | hidden" } else { "" },
    );
}

pub fn print_summary(summary: &InventorySummary, translator: &dyn Translator) {
    println!(
        "{} items, {} units owned",
        summary.item_count, summary.total_owned
    );
    for segment in &summary.segments {
        println!(
            "  {:<8} {:>10} {:>6.1}%  ({})",
            translator.translate(segment.label),
            segment.value,
            segment.percentage,
            segment.color
        );
    }
    let counts: Vec<String> = summary
        .status_counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(status, count)| format!("{}: {}", status, count))
        .collect();
    if counts.is_empty() {
        println!("  no items");
    } else {
        println!("  {}", counts.join(", "));
    }
}
