// In crates/events/src/i18n.rs

/// Key to localized text. Lookups never fail; unknown keys come back as-is.
pub trait Translator: Send + Sync {
    fn translate(&self, key: &str) -> String;

    /// Translates `key` and substitutes every `{name}` placeholder from `args`.
    fn translate_with(&self, key: &str, args: &[(&str, &str)]) -> String {
        let mut text = self.translate(key);
        for (name, value) in args {
            text = text.replace(&format!("{{{}}}", name), value);
        }
        text
    }
}

/// The built-in English strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishCatalog;

impl Translator for EnglishCatalog {
    fn translate(&self, key: &str) -> String {
        let text = match key {
            "stock_item.create.success.title" => "Item added",
            "stock_item.create.success.message" => "{name} has been added to your stock.",
            "stock_item.update.success.title" => "Item updated",
            "stock_item.update.success.message" => "{name} has been updated.",
            "stock_item.sell.success.title" => "Item sold",
            "stock_item.sell.success.message" => "{name} has been sold.",
            "stock_item.delete.success.title" => "Item deleted",
            "stock_item.delete.success.message" => "The item has been removed from your stock.",
            "notification.error.title" => "Something went wrong",
            "notification.error.message" => "The request failed. See the log for details.",
            "segment.bought" => "Bought",
            "segment.listed" => "Listed",
            "segment.profit" => "Profit",
            "prompt.minimum_price.label" => "Minimum price",
            "prompt.sell.label" => "Sell price",
            other => other,
        };
        text.to_string()
    }
}
