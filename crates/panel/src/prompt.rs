// In crates/panel/src/prompt.rs

use crate::Result;
use async_trait::async_trait;

/// Schema of a single numeric input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberField {
    pub name: &'static str,
    pub label: String,
    pub min: Option<i64>,
    pub initial: Option<i64>,
}

/// A dialog that collects one value from the user.
#[async_trait]
pub trait Prompt: Send + Sync {
    /// Returns the confirmed value, or `None` when the user cancels.
    async fn ask_number(&self, field: &NumberField) -> Option<i64>;
}

/// Write-only text clipboard.
pub trait Clipboard: Send + Sync {
    fn write_text(&self, text: &str) -> Result<()>;
}
