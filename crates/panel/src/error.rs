// In crates/panel/src/error.rs

use core_types::ItemId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Stock item {0} is not in the current collection")]
    ItemNotFound(ItemId),

    #[error("Another stock item request is still pending")]
    Busy,

    #[error("Value {value} for '{field}' is below the minimum of {min}")]
    BelowMinimum {
        field: &'static str,
        value: i64,
        min: i64,
    },

    #[error("Clipboard write failed: {0}")]
    Clipboard(String),

    #[error("Mutation error: {0}")]
    Mutation(#[from] mutations::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
