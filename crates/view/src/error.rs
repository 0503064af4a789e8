// In crates/view/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Page size {0} is not one of 5, 10, 15, 20, 25, 30, 50, 100")]
    InvalidPageSize(usize),

    #[error("Unknown sort field: {0}")]
    UnknownSortField(String),
}

pub type Result<T> = std::result::Result<T, Error>;
