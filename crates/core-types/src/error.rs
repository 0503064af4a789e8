// In crates/core-types/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Unknown stock status: {0}")]
    UnknownStatus(String),
}

pub type Result<T> = std::result::Result<T, Error>;
