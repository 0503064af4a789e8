// In crates/mutations/src/error.rs

use core_types::ItemId;
use thiserror::Error;

use crate::types::MutationKind;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Mutation rejected: {reason}")]
    Rejected { reason: String },

    #[error("Stock item {0} not found")]
    NotFound(ItemId),

    #[error("A {0} request is already in flight")]
    InFlight(MutationKind),

    #[error("API client error: {0}")]
    ApiClientError(#[from] api_client::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
