// In crates/api-client/src/types.rs

use reqwest::Client;
use serde::Deserialize;

/// The client for the remote stock API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    /// The persistent HTTP client, configured with the request timeout.
    pub http_client: Client,
    /// The base URL of the REST API, without a trailing slash.
    pub base_url: String,
}

/// The error object the API returns alongside a non-2xx status.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default, alias = "msg")]
    pub message: Option<String>,
}
