// In crates/app-config/src/types.rs

use core_types::StockItem;
use serde::Deserialize;
use view::PageSize;

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    /// The application's general settings.
    pub app: AppSettings,
    /// Settings for the remote stock API.
    pub api: ApiSettings,
    /// Defaults for the stock item panel.
    #[serde(default)]
    pub panel: PanelSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct AppSettings {
    /// The environment the application is running in (e.g., "development", "production").
    pub environment: String,
    /// The log level for the application.
    pub log_level: String,
    /// Work against the in-memory store instead of the remote API.
    #[serde(default)]
    pub offline: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ApiSettings {
    /// The REST base URL of the stock API.
    pub rest_base_url: String,
    /// The WebSocket URL the item store publishes changes on.
    pub ws_base_url: String,
    /// Per-request timeout. Mutations are never retried.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PanelSettings {
    #[serde(default)]
    pub default_page_size: PageSize,
    /// Items owning this many units or fewer are left out of the panel.
    #[serde(default)]
    pub minimum_owned: i64,
    /// Inventory loaded into the in-memory store when running offline.
    #[serde(default = "default_seed_file")]
    pub seed_file: String,
}

impl Default for PanelSettings {
    fn default() -> Self {
        Self {
            default_page_size: PageSize::default(),
            minimum_owned: 0,
            seed_file: default_seed_file(),
        }
    }
}

/// The contents of a seed inventory file.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct SeedInventory {
    #[serde(default, rename = "item")]
    pub items: Vec<StockItem>,
}

/// Helper functions for serde defaults
fn default_timeout_secs() -> u64 { 10 }
fn default_seed_file() -> String { "config/seed.toml".to_string() }
