// In crates/app-config/src/lib.rs

use config::{Config, Environment, File};
use core_types::StockItem;
use std::path::Path;

pub mod error;
pub mod types;

// Re-export the most important types for easy access.
pub use error::{Error, Result};
pub use types::{ApiSettings, AppSettings, PanelSettings, SeedInventory, Settings};

/// Loads the application settings from various sources.
///
/// This function orchestrates the layered configuration loading:
/// 1. Reads from a default `base.toml` file.
/// 2. Merges settings from an environment-specific file (e.g., `development.toml`).
/// 3. Merges settings from environment variables.
pub fn load_settings() -> Result<Settings> {
    load_settings_from("config")
}

/// Same as [`load_settings`], reading the TOML files from `dir`.
pub fn load_settings_from(dir: impl AsRef<Path>) -> Result<Settings> {
    let dir = dir.as_ref();
    // Get the current environment. Default to "development" if not set.
    let environment = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "development".into());

    let settings = Config::builder()
        .add_source(File::from(dir.join("base")))
        .add_source(File::from(dir.join(&environment)).required(false))
        // e.g. `APP_API__REST_BASE_URL=...`
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?;

    let settings: Settings = settings.try_deserialize()?;

    Ok(settings)
}

/// Loads the offline seed inventory, a TOML file of `[[item]]` tables.
pub fn load_seed_inventory(path: impl AsRef<Path>) -> Result<Vec<StockItem>> {
    let content = std::fs::read_to_string(path)?;

    let seed: SeedInventory = toml::from_str(&content)?;
    Ok(seed.items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn seed_inventory_reads_item_tables() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[item]]
id = 1
item_name = "Vectis Prime Set"
bought = 45
list_price = 70
owned = 2
status = "live"

[[item]]
id = 2
item_name = "Braton Prime Set"
bought = 20
owned = 1
"#
        )
        .unwrap();

        let items = load_seed_inventory(file.path()).unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].list_price, Some(70));
        assert_eq!(items[1].status, core_types::StockStatus::Pending);
    }

    #[test]
    fn settings_layer_base_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("base.toml"),
            r#"
[app]
environment = "test"
log_level = "debug"

[api]
rest_base_url = "http://localhost:8080"
ws_base_url = "ws://localhost:8080/ws"

[panel]
default_page_size = 50
"#,
        )
        .unwrap();

        let settings = load_settings_from(dir.path()).unwrap();

        assert_eq!(settings.app.log_level, "debug");
        assert!(!settings.app.offline);
        assert_eq!(settings.api.timeout_secs, 10);
        assert_eq!(settings.panel.default_page_size.get(), 50);
        assert_eq!(settings.panel.seed_file, "config/seed.toml");
    }
}
