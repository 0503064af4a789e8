// In app/src/main.rs

use anyhow::{Context, Result};
use api_client::LiveConnector;
use app_config::Settings;
use clap::{Parser, Subcommand};
use core_types::{CreateStockItem, ItemId, SellStockItem, StockStatus, SubType, UpdateStockItem};
use events::{EnglishCatalog, Translator};
use futures::StreamExt;
use mutations::{LiveStockApi, MutationCoordinator, SimulatedStockApi, StockItemApi};
use panel::{Direction, ItemStore, PriceStep, StockPanel, WatchItemStore, broadcast_events};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing_subscriber::prelude::*;
use view::{PageSize, SortDirection, SortField, SortSpec};

mod render;
mod terminal;

use crate::terminal::{StdinPrompt, StdoutClipboard, TerminalSink};

// --- Command-Line Interface Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = "A trading inventory desk for stock items.")]
struct Cli {
    /// Work against the in-memory store seeded from the seed file.
    #[arg(long, global = true)]
    offline: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Shows one page of the stock table.
    List {
        /// Case-insensitive substring of the item name.
        #[arg(short, long)]
        query: Option<String>,

        /// Only show items with this status (e.g., "live", "no_buyers").
        #[arg(short, long)]
        status: Option<StockStatus>,

        /// Sort field: name, bought, minimum_price, list_price, owned, status, updated_at.
        #[arg(long, default_value = "name")]
        sort: SortField,

        /// Sort descending instead of ascending.
        #[arg(long)]
        desc: bool,

        #[arg(short, long, default_value_t = 1)]
        page: usize,

        /// One of 5, 10, 15, 20, 25, 30, 50, 100.
        #[arg(long)]
        page_size: Option<usize>,

        /// Print the rows as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Shows status counts and the bought / listed / profit breakdown.
    Summary {
        #[arg(long)]
        json: bool,
    },

    /// Registers a purchase.
    Create {
        /// The market id of the item (e.g., "vectis_prime_set").
        #[arg(long)]
        wfm_id: String,

        /// The display name of the item.
        #[arg(long)]
        name: String,

        /// Purchase price per unit.
        #[arg(long)]
        bought: i64,

        #[arg(long, default_value_t = 1)]
        quantity: i64,

        /// Rank, for items that have one.
        #[arg(long)]
        rank: Option<i64>,

        /// Also close the matching buy order on the market.
        #[arg(long)]
        report: bool,
    },

    /// Applies a partial update to an item.
    Update {
        id: ItemId,

        #[arg(long)]
        minimum_price: Option<i64>,

        #[arg(long)]
        list_price: Option<i64>,

        #[arg(long)]
        owned: Option<i64>,

        #[arg(long)]
        hidden: Option<bool>,

        #[arg(long)]
        status: Option<StockStatus>,
    },

    /// Records a sale.
    Sell {
        id: ItemId,

        #[arg(long)]
        price: i64,

        #[arg(long, default_value_t = 1)]
        quantity: i64,

        /// Also close the matching sell order on the market.
        #[arg(long)]
        report: bool,
    },

    /// Removes an item.
    Delete { id: ItemId },

    /// Moves the minimum price by 5 or 10.
    Bump {
        id: ItemId,

        #[arg(long, value_enum, default_value = "5")]
        step: StepArg,

        /// Lower the price instead of raising it.
        #[arg(long)]
        down: bool,
    },

    /// Asks for a new minimum price.
    EditMinPrice { id: ItemId },

    /// Asks for a price and sells one unit.
    QuickSell { id: ItemId },

    /// Prints the item's name for the clipboard.
    CopyName { id: ItemId },

    /// Follows the change feed and redraws the summary on every change.
    Watch,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum StepArg {
    #[value(name = "5")]
    Five,
    #[value(name = "10")]
    Ten,
}

impl From<StepArg> for PriceStep {
    fn from(step: StepArg) -> Self {
        match step {
            StepArg::Five => PriceStep::Five,
            StepArg::Ten => PriceStep::Ten,
        }
    }
}

/// The wired-up panel plus the task keeping its store current.
struct Desk {
    panel: StockPanel,
    store: Arc<WatchItemStore>,
    translator: Arc<dyn Translator>,
    sync_handle: JoinHandle<()>,
}

// --- Main Application Entry Point ---

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from a .env file, if it exists.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut settings = app_config::load_settings().context("Failed to load settings")?;
    settings.app.offline |= cli.offline;

    init_tracing(&settings.app.log_level);
    tracing::info!(environment = %settings.app.environment, offline = settings.app.offline, "Starting stockdesk");

    let mut desk = open_desk(&settings).await?;
    let result = run_command(&mut desk, cli.command, &settings).await;
    desk.sync_handle.abort();
    result
}

fn init_tracing(log_level: &str) {
    let level = log_level.parse().unwrap_or_else(|_| {
        eprintln!("Unknown log level '{}', using info.", log_level);
        tracing::Level::INFO
    });
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_filter(
            tracing_subscriber::filter::Targets::new()
                .with_target("hyper_util", tracing::Level::WARN)
                .with_target("tungstenite", tracing::Level::WARN)
                .with_default(level),
        );
    tracing_subscriber::registry().with(fmt_layer).init();
}

/// Builds the store, the back end and the panel for the configured mode.
async fn open_desk(settings: &Settings) -> Result<Desk> {
    let minimum_owned = settings.panel.minimum_owned;

    let (api, store, sync_handle) = if settings.app.offline {
        let seed = app_config::load_seed_inventory(&settings.panel.seed_file)
            .with_context(|| format!("Failed to read seed file {}", settings.panel.seed_file))?;
        tracing::info!(count = seed.len(), "Loaded seed inventory.");

        let simulated = Arc::new(SimulatedStockApi::new(seed.clone()));
        let store = Arc::new(WatchItemStore::new(seed, minimum_owned));
        let handle = store.spawn_event_sync(broadcast_events(simulated.subscribe_events()));
        (simulated as Arc<dyn StockItemApi>, store, handle)
    } else {
        let client = api_client::new(&settings.api)?;
        let items = client.get_stock_items().await?;
        tracing::info!(count = items.len(), "Fetched stock items.");

        let store = Arc::new(WatchItemStore::new(items, minimum_owned));
        let feed = LiveConnector::new()
            .subscribe_to_stock_events(&settings.api.ws_base_url)
            .filter_map(|event| async move {
                match event {
                    Ok(event) => Some(event),
                    Err(e) => {
                        tracing::warn!(error = %e, "Dropping unreadable stock event.");
                        None
                    }
                }
            });
        let handle = store.spawn_event_sync(feed);
        (Arc::new(LiveStockApi::new(client)) as Arc<dyn StockItemApi>, store, handle)
    };

    let translator: Arc<dyn Translator> = Arc::new(EnglishCatalog);
    let coordinator = Arc::new(MutationCoordinator::new(
        api,
        Arc::new(TerminalSink),
        translator.clone(),
    ));
    let panel = StockPanel::new(
        store.clone(),
        coordinator,
        translator.clone(),
        settings.panel.default_page_size,
    );

    Ok(Desk {
        panel,
        store,
        translator,
        sync_handle,
    })
}

async fn run_command(desk: &mut Desk, command: Commands, settings: &Settings) -> Result<()> {
    let coordinator = desk.panel.coordinator().clone();

    match command {
        Commands::List {
            query,
            status,
            sort,
            desc,
            page,
            page_size,
            json,
        } => {
            if let Some(size) = page_size {
                desk.panel.set_page_size(PageSize::try_from(size)?);
            }
            if let Some(query) = query {
                desk.panel.set_query(query);
            }
            if let Some(status) = status {
                desk.panel.toggle_status(status);
            }
            let direction = if desc {
                SortDirection::Descending
            } else {
                SortDirection::Ascending
            };
            desk.panel.set_sort(SortSpec::new(sort, direction));
            desk.panel.set_page(page);

            let rows = desk.panel.rows();
            if json {
                println!("{}", serde_json::to_string_pretty(rows)?);
            } else {
                render::print_rows(rows);
            }
        }
        Commands::Summary { json } => {
            let summary = desk.panel.summary();
            if json {
                println!("{}", serde_json::to_string_pretty(summary)?);
            } else {
                render::print_summary(summary, desk.translator.as_ref());
            }
        }
        Commands::Create {
            wfm_id,
            name,
            bought,
            quantity,
            rank,
            report,
        } => {
            let item = coordinator
                .create(CreateStockItem {
                    wfm_id,
                    item_name: name,
                    bought,
                    quantity,
                    sub_type: rank.map(SubType::rank),
                    report,
                })
                .await?;
            render::print_item(&item);
        }
        Commands::Update {
            id,
            minimum_price,
            list_price,
            owned,
            hidden,
            status,
        } => {
            let patch = UpdateStockItem {
                id,
                minimum_price,
                list_price,
                owned,
                is_hidden: hidden,
                status,
            };
            if patch.is_empty() {
                anyhow::bail!("Nothing to update for item {}. Pass at least one field.", id);
            }
            let item = coordinator.update(patch).await?;
            render::print_item(&item);
        }
        Commands::Sell {
            id,
            price,
            quantity,
            report,
        } => {
            let item = coordinator
                .sell_with_report(SellStockItem {
                    id,
                    price,
                    quantity,
                    report,
                })
                .await?;
            render::print_item(&item);
        }
        Commands::Delete { id } => {
            desk.panel.delete(id).await?;
        }
        Commands::Bump { id, step, down } => {
            let direction = if down { Direction::Down } else { Direction::Up };
            match desk.panel.adjust_minimum_price(id, step.into(), direction).await? {
                Some(item) => render::print_item(&item),
                None => println!("Minimum price of item {} would drop below zero, left unchanged.", id),
            }
        }
        Commands::EditMinPrice { id } => {
            if let Some(item) = desk.panel.edit_minimum_price(id, &StdinPrompt).await? {
                render::print_item(&item);
            }
        }
        Commands::QuickSell { id } => {
            if let Some(item) = desk.panel.manual_sell(id, &StdinPrompt).await? {
                render::print_item(&item);
            }
        }
        Commands::CopyName { id } => {
            desk.panel.copy_item_name(id, &StdoutClipboard)?;
        }
        Commands::Watch => watch(desk, settings).await?,
    }

    Ok(())
}

/// Redraws the summary whenever the store publishes a new collection, until Ctrl-C.
async fn watch(desk: &mut Desk, settings: &Settings) -> Result<()> {
    let mut changes = desk.store.subscribe();
    tracing::info!(url = %settings.api.ws_base_url, running = desk.store.is_running(), "Watching stock item changes.");

    loop {
        render::print_summary(desk.panel.summary(), desk.translator.as_ref());
        println!();

        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    tracing::warn!("Item store closed.");
                    return Ok(());
                }
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping watch.");
                return Ok(());
            }
        }
    }
}
