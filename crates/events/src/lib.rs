// In crates/events/src/lib.rs

pub mod i18n;
pub mod notification;
pub mod stock_event;

pub use i18n::{EnglishCatalog, Translator};
pub use notification::{Notification, NotificationSink, Severity, TracingSink};
pub use stock_event::StockItemEvent;
