pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CartCommand, CliConfig};

pub use adapters::{FileStore, HttpCatalog, MemoryStore, RecordingNotifier, TracingNotifier};
pub use config::CartConfig;
pub use core::cart_store::{CartStore, DEFAULT_CART_KEY};
pub use domain::model::{
    Cart, Notification, NotificationLevel, Product, ProductId, Stock, UpdateProductAmount,
};
pub use utils::error::{CartError, CatalogError, Result};
