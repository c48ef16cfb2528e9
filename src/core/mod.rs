pub mod cart_store;

pub use crate::domain::model::{Cart, Product, ProductId, Stock, UpdateProductAmount};
pub use crate::domain::ports::{CatalogService, ConfigProvider, Notifier, PersistentStore};
pub use crate::utils::error::Result;
