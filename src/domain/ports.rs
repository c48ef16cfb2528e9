use crate::domain::model::{Notification, NotificationLevel, Product, ProductId, Stock};
use crate::utils::error::{CatalogError, Result};
use async_trait::async_trait;

/// Read-only product and stock lookups.
#[async_trait]
pub trait CatalogService: Send + Sync {
    async fn product(&self, id: ProductId) -> std::result::Result<Product, CatalogError>;
    async fn stock(&self, id: ProductId) -> std::result::Result<Stock, CatalogError>;
}

/// Durable key-value storage for the serialized cart.
pub trait PersistentStore: Send + Sync {
    fn get(&self, key: &str)
        -> impl std::future::Future<Output = Result<Option<String>>> + Send;
    fn set(&self, key: &str, value: &str) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Side channel for user-visible messages.
pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);

    fn success(&self, message: &str) {
        self.notify(Notification::new(NotificationLevel::Success, message));
    }

    fn error(&self, message: &str) {
        self.notify(Notification::new(NotificationLevel::Error, message));
    }
}

pub trait ConfigProvider: Send + Sync {
    fn catalog_url(&self) -> &str;
    fn storage_path(&self) -> &str;
    fn storage_key(&self) -> &str;
}
