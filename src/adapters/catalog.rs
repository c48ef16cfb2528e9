use crate::core::CatalogService;
use crate::domain::model::{Product, ProductId, Stock};
use crate::utils::error::CatalogError;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

/// Catalog backed by the storefront REST API (`products/{id}`, `stock/{id}`).
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base_url: Url,
    client: Client,
}

impl HttpCatalog {
    pub fn new(base_url: &str) -> Result<Self, CatalogError> {
        Self::with_client(base_url, Client::new())
    }

    pub fn with_client(base_url: &str, client: Client) -> Result<Self, CatalogError> {
        // Url::join drops the last segment unless the base ends with '/'.
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized).map_err(|e| CatalogError::InvalidUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        collection: &str,
        id: ProductId,
    ) -> Result<T, CatalogError> {
        let url = self
            .base_url
            .join(&format!("{}/{}", collection, id))
            .map_err(|e| CatalogError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!("Making catalog request to: {}", url);
        let response = self.client.get(url.clone()).send().await?;
        tracing::debug!("Catalog response status: {}", response.status());

        match response.status() {
            status if status.is_success() => Ok(response.json::<T>().await?),
            StatusCode::NOT_FOUND => Err(CatalogError::NotFound { resource, id }),
            status => Err(CatalogError::UnexpectedStatus {
                url: url.to_string(),
                status: status.as_u16(),
            }),
        }
    }
}

#[async_trait::async_trait]
impl CatalogService for HttpCatalog {
    async fn product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.fetch("product", "products", id).await
    }

    async fn stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.fetch("stock", "stock", id).await
    }
}
