use crate::core::cart_store::DEFAULT_CART_KEY;
use crate::core::ConfigProvider;
use crate::domain::model::ProductId;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_storage_key, validate_url, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "cart-store")]
#[command(about = "Manage a storefront shopping cart against a catalog service")]
pub struct CliConfig {
    #[arg(long, default_value = "http://localhost:3333")]
    pub catalog_url: String,

    #[arg(long, default_value = "./cart-storage.json")]
    pub storage_path: String,

    #[arg(long, default_value = DEFAULT_CART_KEY)]
    pub storage_key: String,

    #[arg(long, help = "TOML file overriding the catalog and storage flags")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: CartCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum CartCommand {
    /// Print the saved cart
    Show,
    /// Add one unit of a product
    Add { product_id: ProductId },
    /// Drop a product from the cart
    Remove { product_id: ProductId },
    /// Set the quantity of a product already in the cart
    Update { product_id: ProductId, amount: u32 },
}

impl ConfigProvider for CliConfig {
    fn catalog_url(&self) -> &str {
        &self.catalog_url
    }

    fn storage_path(&self) -> &str {
        &self.storage_path
    }

    fn storage_key(&self) -> &str {
        &self.storage_key
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_url("catalog_url", &self.catalog_url)?;
        validate_path("storage_path", &self.storage_path)?;
        validate_storage_key("storage_key", &self.storage_key)?;
        Ok(())
    }
}
