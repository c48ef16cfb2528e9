use crate::domain::model::ProductId;
use thiserror::Error;

/// Failures surfaced by a catalog lookup.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: ProductId },

    #[error("catalog returned {status} for {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("catalog request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("invalid catalog url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

#[derive(Error, Debug)]
pub enum CartError {
    #[error("product {product_id} is not in the cart")]
    NotInCart { product_id: ProductId },

    #[error("requested {requested} of product {product_id} but only {available} in stock")]
    OutOfStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("invalid amount {amount} for product {product_id}")]
    InvalidAmount { product_id: ProductId, amount: u32 },

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Storage error: {message}")]
    StorageError { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, CartError>;

/// The cart operation an error escaped from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Remove,
    Update,
}

pub const MSG_PRODUCT_ADDED: &str = "Product added";
pub const MSG_OUT_OF_STOCK: &str = "Requested quantity is out of stock";
pub const MSG_ADD_FAILED: &str = "Could not add product";
pub const MSG_REMOVE_FAILED: &str = "Could not remove product";
pub const MSG_UPDATE_FAILED: &str = "Could not update product quantity";

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::Add => MSG_ADD_FAILED,
            Operation::Remove => MSG_REMOVE_FAILED,
            Operation::Update => MSG_UPDATE_FAILED,
        }
    }
}

impl CartError {
    /// User-visible message for this error when raised by `op`.
    ///
    /// Stock violations keep their own message; everything else collapses
    /// into the operation's generic failure.
    pub fn notification(&self, op: Operation) -> &'static str {
        match self {
            CartError::OutOfStock { .. } => MSG_OUT_OF_STOCK,
            _ => op.failure_message(),
        }
    }

    pub fn is_catalog_failure(&self) -> bool {
        matches!(self, CartError::Catalog(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_stock_keeps_its_message_for_every_operation() {
        let err = CartError::OutOfStock {
            product_id: 1,
            requested: 3,
            available: 2,
        };
        assert_eq!(err.notification(Operation::Add), MSG_OUT_OF_STOCK);
        assert_eq!(err.notification(Operation::Update), MSG_OUT_OF_STOCK);
    }

    #[test]
    fn test_other_errors_collapse_to_operation_failure() {
        let not_found = CartError::from(CatalogError::NotFound {
            resource: "product",
            id: 7,
        });
        assert!(not_found.is_catalog_failure());
        assert_eq!(not_found.notification(Operation::Add), MSG_ADD_FAILED);

        let missing = CartError::NotInCart { product_id: 7 };
        assert_eq!(missing.notification(Operation::Remove), MSG_REMOVE_FAILED);

        let zero = CartError::InvalidAmount {
            product_id: 7,
            amount: 0,
        };
        assert_eq!(zero.notification(Operation::Update), MSG_UPDATE_FAILED);
    }
}
