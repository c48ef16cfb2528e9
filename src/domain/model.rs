use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type ProductId = u64;

/// A catalog product, or a cart line when `amount` is at least 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: String,
    /// Quantity held in the cart. Catalog responses omit it.
    #[serde(default)]
    pub amount: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: u32,
}

/// Ordered cart lines, at most one per product id.
///
/// Every mutator returns a new `Cart` so the caller can persist and commit
/// the same value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<Product>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a cart from loaded lines, dropping zero amounts and later
    /// duplicates of an id.
    pub fn from_items(items: Vec<Product>) -> Self {
        let mut cart = Self::new();
        for item in items {
            if item.amount >= 1 && !cart.contains(item.id) {
                cart.items.push(item);
            }
        }
        cart
    }

    pub fn find(&self, product_id: ProductId) -> Option<&Product> {
        self.items.iter().find(|p| p.id == product_id)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.find(product_id).is_some()
    }

    pub fn items(&self) -> &[Product] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// `(id, amount)` pairs in cart order.
    pub fn amounts(&self) -> Vec<(ProductId, u32)> {
        self.items.iter().map(|p| (p.id, p.amount)).collect()
    }

    pub fn total_items(&self) -> u64 {
        self.items.iter().map(|p| u64::from(p.amount)).sum()
    }

    /// Appends `product` with an amount of 1.
    pub fn with_new_item(&self, product: Product) -> Cart {
        let mut items = self.items.clone();
        items.push(Product {
            amount: 1,
            ..product
        });
        Cart { items }
    }

    pub fn with_amount(&self, product_id: ProductId, amount: u32) -> Cart {
        let items = self
            .items
            .iter()
            .map(|p| {
                if p.id == product_id {
                    Product {
                        amount,
                        ..p.clone()
                    }
                } else {
                    p.clone()
                }
            })
            .collect();
        Cart { items }
    }

    pub fn without(&self, product_id: ProductId) -> Cart {
        let items = self
            .items
            .iter()
            .filter(|p| p.id != product_id)
            .cloned()
            .collect();
        Cart { items }
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a Product;
    type IntoIter = std::slice::Iter<'a, Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationLevel {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notification {
    pub fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            at: Utc::now(),
        }
    }
}
