use crate::core::{CatalogService, Notifier, PersistentStore};
use crate::domain::model::{Cart, Product, ProductId, UpdateProductAmount};
use crate::utils::error::{CartError, Operation, Result, MSG_PRODUCT_ADDED};

pub const DEFAULT_CART_KEY: &str = "@RocketShoes:cart";

/// Owns the session cart and keeps it within stock and in sync with the
/// persistent store.
///
/// Build one per session and hand it to consumers by reference. Mutations
/// take `&mut self`, so operations never interleave.
pub struct CartStore<C: CatalogService, S: PersistentStore, N: Notifier> {
    catalog: C,
    store: S,
    notifier: N,
    key: String,
    cart: Cart,
}

impl<C: CatalogService, S: PersistentStore, N: Notifier> CartStore<C, S, N> {
    /// Restores the cart saved under `key`. A missing, unreadable or
    /// unparsable entry yields an empty cart.
    pub async fn load(catalog: C, store: S, notifier: N, key: impl Into<String>) -> Self {
        let key = key.into();
        let cart = match store.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Product>>(&raw) {
                Ok(items) => Cart::from_items(items),
                Err(e) => {
                    tracing::warn!("Ignoring unparsable cart under {}: {}", key, e);
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(e) => {
                tracing::warn!("Could not read cart under {}: {}", key, e);
                Cart::new()
            }
        };

        tracing::debug!("Loaded cart with {} products", cart.len());

        Self {
            catalog,
            store,
            notifier,
            key,
            cart,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn snapshot(&self) -> Cart {
        self.cart.clone()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub async fn add_product(&mut self, product_id: ProductId) {
        match self.try_add_product(product_id).await {
            Ok(true) => self.notifier.success(MSG_PRODUCT_ADDED),
            Ok(false) => {}
            Err(e) => self.reject(Operation::Add, product_id, e),
        }
    }

    pub async fn remove_product(&mut self, product_id: ProductId) {
        if let Err(e) = self.try_remove_product(product_id).await {
            self.reject(Operation::Remove, product_id, e);
        }
    }

    pub async fn update_product_amount(&mut self, request: UpdateProductAmount) {
        if let Err(e) = self.try_update_product_amount(request).await {
            self.reject(Operation::Update, request.product_id, e);
        }
    }

    /// Returns `true` when a new line was inserted, `false` on increment.
    async fn try_add_product(&mut self, product_id: ProductId) -> Result<bool> {
        if let Some(existing) = self.cart.find(product_id) {
            let current = existing.amount;
            let stock = self.catalog.stock(product_id).await?;
            let requested = match current.checked_add(1) {
                Some(requested) if stock.amount > current => requested,
                _ => {
                    return Err(CartError::OutOfStock {
                        product_id,
                        requested: current.saturating_add(1),
                        available: stock.amount,
                    })
                }
            };

            let next = self.cart.with_amount(product_id, requested);
            self.commit(next).await?;
            return Ok(false);
        }

        let product = self.catalog.product(product_id).await?;
        let stock = self.catalog.stock(product_id).await?;
        if stock.amount == 0 {
            return Err(CartError::OutOfStock {
                product_id,
                requested: 1,
                available: 0,
            });
        }

        let next = self.cart.with_new_item(product);
        self.commit(next).await?;
        Ok(true)
    }

    async fn try_remove_product(&mut self, product_id: ProductId) -> Result<()> {
        if !self.cart.contains(product_id) {
            return Err(CartError::NotInCart { product_id });
        }

        let next = self.cart.without(product_id);
        self.commit(next).await
    }

    async fn try_update_product_amount(&mut self, request: UpdateProductAmount) -> Result<()> {
        let UpdateProductAmount { product_id, amount } = request;
        if !self.cart.contains(product_id) {
            return Err(CartError::NotInCart { product_id });
        }

        let stock = self.catalog.stock(product_id).await?;
        if amount > stock.amount {
            return Err(CartError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            });
        }
        if amount < 1 {
            return Err(CartError::InvalidAmount { product_id, amount });
        }

        let next = self.cart.with_amount(product_id, amount);
        self.commit(next).await
    }

    /// Persists `next` and only then makes it the current cart.
    async fn commit(&mut self, next: Cart) -> Result<()> {
        let serialized = serde_json::to_string(&next)?;
        tracing::debug!("Writing cart ({} bytes) under {}", serialized.len(), self.key);
        self.store.set(&self.key, &serialized).await?;

        tracing::info!(
            "Cart updated: {} products, {} items",
            next.len(),
            next.total_items()
        );
        self.cart = next;
        Ok(())
    }

    fn reject(&self, op: Operation, product_id: ProductId, error: CartError) {
        tracing::warn!("{:?} of product {} rejected: {}", op, product_id, error);
        self.notifier.error(error.notification(op));
    }
}
