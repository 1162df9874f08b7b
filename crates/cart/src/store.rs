//! Cart + storage, written through on every mutation.

use chrono::Utc;

use storefront_catalog::{Catalog, Product};
use storefront_core::{Aggregate, Money, ProductId};

use crate::cart::{Cart, CartCommand, CartEvent};
use crate::snapshot::{self, CartSnapshot};
use crate::storage::{CartStorage, StorageError};

/// Default persistence key for the cart payload.
pub const DEFAULT_STORAGE_KEY: &str = "cart";

/// Owns the cart and its storage handle.
///
/// Storage failures never surface to callers: they are logged, and the
/// in-memory cart stays authoritative for the rest of the session.
#[derive(Debug)]
pub struct CartStore<S> {
    cart: Cart,
    storage: S,
    key: String,
    last_save_ok: bool,
}

impl<S> CartStore<S>
where
    S: CartStorage,
{
    /// A store with an empty cart that has not read storage yet.
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self {
            cart: Cart::empty(),
            storage,
            key: key.into(),
            last_save_ok: true,
        }
    }

    /// Restore the cart persisted under `key`.
    ///
    /// Missing, unreadable or malformed payloads all yield an empty cart.
    pub fn load(storage: S, key: impl Into<String>) -> Self {
        let mut store = Self::new(storage, key);
        match store.read_persisted() {
            Ok(Some(decoded)) => {
                store.cart = Cart::restore(decoded.items);
                tracing::info!(
                    key = %store.key,
                    items = store.cart.len(),
                    saved_at = ?decoded.saved_at,
                    legacy_format = decoded.legacy,
                    "cart restored"
                );
                if decoded.legacy {
                    store.save();
                }
            }
            Ok(None) => {
                tracing::debug!(key = %store.key, "no persisted cart; starting empty");
            }
            Err(err) => {
                tracing::warn!(
                    key = %store.key,
                    error = %err,
                    "failed to restore cart; starting empty"
                );
            }
        }
        store
    }

    fn read_persisted(&self) -> Result<Option<snapshot::Decoded>, StorageError> {
        let Some(raw) = self.storage.get(&self.key)? else {
            return Ok(None);
        };
        Ok(Some(snapshot::decode(&raw)?))
    }

    /// Persist the full id list. Returns whether the write succeeded.
    pub fn save(&mut self) -> bool {
        let result = CartSnapshot::new(self.cart.items().to_vec(), Utc::now())
            .encode()
            .map_err(StorageError::from)
            .and_then(|payload| self.storage.set(&self.key, &payload));

        self.last_save_ok = match result {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(
                    key = %self.key,
                    error = %err,
                    "failed to persist cart; keeping it in memory only"
                );
                false
            }
        };
        self.last_save_ok
    }

    fn execute(&mut self, command: CartCommand) -> Vec<CartEvent> {
        let events = match self.cart.handle(&command) {
            Ok(events) => events,
            Err(err) => {
                tracing::warn!(?command, error = %err, "cart command rejected");
                return Vec::new();
            }
        };

        for event in &events {
            self.cart.apply(event);
        }
        if !events.is_empty() {
            self.save();
        }
        events
    }

    /// Add the product if absent, remove it if present, then persist.
    pub fn toggle(&mut self, product_id: ProductId) -> CartEvent {
        let events = self.execute(CartCommand::Toggle { product_id });
        // Toggle always decides exactly one event.
        events
            .first()
            .copied()
            .unwrap_or(CartEvent::ItemRemoved { product_id })
    }

    /// Remove the product if present. Returns whether anything changed.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        !self.execute(CartCommand::Remove { product_id }).is_empty()
    }

    /// Drop ids the loaded catalog no longer offers, returning them.
    ///
    /// Does nothing unless the catalog actually loaded: a failed fetch must
    /// not erase the saved selection.
    pub fn reconcile(&mut self, catalog: &Catalog) -> Vec<ProductId> {
        if !catalog.is_loaded() {
            return Vec::new();
        }

        let stale: Vec<ProductId> = self
            .cart
            .items()
            .iter()
            .copied()
            .filter(|id| !catalog.contains(*id))
            .collect();

        if stale.is_empty() {
            return stale;
        }

        for product_id in &stale {
            let event = CartEvent::ItemRemoved {
                product_id: *product_id,
            };
            self.cart.apply(&event);
        }
        tracing::info!(
            removed = ?stale,
            remaining = self.cart.len(),
            "removed cart entries missing from the catalog"
        );
        self.save();
        stale
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.cart.contains(product_id)
    }

    pub fn len(&self) -> usize {
        self.cart.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// `false` after a failed write, until the next successful one.
    pub fn is_persisted(&self) -> bool {
        self.last_save_ok
    }

    /// Cart entries resolved against the catalog, in cart order. Ids the
    /// catalog does not know are skipped.
    pub fn resolve<'a>(&self, catalog: &'a Catalog) -> Vec<&'a Product> {
        self.cart
            .items()
            .iter()
            .filter_map(|id| catalog.get(*id))
            .collect()
    }

    /// Sum of the prices of the resolvable entries.
    pub fn total(&self, catalog: &Catalog) -> Money {
        self.resolve(catalog).iter().map(|p| p.price()).sum()
    }
}
