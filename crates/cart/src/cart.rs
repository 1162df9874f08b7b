use serde::{Deserialize, Serialize};

use storefront_core::{Aggregate, AggregateRoot, DomainError, ProductId};

/// Aggregate root: the user's product selection.
///
/// An ordered set of product ids: insertion order is kept for display and an
/// id appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<ProductId>,
    version: u64,
}

impl Cart {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rebuild a cart from persisted ids. Repeated ids collapse to the first
    /// occurrence.
    pub fn restore(ids: impl IntoIterator<Item = ProductId>) -> Self {
        let mut items: Vec<ProductId> = Vec::new();
        for id in ids {
            if !items.contains(&id) {
                items.push(id);
            }
        }
        Self { items, version: 0 }
    }

    pub fn items(&self) -> &[ProductId] {
        &self.items
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.items.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl AggregateRoot for Cart {
    fn version(&self) -> u64 {
        self.version
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartCommand {
    /// Add the product if absent, remove it if present.
    Toggle { product_id: ProductId },
    /// Remove the product if present; no-op otherwise.
    Remove { product_id: ProductId },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    ItemAdded { product_id: ProductId },
    ItemRemoved { product_id: ProductId },
}

impl CartEvent {
    pub fn product_id(&self) -> ProductId {
        match self {
            CartEvent::ItemAdded { product_id } | CartEvent::ItemRemoved { product_id } => {
                *product_id
            }
        }
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::ItemAdded { product_id } => {
                if !self.contains(*product_id) {
                    self.items.push(*product_id);
                }
            }
            CartEvent::ItemRemoved { product_id } => {
                self.items.retain(|id| id != product_id);
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match *command {
            CartCommand::Toggle { product_id } if self.contains(product_id) => {
                Ok(vec![CartEvent::ItemRemoved { product_id }])
            }
            CartCommand::Toggle { product_id } => Ok(vec![CartEvent::ItemAdded { product_id }]),
            CartCommand::Remove { product_id } if self.contains(product_id) => {
                Ok(vec![CartEvent::ItemRemoved { product_id }])
            }
            CartCommand::Remove { .. } => Ok(Vec::new()),
        }
    }
}
