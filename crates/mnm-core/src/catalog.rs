//! # Child Catalog
//!
//! The read-only set of items a customer may choose from. Which products end
//! up here (explicit list, category, tag) is decided by the host before the
//! catalog is built; this module only enforces what every catalog must hold.
//!
//! ## Invariants
//! - Every item is selectable (purchasable and in stock)
//! - Ids are unique; the first occurrence of a duplicate wins
//! - Iteration order is the order the host supplied (display order)

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::types::ChildItem;

/// Ordered, read-only map of item id → [`ChildItem`].
#[derive(Debug, Clone, Default)]
pub struct ChildCatalog {
    items: Vec<ChildItem>,
    index: HashMap<String, usize>,
}

impl ChildCatalog {
    /// Builds a catalog, dropping unselectable items and duplicate ids.
    ///
    /// ## Example
    /// ```rust
    /// use mnm_core::{ChildCatalog, ChildItem, Money};
    ///
    /// let catalog = ChildCatalog::new(vec![
    ///     ChildItem::new("A", Money::from_cents(200)),
    ///     ChildItem::new("B", Money::from_cents(350)).purchasable(false),
    /// ]);
    /// assert_eq!(catalog.len(), 1);
    /// assert!(catalog.contains("A"));
    /// assert!(!catalog.contains("B"));
    /// ```
    pub fn new(items: impl IntoIterator<Item = ChildItem>) -> Self {
        let mut catalog = ChildCatalog::default();

        for item in items {
            if !item.is_selectable() {
                debug!(item_id = %item.id, "Skipping unselectable child item");
                continue;
            }

            if catalog.index.contains_key(&item.id) {
                warn!(item_id = %item.id, "Duplicate child item id, keeping first");
                continue;
            }

            catalog.index.insert(item.id.clone(), catalog.items.len());
            catalog.items.push(item);
        }

        catalog
    }

    /// Looks up an item by id.
    pub fn get(&self, id: &str) -> Option<&ChildItem> {
        self.index.get(id).map(|&i| &self.items[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items in display order.
    pub fn iter(&self) -> impl Iterator<Item = &ChildItem> {
        self.items.iter()
    }
}

impl FromIterator<ChildItem> for ChildCatalog {
    fn from_iter<I: IntoIterator<Item = ChildItem>>(iter: I) -> Self {
        ChildCatalog::new(iter)
    }
}
