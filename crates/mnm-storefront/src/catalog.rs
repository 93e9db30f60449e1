//! # Catalog Loading
//!
//! Child product records as the host hands them over (ids as numbers or
//! strings, prices as decimal text) and their conversion into a
//! [`ChildCatalog`].
//!
//! ## Child Resolution
//! ```text
//! host records ──► ChildSelection ──────────────► simple only ──► ChildCatalog
//!                  ├─ All         as supplied                   (drops unpurchasable,
//!                  ├─ Products    listed ids, list order          out of stock and
//!                  └─ Categories  any listed category, by name    duplicate ids)
//! ```

use std::str::FromStr;

use mnm_core::validation::validate_price_cents;
use mnm_core::{ChildCatalog, ChildItem, Money};
use rust_decimal::Decimal;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::StorefrontResult;

/// The only product type a container can hold.
pub const SIMPLE_PRODUCT_TYPE: &str = "simple";

/// One child product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    /// Unit price in major units, e.g. `"3.50"` or `3.5`.
    pub price: Decimal,

    /// The product's own quantity cap; absent or 0 means none.
    #[serde(default)]
    pub max_qty: Option<u32>,

    #[serde(default = "default_true")]
    pub purchasable: bool,

    #[serde(default = "default_true")]
    pub in_stock: bool,

    /// `simple`, `variable`, `grouped`, ...
    #[serde(default = "default_product_type", alias = "type")]
    pub product_type: String,

    #[serde(default, deserialize_with = "ids_from_numbers_or_strings")]
    pub category_ids: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_product_type() -> String {
    SIMPLE_PRODUCT_TYPE.to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl RawId {
    fn into_id(self) -> Option<String> {
        match self {
            RawId::Number(n) => Some(n.to_string()),
            RawId::Text(s) if s.trim().is_empty() => None,
            RawId::Text(s) => Some(s.trim().to_string()),
        }
    }
}

fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawId::deserialize(deserializer)?
        .into_id()
        .ok_or_else(|| de::Error::custom("empty item id"))
}

/// A list of ids given as numbers or strings; blank entries are skipped.
pub(crate) fn ids_from_numbers_or_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<RawId>::deserialize(deserializer)?;
    Ok(raw.into_iter().filter_map(RawId::into_id).collect())
}

impl CatalogEntry {
    /// Converts the record, rounding its price to `decimals` places.
    pub fn to_child_item(&self, decimals: u8) -> StorefrontResult<ChildItem> {
        let unit_price = Money::from_decimal(self.price, decimals)?;
        validate_price_cents(unit_price.cents())?;

        let mut item = ChildItem::new(self.id.clone(), unit_price)
            .with_max_per_item(self.max_qty.unwrap_or(0))
            .purchasable(self.purchasable)
            .in_stock(self.in_stock);

        if let Some(name) = &self.name {
            item = item.with_name(name.clone());
        }

        Ok(item)
    }

    pub fn is_simple(&self) -> bool {
        self.product_type.eq_ignore_ascii_case(SIMPLE_PRODUCT_TYPE)
    }

    /// Name used for ordering; falls back to the id.
    fn sort_name(&self) -> String {
        self.name.as_deref().unwrap_or(&self.id).to_lowercase()
    }

    fn in_any_category(&self, categories: &[String]) -> bool {
        self.category_ids.iter().any(|id| categories.contains(id))
    }
}

// =============================================================================
// Child Selection
// =============================================================================

/// Which host records a container offers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ChildSelection {
    /// Every record the host supplied, in the order supplied.
    #[default]
    All,

    /// Exactly these product ids, in this order.
    Products(Vec<String>),

    /// Every product in at least one of these categories, ordered by name.
    Categories(Vec<String>),
}

impl ChildSelection {
    /// Picks the records this selection allows.
    ///
    /// Listed ids the host did not supply are skipped.
    pub fn resolve<'a>(&self, entries: &'a [CatalogEntry]) -> Vec<&'a CatalogEntry> {
        match self {
            ChildSelection::All => entries.iter().collect(),
            ChildSelection::Products(ids) => ids
                .iter()
                .filter_map(|id| {
                    let entry = entries.iter().find(|entry| &entry.id == id);
                    if entry.is_none() {
                        debug!(item_id = %id, "Configured child product not supplied");
                    }
                    entry
                })
                .collect(),
            ChildSelection::Categories(categories) => {
                let mut chosen: Vec<&CatalogEntry> = entries
                    .iter()
                    .filter(|entry| entry.in_any_category(categories))
                    .collect();
                chosen.sort_by_key(|entry| entry.sort_name());
                chosen
            }
        }
    }
}

/// Builds a catalog from host records.
///
/// Only simple products picked by `selection` are kept. A kept record with
/// a bad price fails the whole catalog; unselectable and duplicate records
/// are dropped by [`ChildCatalog::new`].
pub fn build_catalog(
    entries: &[CatalogEntry],
    selection: &ChildSelection,
    decimals: u8,
) -> StorefrontResult<ChildCatalog> {
    let items = selection
        .resolve(entries)
        .into_iter()
        .filter(|entry| entry.is_simple())
        .map(|entry| entry.to_child_item(decimals))
        .collect::<StorefrontResult<Vec<_>>>()?;

    let catalog = ChildCatalog::new(items);
    debug!(
        supplied = entries.len(),
        selectable = catalog.len(),
        ?selection,
        "Catalog built"
    );

    Ok(catalog)
}

/// Builds a catalog from a JSON array of records.
///
/// ## Example
/// ```rust
/// use mnm_storefront::catalog::{catalog_from_json, ChildSelection};
///
/// let catalog = catalog_from_json(
///     r#"[{"id": 11, "price": "2.00"}, {"id": "12", "price": "3.50", "max_qty": 2}]"#,
///     &ChildSelection::All,
///     2,
/// ).unwrap();
/// assert_eq!(catalog.len(), &ChildSelection::All, 2);
/// assert_eq!(catalog.get("12").unwrap().max_per_item, &ChildSelection::All, 2);
/// ```
pub fn catalog_from_json(
    json: &str,
    selection: &ChildSelection,
    decimals: u8,
) -> StorefrontResult<ChildCatalog> {
    let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
    build_catalog(&entries, selection, decimals)
}

impl FromStr for CatalogEntry {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StorefrontError;

    #[test]
    fn test_entry_defaults() {
        let entry: CatalogEntry = r#"{"id": 7, "price": "1.50"}"#.parse().unwrap();
        assert_eq!(entry.id, "7");
        assert!(entry.purchasable);
        assert!(entry.in_stock);
        assert_eq!(entry.max_qty, None);
        assert!(entry.is_simple());
        assert!(entry.category_ids.is_empty());

        let item = entry.to_child_item(2).unwrap();
        assert_eq!(item.unit_price, Money::from_cents(150));
        assert_eq!(item.max_per_item, 0);
    }

    #[test]
    fn test_unselectable_entries_are_dropped() {
        let catalog = catalog_from_json(
            r#"[
                {"id": "a", "price": "1.00"},
                {"id": "b", "price": "1.00", "purchasable": false},
                {"id": "c", "price": "1.00", "in_stock": false}
            ]"#,
            &ChildSelection::All,
            2,
        )
        .unwrap();

        assert_eq!(catalog.len(), 1);
        assert!(catalog.contains("a"));
    }

    #[test]
    fn test_negative_price_fails() {
        let result = catalog_from_json(r#"[{"id": "a", "price": "-1.00"}]"#, &ChildSelection::All, 2);
        assert!(matches!(result, Err(StorefrontError::Core(_))));
    }

    #[test]
    fn test_empty_id_fails() {
        let result = catalog_from_json(r#"[{"id": " ", "price": "1.00"}]"#, &ChildSelection::All, 2);
        assert!(matches!(result, Err(StorefrontError::Json(_))));
    }

    #[test]
    fn test_fractional_cent_price_rounds() {
        let entry: CatalogEntry = r#"{"id": "x", "price": "0.125"}"#.parse().unwrap();
        assert_eq!(entry.to_child_item(2).unwrap().unit_price.cents(), 13);
    }

    const SHOP: &str = r#"[
        {"id": 1, "name": "Walnut Brownie", "price": "2.00", "category_ids": [10]},
        {"id": 2, "name": "almond cookie", "price": "1.50", "category_ids": ["10", 20]},
        {"id": 3, "name": "Gift Box", "price": "9.00", "type": "grouped", "category_ids": [10]},
        {"id": 4, "name": "Cherry Tart", "price": "3.00", "category_ids": [20]},
        {"id": 5, "name": "Lemon Bar", "price": "2.50", "category_ids": [30]}
    ]"#;

    fn ids(catalog: &ChildCatalog) -> Vec<&str> {
        catalog.iter().map(|item| item.id.as_str()).collect()
    }

    #[test]
    fn test_all_keeps_supplied_order() {
        let catalog = catalog_from_json(SHOP, &ChildSelection::All, 2).unwrap();
        assert_eq!(ids(&catalog), ["1", "2", "4", "5"]);
    }

    #[test]
    fn test_products_follow_listed_order() {
        let selection = ChildSelection::Products(vec![
            "5".to_string(),
            "1".to_string(),
            "99".to_string(),
            "3".to_string(),
        ]);
        let catalog = catalog_from_json(SHOP, &selection, 2).unwrap();

        // 99 is not supplied and 3 is not a simple product
        assert_eq!(ids(&catalog), ["5", "1"]);
    }

    #[test]
    fn test_categories_sorted_by_name() {
        let selection = ChildSelection::Categories(vec!["10".to_string(), "20".to_string()]);
        let catalog = catalog_from_json(SHOP, &selection, 2).unwrap();

        assert_eq!(ids(&catalog), ["2", "4", "1"]);
    }

    #[test]
    fn test_unmatched_category_is_empty() {
        let selection = ChildSelection::Categories(vec!["77".to_string()]);
        let catalog = catalog_from_json(SHOP, &selection, 2).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_bad_price_outside_selection_is_ignored() {
        let json = r#"[
            {"id": "a", "price": "1.00"},
            {"id": "b", "price": "-5.00"}
        ]"#;
        let selection = ChildSelection::Products(vec!["a".to_string()]);
        assert_eq!(catalog_from_json(json, &selection, 2).unwrap().len(), 1);
        assert!(catalog_from_json(json, &ChildSelection::All, 2).is_err());
    }
}
