//! End-to-end selection scenarios against the public engine API.

use mnm_core::{
    ChildCatalog, ChildItem, ContainerConfig, CoreError, Money, PricingMode, SelectionEngine,
    SelectionStatus, SelectionWarning,
};

fn a_and_b(a_cents: i64, b_cents: i64) -> ChildCatalog {
    ChildCatalog::new(vec![
        ChildItem::new("A", Money::from_cents(a_cents)),
        ChildItem::new("B", Money::from_cents(b_cents)),
    ])
}

#[test]
fn test_per_item_container_clamps_at_shared_cap() {
    let config = ContainerConfig::new(3, 5, PricingMode::PerItem);
    let mut engine = SelectionEngine::new(config, a_and_b(200, 350));

    engine.set_quantity("A", 2).unwrap();
    assert_eq!(engine.total_items(), 2);
    assert_eq!(engine.total_price(), Money::from_cents(400));
    assert!(!engine.is_valid());

    engine.set_quantity("B", 2).unwrap();
    assert_eq!(engine.total_items(), 4);
    assert_eq!(engine.total_price(), Money::from_cents(1100));
    assert!(engine.is_valid());

    let change = engine.set_quantity("B", 4).unwrap();
    assert_eq!(change.applied, 3);
    assert!(change.clamped());
    assert_eq!(change.warning(), Some(SelectionWarning::MaxTotalExceeded));
    assert_eq!(engine.quantity("B"), 3);
    assert_eq!(engine.total_items(), 5);
    assert_eq!(engine.total_price(), Money::from_cents(1250));
    assert!(engine.is_valid());
}

#[test]
fn test_fixed_price_ignores_selection() {
    let config =
        ContainerConfig::new(0, 0, PricingMode::Fixed).with_fixed_price(Money::from_cents(999));
    let mut engine = SelectionEngine::new(config, a_and_b(200, 350));

    assert_eq!(engine.total_price(), Money::from_cents(999));
    assert!(!engine.is_valid());

    engine.set_quantity("A", 1).unwrap();
    assert_eq!(engine.total_price(), Money::from_cents(999));
    assert!(engine.is_valid());

    engine.set_quantity("B", 7).unwrap();
    assert_eq!(engine.total_price(), Money::from_cents(999));
    assert_eq!(engine.addons_total(), Money::from_cents(200 + 7 * 350));
    assert!(engine.is_valid());

    let breakdown = engine.snapshot().breakdown;
    assert_eq!(breakdown.base, None);
    assert_eq!(breakdown.addons, None);
}

#[test]
fn test_base_addon_adds_base_price() {
    let config =
        ContainerConfig::new(0, 0, PricingMode::BaseAddon).with_base_price(Money::from_cents(500));
    let mut engine = SelectionEngine::new(config, a_and_b(150, 350));

    engine.set_quantity("A", 1).unwrap();
    assert_eq!(engine.addons_total(), Money::from_cents(150));
    assert_eq!(engine.total_price(), Money::from_cents(650));
}

#[test]
fn test_increment_at_max_is_refused() {
    let config = ContainerConfig::new(0, 2, PricingMode::PerItem);
    let mut engine = SelectionEngine::new(config, a_and_b(200, 350));

    engine.set_quantity("B", 2).unwrap();
    let before = engine.snapshot();

    let change = engine.increment("A").unwrap();
    assert!(change.refused);
    assert_eq!(change.warning(), Some(SelectionWarning::MaxTotalExceeded));
    assert_eq!(engine.quantity("A"), 0);
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn test_per_item_cap_clamps() {
    let catalog = ChildCatalog::new(vec![
        ChildItem::new("X", Money::from_cents(100)).with_max_per_item(2)
    ]);
    let mut engine = SelectionEngine::new(ContainerConfig::default(), catalog);

    let change = engine.set_quantity("X", 3).unwrap();
    assert_eq!(change.applied, 2);
    assert!(change.clamped());
    assert_eq!(change.warning(), None);
}

#[test]
fn test_decrement_frees_room_for_other_items() {
    let config = ContainerConfig::new(0, 3, PricingMode::PerItem);
    let mut engine = SelectionEngine::new(config, a_and_b(200, 350));

    engine.set_quantity("A", 3).unwrap();
    assert!(engine.increment("B").unwrap().refused);

    engine.decrement("A").unwrap();
    let change = engine.increment("B").unwrap();
    assert!(!change.refused);
    assert_eq!(engine.quantity("B"), 1);
    assert_eq!(engine.total_items(), 3);
}

#[test]
fn test_filtered_item_is_unknown() {
    let catalog = ChildCatalog::new(vec![
        ChildItem::new("A", Money::from_cents(200)),
        ChildItem::new("gone", Money::from_cents(100)).in_stock(false),
    ]);
    let mut engine = SelectionEngine::new(ContainerConfig::default(), catalog);

    assert_eq!(
        engine.increment("gone"),
        Err(CoreError::UnknownItem("gone".to_string()))
    );
}

#[test]
fn test_empty_catalog_is_never_valid() {
    let engine = SelectionEngine::new(
        ContainerConfig::new(0, 0, PricingMode::PerItem),
        ChildCatalog::default(),
    );

    assert_eq!(engine.total_items(), 0);
    assert!(!engine.is_valid());
    assert_eq!(
        engine.status(),
        SelectionStatus::Empty {
            minimum: 0,
            needed: 0
        }
    );
}

#[test]
fn test_inconsistent_config_is_repaired() {
    let config = ContainerConfig::new(6, 4, PricingMode::PerItem);
    let mut engine = SelectionEngine::new(config, a_and_b(200, 350));

    engine.set_quantity("A", 4).unwrap();
    assert!(engine.is_valid());
    assert_eq!(engine.status(), SelectionStatus::Ready { selected: 4 });
}

#[test]
fn test_snapshot_serializes_for_the_page() {
    let config = ContainerConfig::new(1, 4, PricingMode::PerItem);
    let mut engine = SelectionEngine::new(config, a_and_b(200, 350));
    engine.set_quantity("B", 1).unwrap();

    let json = serde_json::to_value(engine.snapshot()).unwrap();
    assert_eq!(json["totalItems"], 1);
    assert_eq!(json["totalPrice"], 350);
    assert_eq!(json["pricingMode"], "per_item");
    assert_eq!(json["status"]["kind"], "ready");
    assert_eq!(json["progressPercent"], 25);
    assert_eq!(json["lines"][1]["itemId"], "B");
}
