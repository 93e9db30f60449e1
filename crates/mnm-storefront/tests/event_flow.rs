//! Page events flowing through a session into a presentation sink.

use mnm_storefront::commands::{dispatch_event, open_container};
use mnm_storefront::{
    catalog_from_json, ChildSelection, ContainerSession, Key, Notice, NoticeKind,
    PresentationSink, SelectionView, SessionRegistry, StorefrontConfig, Tone, UiEvent,
};
use proptest::prelude::*;

const CATALOG: &str = r#"[
    {"id": "A", "price": "2.00"},
    {"id": "B", "price": "3.50"},
    {"id": "C", "price": "1.25", "max_qty": 2},
    {"id": "D", "price": "9.00", "in_stock": false}
]"#;

#[derive(Default)]
struct RecordingSink {
    views: Vec<SelectionView>,
    notices: Vec<Notice>,
}

impl PresentationSink for RecordingSink {
    fn render(&mut self, view: &SelectionView) {
        self.views.push(view.clone());
    }

    fn notify(&mut self, notice: &Notice) {
        self.notices.push(notice.clone());
    }
}

fn config(min: u32, max: u32, mode: &str) -> StorefrontConfig {
    let mut config = StorefrontConfig::default();
    config.container.min_qty = min;
    config.container.max_qty = max;
    config.container.pricing_mode = mode.to_string();
    config
}

fn session(min: u32, max: u32) -> ContainerSession {
    let catalog = catalog_from_json(CATALOG, &ChildSelection::All, 2).unwrap();
    ContainerSession::from_config(&config(min, max, "per_item"), catalog).unwrap()
}

fn input(item_id: &str, raw: &str) -> UiEvent {
    UiEvent::QuantityInput {
        item_id: item_id.to_string(),
        raw: raw.to_string(),
    }
}

fn increase(item_id: &str) -> UiEvent {
    UiEvent::IncreaseClicked {
        item_id: item_id.to_string(),
    }
}

#[test]
fn test_full_selection_flow() {
    let mut session = session(3, 5);
    let mut sink = RecordingSink::default();

    session.dispatch(input("A", "2"), &mut sink).unwrap();
    let view = sink.views.last().unwrap();
    assert_eq!(view.total_price, "$4.00");
    assert_eq!(view.tone, Tone::Warning);
    assert!(!view.add_to_cart_enabled);

    session.dispatch(input("B", "2"), &mut sink).unwrap();
    let view = sink.views.last().unwrap();
    assert_eq!(view.total_price, "$11.00");
    assert_eq!(view.tone, Tone::Success);
    assert!(view.add_to_cart_enabled);

    session.dispatch(input("B", "4"), &mut sink).unwrap();
    let view = sink.views.last().unwrap();
    assert_eq!(view.items[1].quantity, 3);
    assert_eq!(view.total_price, "$14.50");
    assert_eq!(view.items_label, "5/5 items (Maximum reached)");
    assert!(!view.increase_enabled);

    assert_eq!(sink.views.len(), 3);
    assert_eq!(sink.notices.len(), 1);
    assert_eq!(sink.notices[0].kind, NoticeKind::MaxLimitReached);
}

#[test]
fn test_increase_at_max_notifies_without_change() {
    let mut session = session(0, 2);
    let mut sink = RecordingSink::default();

    session.dispatch(input("A", "2"), &mut sink).unwrap();
    let before = sink.views.last().unwrap().clone();

    let outcome = session.dispatch(increase("B"), &mut sink).unwrap();
    assert!(outcome.notice.is_some());
    assert_eq!(outcome.view, before);
    assert_eq!(sink.notices.len(), 1);
}

#[test]
fn test_per_item_cap_is_silent() {
    let mut session = session(0, 0);
    let mut sink = RecordingSink::default();

    session.dispatch(input("C", "5"), &mut sink).unwrap();
    assert_eq!(sink.views.last().unwrap().items[2].quantity, 2);
    assert!(!sink.views.last().unwrap().items[2].can_increase);
    assert!(sink.notices.is_empty());
}

#[test]
fn test_out_of_stock_item_is_not_offered() {
    let session = session(0, 0);
    let view = session.view();
    assert_eq!(view.items.len(), 3);
    assert!(view.items.iter().all(|item| item.item_id != "D"));
}

#[test]
fn test_garbage_input_clears_item() {
    let mut session = session(0, 0);
    session.handle(input("A", "3")).unwrap();

    let outcome = session.handle(input("A", "three")).unwrap();
    assert_eq!(outcome.view.items[0].quantity, 0);
    assert_eq!(outcome.view.description, "Please select items.");
}

#[test]
fn test_clear_and_submit() {
    let mut session = session(1, 0);
    session.handle(input("A", "1")).unwrap();
    assert_eq!(
        session.handle(UiEvent::SubmitAttempted).unwrap().submit_allowed,
        Some(true)
    );

    session.handle(UiEvent::ClearSelection).unwrap();
    let outcome = session.handle(UiEvent::SubmitAttempted).unwrap();
    assert_eq!(outcome.submit_allowed, Some(false));
    assert_eq!(outcome.view.tone, Tone::Warning);
}

#[test]
fn test_fixed_price_view() {
    let mut config = config(0, 0, "fixed");
    config.container.fixed_price = "19.99".parse().unwrap();

    let catalog = catalog_from_json(CATALOG, &ChildSelection::All, 2).unwrap();
    let mut session = ContainerSession::from_config(&config, catalog).unwrap();

    let outcome = session.handle(input("B", "3")).unwrap();
    assert_eq!(outcome.view.total_price, "$19.99");
    assert_eq!(outcome.view.price_lines.len(), 1);
}

#[test]
fn test_dispatch_through_registry() {
    let registry = SessionRegistry::new();
    let opened = open_container(&registry, &config(0, 3, "per_item"), CATALOG).unwrap();
    let mut sink = RecordingSink::default();

    dispatch_event(&registry, &opened.session_id, input("A", "3"), &mut sink).unwrap();
    dispatch_event(
        &registry,
        &opened.session_id,
        UiEvent::KeyPressed {
            item_id: "B".to_string(),
            key: Key::ArrowUp,
        },
        &mut sink,
    )
    .unwrap();

    assert_eq!(sink.views.len(), 2);
    assert_eq!(sink.notices.len(), 1);
    assert_eq!(sink.views[1].items[1].quantity, 0);
}

fn event_strategy() -> impl Strategy<Value = UiEvent> {
    let id = prop::sample::select(vec!["A", "B", "C"]);
    prop_oneof![
        (id.clone(), -2_i32..9).prop_map(|(id, n)| input(id, &n.to_string())),
        id.clone().prop_map(increase),
        id.clone().prop_map(|id| UiEvent::DecreaseClicked {
            item_id: id.to_string()
        }),
        id.prop_map(|id| UiEvent::KeyPressed {
            item_id: id.to_string(),
            key: Key::ArrowUp
        }),
        Just(UiEvent::ClearSelection),
        Just(UiEvent::SubmitAttempted),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn view_never_exceeds_container_cap(
        max in 1_u32..6,
        events in prop::collection::vec(event_strategy(), 0..30),
    ) {
        let mut session = session(0, max);

        for event in events {
            let outcome = session.handle(event).unwrap();
            let total: u32 = outcome.view.items.iter().map(|item| item.quantity).sum();

            prop_assert!(total <= max);
            prop_assert_eq!(outcome.view.limit_reached, total == max);
            prop_assert_eq!(outcome.view.add_to_cart_enabled, total > 0);
        }
    }
}
