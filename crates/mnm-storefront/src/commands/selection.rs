//! # Selection Commands
//!
//! Opening, driving and closing container sessions.
//!
//! ## Session Lifecycle
//! ```text
//! ┌──────────┐  open_container   ┌──────────┐  handle_event   ┌──────────┐
//! │  Page    │──────────────────►│  Open    │◄───────────────►│  Open    │
//! │  loaded  │                   │ (empty)  │                 │(selected)│
//! └──────────┘                   └──────────┘                 └──────────┘
//!                                      │                            │
//!                                      └──────── close_container ───┘
//!                                                     │
//!                                                     ▼
//!                                               (session gone)
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::catalog_from_json;
use crate::config::{ContainerSettings, StorefrontConfig};
use crate::error::ApiError;
use crate::event::{EventOutcome, UiEvent};
use crate::state::{ContainerSession, SessionId, SessionRegistry};
use crate::view::{PresentationSink, SelectionView};

/// Response to opening a container.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpenedContainer {
    pub session_id: String,
    pub view: SelectionView,
}

/// Opens a container using the `[container]` section of the config.
///
/// ## Arguments
/// * `catalog_json` - JSON array of child product records
pub fn open_container(
    registry: &SessionRegistry,
    config: &StorefrontConfig,
    catalog_json: &str,
) -> Result<OpenedContainer, ApiError> {
    debug!("open_container command");

    let selection = config.container.child_selection()?;
    let catalog = catalog_from_json(catalog_json, &selection, config.currency.decimals)?;
    let session = ContainerSession::from_config(config, catalog)?;
    let view = session.view();
    let session_id = registry.open(session);

    Ok(OpenedContainer {
        session_id: session_id.to_string(),
        view,
    })
}

/// Opens a container whose settings come from the page parameter blob.
///
/// The blob replaces the `[container]` section and overrides whichever
/// currency keys it carries (`currency_symbol`, `currency_position`,
/// `price_decimals`, `price_decimal_sep`, `price_thousand_sep`). Messages
/// and notice settings still come from `config`.
pub fn open_container_with_params(
    registry: &SessionRegistry,
    config: &StorefrontConfig,
    params_json: &str,
    catalog_json: &str,
) -> Result<OpenedContainer, ApiError> {
    debug!("open_container_with_params command");

    let container = ContainerSettings::from_params_json(params_json)?;
    let currency = config.currency.with_params_json(params_json)?;
    let config = StorefrontConfig {
        container,
        currency,
        ..config.clone()
    };
    config.validate()?;

    open_container(registry, &config, catalog_json)
}

/// Returns the current view of a container.
pub fn get_view(registry: &SessionRegistry, session_id: &str) -> Result<SelectionView, ApiError> {
    debug!(session_id, "get_view command");

    let state = registry.get(session_id.parse::<SessionId>()?)?;
    Ok(state.with_session(|s| s.view()))
}

/// Applies one page event to a container.
pub fn handle_event(
    registry: &SessionRegistry,
    session_id: &str,
    event: UiEvent,
) -> Result<EventOutcome, ApiError> {
    debug!(session_id, ?event, "handle_event command");

    let state = registry.get(session_id.parse::<SessionId>()?)?;
    let outcome = state.with_session_mut(|s| s.handle(event))?;
    Ok(outcome)
}

/// Applies one page event and pushes the result to `sink`.
pub fn dispatch_event(
    registry: &SessionRegistry,
    session_id: &str,
    event: UiEvent,
    sink: &mut dyn PresentationSink,
) -> Result<EventOutcome, ApiError> {
    debug!(session_id, ?event, "dispatch_event command");

    let state = registry.get(session_id.parse::<SessionId>()?)?;
    let outcome = state.with_session_mut(|s| s.dispatch(event, sink))?;
    Ok(outcome)
}

/// Closes a container session.
pub fn close_container(registry: &SessionRegistry, session_id: &str) -> Result<(), ApiError> {
    debug!(session_id, "close_container command");

    let id = session_id.parse::<SessionId>()?;
    if registry.close(id) {
        Ok(())
    } else {
        Err(ApiError::not_found("Session", session_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChildSource;
    use crate::error::ErrorCode;

    const CATALOG: &str = r#"[
        {"id": 11, "name": "Truffle", "price": "2.00"},
        {"id": 12, "name": "Cluster", "price": "3.50"}
    ]"#;

    #[test]
    fn test_open_and_close() {
        let registry = SessionRegistry::new();
        let opened = open_container(&registry, &StorefrontConfig::default(), CATALOG).unwrap();

        assert_eq!(opened.view.items.len(), 2);
        assert_eq!(registry.len(), 1);

        close_container(&registry, &opened.session_id).unwrap();
        assert!(registry.is_empty());

        let err = close_container(&registry, &opened.session_id).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_unknown_session() {
        let registry = SessionRegistry::new();
        let err = get_view(&registry, "nope").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_stale_item_is_not_found() {
        let registry = SessionRegistry::new();
        let opened = open_container(&registry, &StorefrontConfig::default(), CATALOG).unwrap();

        let err = handle_event(
            &registry,
            &opened.session_id,
            UiEvent::IncreaseClicked {
                item_id: "99".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Item not found: 99");
    }

    #[test]
    fn test_params_override_container() {
        let registry = SessionRegistry::new();
        let opened = open_container_with_params(
            &registry,
            &StorefrontConfig::default(),
            r#"{"min_qty": "2", "max_qty": "4", "pricing_mode": "base_addon", "base_price": "5"}"#,
            CATALOG,
        )
        .unwrap();

        assert_eq!(opened.view.size_hint, "Choose 2–4 items");
        assert_eq!(opened.view.items_label, "0/4 items");

        let outcome = handle_event(
            &registry,
            &opened.session_id,
            UiEvent::IncreaseClicked {
                item_id: "11".to_string(),
            },
        )
        .unwrap();
        assert_eq!(outcome.view.total_price, "$7.00");
    }

    #[test]
    fn test_params_carry_currency() {
        let registry = SessionRegistry::new();
        let opened = open_container_with_params(
            &registry,
            &StorefrontConfig::default(),
            r#"{
                "min_qty": 1,
                "pricing_mode": "per_item",
                "currency_symbol": "€",
                "currency_position": "right_space",
                "price_decimals": 2,
                "price_decimal_sep": ",",
                "price_thousand_sep": "."
            }"#,
            r#"[{"id": 11, "price": "1234.50"}]"#,
        )
        .unwrap();

        let outcome = handle_event(
            &registry,
            &opened.session_id,
            UiEvent::IncreaseClicked {
                item_id: "11".to_string(),
            },
        )
        .unwrap();
        assert_eq!(outcome.view.total_price, "1.234,50 €");
    }

    #[test]
    fn test_params_with_bad_decimals_are_rejected() {
        let registry = SessionRegistry::new();
        let err = open_container_with_params(
            &registry,
            &StorefrontConfig::default(),
            r#"{"price_decimals": 12}"#,
            CATALOG,
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ConfigError);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_configured_child_products() {
        let mut config = StorefrontConfig::default();
        config.container.child_source = ChildSource::Products;
        config.container.child_products = vec!["12".to_string()];

        let registry = SessionRegistry::new();
        let opened = open_container(&registry, &config, CATALOG).unwrap();

        assert_eq!(opened.view.items.len(), 1);
        assert_eq!(opened.view.items[0].item_id, "12");
    }

    #[test]
    fn test_bad_catalog_is_validation_error() {
        let registry = SessionRegistry::new();
        let err = open_container(&registry, &StorefrontConfig::default(), "not json").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(registry.is_empty());
    }
}
