//! # Container Session
//!
//! One container on screen: its engine plus the display settings needed to
//! turn engine state into a [`SelectionView`].
//!
//! ## Event Handling Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Container Session                                    │
//! │                                                                         │
//! │  Page Event               Session                 Result                │
//! │  ──────────               ───────                 ──────                │
//! │                                                                         │
//! │  type "4" ───────────────► set_raw_quantity() ──► view (+ notice if     │
//! │                                                    the cap clamped)     │
//! │                                                                         │
//! │  click + ────────────────► increment() ─────────► view (+ notice if     │
//! │                                                    refused)             │
//! │                                                                         │
//! │  click - ────────────────► decrement() ─────────► view                  │
//! │                                                                         │
//! │  click Add to cart ──────► is_valid() ──────────► view + submit_allowed │
//! │                                                                         │
//! │  NOTE: an unknown item id leaves the selection untouched and comes      │
//! │        back as an error value.                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use chrono::Utc;
use mnm_core::{
    ChildCatalog, ContainerConfig, CurrencyFormat, PriceFormatter, QuantityChange,
    SelectionEngine, SelectionWarning,
};
use tracing::{debug, info};

use crate::config::{MessageSettings, NoticeSettings, StorefrontConfig};
use crate::error::StorefrontResult;
use crate::event::{EventOutcome, Key, UiEvent};
use crate::view::{Notice, PresentationSink, SelectionView, Tone};

// =============================================================================
// Container Session
// =============================================================================

/// The engine for one container plus everything needed to render it.
pub struct ContainerSession {
    engine: SelectionEngine,
    formatter: Box<dyn PriceFormatter + Send>,
    messages: MessageSettings,
    notice: NoticeSettings,
}

impl std::fmt::Debug for ContainerSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContainerSession")
            .field("engine", &self.engine)
            .field("messages", &self.messages)
            .field("notice", &self.notice)
            .finish_non_exhaustive()
    }
}

impl ContainerSession {
    /// Creates a session with default currency formatting and text.
    pub fn new(config: ContainerConfig, catalog: ChildCatalog) -> Self {
        ContainerSession {
            engine: SelectionEngine::new(config, catalog),
            formatter: Box::new(CurrencyFormat::default()),
            messages: MessageSettings::default(),
            notice: NoticeSettings::default(),
        }
    }

    /// Creates a session from loaded storefront configuration.
    pub fn from_config(config: &StorefrontConfig, catalog: ChildCatalog) -> StorefrontResult<Self> {
        let container = config.container_config()?;

        info!(
            min = container.min_quantity,
            max = container.max_quantity,
            mode = %container.pricing_mode,
            items = catalog.len(),
            "Opening container session"
        );

        Ok(ContainerSession {
            engine: SelectionEngine::new(container, catalog),
            formatter: Box::new(config.currency.format()),
            messages: config.messages.clone(),
            notice: config.notice.clone(),
        })
    }

    /// Replaces the price formatter (e.g. with a closure from the host).
    pub fn with_formatter(mut self, formatter: impl PriceFormatter + Send + 'static) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    pub fn with_messages(mut self, messages: MessageSettings) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_notice_settings(mut self, notice: NoticeSettings) -> Self {
        self.notice = notice;
        self
    }

    pub fn engine(&self) -> &SelectionEngine {
        &self.engine
    }

    /// Renders the current state.
    pub fn view(&self) -> SelectionView {
        SelectionView::render(
            &self.engine.snapshot(),
            self.engine.config().size_hint(),
            self.formatter.as_ref(),
            &self.messages,
        )
    }

    /// Applies one page event and returns what the page should show.
    pub fn handle(&mut self, event: UiEvent) -> StorefrontResult<EventOutcome> {
        debug!(?event, "Handling page event");

        let change = match &event {
            UiEvent::QuantityInput { item_id, raw } => {
                Some(self.engine.set_raw_quantity(item_id, raw)?)
            }
            UiEvent::IncreaseClicked { item_id }
            | UiEvent::KeyPressed {
                item_id,
                key: Key::ArrowUp,
            } => Some(self.engine.increment(item_id)?),
            UiEvent::DecreaseClicked { item_id }
            | UiEvent::KeyPressed {
                item_id,
                key: Key::ArrowDown,
            } => Some(self.engine.decrement(item_id)?),
            UiEvent::ClearSelection => {
                self.engine.clear();
                None
            }
            UiEvent::SubmitAttempted => None,
        };

        let notice = change.as_ref().and_then(|c| self.notice_for(c));
        let mut view = self.view();

        let submit_allowed = match event {
            UiEvent::SubmitAttempted => {
                let allowed = self.engine.is_valid();
                if !allowed {
                    debug!(total_items = self.engine.total_items(), "Submit blocked");
                    view.tone = Tone::Warning;
                }
                Some(allowed)
            }
            _ => None,
        };

        Ok(EventOutcome {
            view,
            notice,
            submit_allowed,
        })
    }

    /// Handles an event and forwards the result to a sink.
    pub fn dispatch(
        &mut self,
        event: UiEvent,
        sink: &mut dyn PresentationSink,
    ) -> StorefrontResult<EventOutcome> {
        let outcome = self.handle(event)?;

        if let Some(notice) = &outcome.notice {
            sink.notify(notice);
        }
        sink.render(&outcome.view);

        Ok(outcome)
    }

    fn notice_for(&self, change: &QuantityChange) -> Option<Notice> {
        match change.warning()? {
            SelectionWarning::MaxTotalExceeded => Some(Notice::max_limit_reached(
                self.engine.config().max_quantity,
                &self.messages,
                &self.notice,
                Utc::now(),
            )),
        }
    }
}

// =============================================================================
// Shared Session State
// =============================================================================

/// A session shared between threads.
///
/// The engine itself is not synchronized; every access goes through this
/// lock.
#[derive(Debug, Clone)]
pub struct SessionState {
    session: Arc<Mutex<ContainerSession>>,
}

impl SessionState {
    pub fn new(session: ContainerSession) -> Self {
        SessionState {
            session: Arc::new(Mutex::new(session)),
        }
    }

    /// Executes a function with read access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let view = state.with_session(|s| s.view());
    /// ```
    pub fn with_session<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&ContainerSession) -> R,
    {
        let session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&session)
    }

    /// Executes a function with write access to the session.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let outcome = state.with_session_mut(|s| s.handle(event))?;
    /// ```
    pub fn with_session_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut ContainerSession) -> R,
    {
        let mut session = self.session.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut session)
    }
}
