//! Debounced live price for the currently selected instrument.
//!
//! Every selection cancels the previous one. A fetch only starts after the
//! debounce window has passed without another selection, and its result is
//! published only if the selection is still current.

use riskdesk_core::types::{AssetClass, Quote};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::service::PriceService;

/// Default quiet period before fetching.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Live price state of the current selection.
#[derive(Debug, Clone, PartialEq)]
pub enum LivePrice {
    /// Nothing selected.
    Idle,
    /// Waiting for the debounce window or the upstream response.
    Loading {
        symbol: String,
        asset_class: AssetClass,
    },
    /// Fresh quote for the current selection.
    Live(Quote),
    /// The fetch failed; treat as "no live price".
    Unavailable {
        symbol: String,
        asset_class: AssetClass,
    },
}

impl LivePrice {
    /// Quote, if live.
    pub fn quote(&self) -> Option<&Quote> {
        match self {
            LivePrice::Live(quote) => Some(quote),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LivePrice::Loading { .. })
    }
}

/// Publishes the live price of whatever was selected last.
pub struct LivePriceTracker {
    service: Arc<PriceService>,
    debounce: Duration,
    // Held while publishing so a superseded fetch cannot overwrite a newer state
    current: Arc<Mutex<Option<CancellationToken>>>,
    state: Arc<watch::Sender<LivePrice>>,
}

impl LivePriceTracker {
    /// Create a new tracker.
    pub fn new(service: Arc<PriceService>, debounce: Duration) -> Self {
        let (state, _) = watch::channel(LivePrice::Idle);
        Self {
            service,
            debounce,
            current: Arc::new(Mutex::new(None)),
            state: Arc::new(state),
        }
    }

    /// Watch state changes.
    pub fn subscribe(&self) -> watch::Receiver<LivePrice> {
        self.state.subscribe()
    }

    /// Current state.
    pub fn current(&self) -> LivePrice {
        self.state.borrow().clone()
    }

    /// Select an instrument, abandoning any pending selection.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn select(&self, symbol: impl Into<String>, asset_class: AssetClass) -> JoinHandle<()> {
        let symbol = symbol.into();
        let token = CancellationToken::new();

        {
            let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
            if let Some(previous) = current.replace(token.clone()) {
                previous.cancel();
            }
            self.state.send_replace(LivePrice::Loading {
                symbol: symbol.clone(),
                asset_class,
            });
        }

        let service = self.service.clone();
        let current = self.current.clone();
        let state = self.state.clone();
        let debounce = self.debounce;

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!(%symbol, %asset_class, "Selection superseded during debounce");
                    return;
                }
                _ = tokio::time::sleep(debounce) => {}
            }

            let quote = service
                .fetch_price_cancellable(&symbol, asset_class, &token)
                .await;

            let _guard = current.lock().unwrap_or_else(PoisonError::into_inner);
            if token.is_cancelled() {
                debug!(%symbol, %asset_class, "Discarding price for abandoned selection");
                return;
            }

            let next = match quote {
                Some(quote) => LivePrice::Live(quote),
                None => LivePrice::Unavailable {
                    symbol,
                    asset_class,
                },
            };
            state.send_replace(next);
        })
    }

    /// Abandon the current selection.
    pub fn clear(&self) {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = current.take() {
            token.cancel();
        }
        self.state.send_replace(LivePrice::Idle);
    }
}

impl Drop for LivePriceTracker {
    fn drop(&mut self) {
        let current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(token) = current.as_ref() {
            token.cancel();
        }
    }
}
