//! Scripted provider shared by the unit tests.

use async_trait::async_trait;
use riskdesk_core::error::QuoteError;
use riskdesk_core::traits::QuoteProvider;
use riskdesk_core::types::PriceTick;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

pub(crate) struct ScriptedProvider {
    name: String,
    prices: Mutex<HashMap<String, Decimal>>,
    calls: Mutex<Vec<String>>,
    delay: Option<Duration>,
}

impl ScriptedProvider {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            prices: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
            delay: None,
        }
    }

    pub(crate) fn with_price(self, symbol: &str, price: Decimal) -> Self {
        self.prices.lock().unwrap().insert(symbol.to_string(), price);
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn fail(&self, symbol: &str) {
        self.prices.lock().unwrap().remove(symbol);
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl QuoteProvider for ScriptedProvider {
    async fn latest_price(&self, symbol: &str) -> Result<PriceTick, QuoteError> {
        self.calls.lock().unwrap().push(symbol.to_string());

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let price = self.prices.lock().unwrap().get(symbol).copied();
        price.map(PriceTick::new).ok_or_else(|| QuoteError::Status {
            status: 404,
            body: format!("unknown symbol {}", symbol),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}
