//! Scriptable in-memory provider for tests and demos.

use crate::provider::client::HistoryProvider;
use crate::provider::types::ProviderError;
use crate::vin::Vin;
use futures::future::BoxFuture;
use std::time::Duration;

enum Behavior {
    Succeed(serde_json::Value),
    Fail,
    /// Sleep past any reasonable fetch timeout, then succeed.
    Stall(Duration, serde_json::Value),
}

pub struct MockProvider {
    name: &'static str,
    behavior: Behavior,
}

impl MockProvider {
    pub fn succeeding(name: &'static str, payload: serde_json::Value) -> Self {
        Self {
            name,
            behavior: Behavior::Succeed(payload),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            name,
            behavior: Behavior::Fail,
        }
    }

    pub fn stalling(name: &'static str, delay: Duration, payload: serde_json::Value) -> Self {
        Self {
            name,
            behavior: Behavior::Stall(delay, payload),
        }
    }
}

impl HistoryProvider for MockProvider {
    fn fetch(&self, _vin: Vin) -> BoxFuture<'_, Result<serde_json::Value, ProviderError>> {
        Box::pin(async move {
            match &self.behavior {
                Behavior::Succeed(payload) => Ok(payload.clone()),
                Behavior::Fail => Err(ProviderError::Unavailable(format!(
                    "{} is down for maintenance",
                    self.name
                ))),
                Behavior::Stall(delay, payload) => {
                    tokio::time::sleep(*delay).await;
                    Ok(payload.clone())
                }
            }
        })
    }

    fn provider_name(&self) -> &'static str {
        self.name
    }
}
