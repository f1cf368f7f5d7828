//! Concurrent multi-provider data aggregation.
//!
//! One aggregation run fans out to every configured provider in
//! parallel, waits for all of them, and collects the outcomes into a
//! single envelope. A provider failure never aborts the run or leaks to
//! the caller; the failed slot is recorded with an error status and the
//! confidence computation downstream degrades accordingly.

use crate::error::ReportError;
use crate::provider::HistoryProvider;
use crate::vin::Vin;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of a single provider call attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchStatus {
    Success,
    Error,
}

/// One provider's contribution to an aggregation run. Immutable once
/// created; `payload` is absent when the fetch failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderResult {
    pub provider_name: String,
    pub payload: Option<serde_json::Value>,
    pub retrieved_at: DateTime<Utc>,
    pub status: FetchStatus,
}

/// Envelope for one aggregation run.
///
/// `providers` always holds exactly one entry per configured provider,
/// in registration order, regardless of how many fetches failed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedData {
    pub vin: Vin,
    pub providers: Vec<ProviderResult>,
    pub aggregated_at: DateTime<Utc>,
}

impl AggregatedData {
    pub fn success_count(&self) -> usize {
        self.providers
            .iter()
            .filter(|p| p.status == FetchStatus::Success)
            .count()
    }

    /// Names of the providers that returned data, in registration order.
    pub fn successful_provider_names(&self) -> Vec<String> {
        self.providers
            .iter()
            .filter(|p| p.status == FetchStatus::Success)
            .map(|p| p.provider_name.clone())
            .collect()
    }
}

/// Fans out to all configured providers for a VIN.
pub struct DataAggregator {
    providers: Vec<Arc<dyn HistoryProvider>>,
    fetch_timeout: Duration,
}

impl DataAggregator {
    /// Build an aggregator over a fixed provider set.
    ///
    /// An empty set is a configuration error, rejected at startup so the
    /// confidence division can never hit zero at request time.
    pub fn new(
        providers: Vec<Arc<dyn HistoryProvider>>,
        fetch_timeout: Duration,
    ) -> Result<Self, ReportError> {
        if providers.is_empty() {
            return Err(ReportError::NoProvidersConfigured);
        }
        Ok(Self {
            providers,
            fetch_timeout,
        })
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Run one aggregation for a validated VIN.
    ///
    /// All providers are queried concurrently; the call blocks until
    /// every fetch completes, fails, or times out. `join_all` preserves
    /// submission order, which makes the one-result-per-provider
    /// invariant structural rather than something to re-assert.
    pub async fn aggregate(&self, vin: &Vin) -> AggregatedData {
        let aggregated_at = Utc::now();

        let fetches = self.providers.iter().map(|provider| {
            let provider = Arc::clone(provider);
            let vin = vin.clone();
            let fetch_timeout = self.fetch_timeout;

            async move {
                let name = provider.provider_name();
                match tokio::time::timeout(fetch_timeout, provider.fetch(vin)).await {
                    Ok(Ok(payload)) => {
                        debug!("Provider {} returned data", name);
                        ProviderResult {
                            provider_name: name.to_string(),
                            payload: Some(payload),
                            retrieved_at: Utc::now(),
                            status: FetchStatus::Success,
                        }
                    }
                    Ok(Err(e)) => {
                        warn!("Failed to fetch from {}: {}", name, e);
                        ProviderResult {
                            provider_name: name.to_string(),
                            payload: None,
                            retrieved_at: Utc::now(),
                            status: FetchStatus::Error,
                        }
                    }
                    Err(_) => {
                        warn!(
                            "Fetch from {} timed out after {:?}",
                            name, fetch_timeout
                        );
                        ProviderResult {
                            provider_name: name.to_string(),
                            payload: None,
                            retrieved_at: Utc::now(),
                            status: FetchStatus::Error,
                        }
                    }
                }
            }
        });

        let providers = futures::future::join_all(fetches).await;

        AggregatedData {
            vin: vin.clone(),
            providers,
            aggregated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::MockProvider;
    use serde_json::json;

    fn test_vin() -> Vin {
        Vin::new("1HGBH41JXMN109186").unwrap()
    }

    fn aggregator(providers: Vec<Arc<dyn HistoryProvider>>) -> DataAggregator {
        DataAggregator::new(providers, Duration::from_millis(200)).unwrap()
    }

    #[test]
    fn zero_providers_is_a_startup_error() {
        let result = DataAggregator::new(Vec::new(), Duration::from_secs(1));
        assert!(matches!(result, Err(ReportError::NoProvidersConfigured)));
    }

    #[tokio::test]
    async fn every_configured_provider_gets_exactly_one_slot() {
        let agg = aggregator(vec![
            Arc::new(MockProvider::succeeding("A", json!({ "a": 1 }))),
            Arc::new(MockProvider::failing("B")),
            Arc::new(MockProvider::succeeding("C", json!({ "c": 3 }))),
        ]);

        let data = agg.aggregate(&test_vin()).await;
        assert_eq!(data.providers.len(), 3);
        assert_eq!(data.vin, test_vin());
    }

    #[tokio::test]
    async fn results_keep_submission_order_not_completion_order() {
        // The stalling provider finishes last but stays in slot 0.
        let agg = DataAggregator::new(
            vec![
                Arc::new(MockProvider::stalling(
                    "Slow",
                    Duration::from_millis(50),
                    json!({ "slow": true }),
                )),
                Arc::new(MockProvider::succeeding("Fast", json!({ "fast": true }))),
            ],
            Duration::from_secs(1),
        )
        .unwrap();

        let data = agg.aggregate(&test_vin()).await;
        assert_eq!(data.providers[0].provider_name, "Slow");
        assert_eq!(data.providers[1].provider_name, "Fast");
        assert_eq!(data.providers[0].status, FetchStatus::Success);
    }

    #[tokio::test]
    async fn one_failure_never_disturbs_the_others() {
        let agg = aggregator(vec![
            Arc::new(MockProvider::succeeding("Carfax", json!({ "ok": true }))),
            Arc::new(MockProvider::failing("ClearWin")),
        ]);

        let data = agg.aggregate(&test_vin()).await;
        assert_eq!(data.providers[0].status, FetchStatus::Success);
        assert!(data.providers[0].payload.is_some());
        assert_eq!(data.providers[1].status, FetchStatus::Error);
        assert!(data.providers[1].payload.is_none());
        assert_eq!(data.successful_provider_names(), vec!["Carfax"]);
    }

    #[tokio::test]
    async fn total_failure_is_still_an_aggregation_not_an_error() {
        let agg = aggregator(vec![
            Arc::new(MockProvider::failing("A")),
            Arc::new(MockProvider::failing("B")),
        ]);

        let data = agg.aggregate(&test_vin()).await;
        assert_eq!(data.providers.len(), 2);
        assert_eq!(data.success_count(), 0);
        assert!(data.providers.iter().all(|p| p.status == FetchStatus::Error));
    }

    #[tokio::test]
    async fn a_stalled_provider_is_timed_out_and_marked_as_error() {
        let agg = aggregator(vec![
            Arc::new(MockProvider::stalling(
                "Hung",
                Duration::from_secs(5),
                json!({}),
            )),
            Arc::new(MockProvider::succeeding("Live", json!({ "ok": true }))),
        ]);

        let data = agg.aggregate(&test_vin()).await;
        assert_eq!(data.providers[0].status, FetchStatus::Error);
        assert_eq!(data.providers[1].status, FetchStatus::Success);
    }
}
