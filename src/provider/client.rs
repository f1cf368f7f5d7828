use crate::config::ProviderSettings;
use crate::provider::carfax::CarfaxProvider;
use crate::provider::clearwin::ClearWinProvider;
use crate::provider::nhtsa::NhtsaProvider;
use crate::provider::types::ProviderError;
use crate::vin::Vin;
use futures::future::BoxFuture;
use std::sync::Arc;

/// A vehicle-history data source queried by VIN.
///
/// Implementations are independently swappable (mock vs. live) behind
/// this contract. A fetch performs a single outbound call with no
/// retries; retry policy, if ever added, belongs to the aggregator.
pub trait HistoryProvider: Send + Sync {
    /// Fetch raw history data for a validated VIN.
    fn fetch(&self, vin: Vin) -> BoxFuture<'_, Result<serde_json::Value, ProviderError>>;

    /// Stable provider identifier, used in report provenance.
    fn provider_name(&self) -> &'static str;
}

/// Assemble the default provider set from configuration.
///
/// Carfax and ClearWin are always registered; NHTSA joins when enabled
/// because it performs a live network call against the public VPIC API.
pub fn default_providers(settings: &ProviderSettings) -> Vec<Arc<dyn HistoryProvider>> {
    let mut providers: Vec<Arc<dyn HistoryProvider>> = vec![
        Arc::new(CarfaxProvider::new(settings.carfax_api_key.clone())),
        Arc::new(ClearWinProvider::new(settings.clearwin_api_key.clone())),
    ];

    if settings.nhtsa_enabled {
        providers.push(Arc::new(NhtsaProvider::new()));
    }

    providers
}
