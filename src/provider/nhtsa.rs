//! NHTSA VPIC decode-VIN provider.
//!
//! The only live provider: hits the public VPIC API (no key required)
//! and returns the extended decode record for the VIN.

use crate::provider::client::HistoryProvider;
use crate::provider::types::ProviderError;
use crate::vin::Vin;
use futures::future::BoxFuture;
use tracing::info;

const VPIC_BASE_URL: &str = "https://vpic.nhtsa.dot.gov/api/vehicles";

pub struct NhtsaProvider {
    client: reqwest::Client,
    base_url: String,
}

impl NhtsaProvider {
    pub fn new() -> Self {
        Self::with_base_url(VPIC_BASE_URL.to_string())
    }

    /// Point the client at an alternate endpoint, e.g. a local stub.
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }
}

impl Default for NhtsaProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the first decode record out of a VPIC response body.
///
/// VPIC wraps results in `{"Results": [...]}` and signals "nothing
/// found" with an empty array rather than an error status.
pub(crate) fn extract_vehicle_record(
    body: serde_json::Value,
) -> Result<serde_json::Value, ProviderError> {
    match body.get("Results").and_then(|r| r.as_array()) {
        Some(results) if !results.is_empty() => Ok(results[0].clone()),
        _ => Err(ProviderError::Parse(
            "no vehicle data in NHTSA response".to_string(),
        )),
    }
}

impl HistoryProvider for NhtsaProvider {
    fn fetch(&self, vin: Vin) -> BoxFuture<'_, Result<serde_json::Value, ProviderError>> {
        Box::pin(async move {
            let url = format!(
                "{}/decodevinvaluesextended/{}?format=json",
                self.base_url, vin
            );

            let response = self.client.get(&url).send().await?.error_for_status()?;
            let body: serde_json::Value = response.json().await?;
            let record = extract_vehicle_record(body)?;

            info!("Fetched data from NHTSA for VIN {}", vin);
            Ok(record)
        })
    }

    fn provider_name(&self) -> &'static str {
        "NHTSA"
    }
}
