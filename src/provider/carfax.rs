//! Carfax vehicle-history provider.
//!
//! Returns representative history data in the shape the Carfax report
//! API uses. TODO: wire up the live `api.carfax.com` endpoint once API
//! credentials are provisioned; the key is already threaded through
//! configuration.

use crate::provider::client::HistoryProvider;
use crate::provider::types::ProviderError;
use crate::vin::Vin;
use futures::future::BoxFuture;
use serde_json::json;
use tracing::info;

pub struct CarfaxProvider {
    #[allow(dead_code)]
    api_key: Option<String>,
}

impl CarfaxProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }
}

impl HistoryProvider for CarfaxProvider {
    fn fetch(&self, vin: Vin) -> BoxFuture<'_, Result<serde_json::Value, ProviderError>> {
        Box::pin(async move {
            let data = json!({
                "vin": vin.as_str(),
                "accident_history": [
                    {
                        "date": "2020-05-15",
                        "description": "Minor rear-end collision",
                        "severity": "minor"
                    }
                ],
                "ownership_history": [
                    { "owner": "John Doe", "from": "2018-01-01", "to": "2022-06-30" },
                    { "owner": "Jane Smith", "from": "2022-07-01", "to": "present" }
                ],
                "title_status": "Clean",
                "odometer_readings": [
                    { "date": "2020-01-01", "mileage": 15000 },
                    { "date": "2023-01-01", "mileage": 45000 }
                ]
            });

            info!("Fetched data from Carfax for VIN {}", vin);
            Ok(data)
        })
    }

    fn provider_name(&self) -> &'static str {
        "Carfax"
    }
}
