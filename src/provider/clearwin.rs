//! ClearWin vehicle-history provider.
//!
//! Same arrangement as the Carfax client: representative data in the
//! upstream report shape until live credentials exist.

use crate::provider::client::HistoryProvider;
use crate::provider::types::ProviderError;
use crate::vin::Vin;
use futures::future::BoxFuture;
use serde_json::json;
use tracing::info;

pub struct ClearWinProvider {
    #[allow(dead_code)]
    api_key: Option<String>,
}

impl ClearWinProvider {
    pub fn new(api_key: Option<String>) -> Self {
        Self { api_key }
    }
}

impl HistoryProvider for ClearWinProvider {
    fn fetch(&self, vin: Vin) -> BoxFuture<'_, Result<serde_json::Value, ProviderError>> {
        Box::pin(async move {
            let data = json!({
                "vin": vin.as_str(),
                "damage_reports": [
                    {
                        "date": "2019-08-20",
                        "description": "Windshield replacement",
                        "cost": 350
                    }
                ],
                "service_history": [
                    { "date": "2019-03-10", "service": "Oil change", "mileage": 12000 },
                    { "date": "2021-09-15", "service": "Tire replacement", "mileage": 30000 }
                ],
                "recall_information": [
                    {
                        "recall_date": "2020-02-01",
                        "description": "Airbag sensor recall",
                        "status": "completed"
                    }
                ],
                "market_value": {
                    "current_value": 25000,
                    "depreciation_rate": 0.12
                }
            });

            info!("Fetched data from ClearWin for VIN {}", vin);
            Ok(data)
        })
    }

    fn provider_name(&self) -> &'static str {
        "ClearWin"
    }
}
