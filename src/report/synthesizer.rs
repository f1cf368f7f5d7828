//! Report synthesis orchestration.
//!
//! Aggregates provider data, asks the text-generation service for a
//! structured report, and degrades gracefully: a dead generation
//! service or an unparsable completion still yields a well-formed
//! [`Report`], just with a marked body.

use crate::aggregator::{AggregatedData, DataAggregator, FetchStatus};
use crate::config::AppConfig;
use crate::error::ReportError;
use crate::provider::default_providers;
use crate::report::generator::{ChatCompletionsGenerator, TextGenerator};
use crate::report::mocks;
use crate::report::schema::VehicleReport;
use crate::report::types::{Report, ReportBody};
use crate::vin::Vin;
use chrono::Utc;
use std::sync::Arc;
use tracing::{error, info};

pub struct ReportSynthesizer {
    aggregator: DataAggregator,
    generator: Arc<dyn TextGenerator>,
    mock_mode: bool,
}

impl ReportSynthesizer {
    pub fn new(
        aggregator: DataAggregator,
        generator: Arc<dyn TextGenerator>,
        mock_mode: bool,
    ) -> Self {
        Self {
            aggregator,
            generator,
            mock_mode,
        }
    }

    /// Wire up the default provider set and chat-completions generator
    /// from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, ReportError> {
        let aggregator = DataAggregator::new(
            default_providers(&config.providers),
            config.providers.fetch_timeout,
        )?;
        let generator = Arc::new(ChatCompletionsGenerator::new(&config.ai));
        Ok(Self::new(aggregator, generator, config.mock_mode))
    }

    /// Produce a report for a validated VIN. Infallible by design: every
    /// downstream failure is folded into the report body or the
    /// confidence score.
    pub async fn synthesize(&self, vin: &Vin) -> Report {
        if self.mock_mode {
            info!("Mock mode enabled, returning fixture report for VIN {}", vin);
            return mocks::mock_report(vin);
        }

        let aggregated = self.aggregator.aggregate(vin).await;
        let total = aggregated.providers.len();
        let successes = aggregated.success_count();
        let confidence_score = successes as f64 / total as f64;
        let providers_used = aggregated.successful_provider_names();

        let prompt = build_prompt(vin, &aggregated);
        let body = match self.generator.generate(prompt).await {
            Ok(text) => parse_report_body(text),
            Err(e) => {
                error!("Report generation failed for VIN {}: {}", vin, e);
                ReportBody::GenerationFailed {
                    message: format!("Unable to generate report: {e}"),
                }
            }
        };

        info!(
            "Synthesized report for VIN {} ({}/{} providers, confidence {:.2})",
            vin, successes, total, confidence_score
        );

        Report {
            vin: vin.clone(),
            body,
            generated_at: Utc::now(),
            providers_used,
            confidence_score,
        }
    }
}

/// Build the instruction prompt from one aggregation run.
///
/// Failed providers are listed as "Data unavailable" so the model is
/// never invited to fabricate values for them.
pub(crate) fn build_prompt(vin: &Vin, aggregated: &AggregatedData) -> String {
    let mut summaries = Vec::with_capacity(aggregated.providers.len());
    for provider in &aggregated.providers {
        match (&provider.status, &provider.payload) {
            (FetchStatus::Success, Some(payload)) => {
                summaries.push(format!("{}: {}", provider.provider_name, payload));
            }
            _ => {
                summaries.push(format!("{}: Data unavailable", provider.provider_name));
            }
        }
    }
    let data_summary = summaries.join("\n");

    format!(
        "Generate a vehicle history report for VIN: {vin}\n\
         \n\
         Data from providers:\n\
         {data_summary}\n\
         \n\
         Respond with a single JSON object and nothing else, using exactly these \
         top-level keys: vehicle_identification (vin, make, model, year, engine, \
         transmission), accident_history (total_accidents, severity, \
         structural_damage, flood_damage, accidents), ownership_history \
         (total_owners, average_ownership_duration_months, commercial_use, \
         rental_history, owners), title_status (status, issues, state_issued), \
         recalls (total_recalls, open_recalls, safety_recalls, recall_list), \
         maintenance (regular_maintenance, total_services, overdue_services, \
         last_service with date, mileage and type), insurance_claims \
         (total_claims, claims_severity, claims), overall_assessment (condition, \
         risk_level, recommended_action, key_findings, estimated_value with min, \
         max and currency, confidence).\n\
         \n\
         Base every field on the provider data above. Where a provider reported \
         no data, do not invent values for it."
    )
}

/// Parse completion text into a report body.
///
/// Models habitually wrap JSON in markdown fences, so those are
/// stripped first. Text that still fails to parse is preserved verbatim
/// alongside the parse error.
pub(crate) fn parse_report_body(text: String) -> ReportBody {
    let candidate = strip_code_fences(&text);
    match serde_json::from_str::<VehicleReport>(candidate) {
        Ok(report) => ReportBody::Structured { report },
        Err(e) => ReportBody::Unparsed {
            raw: text,
            parse_error: e.to_string(),
        },
    }
}

fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}
