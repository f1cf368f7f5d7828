use crate::report::schema::VehicleReport;
use crate::vin::Vin;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of a synthesized report.
///
/// The tagged union lets consumers tell a successfully parsed report
/// from a degraded one at compile time instead of sniffing an untyped
/// blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReportBody {
    /// The generation service returned text that parsed as the expected
    /// schema.
    Structured { report: VehicleReport },
    /// The service returned text we could not parse. The raw text is
    /// kept verbatim so nothing is silently lost.
    Unparsed { raw: String, parse_error: String },
    /// The generation call itself failed; no text was produced.
    GenerationFailed { message: String },
}

impl ReportBody {
    pub fn is_structured(&self) -> bool {
        matches!(self, ReportBody::Structured { .. })
    }
}

/// A synthesized vehicle-history report. Built once, immutable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub vin: Vin,
    pub body: ReportBody,
    pub generated_at: DateTime<Utc>,
    /// Providers that contributed data, in registration order.
    pub providers_used: Vec<String>,
    /// Fraction of configured providers that returned data, in [0, 1].
    pub confidence_score: f64,
}
