//! Fixture report for mock mode.
//!
//! With `mock_mode` enabled the synthesizer skips aggregation and
//! generation entirely and returns this canned report, which keeps
//! demos and frontend work independent of provider and AI credentials.

use crate::report::schema::VehicleReport;
use crate::report::types::{Report, ReportBody};
use crate::vin::Vin;
use chrono::Utc;

/// Canned completion in the exact shape the instruction template asks
/// the model for.
pub const FIXTURE_RESPONSE: &str = r#"
{
  "vehicle_identification": {
    "vin": "1HGBH41JXMN109186",
    "make": "Honda",
    "model": "Accord",
    "year": 2021,
    "engine": "1.5L Turbo I4",
    "transmission": "CVT Automatic"
  },
  "accident_history": {
    "total_accidents": 0,
    "severity": "none",
    "structural_damage": false,
    "flood_damage": false,
    "accidents": []
  },
  "ownership_history": {
    "total_owners": 1,
    "average_ownership_duration_months": 36,
    "commercial_use": false,
    "rental_history": false,
    "owners": [
      {
        "duration": 36,
        "location": "California"
      }
    ]
  },
  "title_status": {
    "status": "clean",
    "issues": [],
    "state_issued": "California"
  },
  "recalls": {
    "total_recalls": 0,
    "open_recalls": 0,
    "safety_recalls": 0,
    "recall_list": []
  },
  "maintenance": {
    "regular_maintenance": true,
    "total_services": 6,
    "overdue_services": [],
    "last_service": {
      "date": "2024-11-15",
      "mileage": 42000,
      "type": "Oil Change & Tire Rotation"
    }
  },
  "insurance_claims": {
    "total_claims": 0,
    "claims_severity": "low",
    "claims": []
  },
  "overall_assessment": {
    "condition": "excellent",
    "risk_level": "low",
    "recommended_action": "buy",
    "key_findings": [
      "Clean title with no accident history",
      "Single owner with regular maintenance",
      "No open recalls or safety concerns",
      "Well-maintained with documented service history"
    ],
    "estimated_value": {
      "min": 22000,
      "max": 25000,
      "currency": "USD"
    },
    "confidence": 0.92
  }
}
"#;

/// Build the fixture report for a VIN.
///
/// Parsed through the same schema the real pipeline uses, so a drifted
/// fixture shows up as an `Unparsed` body instead of a panic.
pub fn mock_report(vin: &Vin) -> Report {
    let body = match serde_json::from_str::<VehicleReport>(FIXTURE_RESPONSE) {
        Ok(mut report) => {
            report.vehicle_identification.vin = vin.to_string();
            ReportBody::Structured { report }
        }
        Err(e) => ReportBody::Unparsed {
            raw: FIXTURE_RESPONSE.to_string(),
            parse_error: e.to_string(),
        },
    };

    Report {
        vin: vin.clone(),
        body,
        generated_at: Utc::now(),
        providers_used: vec!["Carfax".to_string(), "ClearWin".to_string()],
        confidence_score: 1.0,
    }
}
