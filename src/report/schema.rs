//! Structured report schema expected back from the text-generation
//! service.
//!
//! Open-ended arrays (individual accidents, owners, recalls, claims)
//! stay as raw JSON values; their shape varies by model and provider
//! coverage and nothing downstream indexes into them.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleReport {
    pub vehicle_identification: VehicleIdentification,
    pub accident_history: AccidentHistory,
    pub ownership_history: OwnershipHistory,
    pub title_status: TitleStatus,
    pub recalls: Recalls,
    pub maintenance: Maintenance,
    pub insurance_claims: InsuranceClaims,
    pub overall_assessment: OverallAssessment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VehicleIdentification {
    pub vin: String,
    pub make: String,
    pub model: String,
    pub year: u16,
    pub engine: String,
    pub transmission: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccidentHistory {
    pub total_accidents: u32,
    pub severity: String,
    pub structural_damage: bool,
    pub flood_damage: bool,
    pub accidents: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OwnershipHistory {
    pub total_owners: u32,
    pub average_ownership_duration_months: u32,
    pub commercial_use: bool,
    pub rental_history: bool,
    pub owners: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TitleStatus {
    pub status: String,
    pub issues: Vec<String>,
    pub state_issued: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recalls {
    pub total_recalls: u32,
    pub open_recalls: u32,
    pub safety_recalls: u32,
    pub recall_list: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Maintenance {
    pub regular_maintenance: bool,
    pub total_services: u32,
    pub overdue_services: Vec<String>,
    pub last_service: LastService,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LastService {
    pub date: String,
    pub mileage: u32,
    #[serde(rename = "type")]
    pub service_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceClaims {
    pub total_claims: u32,
    pub claims_severity: String,
    pub claims: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallAssessment {
    pub condition: String,
    pub risk_level: String,
    pub recommended_action: String,
    pub key_findings: Vec<String>,
    pub estimated_value: EstimatedValue,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimatedValue {
    pub min: f64,
    pub max: f64,
    pub currency: String,
}
