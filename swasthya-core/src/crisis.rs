//! Canned crisis simulation
//!
//! The crisis type is echoed back; every other field is fixed.

use serde::Serialize;

/// Hospitals affected in every simulation
pub const AFFECTED_HOSPITALS: u32 = 12;

/// Patients estimated in every simulation
pub const ESTIMATED_PATIENTS: u32 = 1500;

/// Response window reported in every simulation
pub const RESPONSE_TIME: &str = "2-4 hours";

/// Actions reported as triggered automatically
pub const AUTO_ACTIONS: [&str; 3] = [
    "Alerted staff networks",
    "Triggered supply chain protocols",
    "Notified partner hospitals",
];

/// Crisis type used when a request names none
pub const UNSPECIFIED_CRISIS: &str = "unspecified";

/// Simulation summary for a crisis type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub crisis: String,
    pub affected_hospitals: u32,
    pub estimated_patients: u32,
    pub response_time: &'static str,
    pub auto_actions: Vec<&'static str>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CrisisSimulator;

impl CrisisSimulator {
    pub fn new() -> Self {
        CrisisSimulator
    }

    pub fn simulate(&self, crisis_type: &str) -> SimulationResult {
        SimulationResult {
            crisis: crisis_type.to_string(),
            affected_hospitals: AFFECTED_HOSPITALS,
            estimated_patients: ESTIMATED_PATIENTS,
            response_time: RESPONSE_TIME,
            auto_actions: AUTO_ACTIONS.to_vec(),
        }
    }
}
