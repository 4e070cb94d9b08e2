//! Swasthya core library - hospital surge-risk scoring and mock hospital data

#![deny(warnings)]

// Global invariants enforced in this crate:
// - Every operation is synchronous and stateless
// - No global mutable state; lookup tables are immutable statics
// - Unknown or missing input degrades to a default, never an error
// - Identical input yields identical output

pub mod config;
pub mod coordination;
pub mod crisis;
pub mod hospitals;
pub mod prediction;
pub mod report;
pub mod risk;

pub use config::ResolvedConfig;
pub use coordination::AgentCoordinationStatus;
pub use crisis::{CrisisSimulator, SimulationResult};
pub use hospitals::{HospitalDirectory, HospitalLoad, HospitalStatus};
pub use prediction::{
    predict_surge, PredictSurgeResponse, SurgePrediction, SurgePredictionService, SurgeRequest,
};
pub use report::render_json;
pub use risk::{calculate_risk_score, classify, RiskLevel};
