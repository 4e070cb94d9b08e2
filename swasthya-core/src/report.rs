//! Text and JSON rendering for command-line output
//!
//! Global invariants enforced:
//! - Byte-for-byte identical output across runs
//! - JSON output uses the same field names as the HTTP API

use crate::coordination::AgentCoordinationStatus;
use crate::crisis::SimulationResult;
use crate::hospitals::HospitalStatus;
use crate::prediction::{PredictSurgeResponse, SurgeRequest};
use serde::Serialize;

/// Render any API record as pretty JSON
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Render a surge prediction as text
pub fn render_prediction_text(request: &SurgeRequest, response: &PredictSurgeResponse) -> String {
    let mut output = String::new();
    output.push_str(&format!("{:<20} {}\n", "Event", request.event));
    output.push_str(&format!("{:<20} {}\n", "Pollution level", request.pollution_level));
    output.push_str(&format!("{:<20} {}\n", "Risk score", response.risk_score));
    output.push_str(&format!("{:<20} {}\n", "Risk level", response.risk_level));
    output.push_str(&format!("{:<20} {}%\n", "Predicted surge", response.predicted_surge));
    output.push_str(&format!("{:<20} {}%\n", "Confidence", response.confidence));
    output.push_str(&format!("{:<20} {}\n", "Action", response.recommended_action));
    output
}

/// Render the hospital directory as a table
pub fn render_hospitals_text(hospitals: &[HospitalStatus]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<20} {:<10} {:<10} {}\n",
        "HOSPITAL", "STATUS", "BEDS", "OCCUPIED"
    ));

    for hospital in hospitals {
        let beds = format!("{}/{}", hospital.available_beds, hospital.total_beds);
        output.push_str(&format!(
            "{:<20} {:<10} {:<10} {}%\n",
            truncate_or_pad(&hospital.name, 20),
            hospital.status.as_str(),
            beds,
            hospital.occupancy_percent()
        ));
    }

    output
}

/// Render a crisis simulation as text
pub fn render_simulation_text(result: &SimulationResult) -> String {
    let mut output = String::new();
    output.push_str(&format!("{:<20} {}\n", "Crisis", result.crisis));
    output.push_str(&format!("{:<20} {}\n", "Affected hospitals", result.affected_hospitals));
    output.push_str(&format!("{:<20} {}\n", "Estimated patients", result.estimated_patients));
    output.push_str(&format!("{:<20} {}\n", "Response time", result.response_time));
    output.push_str("Auto actions:\n");
    for action in &result.auto_actions {
        output.push_str(&format!("  - {}\n", action));
    }
    output
}

/// Render the agent coordination status as text
pub fn render_coordination_text(status: &AgentCoordinationStatus) -> String {
    let mut output = String::new();
    output.push_str(&format!("{:<20} {}\n", "Status", status.status));
    output.push_str(&format!("{:<20} {}\n", "Predictive agent", status.predictive_agent));
    output.push_str(&format!("{:<20} {}\n", "Operations agent", status.operations_agent));
    output.push_str(&format!("{:<20} {}\n", "Coordination agent", status.coordination_agent));
    output
}

/// Truncate or pad string to fixed width
fn truncate_or_pad(s: &str, width: usize) -> String {
    if s.chars().count() > width {
        let kept: String = s.chars().take(width.saturating_sub(3)).collect();
        format!("{}...", kept)
    } else {
        format!("{:<width$}", s, width = width)
    }
}
