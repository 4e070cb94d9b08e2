//! Surge risk scoring and classification
//!
//! Global invariants enforced:
//! - Deterministic risk calculations
//! - Unknown events degrade to the default weight, never an error
//! - Weight and action tables are immutable statics

use serde::{Deserialize, Serialize};

/// Weight applied to any event missing from [`EVENT_WEIGHTS`]
pub const DEFAULT_EVENT_WEIGHT: i32 = 3;

/// Pollution units per scoring step (integer division)
pub const POLLUTION_STEP: i32 = 20;

/// Known events and their surge weights, keyed by lowercase name
pub const EVENT_WEIGHTS: &[(&str, i32)] = &[("diwali", 8), ("holi", 6), ("normal", 2)];

/// Action for labels outside LOW/MEDIUM/HIGH
pub const NO_ACTION: &str = "No action required";

/// Risk level classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RiskLevel {
    Low,    // <= 40
    Medium, // 41-70
    High,   // > 70
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW",
            RiskLevel::Medium => "MEDIUM",
            RiskLevel::High => "HIGH",
        }
    }

    /// Recommended hospital action for this level
    pub fn recommended_action(&self) -> &'static str {
        match self {
            RiskLevel::High => "Increase staff by 40%, pre-order supplies, alert emergency teams",
            RiskLevel::Medium => "Increase staff by 20%, check inventory levels",
            RiskLevel::Low => "Normal operations, monitor situation",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk level thresholds, both exclusive on the high side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RiskThresholds {
    pub medium: i32,
    pub high: i32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        RiskThresholds {
            medium: 40,
            high: 70,
        }
    }
}

/// Look up the surge weight for an event (case-insensitive)
pub fn event_weight(event: &str) -> i32 {
    let key = event.to_lowercase();
    match EVENT_WEIGHTS.iter().find(|(name, _)| *name == key) {
        Some((_, weight)) => *weight,
        None => {
            tracing::debug!(
                event,
                weight = DEFAULT_EVENT_WEIGHT,
                "unknown event, using default weight"
            );
            DEFAULT_EVENT_WEIGHT
        }
    }
}

/// Calculate the surge risk score
///
/// Formula:
/// score = weight(event) * (pollution_level / 20)
///
/// Division truncates toward zero, so negative pollution yields a zero or
/// negative score. Cannot overflow: |i32::MIN / 20| * 8 < i32::MAX.
pub fn calculate_risk_score(event: &str, pollution_level: i32) -> i32 {
    event_weight(event) * (pollution_level / POLLUTION_STEP)
}

/// Assign risk level with default thresholds
pub fn assign_risk_level(score: i32) -> RiskLevel {
    assign_risk_level_with_thresholds(score, &RiskThresholds::default())
}

/// Assign risk level with custom thresholds
pub fn assign_risk_level_with_thresholds(score: i32, thresholds: &RiskThresholds) -> RiskLevel {
    if score > thresholds.high {
        RiskLevel::High
    } else if score > thresholds.medium {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Map a raw level label to its recommended action
///
/// Labels other than LOW/MEDIUM/HIGH (exact, uppercase) get [`NO_ACTION`].
pub fn recommended_action_for(label: &str) -> &'static str {
    match label {
        "HIGH" => RiskLevel::High.recommended_action(),
        "MEDIUM" => RiskLevel::Medium.recommended_action(),
        "LOW" => RiskLevel::Low.recommended_action(),
        _ => NO_ACTION,
    }
}

/// Classify a score into a level and its recommended action
pub fn classify(score: i32) -> (RiskLevel, &'static str) {
    let level = assign_risk_level(score);
    (level, level.recommended_action())
}
