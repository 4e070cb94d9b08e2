//! Surge prediction - ties together risk scoring and classification
//!
//! Global invariants enforced:
//! - Absent or unusable inputs fall back to defaults, never errors
//! - Identical requests yield identical predictions

use crate::risk::{self, RiskLevel, RiskThresholds};
use serde::{Deserialize, Serialize};

/// Event used when the request names none
pub const DEFAULT_EVENT: &str = "diwali";

/// Pollution level used when the request gives none (or an unparseable one)
pub const DEFAULT_POLLUTION_LEVEL: i32 = 150;

/// Fixed confidence reported with every prediction
pub const CONFIDENCE: u8 = 85;

/// Surge prediction input with defaults already applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurgeRequest {
    pub event: String,
    pub pollution_level: i32,
}

impl Default for SurgeRequest {
    fn default() -> Self {
        SurgeRequest {
            event: DEFAULT_EVENT.to_string(),
            pollution_level: DEFAULT_POLLUTION_LEVEL,
        }
    }
}

impl SurgeRequest {
    pub fn new(event: impl Into<String>, pollution_level: i32) -> Self {
        SurgeRequest {
            event: event.into(),
            pollution_level,
        }
    }

    /// Build a request from raw query parameters
    ///
    /// Missing or empty values take the defaults. A pollution level that does
    /// not parse as an `i32` also takes the default.
    pub fn from_params(event: Option<&str>, pollution_level: Option<&str>) -> Self {
        let event = match event {
            Some(e) if !e.is_empty() => e.to_string(),
            _ => DEFAULT_EVENT.to_string(),
        };

        let pollution_level = match pollution_level.map(str::trim) {
            Some(raw) if !raw.is_empty() => raw.parse::<i32>().unwrap_or_else(|_| {
                tracing::warn!(
                    value = raw,
                    default = DEFAULT_POLLUTION_LEVEL,
                    "unparseable pollution level, using default"
                );
                DEFAULT_POLLUTION_LEVEL
            }),
            _ => DEFAULT_POLLUTION_LEVEL,
        };

        SurgeRequest {
            event,
            pollution_level,
        }
    }
}

/// Scored and classified surge prediction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurgePrediction {
    pub risk_score: i32,
    pub risk_level: RiskLevel,
    pub recommended_action: &'static str,
    pub confidence: u8,
}

/// Stateless prediction service
#[derive(Debug, Clone, Copy, Default)]
pub struct SurgePredictionService {
    thresholds: RiskThresholds,
}

impl SurgePredictionService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a service with custom risk level thresholds
    pub fn with_thresholds(thresholds: RiskThresholds) -> Self {
        SurgePredictionService { thresholds }
    }

    /// Score and classify a request
    pub fn predict(&self, request: &SurgeRequest) -> SurgePrediction {
        let risk_score = risk::calculate_risk_score(&request.event, request.pollution_level);
        let risk_level = risk::assign_risk_level_with_thresholds(risk_score, &self.thresholds);

        SurgePrediction {
            risk_score,
            risk_level,
            recommended_action: risk_level.recommended_action(),
            confidence: CONFIDENCE,
        }
    }
}

/// Predict with default thresholds
pub fn predict_surge(event: &str, pollution_level: i32) -> SurgePrediction {
    SurgePredictionService::new().predict(&SurgeRequest::new(event, pollution_level))
}

/// Wire format of `GET /api/predict-surge`
///
/// `predicted_surge` carries the raw risk score, the same value as
/// `risk_score`. Consumers render it with a trailing `%`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictSurgeResponse {
    pub risk_level: RiskLevel,
    pub risk_score: i32,
    pub predicted_surge: i32,
    pub recommended_action: &'static str,
    pub confidence: u8,
}

impl From<SurgePrediction> for PredictSurgeResponse {
    fn from(prediction: SurgePrediction) -> Self {
        PredictSurgeResponse {
            risk_level: prediction.risk_level,
            risk_score: prediction.risk_score,
            predicted_surge: prediction.risk_score,
            recommended_action: prediction.recommended_action,
            confidence: prediction.confidence,
        }
    }
}
