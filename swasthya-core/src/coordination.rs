//! Static agent coordination status

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentCoordinationStatus {
    pub predictive_agent: &'static str,
    pub operations_agent: &'static str,
    pub coordination_agent: &'static str,
    pub status: &'static str,
}

impl AgentCoordinationStatus {
    pub fn current() -> Self {
        AgentCoordinationStatus {
            predictive_agent: "Forecasting 200% surge in 48 hours",
            operations_agent: "Pre-ordering supplies and adjusting staff",
            coordination_agent: "Negotiating resource sharing between 3 hospitals",
            status: "ACTIVE",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_value(AgentCoordinationStatus::current()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "predictiveAgent": "Forecasting 200% surge in 48 hours",
                "operationsAgent": "Pre-ordering supplies and adjusting staff",
                "coordinationAgent": "Negotiating resource sharing between 3 hospitals",
                "status": "ACTIVE"
            })
        );
    }
}
