//! HTTP API - routes query parameters into the core services

use anyhow::Context;
use axum::extract::{Query, State};
use axum::http::request::Parts;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use swasthya_core::crisis::UNSPECIFIED_CRISIS;
use swasthya_core::{
    AgentCoordinationStatus, CrisisSimulator, HospitalDirectory, HospitalStatus,
    PredictSurgeResponse, ResolvedConfig, SimulationResult, SurgePredictionService, SurgeRequest,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

#[derive(Debug, Clone, Copy, Default)]
pub struct AppState {
    predictor: SurgePredictionService,
    hospitals: HospitalDirectory,
    simulator: CrisisSimulator,
}

impl AppState {
    pub fn new(config: &ResolvedConfig) -> Self {
        AppState {
            predictor: SurgePredictionService::with_thresholds(config.thresholds),
            ..Default::default()
        }
    }
}

/// Build the API router; CORS admits only origins on the config's allow-list
pub fn router(config: &ResolvedConfig) -> Router {
    let allow_list = config.clone();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|origin| allow_list.is_origin_allowed(origin))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/predict-surge", get(predict_surge))
        .route("/api/hospitals", get(hospitals))
        .route("/api/simulate-crisis", get(simulate_crisis))
        .route("/api/agent-coordination", get(agent_coordination))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(config))
}

/// Bind and serve until interrupted
pub async fn run(config: ResolvedConfig) -> anyhow::Result<()> {
    let app = router(&config);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(
        address = %addr,
        origins = ?config.allowed_origins,
        medium_threshold = config.thresholds.medium,
        high_threshold = config.thresholds.high,
        "listening on http://{}",
        addr
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown requested"),
        Err(err) => {
            // Without a signal handler, keep serving
            tracing::error!(error = %err, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    }
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: "swasthya",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Raw query pairs, in request order
type QueryPairs = Vec<(String, String)>;

/// All values given for `key`, comma-joined
///
/// `?event=holi&event=diwali` yields `"holi,diwali"`. None if the key is absent.
fn query_value(pairs: &[(String, String)], key: &str) -> Option<String> {
    let values: Vec<&str> = pairs
        .iter()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .collect();

    if values.is_empty() {
        None
    } else {
        Some(values.join(","))
    }
}

async fn predict_surge(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Json<PredictSurgeResponse> {
    let event = query_value(&pairs, "event");
    let pollution_level = query_value(&pairs, "pollutionLevel");
    let request = SurgeRequest::from_params(event.as_deref(), pollution_level.as_deref());
    let prediction = state.predictor.predict(&request);

    tracing::debug!(
        event = %request.event,
        pollution_level = request.pollution_level,
        risk_score = prediction.risk_score,
        risk_level = %prediction.risk_level,
        "surge predicted"
    );

    Json(PredictSurgeResponse::from(prediction))
}

async fn hospitals(State(state): State<AppState>) -> Json<Vec<HospitalStatus>> {
    Json(state.hospitals.list())
}

async fn simulate_crisis(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Json<SimulationResult> {
    let crisis_type = query_value(&pairs, "type");
    let crisis_type = crisis_type.as_deref().unwrap_or(UNSPECIFIED_CRISIS);
    tracing::debug!(crisis = crisis_type, "crisis simulated");
    Json(state.simulator.simulate(crisis_type))
}

async fn agent_coordination() -> Json<AgentCoordinationStatus> {
    Json(AgentCoordinationStatus::current())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::response::Response;
    use serde_json::{json, Value};
    use swasthya_core::risk::RiskThresholds;
    use tower::ServiceExt;

    fn test_app() -> Router {
        router(&ResolvedConfig::defaults().unwrap())
    }

    async fn send_get(uri: &str) -> Response {
        test_app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn send_get_from(origin: &str, uri: &str) -> Response {
        test_app()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(header::ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_predict_surge_defaults() {
        let response = send_get("/api/predict-surge").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "riskLevel": "MEDIUM",
                "riskScore": 56,
                "predictedSurge": 56,
                "recommendedAction": "Increase staff by 20%, check inventory levels",
                "confidence": 85
            })
        );
    }

    #[tokio::test]
    async fn test_predict_surge_with_params() {
        let response = send_get("/api/predict-surge?event=Diwali&pollutionLevel=200").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["riskLevel"], "HIGH");
        assert_eq!(body["riskScore"], 80);
        assert_eq!(
            body["recommendedAction"],
            "Increase staff by 40%, pre-order supplies, alert emergency teams"
        );
    }

    #[tokio::test]
    async fn test_predict_surge_unknown_event_and_bad_pollution_degrade() {
        let response = send_get("/api/predict-surge?event=marathon&pollutionLevel=lots").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        // 3 * (150 / 20)
        assert_eq!(body["riskScore"], 21);
        assert_eq!(body["riskLevel"], "LOW");
    }

    #[tokio::test]
    async fn test_predict_surge_negative_pollution() {
        let response = send_get("/api/predict-surge?event=normal&pollutionLevel=-60").await;
        let body = body_json(response).await;
        assert_eq!(body["riskScore"], -6);
        assert_eq!(body["riskLevel"], "LOW");
    }

    #[tokio::test]
    async fn test_predict_surge_repeated_event_is_joined() {
        let response = send_get("/api/predict-surge?event=holi&event=diwali").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        // "holi,diwali" is not a known event: 3 * (150 / 20)
        assert_eq!(body["riskScore"], 21);
        assert_eq!(body["riskLevel"], "LOW");
    }

    #[tokio::test]
    async fn test_predict_surge_repeated_pollution_falls_back() {
        let response =
            send_get("/api/predict-surge?event=diwali&pollutionLevel=200&pollutionLevel=300")
                .await;
        assert_eq!(response.status(), StatusCode::OK);
        // "200,300" does not parse, default pollution 150 applies
        assert_eq!(body_json(response).await["riskScore"], 56);
    }

    #[tokio::test]
    async fn test_predict_surge_uses_configured_thresholds() {
        let mut config = ResolvedConfig::defaults().unwrap();
        config.thresholds = RiskThresholds { medium: 10, high: 50 };
        let response = router(&config)
            .oneshot(
                Request::builder()
                    .uri("/api/predict-surge")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let body = body_json(response).await;
        assert_eq!(body["riskScore"], 56);
        assert_eq!(body["riskLevel"], "HIGH");
    }

    #[test]
    fn test_query_value() {
        let pairs = vec![
            ("event".to_string(), "holi".to_string()),
            ("type".to_string(), "flood".to_string()),
            ("event".to_string(), "diwali".to_string()),
        ];
        assert_eq!(query_value(&pairs, "event").as_deref(), Some("holi,diwali"));
        assert_eq!(query_value(&pairs, "type").as_deref(), Some("flood"));
        assert_eq!(query_value(&pairs, "pollutionLevel"), None);
    }

    #[tokio::test]
    async fn test_hospitals() {
        let response = send_get("/api/hospitals").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let hospitals = body.as_array().unwrap();
        assert_eq!(hospitals.len(), 3);
        assert_eq!(
            hospitals[2],
            json!({
                "name": "Max Healthcare",
                "status": "CRITICAL",
                "totalBeds": 80,
                "availableBeds": 8
            })
        );
    }

    #[tokio::test]
    async fn test_simulate_crisis_echoes_type() {
        let body = body_json(send_get("/api/simulate-crisis?type=flood").await).await;
        assert_eq!(body["crisis"], "flood");
        assert_eq!(body["affectedHospitals"], 12);
        assert_eq!(body["estimatedPatients"], 1500);
        assert_eq!(body["responseTime"], "2-4 hours");
        assert_eq!(body["autoActions"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_simulate_crisis_without_type() {
        let response = send_get("/api/simulate-crisis").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["crisis"], "unspecified");
    }

    #[tokio::test]
    async fn test_simulate_crisis_repeated_type_is_joined() {
        let response = send_get("/api/simulate-crisis?type=flood&type=fire").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["crisis"], "flood,fire");
    }

    #[tokio::test]
    async fn test_agent_coordination() {
        let body = body_json(send_get("/api/agent-coordination").await).await;
        assert_eq!(body["status"], "ACTIVE");
        assert_eq!(body["predictiveAgent"], "Forecasting 200% surge in 48 hours");
        assert_eq!(body.as_object().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_health() {
        let body = body_json(send_get("/health").await).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        assert_eq!(send_get("/api/unknown").await.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_cors_allows_listed_origin() {
        let response = send_get_from("http://localhost:5173", "/api/hospitals").await;

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:5173"
        );
    }

    #[tokio::test]
    async fn test_cors_rejects_unlisted_origin() {
        let response = send_get_from("https://evil.example.com", "/api/hospitals").await;
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_cors_origin_match_is_exact() {
        for origin in [
            "http://localhost:5174",
            "https://swasthya-ai-six.vercel.app/",
            "http://swasthya-ai-six.vercel.app",
            "HTTP://LOCALHOST:5173",
        ] {
            let response = send_get_from(origin, "/api/hospitals").await;
            assert_eq!(response.status(), StatusCode::OK);
            assert!(
                response
                    .headers()
                    .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                    .is_none(),
                "{} should not be allowed",
                origin
            );
        }
    }

    #[tokio::test]
    async fn test_cors_uses_configured_origins() {
        let mut config = ResolvedConfig::defaults().unwrap();
        config.allowed_origins = vec!["https://ops.example.org".to_string()];
        let app = router(&config);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "https://ops.example.org")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://ops.example.org"
        );

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "http://localhost:5173")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }

    #[tokio::test]
    async fn test_cors_preflight_for_deployed_frontend() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/api/predict-surge")
                    .header(header::ORIGIN, "https://swasthya-ai-six.vercel.app")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://swasthya-ai-six.vercel.app"
        );
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(), "*");
        assert_eq!(headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(), "GET");
    }
}
