//! Steward Web Server
//!
//! Axum-based REST API for the Steward personal finance application.
//!
//! Every response uses the `{ success, data?, message? }` envelope.
//! Validation failures return 400 with a static message, unknown routes a
//! JSON 404, and everything else a generic 500 whose detail is logged
//! server-side (and echoed to the client only when STEWARD_ENV=development).

use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};

use steward_core::advisor::AdvisorClient;
use steward_core::db::Database;

mod handlers;


/// Tenant placeholder substituted at the HTTP boundary when the caller
/// omits `userId`. Core functions never apply this default.
pub const DEFAULT_USER_ID: &str = "default-user";

/// Maximum number of rows a list endpoint will return
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Server configuration
#[derive(Clone, Default)]
pub struct ServerConfig {
    /// Allowed CORS origins; empty means allow any origin
    pub allowed_origins: Vec<String>,
}

/// Shared application state
pub struct AppState {
    pub db: Database,
    /// Advisor backend; None when no provider is configured. Endpoints that
    /// only enrich deterministic results degrade gracefully without it.
    pub advisor: Option<AdvisorClient>,
}

/// Whether error detail should be echoed to clients
fn dev_mode() -> bool {
    std::env::var("STEWARD_ENV")
        .map(|v| v == "development")
        .unwrap_or(false)
}

/// Standard response envelope
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            message: None,
        })
    }
}

/// Handler error carrying an HTTP status, a client-safe message, and the
/// internal error for logging
pub struct AppError {
    status: StatusCode,
    message: String,
    internal: Option<anyhow::Error>,
}

impl AppError {
    pub fn bad_request(msg: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn not_found(msg: &str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.to_string(),
            internal: None,
        }
    }

    pub fn unavailable(msg: &str) -> Self {
        Self {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: msg.to_string(),
            internal: None,
        }
    }
}

impl From<steward_core::Error> for AppError {
    fn from(err: steward_core::Error) -> Self {
        match err {
            steward_core::Error::InvalidData(msg) => Self {
                status: StatusCode::BAD_REQUEST,
                message: msg,
                internal: None,
            },
            steward_core::Error::NotFound(msg) => Self {
                status: StatusCode::NOT_FOUND,
                message: msg,
                internal: None,
            },
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: "Internal server error".to_string(),
                internal: Some(anyhow::Error::new(other)),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log the full internal error if present
        if let Some(err) = &self.internal {
            error!(error = %err, "Internal error");
        }

        let mut body = serde_json::json!({
            "success": false,
            "message": self.message,
        });
        // NODE_ENV-style behavior: detail only in development
        if dev_mode() {
            if let Some(err) = &self.internal {
                body["error"] = serde_json::Value::String(err.to_string());
            }
        }

        (self.status, Json(body)).into_response()
    }
}

/// JSON 404 for unmatched routes
async fn fallback_handler() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "success": false,
            "message": "Route not found",
        })),
    )
        .into_response()
}

/// Create the application router, constructing the advisor from the
/// environment
pub fn create_router(db: Database, config: ServerConfig) -> Router {
    let advisor = AdvisorClient::from_env();
    match advisor {
        Some(ref client) => {
            info!(backend = client.backend_name(), "Advisor backend configured");
        }
        None => {
            info!("Advisor backend not configured (set GEMINI_API_KEY to enable advice features)");
        }
    }
    create_router_with_advisor(db, config, advisor)
}

/// Create the application router with an explicit advisor (for testing)
pub fn create_router_with_advisor(
    db: Database,
    config: ServerConfig,
    advisor: Option<AdvisorClient>,
) -> Router {
    let state = Arc::new(AppState { db, advisor });

    let api_routes = Router::new()
        // Liveness
        .route("/health", get(handlers::health))
        // Transactions
        .route("/transactions", get(handlers::list_transactions))
        .route("/transaction", post(handlers::create_transaction))
        .route("/balance", get(handlers::get_balance))
        // Advisory flows over transactions
        .route("/predict-shortfall", get(handlers::predict_shortfall))
        .route("/evaluate-purchase", post(handlers::evaluate_purchase))
        .route("/financial-advice", post(handlers::financial_advice))
        // Budget & bills
        .route("/budget", get(handlers::get_budget))
        .route("/budget/update", post(handlers::update_budget))
        .route("/bills", get(handlers::list_bills))
        .route("/bill", post(handlers::create_bill))
        .route("/bills/:id/status", post(handlers::update_bill_status))
        // Analytics
        .route("/analytics/spending", get(handlers::spending_analysis))
        .route("/analytics/habits", get(handlers::spending_habits))
        .route("/analytics/forecast", get(handlers::expense_forecast))
        .route("/analytics/health-score", get(handlers::health_score))
        // Goals
        .route(
            "/goals",
            get(handlers::list_goals).post(handlers::create_goal),
        )
        .route("/goals/progress", post(handlers::add_goal_progress))
        .route(
            "/goals/:goal_id/suggestions",
            get(handlers::goal_suggestions),
        )
        .route("/goals/:goal_id", delete(handlers::delete_goal))
        // News sentiment cache
        .route("/financial-news", get(handlers::financial_news))
        .route("/news", post(handlers::analyze_news))
        // Assistant passthrough
        .route("/gemini/predict", post(handlers::predict_timeline))
        .route("/gemini/sentiment", post(handlers::classify_sentiment))
        .route("/gemini/chat", post(handlers::chat));

    let cors = build_cors(&config);

    Router::new()
        .nest("/api", api_routes)
        .fallback(fallback_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// CORS layer: permissive by default (the SPA is served from a different
/// origin in development), restricted when origins are configured
fn build_cors(config: &ServerConfig) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::PUT, Method::DELETE];
    if config.allowed_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(methods)
            .allow_headers(tower_http::cors::Any)
    } else {
        let origins: Vec<HeaderValue> = config
            .allowed_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(methods)
            .allow_headers(tower_http::cors::Any)
    }
}

/// Bind and serve the router until the process is stopped
pub async fn serve(router: Router, host: &str, port: u16) -> anyhow::Result<()> {
    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Steward API listening");
    axum::serve(listener, router).await?;
    Ok(())
}
