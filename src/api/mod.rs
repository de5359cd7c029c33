pub mod error;
pub mod handlers;
pub mod types;

use std::{path::PathBuf, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::models::BudgetModels;

pub use error::ApiError;

#[derive(Clone)]
pub struct AppState {
    pub models: Arc<BudgetModels>,
}

impl AppState {
    pub fn new(models: Arc<BudgetModels>) -> Self {
        Self { models }
    }
}

#[derive(Debug, Clone, Default)]
pub struct RouterOptions {
    /// Front-end assets served for any path the API does not claim.
    pub static_dir: Option<PathBuf>,
    pub cors_allow_any: bool,
}

pub fn build_router(state: AppState, options: &RouterOptions) -> Router {
    let mut router = Router::new()
        .route("/api/health", get(handlers::health))
        .route(
            "/api/calculate-disaster-fund",
            post(handlers::calculate_disaster_fund),
        )
        .route("/api/optimize-taxes", post(handlers::optimize_taxes))
        .route("/api/forecast-budget", post(handlers::forecast_budget))
        .route(
            "/api/historical-budget",
            post(handlers::historical_budget_for_year),
        )
        .route(
            "/api/distribute-custom-budget",
            post(handlers::distribute_custom_budget),
        )
        .route("/api/predict-budget", post(handlers::predict_budget))
        .with_state(state);

    if let Some(static_dir) = &options.static_dir {
        router = router.fallback_service(ServeDir::new(static_dir));
    }
    if options.cors_allow_any {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router.layer(TraceLayer::new_for_http())
}
