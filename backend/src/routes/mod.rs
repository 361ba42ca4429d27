//! HTTP routing for the FitTrack API
//!
//! Health probes sit at the root; everything else lives under `/api/v1`
//! and requires a bearer token.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod dashboard;
mod goals;
mod health;
mod meals;
mod plans;
mod recommendations;
mod workouts;

pub use dashboard::dashboard_routes;
pub use goals::goal_routes;
pub use meals::meal_routes;
pub use plans::plan_routes;
pub use recommendations::recommendation_routes;
pub use workouts::workout_routes;

/// Build the application router with its middleware stack
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .nest("/api/v1", api_routes())
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { "FitTrack API v1" }))
        .nest("/workouts", workout_routes())
        .nest("/dashboard", dashboard_routes())
        .nest("/goals", goal_routes())
        .nest("/recommendations", recommendation_routes())
        .nest("/meals", meal_routes())
        .nest("/plans", plan_routes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use axum::{body::Body, http::Request, http::StatusCode};
    use rstest::rstest;
    use sqlx::PgPool;
    use tower::ServiceExt;

    /// Router over a pool that never connects; only paths that stop before
    /// the database are exercised here
    fn state() -> AppState {
        let config = AppConfig::default();
        let pool = PgPool::connect_lazy(&config.database.url).unwrap();
        AppState::new(pool, config)
    }

    fn router() -> Router {
        create_router(state())
    }

    #[tokio::test]
    async fn test_api_root() {
        let response = router()
            .oneshot(Request::get("/api/v1").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[rstest]
    #[case::workouts("GET", "/api/v1/workouts")]
    #[case::monthly("GET", "/api/v1/workouts/monthly")]
    #[case::dashboard("GET", "/api/v1/dashboard")]
    #[case::goals("GET", "/api/v1/goals")]
    #[case::recommendations("GET", "/api/v1/recommendations")]
    #[case::weekly_meals("GET", "/api/v1/meals/weekly")]
    #[case::plans("GET", "/api/v1/plans")]
    #[case::apply("POST", "/api/v1/plans/00000000-0000-0000-0000-000000000000/apply")]
    #[tokio::test]
    async fn test_api_requires_token(#[case] method: &str, #[case] uri: &str) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_apply_plan_rejects_malformed_date() {
        let state = state();
        let token = state
            .jwt()
            .generate_access_token(uuid::Uuid::new_v4())
            .unwrap();
        let request = Request::post("/api/v1/plans/00000000-0000-0000-0000-000000000000/apply")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::from(r#"{"date":"not-a-date"}"#))
            .unwrap();

        let response = create_router(state).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let response = router()
            .oneshot(Request::get("/health/live").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let response = router()
            .oneshot(Request::get("/api/v1/weight").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
