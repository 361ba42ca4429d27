//! Health probes
//!
//! - `/health` reports the build version
//! - `/health/ready` also pings PostgreSQL and answers 503 when it is down
//! - `/health/live` only proves the process is serving requests

use crate::{db, state::AppState};
use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Healthy,
    Alive,
    Ready,
    NotReady,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: Status,
    pub version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseCheck>,
}

#[derive(Debug, Serialize)]
pub struct DatabaseCheck {
    pub reachable: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthResponse {
    fn new(status: Status) -> Self {
        Self {
            status,
            version: env!("CARGO_PKG_VERSION"),
            database: None,
        }
    }
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::new(Status::Healthy))
}

pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<HealthResponse>) {
    let database = match db::health_check(state.db()).await {
        Ok(()) => DatabaseCheck {
            reachable: true,
            error: None,
        },
        Err(e) => DatabaseCheck {
            reachable: false,
            error: Some(e.to_string()),
        },
    };

    let (code, status) = if database.reachable {
        (StatusCode::OK, Status::Ready)
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Status::NotReady)
    };

    (
        code,
        Json(HealthResponse {
            database: Some(database),
            ..HealthResponse::new(status)
        }),
    )
}

pub async fn liveness_check() -> Json<HealthResponse> {
    Json(HealthResponse::new(Status::Alive))
}
