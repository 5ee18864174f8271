//! Liveness probe, mounted at the root rather than under `/api/v1` and
//! reachable without a token.

use aidhub_core::types::Timestamp;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthReport {
    /// `ok`, or `degraded` when the database does not answer.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    pub checked_at: Timestamp,
}

impl HealthReport {
    fn new(db_healthy: bool) -> Self {
        Self {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
            checked_at: chrono::Utc::now(),
        }
    }

    /// Load balancers only look at the status code, so a dead database
    /// turns into 503.
    fn status_code(&self) -> StatusCode {
        if self.db_healthy {
            StatusCode::OK
        } else {
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let report = match aidhub_db::health_check(&state.pool).await {
        Ok(()) => HealthReport::new(true),
        Err(e) => {
            tracing::warn!(error = %e, "Health check could not reach the database");
            HealthReport::new(false)
        }
    };
    (report.status_code(), Json(report))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degraded_report_is_503() {
        let report = HealthReport::new(false);
        assert_eq!(report.status, "degraded");
        assert_eq!(report.status_code(), StatusCode::SERVICE_UNAVAILABLE);

        let healthy = HealthReport::new(true);
        assert_eq!(healthy.status, "ok");
        assert_eq!(healthy.status_code(), StatusCode::OK);
    }
}
