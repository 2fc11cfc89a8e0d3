//! Health check endpoint
//!
//! Liveness probe used by the mobile client's connection test; requires
//! no authentication and touches no dependencies.

use axum::Json;
use chrono::Utc;
use climbtrack_shared::types::HealthResponse;

/// GET /api/health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        message: "Climbing session tracker API".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_check_reports_ok() {
        let response = health_check().await;
        assert_eq!(response.status, "OK");
        assert!(!response.timestamp.is_empty());
    }
}
