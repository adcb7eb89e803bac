use actix_web::{web, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::app::Storage;

/// Health check response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
}

/// Readiness probe response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessResponse {
    pub ready: bool,
    pub checks: ReadinessChecks,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReadinessChecks {
    pub storage: bool,
    pub backend: String,
}

/// GET /health - Liveness probe
/// Does not check dependencies
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        service: "contractdesk".to_string(),
    })
}

/// GET /ready - Readiness probe
/// Returns 503 when the storage backend cannot be reached
pub async fn readiness_check(storage: web::Data<Storage>) -> impl Responder {
    let reachable = match storage.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!("Storage readiness check failed: {}", e);
            false
        }
    };

    let response = ReadinessResponse {
        ready: reachable,
        checks: ReadinessChecks {
            storage: reachable,
            backend: format!("{:?}", storage.backend()).to_lowercase(),
        },
    };

    if reachable {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Configure health check routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/ready", web::get().to(readiness_check));
}
