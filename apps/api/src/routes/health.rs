use axum::Json;
use serde_json::{json, Value};

use crate::llm_client::MODEL;

const SERVICE_NAME: &str = "umkm-content-api";

/// GET /health
/// Liveness check. Reports the build version and the generation model in use;
/// it never calls the provider.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "model": MODEL,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_health_reports_service_and_model() {
        let Json(body) = health_handler().await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "umkm-content-api");
        assert_eq!(body["model"], "gemini-2.5-flash");
        assert!(!body["version"].as_str().unwrap().is_empty());
    }
}
