use axum::{extract::State, Json};
use serde_json::{json, Value};
use sysinfo::{CpuExt, System, SystemExt};

use crate::llm_client::MODEL;
use crate::state::AppState;

const BYTES_PER_GB: f64 = 1e9;

/// Host memory snapshot, formatted for the health payload.
#[derive(Debug, PartialEq)]
pub struct MemoryReport {
    pub total: String,
    pub available: String,
    pub usage_percent: f64,
}

pub fn memory_report(total_bytes: u64, available_bytes: u64) -> MemoryReport {
    let usage_percent = if total_bytes == 0 {
        0.0
    } else {
        let used = total_bytes.saturating_sub(available_bytes) as f64;
        (used / total_bytes as f64 * 1000.0).round() / 10.0
    };

    MemoryReport {
        total: format!("{:.2} GB", total_bytes as f64 / BYTES_PER_GB),
        available: format!("{:.2} GB", available_bytes as f64 / BYTES_PER_GB),
        usage_percent,
    }
}

/// Samples memory and global CPU usage. CPU usage needs two refreshes at
/// least `MINIMUM_CPU_UPDATE_INTERVAL` apart to be meaningful.
async fn sample_host() -> (MemoryReport, f32) {
    let mut system = System::new();
    system.refresh_memory();
    system.refresh_cpu();
    tokio::time::sleep(System::MINIMUM_CPU_UPDATE_INTERVAL).await;
    system.refresh_cpu();

    let memory = memory_report(system.total_memory(), system.available_memory());
    (memory, system.global_cpu_info().cpu_usage())
}

/// GET /health
/// Reports liveness, the model in use, credential presence and host load.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    let (memory, cpu_usage_percent) = sample_host().await;

    Json(json!({
        "status": "healthy",
        "model": MODEL,
        "api_ready": state.config.api_ready(),
        "memory": {
            "total": memory.total,
            "available": memory.available,
            "usage_percent": memory.usage_percent
        },
        "cpu_usage_percent": cpu_usage_percent
    }))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::{body::Body, http::Request, http::StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::retry::tests::ScriptedGenerator;
    use crate::routes::build_router;
    use crate::state::test_state;

    #[test]
    fn test_memory_report_formats_decimal_gigabytes() {
        let report = memory_report(16_000_000_000, 4_000_000_000);
        assert_eq!(report.total, "16.00 GB");
        assert_eq!(report.available, "4.00 GB");
        assert_eq!(report.usage_percent, 75.0);
    }

    #[test]
    fn test_memory_report_handles_unknown_total() {
        let report = memory_report(0, 0);
        assert_eq!(report.total, "0.00 GB");
        assert_eq!(report.usage_percent, 0.0);
    }

    #[tokio::test]
    async fn test_health_payload_shape() {
        let app = build_router(test_state(Arc::new(ScriptedGenerator::new(vec![]))));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(json["status"], "healthy");
        assert_eq!(json["model"], MODEL);
        assert_eq!(json["api_ready"], true);
        assert!(json["memory"]["total"].as_str().unwrap().ends_with(" GB"));
        assert!(json["memory"]["usage_percent"].is_number());
        assert!(json["cpu_usage_percent"].is_number());
    }
}
