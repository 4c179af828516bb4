//! Liveness, schema and store diagnostic endpoints.

use std::collections::BTreeMap;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::truncate;
use crate::schema::FieldSpec;
use crate::AppState;

/// Collections listed by the diagnostic at most.
const DIAGNOSTIC_COLLECTIONS: usize = 10;

#[derive(Debug, Serialize, Deserialize)]
pub struct Message {
    pub message: String,
}

/// Connectivity report for `GET /test`.
#[derive(Debug, Serialize, Deserialize)]
pub struct StoreDiagnostic {
    pub backend: String,
    pub database: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// GET / - Liveness text.
pub async fn root() -> Json<Message> {
    Json(Message {
        message: "BeautyConnect backend is running".to_string(),
    })
}

/// GET /api/hello
pub async fn hello() -> Json<Message> {
    Json(Message {
        message: "Hello from the backend API!".to_string(),
    })
}

/// GET /schema - Field descriptions for every entity kind.
pub async fn get_schema(
    State(state): State<AppState>,
) -> Json<BTreeMap<&'static str, Vec<FieldSpec>>> {
    Json(state.catalogue.describe_all().clone())
}

/// GET /test - Report whether the document store is reachable.
pub async fn test_database(State(state): State<AppState>) -> Json<StoreDiagnostic> {
    let status = state.gateway.status();

    let mut report = StoreDiagnostic {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: None,
        database_name: None,
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    if !status.connected {
        if let Some(failure) = status.failure.filter(|_| status.url_configured) {
            report.database = format!("❌ Error: {}", truncate(&failure, 80));
        }
        return Json(report);
    }

    report.database = "✅ Available".to_string();
    let url_state = if status.url_configured {
        "✅ Set"
    } else {
        "❌ Not Set"
    };
    report.database_url = Some(url_state.to_string());
    report.database_name = Some(status.database_name);
    report.connection_status = "Connected".to_string();

    match state.gateway.collections().await {
        Ok(mut collections) => {
            collections.truncate(DIAGNOSTIC_COLLECTIONS);
            report.collections = collections;
            report.database = "✅ Connected & Working".to_string();
        }
        Err(e) => {
            tracing::warn!("Store diagnostic failed: {}", e);
            report.database =
                format!("⚠️ Connected but Error: {}", truncate(&e.to_string(), 50));
        }
    }

    Json(report)
}
