//! Master API endpoints.

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use super::{effective_limit, CreatedId, ValidJson, ValidQuery};
use crate::db::Filter;
use crate::errors::AppError;
use crate::models::{demo_masters, Entity, Master, MasterSummary, Validate};
use crate::AppState;

pub const DEFAULT_MASTERS_LIMIT: i64 = 12;
pub const MAX_MASTERS_LIMIT: i64 = 100;

/// Query parameters for `GET /api/masters`.
#[derive(Debug, Deserialize)]
pub struct MastersQuery {
    /// Exact city match; empty means no filter.
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

impl MastersQuery {
    pub fn limit(&self) -> Result<i64, AppError> {
        effective_limit(self.limit.as_deref(), DEFAULT_MASTERS_LIMIT, MAX_MASTERS_LIMIT)
    }
}

impl Validate for MastersQuery {
    fn validate(&self) -> Result<(), AppError> {
        self.limit().map(|_| ())
    }
}

/// Result of seeding demo data.
#[derive(Debug, Serialize, Deserialize)]
pub struct SeedResult {
    pub inserted: usize,
    pub ids: Vec<String>,
}

/// GET /api/masters - List master summaries, optionally by city.
pub async fn list_masters(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<MastersQuery>,
) -> Result<Json<Vec<MasterSummary>>, AppError> {
    let filter = Filter::new().eq_opt("city", query.city.as_deref());
    let docs = state
        .gateway
        .find(Master::KIND, &filter, query.limit()?)
        .await?;

    Ok(Json(docs.iter().map(MasterSummary::from_document).collect()))
}

/// POST /api/masters - Create a new master.
pub async fn create_master(
    State(state): State<AppState>,
    ValidJson(master): ValidJson<Master>,
) -> Result<(StatusCode, Json<CreatedId>), AppError> {
    let id = state.gateway.insert_entity(&master).await?;
    tracing::info!("Created master {} ({})", id, master.name);

    Ok((StatusCode::CREATED, Json(CreatedId { id })))
}

/// POST /api/seed - Insert the demo masters.
pub async fn seed_demo_masters(
    State(state): State<AppState>,
) -> Result<Json<SeedResult>, AppError> {
    let mut ids = Vec::new();
    for master in demo_masters() {
        ids.push(state.gateway.insert_entity(&master).await?);
    }
    tracing::info!("Seeded {} demo masters", ids.len());

    Ok(Json(SeedResult {
        inserted: ids.len(),
        ids,
    }))
}
