//! Booking API endpoints.

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{effective_limit, ValidJson, ValidQuery};
use crate::db::Filter;
use crate::errors::AppError;
use crate::models::{
    Booking, BookingCreated, BookingRequest, BookingStatus, Client, Entity, Validate,
    UNKNOWN_SERVICE_ID,
};
use crate::AppState;

pub const DEFAULT_BOOKINGS_LIMIT: i64 = 50;
pub const MAX_BOOKINGS_LIMIT: i64 = 200;

/// Query parameters for `GET /api/bookings`.
#[derive(Debug, Deserialize)]
pub struct BookingsQuery {
    /// Exact master match; empty means no filter.
    #[serde(default)]
    pub master_id: Option<String>,
    #[serde(default)]
    pub limit: Option<String>,
}

impl BookingsQuery {
    pub fn limit(&self) -> Result<i64, AppError> {
        effective_limit(self.limit.as_deref(), DEFAULT_BOOKINGS_LIMIT, MAX_BOOKINGS_LIMIT)
    }
}

impl Validate for BookingsQuery {
    fn validate(&self) -> Result<(), AppError> {
        self.limit().map(|_| ())
    }
}

/// POST /api/bookings - Register a client and a pending booking for them.
///
/// The two inserts are not atomic: if the booking insert fails, the client record stays.
pub async fn create_booking(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<BookingRequest>,
) -> Result<(StatusCode, Json<BookingCreated>), AppError> {
    let client = Client::contact(&request.name, &request.email);
    let client_id = state.gateway.insert_entity(&client).await?;

    let booking = Booking {
        master_id: request.master_id,
        client_id,
        service_id: UNKNOWN_SERVICE_ID.to_string(),
        datetime_utc: request.datetime_utc,
        status: BookingStatus::Pending,
        notes: request.notes,
    };

    let id = match state.gateway.insert_entity(&booking).await {
        Ok(id) => id,
        Err(e) => {
            tracing::warn!(
                "Booking insert failed; client {} is left without a booking",
                booking.client_id
            );
            return Err(e.into());
        }
    };
    tracing::info!("Created booking {} for master {}", id, booking.master_id);

    Ok((
        StatusCode::CREATED,
        Json(BookingCreated {
            id,
            status: booking.status,
        }),
    ))
}

/// GET /api/bookings - List bookings, optionally for one master.
pub async fn list_bookings(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<BookingsQuery>,
) -> Result<Json<Vec<Map<String, Value>>>, AppError> {
    let filter = Filter::new().eq_opt("master_id", query.master_id.as_deref());
    let docs = state
        .gateway
        .find(Booking::KIND, &filter, query.limit()?)
        .await?;

    Ok(Json(docs.into_iter().map(|doc| doc.into_record()).collect()))
}
