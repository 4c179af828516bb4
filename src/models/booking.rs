//! Booking model and the public booking request.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{de::Error as _, Deserialize, Deserializer, Serialize};

use super::{check_email, require_text, Entity, Validate};
use crate::errors::AppError;
use crate::schema::{FieldSpec, FieldType};

/// Placeholder service reference for bookings made before a service is chosen.
pub const UNKNOWN_SERVICE_ID: &str = "unknown";

/// Booking lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub master_id: String,
    pub client_id: String,
    pub service_id: String,
    pub datetime_utc: DateTime<Utc>,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Validate for Booking {
    fn validate(&self) -> Result<(), AppError> {
        require_text("master_id", &self.master_id)?;
        require_text("client_id", &self.client_id)?;
        require_text("service_id", &self.service_id)?;
        Ok(())
    }
}

impl Entity for Booking {
    const KIND: &'static str = "booking";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("master_id", FieldType::reference("master")),
            FieldSpec::required("client_id", FieldType::reference("client")),
            FieldSpec::required("service_id", FieldType::reference("service"))
                .describe("Service reference, or \"unknown\" when not yet chosen"),
            FieldSpec::required("datetime_utc", FieldType::Timestamp),
            FieldSpec::optional(
                "status",
                FieldType::Enum {
                    values: BookingStatus::ALL.iter().map(BookingStatus::as_str).collect(),
                },
            )
            .default_value(BookingStatus::Pending.as_str()),
            FieldSpec::optional("notes", FieldType::Text),
        ]
    }
}

/// Request body for `POST /api/bookings`.
#[derive(Debug, Clone, Deserialize)]
pub struct BookingRequest {
    pub master_id: String,
    pub name: String,
    pub email: String,
    #[serde(deserialize_with = "utc_timestamp")]
    pub datetime_utc: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Validate for BookingRequest {
    fn validate(&self) -> Result<(), AppError> {
        require_text("master_id", &self.master_id)?;
        require_text("name", &self.name)?;
        check_email("email", &self.email)?;
        Ok(())
    }
}

/// Parse an RFC 3339 timestamp, or an ISO 8601 one without offset taken as UTC.
pub fn parse_utc_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}

fn utc_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_utc_timestamp(&raw)
        .ok_or_else(|| D::Error::custom(format!("invalid timestamp {:?}", raw)))
}

/// Response body for a created booking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingCreated {
    pub id: String,
    pub status: BookingStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_defaults_to_pending_and_serializes_lowercase() {
        let booking: Booking = serde_json::from_value(json!({
            "master_id": "m1",
            "client_id": "c1",
            "service_id": UNKNOWN_SERVICE_ID,
            "datetime_utc": "2024-06-01T10:00:00Z",
        }))
        .unwrap();
        assert_eq!(booking.status, BookingStatus::Pending);

        let value = serde_json::to_value(&booking).unwrap();
        assert_eq!(value["status"], "pending");
        assert_eq!(value["datetime_utc"], "2024-06-01T10:00:00Z");
        assert!(value["notes"].is_null());
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let parsed = serde_json::from_value::<Booking>(json!({
            "master_id": "m1",
            "client_id": "c1",
            "service_id": "s1",
            "datetime_utc": "2024-06-01T10:00:00Z",
            "status": "rescheduled",
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_request_with_offset_is_normalised_to_utc() {
        let request: BookingRequest = serde_json::from_value(json!({
            "master_id": "abc123",
            "name": "Jane Doe",
            "email": "jane@example.com",
            "datetime_utc": "2024-06-01T13:00:00+03:00",
        }))
        .unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.datetime_utc.to_rfc3339(), "2024-06-01T10:00:00+00:00");
    }

    #[test]
    fn test_timestamp_without_offset_is_read_as_utc() {
        let expected = "2024-06-01T10:00:00+00:00";
        for raw in [
            "2024-06-01T10:00:00",
            "2024-06-01 10:00:00",
            "2024-06-01T10:00:00Z",
            "2024-06-01T13:00:00+03:00",
        ] {
            let parsed = parse_utc_timestamp(raw).unwrap();
            assert_eq!(parsed.to_rfc3339(), expected, "{}", raw);
        }

        let precise = parse_utc_timestamp("2024-06-01T10:00:00.250").unwrap();
        assert_eq!(precise.timestamp_subsec_millis(), 250);

        for bad in ["next tuesday", "2024-06-01", "2024-13-01T10:00:00", ""] {
            assert!(parse_utc_timestamp(bad).is_none(), "{} should be rejected", bad);
        }
    }

    #[test]
    fn test_request_rejects_bad_email() {
        let request = BookingRequest {
            master_id: "abc123".into(),
            name: "Jane Doe".into(),
            email: "jane.example.com".into(),
            datetime_utc: Utc::now(),
            notes: None,
        };
        assert!(matches!(
            request.validate(),
            Err(AppError::InvalidInput { ref field, .. }) if field == "email"
        ));
    }
}
