//! REST API module.
//!
//! Handlers call the document store gateway directly; request shapes are validated by the
//! extractors below before any handler code runs.

mod bookings;
mod masters;
mod system;

pub use bookings::*;
pub use masters::*;
pub use system::*;

use axum::{
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::Validate;

/// Body of a successful create request.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedId {
    pub id: String,
}

/// JSON body extractor that rejects malformed or invalid shapes as `InvalidInput`.
#[derive(Debug)]
pub struct ValidJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                let message = rejection.body_text();
                AppError::invalid(offending_field(&message, "body"), message)
            })?;
        value.validate()?;
        Ok(ValidJson(value))
    }
}

/// Query string extractor with the same rejection handling as [`ValidJson`].
#[derive(Debug)]
pub struct ValidQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                let message = rejection.body_text();
                AppError::invalid(offending_field(&message, "query"), message)
            })?;
        value.validate()?;
        Ok(ValidQuery(value))
    }
}

/// Best-effort name of the field a deserialization message complains about.
fn offending_field(message: &str, fallback: &str) -> String {
    const MISSING: &str = "missing field `";
    if let Some(start) = message.find(MISSING) {
        let rest = &message[start + MISSING.len()..];
        if let Some(end) = rest.find('`') {
            return rest[..end].to_string();
        }
    }

    // "<prefix>: <path>: <reason>"
    if let Some((_, detail)) = message.split_once(": ") {
        if let Some((path, _)) = detail.split_once(": ") {
            let looks_like_path = path.chars().any(|c| c.is_ascii_alphanumeric())
                && path
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
            if looks_like_path {
                return path.to_string();
            }
        }
    }

    fallback.to_string()
}

/// Parse a caller-supplied limit and bound it to `max`.
///
/// Limits below 1 are rejected; limits above `max` are clamped.
pub(crate) fn effective_limit(raw: Option<&str>, default: i64, max: i64) -> Result<i64, AppError> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let limit: i64 = raw
        .trim()
        .parse()
        .map_err(|_| AppError::invalid("limit", "limit must be an integer"))?;
    if limit < 1 {
        return Err(AppError::invalid(
            "limit",
            "limit must be greater than or equal to 1",
        ));
    }
    Ok(limit.min(max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offending_field_from_missing_field() {
        let message = "Failed to deserialize the JSON body into the target type: missing field `email` at line 1 column 40";
        assert_eq!(offending_field(message, "body"), "email");
    }

    #[test]
    fn test_offending_field_from_path_prefix() {
        let message = "Failed to deserialize query string: limit: invalid digit found in string";
        assert_eq!(offending_field(message, "query"), "limit");

        let message = "Failed to deserialize the JSON body into the target type: skills[0]: invalid type: integer `1`, expected a string at line 1 column 12";
        assert_eq!(offending_field(message, "body"), "skills[0]");
    }

    #[test]
    fn test_offending_field_falls_back() {
        let message = "Expected request with `Content-Type: application/json`";
        assert_eq!(offending_field(message, "body"), "body");
    }

    #[test]
    fn test_effective_limit() {
        assert_eq!(effective_limit(None, 12, 100).unwrap(), 12);
        assert_eq!(effective_limit(Some("1"), 12, 100).unwrap(), 1);
        assert_eq!(effective_limit(Some("100"), 12, 100).unwrap(), 100);
        assert_eq!(effective_limit(Some("500"), 12, 100).unwrap(), 100);
        assert!(effective_limit(Some("0"), 12, 100).is_err());
        assert!(effective_limit(Some("-3"), 50, 200).is_err());
        assert!(effective_limit(Some("ten"), 50, 200).is_err());
        assert!(effective_limit(Some(""), 50, 200).is_err());
    }
}
