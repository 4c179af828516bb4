//! Field-level validators shared by the entity shapes.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::errors::AppError;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$").expect("email pattern compiles")
});

/// A shape that can check its own field constraints.
pub trait Validate {
    fn validate(&self) -> Result<(), AppError>;
}

pub fn require_text(field: &str, value: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::invalid(field, format!("{} is required", field)));
    }
    Ok(())
}

pub fn check_email(field: &str, value: &str) -> Result<(), AppError> {
    if !EMAIL_PATTERN.is_match(value) {
        return Err(AppError::invalid(
            field,
            format!("{} is not a valid email address", field),
        ));
    }
    Ok(())
}

/// Accept absolute http(s) URLs with a host.
pub fn check_url(field: &str, value: &str) -> Result<(), AppError> {
    let invalid = || AppError::invalid(field, format!("{} must be an http(s) URL", field));

    let url = Url::parse(value).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return Err(invalid());
    }
    Ok(())
}

pub fn check_range(
    field: &str,
    value: f64,
    minimum: Option<f64>,
    maximum: Option<f64>,
) -> Result<(), AppError> {
    if !value.is_finite() {
        return Err(AppError::invalid(field, format!("{} must be a number", field)));
    }
    if let Some(min) = minimum {
        if value < min {
            return Err(AppError::invalid(
                field,
                format!("{} must be greater than or equal to {}", field, min),
            ));
        }
    }
    if let Some(max) = maximum {
        if value > max {
            return Err(AppError::invalid(
                field,
                format!("{} must be less than or equal to {}", field, max),
            ));
        }
    }
    Ok(())
}
