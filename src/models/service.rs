//! Service offered by a master.

use serde::{Deserialize, Serialize};

use super::{check_range, require_text, Entity, Validate};
use crate::errors::AppError;
use crate::schema::{FieldSpec, FieldType};

pub const MIN_DURATION_MIN: i64 = 10;
pub const MAX_DURATION_MIN: i64 = 480;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub title: String,
    pub category: String,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub duration_min: i64,
    #[serde(default)]
    pub master_id: Option<String>,
}

impl Validate for Service {
    fn validate(&self) -> Result<(), AppError> {
        require_text("title", &self.title)?;
        require_text("category", &self.category)?;
        check_range("price", self.price, Some(0.0), None)?;
        check_range(
            "duration_min",
            self.duration_min as f64,
            Some(MIN_DURATION_MIN as f64),
            Some(MAX_DURATION_MIN as f64),
        )?;
        Ok(())
    }
}

impl Entity for Service {
    const KIND: &'static str = "service";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("title", FieldType::Text),
            FieldSpec::required("category", FieldType::Text).describe("Top-level category"),
            FieldSpec::optional("subcategory", FieldType::Text).describe("Subcategory"),
            FieldSpec::optional("description", FieldType::Text),
            FieldSpec::required("price", FieldType::Number).range(Some(0.0), None),
            FieldSpec::required("duration_min", FieldType::Integer)
                .range(Some(MIN_DURATION_MIN as f64), Some(MAX_DURATION_MIN as f64))
                .describe("Duration in minutes"),
            FieldSpec::optional("master_id", FieldType::reference("master"))
                .describe("ID of master providing the service"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manicure() -> Service {
        Service {
            title: "Маникюр".into(),
            category: "Ногти".into(),
            subcategory: None,
            description: None,
            price: 1500.0,
            duration_min: 60,
            master_id: None,
        }
    }

    #[test]
    fn test_duration_bounds() {
        assert!(manicure().validate().is_ok());
        assert!(Service { duration_min: 10, ..manicure() }.validate().is_ok());
        assert!(Service { duration_min: 480, ..manicure() }.validate().is_ok());
        assert!(Service { duration_min: 9, ..manicure() }.validate().is_err());
        assert!(Service { duration_min: 481, ..manicure() }.validate().is_err());
    }

    #[test]
    fn test_price_must_not_be_negative() {
        assert!(Service { price: 0.0, ..manicure() }.validate().is_ok());
        assert!(Service { price: -1.0, ..manicure() }.validate().is_err());
    }
}
