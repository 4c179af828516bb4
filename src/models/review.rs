//! Review left by a client for a master.

use serde::{Deserialize, Serialize};

use super::{check_range, require_text, Entity, Validate};
use crate::errors::AppError;
use crate::schema::{FieldSpec, FieldType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub master_id: String,
    pub client_id: String,
    pub rating: i64,
    #[serde(default)]
    pub comment: Option<String>,
}

impl Validate for Review {
    fn validate(&self) -> Result<(), AppError> {
        require_text("master_id", &self.master_id)?;
        require_text("client_id", &self.client_id)?;
        check_range("rating", self.rating as f64, Some(1.0), Some(5.0))
    }
}

impl Entity for Review {
    const KIND: &'static str = "review";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("master_id", FieldType::reference("master")),
            FieldSpec::required("client_id", FieldType::reference("client")),
            FieldSpec::required("rating", FieldType::Integer).range(Some(1.0), Some(5.0)),
            FieldSpec::optional("comment", FieldType::Text),
        ]
    }
}
