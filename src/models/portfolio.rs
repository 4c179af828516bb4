//! Portfolio item showcasing a master's work.

use serde::{Deserialize, Serialize};

use super::{check_url, require_text, Entity, Validate};
use crate::errors::AppError;
use crate::schema::{FieldSpec, FieldType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioItem {
    pub master_id: String,
    #[serde(default)]
    pub title: Option<String>,
    pub image_url: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Validate for PortfolioItem {
    fn validate(&self) -> Result<(), AppError> {
        require_text("master_id", &self.master_id)?;
        check_url("image_url", &self.image_url)
    }
}

impl Entity for PortfolioItem {
    const KIND: &'static str = "portfolioitem";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("master_id", FieldType::reference("master")),
            FieldSpec::optional("title", FieldType::Text),
            FieldSpec::required("image_url", FieldType::Url),
            FieldSpec::optional("tags", FieldType::TextList).default_value(serde_json::json!([])),
        ]
    }
}
