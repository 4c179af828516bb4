//! Client model.

use serde::{Deserialize, Serialize};

use super::{check_email, check_url, require_text, Entity, Validate};
use crate::errors::AppError;
use crate::schema::{FieldSpec, FieldType};

/// A customer booking services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Client {
    /// A client known only by name and email, as captured by the booking form.
    pub fn contact(name: &str, email: &str) -> Self {
        Self {
            name: name.to_string(),
            email: email.to_string(),
            phone: None,
            avatar: None,
        }
    }
}

impl Validate for Client {
    fn validate(&self) -> Result<(), AppError> {
        require_text("name", &self.name)?;
        check_email("email", &self.email)?;
        if let Some(avatar) = &self.avatar {
            check_url("avatar", avatar)?;
        }
        Ok(())
    }
}

impl Entity for Client {
    const KIND: &'static str = "client";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("name", FieldType::Text),
            FieldSpec::required("email", FieldType::Email),
            FieldSpec::optional("phone", FieldType::Text),
            FieldSpec::optional("avatar", FieldType::Url),
        ]
    }
}
