//! Master (beauty professional) profile and its list summary.

use serde::{Deserialize, Serialize};

use super::{check_email, check_range, check_url, require_text, Entity, Validate};
use crate::db::Document;
use crate::errors::AppError;
use crate::schema::{FieldSpec, FieldType};

pub const MAX_RATING: f64 = 5.0;

/// A beauty professional offering services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Master {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub reviews_count: i64,
}

impl Validate for Master {
    fn validate(&self) -> Result<(), AppError> {
        require_text("name", &self.name)?;
        if let Some(email) = &self.email {
            check_email("email", email)?;
        }
        if let Some(avatar) = &self.avatar {
            check_url("avatar", avatar)?;
        }
        check_range("rating", self.rating, Some(0.0), Some(MAX_RATING))?;
        check_range("reviews_count", self.reviews_count as f64, Some(0.0), None)?;
        Ok(())
    }
}

impl Entity for Master {
    const KIND: &'static str = "master";

    fn fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::required("name", FieldType::Text)
                .describe("Full name of the beauty professional"),
            FieldSpec::optional("email", FieldType::Email).describe("Contact email"),
            FieldSpec::optional("phone", FieldType::Text).describe("Contact phone number"),
            FieldSpec::optional("city", FieldType::Text).describe("City / location"),
            FieldSpec::optional("bio", FieldType::Text).describe("Short bio/description"),
            FieldSpec::optional("avatar", FieldType::Url).describe("Profile image URL"),
            FieldSpec::optional("skills", FieldType::TextList)
                .default_value(serde_json::json!([]))
                .describe("List of skills/tags"),
            FieldSpec::optional("rating", FieldType::Number)
                .default_value(0.0)
                .range(Some(0.0), Some(MAX_RATING))
                .describe("Average rating"),
            FieldSpec::optional("reviews_count", FieldType::Integer)
                .default_value(0)
                .range(Some(0.0), None)
                .describe("Number of reviews"),
        ]
    }
}

/// Card-sized view of a master returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterSummary {
    pub id: String,
    pub name: String,
    /// First listed skill
    pub role: Option<String>,
    pub rating: f64,
    pub reviews_count: i64,
    pub city: Option<String>,
    pub avatar: Option<String>,
    pub verified: bool,
}

impl MasterSummary {
    /// Summarise a stored master, tolerating documents written by other tools.
    pub fn from_document(doc: &Document) -> Self {
        let role = doc
            .get("skills")
            .and_then(|skills| skills.as_array())
            .and_then(|skills| skills.first())
            .and_then(|skill| skill.as_str())
            .map(str::to_string);

        Self {
            id: doc.id.clone(),
            name: doc.get_str("name").unwrap_or_default().to_string(),
            role,
            rating: doc.get("rating").and_then(|v| v.as_f64()).unwrap_or(0.0),
            reviews_count: doc
                .get("reviews_count")
                .and_then(|v| v.as_i64())
                .unwrap_or(0),
            city: doc.get_str("city").map(str::to_string),
            avatar: doc.get_str("avatar").map(str::to_string),
            verified: doc
                .get("verified")
                .and_then(|v| v.as_bool())
                .unwrap_or(false),
        }
    }
}

/// The demo masters inserted by the seed endpoint.
pub fn demo_masters() -> Vec<Master> {
    let demo = |name: &str, city: &str, skill: &str, rating: f64, reviews_count: i64, photo: &str| {
        Master {
            name: name.to_string(),
            email: None,
            phone: None,
            city: Some(city.to_string()),
            bio: None,
            avatar: Some(format!(
                "https://images.unsplash.com/{}?q=80&w=300&auto=format&fit=crop",
                photo
            )),
            skills: vec![skill.to_string()],
            rating,
            reviews_count,
        }
    };

    vec![
        demo(
            "Анна Петрова",
            "Москва",
            "Визажист",
            4.9,
            182,
            "photo-1527980965255-d3b416303d12",
        ),
        demo(
            "Ирина Смирнова",
            "Санкт-Петербург",
            "Мастер маникюра",
            4.8,
            240,
            "photo-1544005313-94ddf0286df2",
        ),
        demo(
            "Мария Иванова",
            "Казань",
            "Парикмахер-стилист",
            5.0,
            320,
            "photo-1502685104226-ee32379fefbe",
        ),
    ]
}
