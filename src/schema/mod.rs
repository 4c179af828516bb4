//! Schema catalogue describing every stored entity kind.
//!
//! Built once at startup and shared read-only; an external database viewer reads it
//! through `GET /schema`.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

use crate::models::{Booking, Client, Entity, Master, PortfolioItem, Review, Service};

/// Semantic type of a stored field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldType {
    Text,
    Email,
    Url,
    Number,
    Integer,
    TextList,
    Timestamp,
    /// Soft reference to a record of another kind
    Reference { kind: &'static str },
    Enum { values: Vec<&'static str> },
}

impl FieldType {
    pub fn reference(kind: &'static str) -> Self {
        FieldType::Reference { kind }
    }
}

/// Declarative description of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    #[serde(flatten)]
    pub field_type: FieldType,
    pub required: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
}

impl FieldSpec {
    pub fn required(name: &'static str, field_type: FieldType) -> Self {
        Self::new(name, field_type, true)
    }

    pub fn optional(name: &'static str, field_type: FieldType) -> Self {
        Self::new(name, field_type, false)
    }

    fn new(name: &'static str, field_type: FieldType, required: bool) -> Self {
        Self {
            name,
            field_type,
            required,
            default: None,
            minimum: None,
            maximum: None,
            description: None,
        }
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn range(mut self, minimum: Option<f64>, maximum: Option<f64>) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

/// Mapping from entity kind to its field descriptions.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct SchemaCatalogue {
    kinds: BTreeMap<&'static str, Vec<FieldSpec>>,
}

impl SchemaCatalogue {
    /// Collect the declared shape of every entity kind.
    pub fn build() -> Self {
        let mut catalogue = Self {
            kinds: BTreeMap::new(),
        };
        catalogue.register::<Master>();
        catalogue.register::<Client>();
        catalogue.register::<Service>();
        catalogue.register::<Booking>();
        catalogue.register::<Review>();
        catalogue.register::<PortfolioItem>();
        catalogue
    }

    fn register<E: Entity>(&mut self) {
        self.kinds.insert(E::KIND, E::fields());
    }

    pub fn describe_all(&self) -> &BTreeMap<&'static str, Vec<FieldSpec>> {
        &self.kinds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use crate::models::{demo_masters, BookingStatus, UNKNOWN_SERVICE_ID};

    #[test]
    fn test_catalogue_has_exactly_six_kinds() {
        let catalogue = SchemaCatalogue::build();
        let kinds: Vec<_> = catalogue.describe_all().keys().copied().collect();
        assert_eq!(
            kinds,
            vec!["booking", "client", "master", "portfolioitem", "review", "service"]
        );
    }

    #[test]
    fn test_field_serialization() {
        let catalogue = SchemaCatalogue::build();
        let value = serde_json::to_value(&catalogue).unwrap();

        let rating = value["master"]
            .as_array()
            .unwrap()
            .iter()
            .find(|f| f["name"] == "rating")
            .unwrap();
        assert_eq!(rating["type"], "number");
        assert_eq!(rating["required"], false);
        assert_eq!(rating["minimum"], 0.0);
        assert_eq!(rating["maximum"], 5.0);
        assert_eq!(rating["default"], 0.0);

        let status = value["booking"]
            .as_array()
            .unwrap()
            .iter()
            .find(|f| f["name"] == "status")
            .unwrap();
        assert_eq!(status["type"], "enum");
        assert_eq!(
            status["values"],
            json!(["pending", "confirmed", "completed", "cancelled"])
        );

        let master_ref = &value["service"].as_array().unwrap()[6];
        assert_eq!(master_ref["type"], "reference");
        assert_eq!(master_ref["kind"], "master");
    }

    /// Each kind's described fields must match what is actually stored.
    fn assert_describes<E: Entity>(sample: &E) {
        let catalogue = SchemaCatalogue::build();
        let mut described: Vec<_> = catalogue
            .describe_all()
            .get(E::KIND)
            .unwrap()
            .iter()
            .map(|f| f.name)
            .collect();
        let stored = serde_json::to_value(sample).unwrap();
        let mut stored: Vec<_> = stored.as_object().unwrap().keys().cloned().collect();
        described.sort();
        stored.sort();
        assert_eq!(described, stored, "catalogue drifted for {}", E::KIND);
    }

    #[test]
    fn test_catalogue_matches_stored_shapes() {
        assert_describes(&demo_masters()[0]);
        assert_describes(&Client::contact("Jane Doe", "jane@example.com"));
        assert_describes(&Service {
            title: "Стрижка".into(),
            category: "Волосы".into(),
            subcategory: None,
            description: None,
            price: 2000.0,
            duration_min: 45,
            master_id: None,
        });
        assert_describes(&Booking {
            master_id: "m1".into(),
            client_id: "c1".into(),
            service_id: UNKNOWN_SERVICE_ID.into(),
            datetime_utc: chrono::Utc::now(),
            status: BookingStatus::Pending,
            notes: None,
        });
        assert_describes(&Review {
            master_id: "m1".into(),
            client_id: "c1".into(),
            rating: 5,
            comment: None,
        });
        assert_describes(&PortfolioItem {
            master_id: "m1".into(),
            title: None,
            image_url: "https://example.com/a.jpg".into(),
            tags: vec![],
        });
    }
}
