//! Data models for the BeautyConnect marketplace.
//!
//! Each entity is stored in the collection named by its [`Entity::KIND`].

mod booking;
mod client;
mod master;
mod portfolio;
mod review;
mod service;
mod validation;

pub use booking::*;
pub use client::*;
pub use master::*;
pub use portfolio::*;
pub use review::*;
pub use service::*;
pub use validation::*;

use serde::Serialize;

use crate::schema::FieldSpec;

/// A persisted entity shape.
pub trait Entity: Serialize + Validate {
    /// Collection name, also the key in the schema catalogue.
    const KIND: &'static str;

    /// Declarative description of the stored fields.
    fn fields() -> Vec<FieldSpec>;
}
