//! Sneaker request and response bodies.

use jiff::Timestamp;
use rust_decimal::Decimal;
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use inventory_app::domain::sneakers::{
    data::SneakerData,
    models::{Sneaker, SneakerId},
};

/// Sneaker Request
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct SneakerRequest {
    pub id: i32,
    pub article: String,
    pub sneaker_name: String,
    pub sneaker_description: Option<String>,
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,
    #[salvo(schema(value_type = f64))]
    pub size: Decimal,
    pub brand: String,
    pub production_address: Option<String>,
}

impl From<SneakerRequest> for SneakerData {
    fn from(request: SneakerRequest) -> Self {
        SneakerData {
            id: SneakerId::new(request.id),
            article: request.article,
            name: request.sneaker_name,
            description: request.sneaker_description,
            price: request.price,
            size: request.size,
            brand: request.brand,
            production_address: request.production_address,
        }
    }
}

/// Batch of sneakers to create or update
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SneakersRequest {
    pub sneakers: Vec<SneakerRequest>,
}

/// Sneaker Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SneakerResponse {
    pub id: i32,
    pub article: String,
    pub sneaker_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sneaker_description: Option<String>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[salvo(schema(value_type = f64))]
    pub price: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[salvo(schema(value_type = f64))]
    pub size: Decimal,
    pub brand: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub production_address: Option<String>,
    #[salvo(schema(value_type = String))]
    pub created_at: Timestamp,
    #[salvo(schema(value_type = String))]
    pub updated_at: Timestamp,
}

impl From<Sneaker> for SneakerResponse {
    fn from(sneaker: Sneaker) -> Self {
        SneakerResponse {
            id: sneaker.id.into_inner(),
            article: sneaker.article,
            sneaker_name: sneaker.name,
            sneaker_description: sneaker.description,
            price: sneaker.price,
            size: sneaker.size,
            brand: sneaker.brand,
            production_address: sneaker.production_address,
            created_at: sneaker.created_at,
            updated_at: sneaker.updated_at,
        }
    }
}
