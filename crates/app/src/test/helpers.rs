//! Test Helpers

use rust_decimal::Decimal;

use crate::domain::sneakers::{data::SneakerData, models::SneakerId};

/// A complete sneaker record with `id`, `price` and `brand` varied.
pub(crate) fn sneaker(id: i32, price: Decimal, brand: &str) -> SneakerData {
    SneakerData {
        id: SneakerId::new(id),
        article: format!("ART-{id:03}"),
        name: "Runner Pro".to_string(),
        description: Some("Lightweight daily trainer".to_string()),
        price,
        size: Decimal::new(425, 1),
        brand: brand.to_string(),
        production_address: None,
    }
}
