//! Sneakers Data

use rust_decimal::Decimal;

use crate::domain::sneakers::models::SneakerId;

/// Fractional digits kept by the `price` column.
const PRICE_SCALE: u32 = 2;

/// Exclusive bound on the magnitude of a price, `NUMERIC(12,2)`.
const PRICE_LIMIT: i64 = 10_000_000_000;

/// Fractional digits kept by the `size` column.
const SIZE_SCALE: u32 = 1;

/// Exclusive bound on the magnitude of a size, `NUMERIC(4,1)`.
const SIZE_LIMIT: i64 = 1_000;

/// Writable sneaker fields, used both to create and to overwrite a sneaker.
#[derive(Debug, Clone, PartialEq)]
pub struct SneakerData {
    pub id: SneakerId,
    pub article: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub size: Decimal,
    pub brand: String,
    pub production_address: Option<String>,
}

impl SneakerData {
    /// Prices must be strictly positive and storable without rounding.
    pub fn has_valid_price(&self) -> bool {
        self.price > Decimal::ZERO && fits(self.price, PRICE_SCALE, PRICE_LIMIT)
    }

    /// Sizes must be storable without rounding or overflow.
    pub fn has_valid_size(&self) -> bool {
        fits(self.size, SIZE_SCALE, SIZE_LIMIT)
    }
}

fn fits(value: Decimal, scale: u32, limit: i64) -> bool {
    value.normalize().scale() <= scale && value.abs() < Decimal::from(limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with(price: Decimal, size: Decimal) -> SneakerData {
        SneakerData {
            id: SneakerId::new(1),
            article: "ART-001".to_string(),
            name: "Runner Pro".to_string(),
            description: None,
            price,
            size,
            brand: "Nike".to_string(),
            production_address: None,
        }
    }

    #[test]
    fn price_must_be_positive() {
        assert!(with(Decimal::new(15000, 2), Decimal::new(42, 0)).has_valid_price());
        assert!(!with(Decimal::ZERO, Decimal::new(42, 0)).has_valid_price());
        assert!(!with(Decimal::new(-1, 0), Decimal::new(42, 0)).has_valid_price());
    }

    #[test]
    fn price_rejects_digits_the_column_would_round() {
        assert!(!with(Decimal::new(150_555, 3), Decimal::new(42, 0)).has_valid_price());
        assert!(!with(Decimal::new(1, 3), Decimal::new(42, 0)).has_valid_price());
        assert!(
            with(Decimal::new(150_500, 3), Decimal::new(42, 0)).has_valid_price(),
            "trailing zeros should not count"
        );
    }

    #[test]
    fn price_rejects_overflow() {
        assert!(with(Decimal::new(999_999_999_999, 2), Decimal::new(42, 0)).has_valid_price());
        assert!(!with(Decimal::new(10_000_000_000, 0), Decimal::new(42, 0)).has_valid_price());
    }

    #[test]
    fn size_rejects_rounding_and_overflow() {
        assert!(with(Decimal::ONE, Decimal::new(9999, 1)).has_valid_size());
        assert!(with(Decimal::ONE, Decimal::new(425, 1)).has_valid_size());
        assert!(!with(Decimal::ONE, Decimal::new(4225, 2)).has_valid_size());
        assert!(!with(Decimal::ONE, Decimal::new(1000, 0)).has_valid_size());
    }
}
