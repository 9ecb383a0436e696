//! Sneaker Models

use std::fmt::{Display, Formatter, Result as FmtResult};

use jiff::Timestamp;
use rust_decimal::Decimal;

/// Caller-assigned sneaker identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SneakerId(i32);

impl SneakerId {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn into_inner(self) -> i32 {
        self.0
    }
}

impl Display for SneakerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl From<i32> for SneakerId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<SneakerId> for i32 {
    fn from(value: SneakerId) -> Self {
        value.0
    }
}

/// Sneaker Model
#[derive(Debug, Clone, PartialEq)]
pub struct Sneaker {
    pub id: SneakerId,
    pub article: String,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub size: Decimal,
    pub brand: String,
    pub production_address: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

impl Sneaker {
    /// Whether the sneaker has not been soft-deleted.
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}
