//! Sneaker list filtering and pagination.
//!
//! Every filter is optional; blank strings and non-positive numbers are
//! treated as absent. Active filters are combined with `AND` and soft-deleted
//! rows are always excluded.

use rust_decimal::Decimal;
use sqlx::{Postgres, QueryBuilder};

const SELECT_ACTIVE_SNEAKERS_SQL: &str = "SELECT * FROM sneakers WHERE deleted_at IS NULL";

const ORDER_BY_NEWEST_SQL: &str = " ORDER BY created_at DESC, id DESC";

/// Sneaker list filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SneakerFilters {
    /// Exact brand match.
    pub brand: Option<String>,

    /// Case-insensitive substring of the sneaker name.
    pub name: Option<String>,

    /// Inclusive lower price bound.
    pub min_price: Option<Decimal>,

    /// Inclusive upper price bound.
    pub max_price: Option<Decimal>,

    /// Exact size match.
    pub size: Option<Decimal>,
}

/// Pagination window; zero means "not applied".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl SneakerFilters {
    fn brand(&self) -> Option<&str> {
        self.brand.as_deref().filter(|brand| !brand.is_empty())
    }

    fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    fn min_price(&self) -> Option<Decimal> {
        self.min_price.filter(|p| *p > Decimal::ZERO)
    }

    fn max_price(&self) -> Option<Decimal> {
        self.max_price.filter(|p| *p > Decimal::ZERO)
    }

    fn size(&self) -> Option<Decimal> {
        self.size.filter(|s| *s > Decimal::ZERO)
    }

    /// Build the parameterized list query for these filters and `pagination`.
    pub(crate) fn list_query(&self, pagination: Pagination) -> QueryBuilder<'_, Postgres> {
        let mut query = QueryBuilder::new(SELECT_ACTIVE_SNEAKERS_SQL);

        if let Some(brand) = self.brand() {
            query.push(" AND brand = ").push_bind(brand);
        }

        if let Some(name) = self.name() {
            query
                .push(" AND sneaker_name ILIKE ")
                .push_bind(format!("%{}%", escape_like(name)));
        }

        if let Some(min_price) = self.min_price() {
            query.push(" AND price >= ").push_bind(min_price);
        }

        if let Some(max_price) = self.max_price() {
            query.push(" AND price <= ").push_bind(max_price);
        }

        if let Some(size) = self.size() {
            query.push(" AND size = ").push_bind(size);
        }

        query.push(ORDER_BY_NEWEST_SQL);

        if let Some(limit) = pagination.limit.filter(|limit| *limit > 0) {
            query.push(" LIMIT ").push_bind(i64::from(limit));
        }

        if let Some(offset) = pagination.offset.filter(|offset| *offset > 0) {
            query.push(" OFFSET ").push_bind(i64::from(offset));
        }

        query
    }
}

/// Escape `LIKE` metacharacters so user input matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for ch in value.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }

        escaped.push(ch);
    }

    escaped
}
