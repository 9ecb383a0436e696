//! Sneakers Repository

use std::collections::HashMap;

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, QueryBuilder, Row, Transaction, postgres::PgRow, query,
    query_builder::Separated,
};

use crate::domain::sneakers::{
    data::SneakerData,
    filters::{Pagination, SneakerFilters},
    models::{Sneaker, SneakerId},
};

const SOFT_DELETE_SNEAKERS_SQL: &str = include_str!("sql/soft_delete_sneakers.sql");

const INSERT_SNEAKERS_SQL: &str = "INSERT INTO sneakers \
    (id, article, sneaker_name, sneaker_description, price, size, brand, production_address) ";

const UPDATE_SNEAKERS_SQL: &str = "UPDATE sneakers AS s SET \
    article = u.article, \
    sneaker_name = u.sneaker_name, \
    sneaker_description = u.sneaker_description, \
    price = u.price, \
    size = u.size, \
    brand = u.brand, \
    production_address = u.production_address, \
    updated_at = now() \
    FROM (";

const UPDATE_SNEAKERS_TAIL_SQL: &str = ") AS u \
    (id, article, sneaker_name, sneaker_description, price, size, brand, production_address) \
    WHERE s.id = u.id AND s.deleted_at IS NULL";

/// `PostgreSQL` limit on bind parameters in a single statement.
const MAX_BIND_PARAMS: usize = 65_535;

const BIND_PARAMS_PER_SNEAKER: usize = 8;

pub(crate) const MAX_SNEAKERS_PER_STATEMENT: usize = MAX_BIND_PARAMS / BIND_PARAMS_PER_SNEAKER;

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSneakersRepository;

impl PgSneakersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    /// Insert every sneaker inside `tx`, returning the number of rows written.
    pub(crate) async fn insert_sneakers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sneakers: &[SneakerData],
    ) -> Result<u64, sqlx::Error> {
        let mut inserted = 0;

        for chunk in sneakers.chunks(MAX_SNEAKERS_PER_STATEMENT) {
            let mut statement = QueryBuilder::<Postgres>::new(INSERT_SNEAKERS_SQL);

            statement.push_values(chunk, |mut row, sneaker| {
                push_sneaker(&mut row, sneaker);
            });

            inserted += statement.build().execute(&mut **tx).await?.rows_affected();
        }

        Ok(inserted)
    }

    /// Overwrite the mutable fields of every active sneaker matched by id,
    /// returning the number of rows changed.
    ///
    /// When an id repeats, its last record wins.
    pub(crate) async fn update_sneakers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sneakers: &[SneakerData],
    ) -> Result<u64, sqlx::Error> {
        let sneakers = last_record_per_id(sneakers);
        let mut updated = 0;

        for chunk in sneakers.chunks(MAX_SNEAKERS_PER_STATEMENT) {
            let mut statement = QueryBuilder::<Postgres>::new(UPDATE_SNEAKERS_SQL);

            statement.push_values(chunk, |mut row, sneaker| {
                push_sneaker(&mut row, *sneaker);
            });

            statement.push(UPDATE_SNEAKERS_TAIL_SQL);

            updated += statement.build().execute(&mut **tx).await?.rows_affected();
        }

        Ok(updated)
    }

    /// Mark every active sneaker in `ids` deleted, returning the number of rows changed.
    pub(crate) async fn soft_delete_sneakers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        ids: &[SneakerId],
    ) -> Result<u64, sqlx::Error> {
        let ids: Vec<i32> = ids.iter().copied().map(SneakerId::into_inner).collect();

        let rows_affected = query(SOFT_DELETE_SNEAKERS_SQL)
            .bind(ids)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn list_sneakers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filters: &SneakerFilters,
        pagination: Pagination,
    ) -> Result<Vec<Sneaker>, sqlx::Error> {
        let mut statement = filters.list_query(pagination);

        statement
            .build_query_as::<Sneaker>()
            .fetch_all(&mut **tx)
            .await
    }
}

/// `UPDATE ... FROM` joins each target row to at most one source row, so a
/// batch may name every id only once.
fn last_record_per_id(sneakers: &[SneakerData]) -> Vec<&SneakerData> {
    let last: HashMap<SneakerId, usize> = sneakers
        .iter()
        .enumerate()
        .map(|(position, sneaker)| (sneaker.id, position))
        .collect();

    sneakers
        .iter()
        .enumerate()
        .filter(|(position, sneaker)| last.get(&sneaker.id) == Some(position))
        .map(|(_, sneaker)| sneaker)
        .collect()
}

fn push_sneaker<'q>(
    row: &mut Separated<'_, 'q, Postgres, &'static str>,
    sneaker: &'q SneakerData,
) {
    row.push_bind(sneaker.id.into_inner())
        .push_bind(sneaker.article.as_str())
        .push_bind(sneaker.name.as_str())
        .push_bind(sneaker.description.as_deref())
        .push_bind(sneaker.price)
        .push_bind(sneaker.size)
        .push_bind(sneaker.brand.as_str())
        .push_bind(sneaker.production_address.as_deref());
}

impl<'r> FromRow<'r, PgRow> for Sneaker {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: SneakerId::new(row.try_get("id")?),
            article: row.try_get("article")?,
            name: row.try_get("sneaker_name")?,
            description: row.try_get("sneaker_description")?,
            price: row.try_get("price")?,
            size: row.try_get("size")?,
            brand: row.try_get("brand")?,
            production_address: row.try_get("production_address")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        domain::sneakers::{Phase, SneakersServiceError},
        test::{TestDb, helpers::sneaker},
    };

    use super::*;

    #[test]
    fn repeated_ids_keep_their_last_record() {
        let batch = vec![
            sneaker(1, Decimal::new(10, 0), "Nike"),
            sneaker(2, Decimal::new(30, 0), "Nike"),
            sneaker(1, Decimal::new(20, 0), "Nike"),
        ];

        let kept: Vec<(i32, Decimal)> = last_record_per_id(&batch)
            .into_iter()
            .map(|s| (s.id.into_inner(), s.price))
            .collect();

        assert_eq!(
            kept,
            vec![(2, Decimal::new(30, 0)), (1, Decimal::new(20, 0))]
        );
    }

    #[tokio::test]
    async fn numeric_overflow_is_classified_as_invalid_data() -> TestResult {
        let db = TestDb::new().await;
        let mut tx = db.begin_test_transaction().await;

        let mut oversized = sneaker(1, Decimal::new(100, 0), "Nike");
        oversized.size = Decimal::new(1000, 0);

        let Err(error) = PgSneakersRepository::new()
            .insert_sneakers(&mut tx, &[oversized])
            .await
        else {
            panic!("size 1000 should overflow NUMERIC(4,1)");
        };

        let error = SneakersServiceError::storage(Phase::Send, error);

        assert!(
            matches!(
                error,
                SneakersServiceError::InvalidData {
                    phase: Phase::Send,
                    ..
                }
            ),
            "expected InvalidData, got {error:?}"
        );
        assert_eq!(error.sql_state().as_deref(), Some("22003"));
        assert!(error.is_client_fault());

        Ok(())
    }
}
