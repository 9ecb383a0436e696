//! Test context for service-level integration tests.

use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::query_scalar;

use crate::{database::Db, domain::sneakers::PgSneakersService};

use super::db::TestDb;

pub struct TestContext {
    pub db: TestDb,
    pub sneakers: PgSneakersService,
}

impl TestContext {
    pub async fn new() -> Self {
        let db = TestDb::new().await;

        Self {
            sneakers: PgSneakersService::new(Db::new(db.pool().clone())),
            db,
        }
    }

    /// Count every sneaker row, deleted or not.
    pub async fn count_rows(&self) -> i64 {
        query_scalar("SELECT COUNT(*) FROM sneakers")
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to count sneakers")
    }

    /// Count sneakers that have not been soft-deleted.
    pub async fn count_active(&self) -> i64 {
        query_scalar("SELECT COUNT(*) FROM sneakers WHERE deleted_at IS NULL")
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to count active sneakers")
    }

    /// Deletion timestamp of sneaker `id`, read straight from the table.
    pub async fn deleted_at(&self, id: i32) -> Option<Timestamp> {
        query_scalar::<_, Option<SqlxTimestamp>>("SELECT deleted_at FROM sneakers WHERE id = $1")
            .bind(id)
            .fetch_one(self.db.pool())
            .await
            .expect("Failed to read sneaker deletion time")
            .map(SqlxTimestamp::to_jiff)
    }
}
