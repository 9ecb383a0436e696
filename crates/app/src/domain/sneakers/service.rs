//! Sneakers service.
//!
//! Every mutation runs in a single transaction on one pooled connection and
//! re-checks the caller's [`Cancellation`] before the transaction starts,
//! before statements are sent and before commit. Nothing is retried.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    cancellation::Cancellation,
    database::Db,
    domain::sneakers::{
        data::SneakerData,
        errors::{Phase, SneakersServiceError},
        filters::{Pagination, SneakerFilters},
        models::{Sneaker, SneakerId},
        repository::PgSneakersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgSneakersService {
    db: Db,
    repository: PgSneakersRepository,
}

impl PgSneakersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSneakersRepository::new(),
        }
    }

    async fn begin(&self) -> Result<Transaction<'static, Postgres>, SneakersServiceError> {
        self.db
            .begin()
            .await
            .map_err(|error| SneakersServiceError::storage(Phase::Begin, error))
    }
}

fn checkpoint(cancellation: &Cancellation, phase: Phase) -> Result<(), SneakersServiceError> {
    cancellation
        .check()
        .map_err(SneakersServiceError::cancelled(phase))
}

/// Reject the batch at its first record the columns cannot store as given.
fn validate(sneakers: &[SneakerData]) -> Result<(), SneakersServiceError> {
    for sneaker in sneakers {
        if !sneaker.has_valid_price() {
            return Err(SneakersServiceError::InvalidPrice {
                id: sneaker.id,
                price: sneaker.price,
            });
        }

        if !sneaker.has_valid_size() {
            return Err(SneakersServiceError::InvalidSize {
                id: sneaker.id,
                size: sneaker.size,
            });
        }
    }

    Ok(())
}

async fn commit(tx: Transaction<'static, Postgres>) -> Result<(), SneakersServiceError> {
    tx.commit()
        .await
        .map_err(|error| SneakersServiceError::storage(Phase::Commit, error))
}

#[async_trait]
impl SneakersService for PgSneakersService {
    #[tracing::instrument(name = "sneakers_service.list", skip_all, err)]
    async fn list_sneakers(
        &self,
        cancellation: &Cancellation,
        filters: SneakerFilters,
        pagination: Pagination,
    ) -> Result<Vec<Sneaker>, SneakersServiceError> {
        checkpoint(cancellation, Phase::Query)?;

        let mut tx = self.begin().await?;

        let sneakers = self
            .repository
            .list_sneakers(&mut tx, &filters, pagination)
            .await
            .map_err(|error| SneakersServiceError::storage(Phase::Query, error))?;

        commit(tx).await?;

        Ok(sneakers)
    }

    #[tracing::instrument(
        name = "sneakers_service.create",
        skip_all,
        fields(count = sneakers.len()),
        err
    )]
    async fn create_sneakers(
        &self,
        cancellation: &Cancellation,
        sneakers: Vec<SneakerData>,
    ) -> Result<u64, SneakersServiceError> {
        if sneakers.is_empty() {
            return Ok(0);
        }

        checkpoint(cancellation, Phase::Begin)?;
        validate(&sneakers)?;

        // Dropping `tx` on any early return rolls the batch back.
        let mut tx = self.begin().await?;

        checkpoint(cancellation, Phase::Send)?;

        let inserted = self
            .repository
            .insert_sneakers(&mut tx, &sneakers)
            .await
            .map_err(|error| SneakersServiceError::storage(Phase::Send, error))?;

        checkpoint(cancellation, Phase::Commit)?;
        commit(tx).await?;

        info!(inserted, "sneakers created");

        Ok(inserted)
    }

    #[tracing::instrument(
        name = "sneakers_service.update",
        skip_all,
        fields(count = sneakers.len()),
        err
    )]
    async fn update_sneakers(
        &self,
        cancellation: &Cancellation,
        sneakers: Vec<SneakerData>,
    ) -> Result<u64, SneakersServiceError> {
        if sneakers.is_empty() {
            return Ok(0);
        }

        checkpoint(cancellation, Phase::Begin)?;
        validate(&sneakers)?;

        let mut tx = self.begin().await?;

        checkpoint(cancellation, Phase::Send)?;

        let updated = self
            .repository
            .update_sneakers(&mut tx, &sneakers)
            .await
            .map_err(|error| SneakersServiceError::storage(Phase::Send, error))?;

        checkpoint(cancellation, Phase::Commit)?;
        commit(tx).await?;

        info!(updated, "sneakers updated");

        Ok(updated)
    }

    #[tracing::instrument(
        name = "sneakers_service.delete",
        skip_all,
        fields(count = ids.len()),
        err
    )]
    async fn delete_sneakers(
        &self,
        cancellation: &Cancellation,
        ids: Vec<SneakerId>,
    ) -> Result<u64, SneakersServiceError> {
        if ids.is_empty() {
            return Err(SneakersServiceError::NotFound);
        }

        checkpoint(cancellation, Phase::Begin)?;

        let mut tx = self.begin().await?;

        checkpoint(cancellation, Phase::Send)?;

        let deleted = self
            .repository
            .soft_delete_sneakers(&mut tx, &ids)
            .await
            .map_err(|error| SneakersServiceError::storage(Phase::Send, error))?;

        if deleted == 0 {
            return Err(SneakersServiceError::NotFound);
        }

        checkpoint(cancellation, Phase::Commit)?;
        commit(tx).await?;

        info!(deleted, "sneakers deleted");

        Ok(deleted)
    }
}

#[automock]
#[async_trait]
pub trait SneakersService: Send + Sync {
    /// Retrieves active sneakers matching `filters`, newest first.
    async fn list_sneakers(
        &self,
        cancellation: &Cancellation,
        filters: SneakerFilters,
        pagination: Pagination,
    ) -> Result<Vec<Sneaker>, SneakersServiceError>;

    /// Inserts all sneakers atomically, returning how many were written.
    ///
    /// An empty batch succeeds without touching the database.
    async fn create_sneakers(
        &self,
        cancellation: &Cancellation,
        sneakers: Vec<SneakerData>,
    ) -> Result<u64, SneakersServiceError>;

    /// Overwrites the mutable fields of active sneakers by id, returning how
    /// many rows changed. Unknown ids are skipped.
    async fn update_sneakers(
        &self,
        cancellation: &Cancellation,
        sneakers: Vec<SneakerData>,
    ) -> Result<u64, SneakersServiceError>;

    /// Soft-deletes the active sneakers among `ids`, returning how many were
    /// deleted. Fails with [`SneakersServiceError::NotFound`] if none were.
    async fn delete_sneakers(
        &self,
        cancellation: &Cancellation,
        ids: Vec<SneakerId>,
    ) -> Result<u64, SneakersServiceError>;
}
