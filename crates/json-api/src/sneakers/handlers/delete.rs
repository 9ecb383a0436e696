//! Delete Sneakers Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use inventory_app::domain::sneakers::models::SneakerId;

use crate::{extensions::*, sneakers::errors::into_status_error};

/// Delete Sneakers Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct DeleteSneakersRequest {
    /// Ids of the sneakers to soft-delete
    pub ids: Vec<i32>,
}

/// Sneakers Deleted Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SneakersDeletedResponse {
    /// Number of sneakers soft-deleted
    pub deleted: u64,
}

/// Delete Sneakers Handler
///
/// Soft-deletes every active sneaker among the given ids.
#[endpoint(
    tags("sneakers"),
    summary = "Delete Sneakers",
    responses(
        (status_code = StatusCode::OK, description = "Sneakers deleted"),
        (status_code = StatusCode::NOT_FOUND, description = "No active sneaker matched"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Request deadline exceeded"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "sneakers.delete",
    skip(json, depot),
    fields(count = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<DeleteSneakersRequest>,
    depot: &mut Depot,
) -> Result<Json<SneakersDeletedResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let ids = json.into_inner().ids;

    tracing::Span::current().record("count", tracing::field::display(ids.len()));

    let deleted = state
        .sneakers
        .delete_sneakers(
            &state.cancellation(),
            ids.into_iter().map(SneakerId::new).collect(),
        )
        .await
        .map_err(into_status_error)?;

    Ok(Json(SneakersDeletedResponse { deleted }))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use inventory_app::domain::sneakers::{MockSneakersService, SneakersServiceError};

    use crate::test_helpers::sneakers_service;

    use super::*;

    fn make_service(sneakers: MockSneakersService) -> Service {
        sneakers_service(sneakers, Router::with_path("sneakers").delete(handler))
    }

    #[tokio::test]
    async fn test_delete_sneakers_success() -> TestResult {
        let mut sneakers = MockSneakersService::new();

        sneakers
            .expect_delete_sneakers()
            .once()
            .withf(|_, ids| *ids == vec![SneakerId::new(1), SneakerId::new(2)])
            .return_once(|_, _| Ok(2));

        sneakers.expect_list_sneakers().never();
        sneakers.expect_create_sneakers().never();
        sneakers.expect_update_sneakers().never();

        let mut res = TestClient::delete("http://example.com/sneakers")
            .json(&json!({ "ids": [1, 2] }))
            .send(&make_service(sneakers))
            .await;

        let body: SneakersDeletedResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.deleted, 2);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_sneakers_not_found_returns_404() -> TestResult {
        let mut sneakers = MockSneakersService::new();

        sneakers
            .expect_delete_sneakers()
            .once()
            .return_once(|_, _| Err(SneakersServiceError::NotFound));

        sneakers.expect_list_sneakers().never();
        sneakers.expect_create_sneakers().never();
        sneakers.expect_update_sneakers().never();

        let res = TestClient::delete("http://example.com/sneakers")
            .json(&json!({ "ids": [404] }))
            .send(&make_service(sneakers))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
