//! Update Sneakers Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    sneakers::{errors::into_status_error, models::SneakersRequest},
};

/// Sneakers Updated Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SneakersUpdatedResponse {
    /// Number of active sneakers overwritten
    pub updated: u64,
}

/// Update Sneakers Handler
#[endpoint(
    tags("sneakers"),
    summary = "Update Sneakers",
    responses(
        (status_code = StatusCode::OK, description = "Sneakers updated"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Request deadline exceeded"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "sneakers.update",
    skip(json, depot),
    fields(count = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<SneakersRequest>,
    depot: &mut Depot,
) -> Result<Json<SneakersUpdatedResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let request = json.into_inner();

    tracing::Span::current().record("count", tracing::field::display(request.sneakers.len()));

    let updated = state
        .sneakers
        .update_sneakers(
            &state.cancellation(),
            request.sneakers.into_iter().map(Into::into).collect(),
        )
        .await
        .map_err(into_status_error)?;

    tracing::info!(updated, "updated sneakers");

    Ok(Json(SneakersUpdatedResponse { updated }))
}
