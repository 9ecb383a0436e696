//! Create Sneakers Handler

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use crate::{
    extensions::*,
    sneakers::{errors::into_status_error, models::SneakersRequest},
};

/// Sneakers Created Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SneakersCreatedResponse {
    /// Number of sneakers inserted
    pub created: u64,
}

/// Create Sneakers Handler
///
/// Inserts the whole batch or nothing.
#[endpoint(
    tags("sneakers"),
    summary = "Create Sneakers",
    responses(
        (status_code = StatusCode::CREATED, description = "Sneakers created"),
        (status_code = StatusCode::CONFLICT, description = "Sneaker already exists"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Request deadline exceeded"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
#[tracing::instrument(
    name = "sneakers.create",
    skip(json, depot, res),
    fields(count = tracing::field::Empty),
    err
)]
pub(crate) async fn handler(
    json: JsonBody<SneakersRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SneakersCreatedResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let request = json.into_inner();

    tracing::Span::current().record("count", tracing::field::display(request.sneakers.len()));

    let created = state
        .sneakers
        .create_sneakers(
            &state.cancellation(),
            request.sneakers.into_iter().map(Into::into).collect(),
        )
        .await
        .map_err(into_status_error)?;

    res.status_code(StatusCode::CREATED);

    Ok(Json(SneakersCreatedResponse { created }))
}
