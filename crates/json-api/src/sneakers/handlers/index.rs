//! Sneaker Index Handler

use rust_decimal::Decimal;
use salvo::{
    oapi::{ToParameters, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use inventory_app::domain::sneakers::filters::{Pagination, SneakerFilters};

use crate::{
    extensions::*,
    sneakers::{errors::into_status_error, models::SneakerResponse},
};

/// Sneaker list query parameters
#[derive(Debug, Deserialize, ToParameters)]
#[salvo(parameters(default_parameter_in = Query))]
pub(crate) struct ListSneakersQuery {
    /// Exact brand match
    pub brand: Option<String>,

    /// Case-insensitive substring of the sneaker name
    pub name: Option<String>,

    /// Inclusive lower price bound
    #[salvo(parameter(value_type = Option<f64>))]
    pub min_price: Option<Decimal>,

    /// Inclusive upper price bound
    #[salvo(parameter(value_type = Option<f64>))]
    pub max_price: Option<Decimal>,

    /// Exact size match
    #[salvo(parameter(value_type = Option<f64>))]
    pub size: Option<Decimal>,

    /// Maximum number of sneakers to return
    pub limit: Option<u32>,

    /// Number of sneakers to skip
    pub offset: Option<u32>,
}

impl ListSneakersQuery {
    fn into_parts(self) -> (SneakerFilters, Pagination) {
        (
            SneakerFilters {
                brand: self.brand,
                name: self.name,
                min_price: self.min_price,
                max_price: self.max_price,
                size: self.size,
            },
            Pagination {
                limit: self.limit,
                offset: self.offset,
            },
        )
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SneakersResponse {
    /// Matching sneakers, newest first
    pub sneakers: Vec<SneakerResponse>,
}

/// Sneaker Index Handler
///
/// Returns active sneakers matching the given filters.
#[endpoint(
    tags("sneakers"),
    summary = "List Sneakers",
    responses(
        (status_code = StatusCode::OK, description = "Matching sneakers"),
        (status_code = StatusCode::BAD_REQUEST, description = "Bad Request"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Request deadline exceeded"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    query: ListSneakersQuery,
    depot: &mut Depot,
) -> Result<Json<SneakersResponse>, StatusError> {
    let state = depot.state_or_500()?;
    let (filters, pagination) = query.into_parts();

    let sneakers = state
        .sneakers
        .list_sneakers(&state.cancellation(), filters, pagination)
        .await
        .map_err(into_status_error)?;

    Ok(Json(SneakersResponse {
        sneakers: sneakers.into_iter().map(Into::into).collect(),
    }))
}
