//! Inventory JSON API Healthcheck Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::extensions::*;

/// Healthcheck response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` when the database answers, `unavailable` otherwise
    pub status: String,
}

/// Healthcheck handler
///
/// Pings the database through the shared pool.
#[endpoint(
    tags("health"),
    summary = "Health check endpoint",
    responses(
        (status_code = StatusCode::OK, description = "Database reachable"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Database unreachable"),
    ),
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<HealthResponse>, StatusError> {
    let state = depot.state_or_500()?;

    let status = match state.health.ping().await {
        Ok(()) => "ok",
        Err(error) => {
            warn!("database ping failed: {error}");

            res.status_code(StatusCode::SERVICE_UNAVAILABLE);

            "unavailable"
        }
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
    }))
}
