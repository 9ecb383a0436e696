//! Sneaker Errors

use salvo::http::StatusError;
use tracing::{error, warn};

use inventory_app::domain::sneakers::SneakersServiceError;

pub(crate) fn into_status_error(error: SneakersServiceError) -> StatusError {
    match &error {
        SneakersServiceError::InvalidPrice { .. } | SneakersServiceError::InvalidSize { .. } => {
            StatusError::bad_request().brief(error.to_string())
        }
        SneakersServiceError::AlreadyExists { .. } => {
            StatusError::conflict().brief("Sneaker already exists")
        }
        SneakersServiceError::InvalidReference { .. }
        | SneakersServiceError::MissingRequiredData { .. }
        | SneakersServiceError::InvalidData { .. } => {
            warn!(phase = ?error.phase(), sql_state = ?error.sql_state(), "{error}");

            StatusError::bad_request().brief("Invalid sneaker payload")
        }
        SneakersServiceError::NotFound => StatusError::not_found().brief(error.to_string()),
        SneakersServiceError::Cancelled { .. } => {
            warn!("sneakers request abandoned: {error}");

            StatusError::service_unavailable().brief("Request deadline exceeded")
        }
        SneakersServiceError::Sql { source, .. } => {
            error!(sql_state = ?error.sql_state(), "{error}: {source}");

            StatusError::internal_server_error()
        }
    }
}
