//! Sneakers service errors.

use std::{
    borrow::Cow,
    fmt::{Display, Formatter, Result as FmtResult},
};

use rust_decimal::Decimal;
use sqlx::{
    Error,
    error::{DatabaseError, ErrorKind},
};
use thiserror::Error;

use crate::{cancellation::CancellationCause, domain::sneakers::models::SneakerId};

/// Step of a storage operation an error was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Begin,
    Send,
    Commit,
    Query,
}

impl Display for Phase {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(match self {
            Self::Begin => "begin",
            Self::Send => "send",
            Self::Commit => "commit",
            Self::Query => "query",
        })
    }
}

#[derive(Debug, Error)]
pub enum SneakersServiceError {
    #[error("sneaker {id} has invalid price {price}")]
    InvalidPrice { id: SneakerId, price: Decimal },

    #[error("sneaker {id} has invalid size {size}")]
    InvalidSize { id: SneakerId, size: Decimal },

    #[error("sneaker already exists")]
    AlreadyExists {
        phase: Phase,
        #[source]
        source: Error,
    },

    #[error("related resource not found")]
    InvalidReference {
        phase: Phase,
        #[source]
        source: Error,
    },

    #[error("missing required data")]
    MissingRequiredData {
        phase: Phase,
        #[source]
        source: Error,
    },

    #[error("invalid data")]
    InvalidData {
        phase: Phase,
        #[source]
        source: Error,
    },

    #[error("sneakers not found or already deleted")]
    NotFound,

    #[error("operation cancelled before {phase}")]
    Cancelled {
        phase: Phase,
        #[source]
        source: CancellationCause,
    },

    #[error("storage error during {phase}")]
    Sql {
        phase: Phase,
        #[source]
        source: Error,
    },
}

/// SQLSTATE class for data exceptions (numeric overflow, invalid text, ...).
const DATA_EXCEPTION_CLASS: &str = "22";

impl SneakersServiceError {
    /// Classify a storage error raised during `phase`.
    pub(crate) fn storage(phase: Phase, error: Error) -> Self {
        let Some(database_error) = error.as_database_error() else {
            return Self::Sql {
                phase,
                source: error,
            };
        };

        let kind = database_error.kind();
        let is_data_exception = database_error
            .code()
            .is_some_and(|code| code.starts_with(DATA_EXCEPTION_CLASS));

        match kind {
            ErrorKind::UniqueViolation => Self::AlreadyExists {
                phase,
                source: error,
            },
            ErrorKind::ForeignKeyViolation => Self::InvalidReference {
                phase,
                source: error,
            },
            ErrorKind::NotNullViolation => Self::MissingRequiredData {
                phase,
                source: error,
            },
            ErrorKind::CheckViolation => Self::InvalidData {
                phase,
                source: error,
            },
            _ if is_data_exception => Self::InvalidData {
                phase,
                source: error,
            },
            _ => Self::Sql {
                phase,
                source: error,
            },
        }
    }

    pub(crate) fn cancelled(phase: Phase) -> impl FnOnce(CancellationCause) -> Self {
        move |source| Self::Cancelled { phase, source }
    }

    /// Step the error was raised in, when it came from storage or cancellation.
    pub fn phase(&self) -> Option<Phase> {
        match self {
            Self::AlreadyExists { phase, .. }
            | Self::InvalidReference { phase, .. }
            | Self::MissingRequiredData { phase, .. }
            | Self::InvalidData { phase, .. }
            | Self::Cancelled { phase, .. }
            | Self::Sql { phase, .. } => Some(*phase),
            Self::InvalidPrice { .. } | Self::InvalidSize { .. } | Self::NotFound => None,
        }
    }

    /// SQLSTATE reported by the database, if the error came from one.
    pub fn sql_state(&self) -> Option<Cow<'_, str>> {
        match self {
            Self::AlreadyExists { source, .. }
            | Self::InvalidReference { source, .. }
            | Self::MissingRequiredData { source, .. }
            | Self::InvalidData { source, .. }
            | Self::Sql { source, .. } => source.as_database_error().and_then(DatabaseError::code),
            Self::InvalidPrice { .. }
            | Self::InvalidSize { .. }
            | Self::NotFound
            | Self::Cancelled { .. } => None,
        }
    }

    /// Whether the caller's input caused the failure.
    pub fn is_client_fault(&self) -> bool {
        match self {
            Self::InvalidPrice { .. }
            | Self::InvalidSize { .. }
            | Self::AlreadyExists { .. }
            | Self::InvalidReference { .. }
            | Self::MissingRequiredData { .. }
            | Self::InvalidData { .. }
            | Self::NotFound => true,
            Self::Cancelled { .. } | Self::Sql { .. } => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_keeps_phase() {
        let error = SneakersServiceError::storage(Phase::Query, Error::RowNotFound);

        assert!(
            matches!(
                error,
                SneakersServiceError::Sql {
                    phase: Phase::Query,
                    ..
                }
            ),
            "expected Sql during query, got {error:?}"
        );
        assert!(error.sql_state().is_none());
        assert_eq!(error.phase(), Some(Phase::Query));
        assert!(!error.is_client_fault());
    }

    #[test]
    fn cancellation_wraps_cause() {
        let error =
            SneakersServiceError::cancelled(Phase::Commit)(CancellationCause::DeadlineExceeded);

        assert_eq!(error.to_string(), "operation cancelled before commit");
        assert!(
            matches!(
                error,
                SneakersServiceError::Cancelled {
                    source: CancellationCause::DeadlineExceeded,
                    ..
                }
            ),
            "expected deadline cause, got {error:?}"
        );
        assert!(!error.is_client_fault());
    }

    #[test]
    fn invalid_price_names_offending_sneaker() {
        let error = SneakersServiceError::InvalidPrice {
            id: SneakerId::new(7),
            price: Decimal::ZERO,
        };

        assert_eq!(error.to_string(), "sneaker 7 has invalid price 0");
        assert!(error.is_client_fault());
        assert_eq!(error.phase(), None);
    }

    #[test]
    fn invalid_size_names_offending_sneaker() {
        let error = SneakersServiceError::InvalidSize {
            id: SneakerId::new(9),
            size: Decimal::new(1000, 0),
        };

        assert_eq!(error.to_string(), "sneaker 9 has invalid size 1000");
        assert!(error.is_client_fault());
    }
}
