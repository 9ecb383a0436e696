//! Sneakers

pub mod data;
pub mod errors;
pub mod filters;
pub mod models;
mod repository;
pub mod service;

pub use errors::{Phase, SneakersServiceError};
pub use service::*;
