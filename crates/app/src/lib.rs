//! Sneaker inventory domain and persistence.

pub mod cancellation;
pub mod config;
pub mod context;
pub mod database;
pub mod domain;

#[cfg(test)]
mod test;
