//! Inventory Domain Concerns

pub mod sneakers;
