//! API endpoint handlers module

pub mod analyze;
pub mod health;
