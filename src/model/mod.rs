//! Entity models module
//!
//! All derived entity structs are consolidated in models.rs.

mod models;

pub use models::*;
