//! Shared types and models for the Manufacturing ERP Platform
//!
//! This crate contains the domain model shared between the backend and other
//! components of the system: entities, enumerations, derived stock flags, and
//! pure validation helpers.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
