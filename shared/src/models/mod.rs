//! Domain models for the Manufacturing ERP Platform

mod inventory;
mod product;
mod user;
mod warehouse;

pub use inventory::*;
pub use product::*;
pub use user::*;
pub use warehouse::*;
