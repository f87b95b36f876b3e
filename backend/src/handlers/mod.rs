//! HTTP handlers for the Manufacturing ERP Platform

pub mod auth;
pub mod health;
pub mod inventory;
pub mod products;
pub mod stock_items;
pub mod users;
pub mod warehouses;

pub use auth::*;
pub use health::*;
pub use inventory::*;
pub use products::*;
pub use stock_items::*;
pub use users::*;
pub use warehouses::*;
