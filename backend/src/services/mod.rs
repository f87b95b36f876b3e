//! Business logic services for the Manufacturing ERP Platform

pub mod auth;
pub mod ledger;
pub mod product;
pub mod stock;
pub mod users;
pub mod warehouse;

pub use auth::AuthService;
pub use ledger::LedgerService;
pub use product::ProductService;
pub use stock::StockService;
pub use users::UserService;
pub use warehouse::WarehouseService;
