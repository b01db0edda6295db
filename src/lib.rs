// Expense Tracker - Core Library
// Exposes all modules for use in the API server and tests

pub mod config;
pub mod error;
pub mod logging;
pub mod model;
pub mod query;
pub mod service;
pub mod store;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use config::ServerConfig;
pub use error::{ExpenseError, FieldError};
pub use model::{
    normalize_category, Expense, ExpenseDetails, ExpenseInput, ExpenseRequest, DEFAULT_CATEGORY,
};
pub use query::{month_bounds, ExpenseQuery};
pub use service::ExpenseService;
pub use store::ExpenseStore;

#[cfg(feature = "server")]
pub use api::{router, ApiError, AppState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
