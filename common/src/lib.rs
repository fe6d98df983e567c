pub mod utils;
pub mod models;
pub mod database;

pub use utils::{Config, Result, ApiError};
pub use models::{Project, NewProject};
pub use database::{DbPool, build_pool, create_pool, run_migrations};
