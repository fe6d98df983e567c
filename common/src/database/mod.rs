pub mod connection;
pub mod projects;

pub use connection::{DbPool, build_pool, create_pool, run_migrations};
