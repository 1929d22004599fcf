//! Foo service: REST resource for Foo records backed by PostgreSQL.

pub mod config;
pub mod domain;
pub mod error;
pub mod handlers;
pub mod header;
pub mod openapi;
pub mod pagination;
pub mod repository;
pub mod routes;
pub mod state;
pub mod store;

pub use config::Settings;
pub use domain::{Foo, User};
pub use error::{AppError, ConfigError};
pub use header::Alerts;
pub use repository::{FooRepository, InMemoryFooRepository, Page, PageRequest, PgFooRepository};
pub use routes::{app, common_routes, foo_routes};
pub use state::AppState;
pub use store::{ensure_database_exists, ensure_tables};
