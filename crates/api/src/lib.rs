//! HTTP API layer for recipebox.
//!
//! This crate exposes the recipe services over GraphQL:
//!
//! - **GraphQL**: `Recipe`/`Like` object types, inputs, query and mutation roots
//! - **Operations**: the root operation table and its access guard
//! - **Middleware**: bearer token authentication
//! - **Endpoints**: `/graphql` and `/health`
//!
//! Built on Axum 0.8 and async-graphql 7.

pub mod endpoints;
pub mod extractors;
pub mod graphql;
pub mod middleware;
pub mod operations;

pub use endpoints::router;
pub use graphql::{AppSchema, build_schema};
pub use middleware::{AppState, auth_middleware};
pub use operations::{OPERATIONS, validate_operations};
