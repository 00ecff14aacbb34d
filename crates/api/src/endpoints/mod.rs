//! API endpoints.

mod graphql;
mod health;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::AppState;

/// Create the API router.
///
/// `graphiql` additionally serves the GraphiQL IDE on `GET /graphql`.
pub fn router(graphiql: bool) -> Router<AppState> {
    let graphql_route = if graphiql {
        post(graphql::execute).get(graphql::graphiql)
    } else {
        post(graphql::execute)
    };

    Router::new()
        .route("/graphql", graphql_route)
        .route("/health", get(health::health_check))
}
