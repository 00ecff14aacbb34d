//! GraphQL endpoint.

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
};

use crate::extractors::MaybeAuthCaller;
use crate::middleware::AppState;

/// Execute a GraphQL request, forwarding the authenticated caller.
pub(super) async fn execute(
    State(state): State<AppState>,
    MaybeAuthCaller(caller): MaybeAuthCaller,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();
    if let Some(caller) = caller {
        request = request.data(caller);
    }

    state.schema.execute(request).await.into()
}

/// GraphiQL IDE.
pub(super) async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}
