//! API middleware.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, header::AUTHORIZATION},
    middleware::Next,
    response::Response,
};
use recipebox_core::{LikeService, RecipeService};
use tracing::debug;

use crate::extractors::AuthCaller;
use crate::graphql::{AppSchema, build_schema};

/// Application state.
#[derive(Clone)]
pub struct AppState {
    /// GraphQL schema holding the services as context data.
    pub schema: AppSchema,
    api_tokens: Arc<HashSet<String>>,
}

impl AppState {
    /// Build the state and the GraphQL schema from the services.
    pub fn new<I>(recipe_service: RecipeService, like_service: LikeService, api_tokens: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let schema = build_schema(recipe_service, like_service);
        let api_tokens = api_tokens
            .into_iter()
            .filter(|t| !t.is_empty())
            .collect::<HashSet<_>>();

        Self {
            schema,
            api_tokens: Arc::new(api_tokens),
        }
    }

    /// Check whether a bearer token is accepted.
    #[must_use]
    pub fn accepts_token(&self, token: &str) -> bool {
        self.api_tokens.contains(token)
    }
}

/// Authentication middleware.
///
/// Requests without a token, or with an unknown one, pass through anonymously;
/// each GraphQL operation decides whether it needs a caller.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    if let Some(auth_header) = req.headers().get(AUTHORIZATION)
        && let Ok(auth_str) = auth_header.to_str()
        && let Some(token) = auth_str.strip_prefix("Bearer ")
    {
        if state.accepts_token(token.trim()) {
            req.extensions_mut().insert(AuthCaller);
        } else {
            debug!("Rejected unknown API token");
        }
    }

    next.run(req).await
}
