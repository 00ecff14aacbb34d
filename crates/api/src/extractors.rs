//! Request extractors.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

/// A caller that presented a configured API token.
///
/// Inserted into request extensions by [`crate::middleware::auth_middleware`]
/// and forwarded into GraphQL request data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthCaller;

/// Optional authenticated caller extractor.
#[derive(Debug, Clone, Copy)]
pub struct MaybeAuthCaller(pub Option<AuthCaller>);

impl<S> FromRequestParts<S> for MaybeAuthCaller
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(parts.extensions.get::<AuthCaller>().copied()))
    }
}
