//! GraphQL schema.

mod error_codes;
mod mutation;
mod query;
mod types;

use async_graphql::{EmptySubscription, Schema};
use recipebox_core::{LikeService, RecipeService};

pub use error_codes::ErrorCodes;
pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use types::{CreateLikeInput, CreateRecipeInput, Like, Recipe, UpdateLikeInput, UpdateRecipeInput};

/// GraphQL schema type.
pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the services as context data.
#[must_use]
pub fn build_schema(recipe_service: RecipeService, like_service: LikeService) -> AppSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(recipe_service)
        .data(like_service)
        .extension(ErrorCodes)
        .finish()
}
