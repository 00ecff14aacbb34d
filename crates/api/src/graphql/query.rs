//! Query root.

use async_graphql::{Context, ErrorExtensions, Object, Result};
use recipebox_core::{LikeService, RecipeService};

use super::types::{Like, Recipe};
use crate::operations::OperationGuard;

/// Root query type.
#[derive(Debug, Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// All recipes, oldest first.
    #[graphql(guard = "OperationGuard::new(\"recipes\")")]
    async fn recipes(&self, ctx: &Context<'_>) -> Result<Vec<Recipe>> {
        let recipes = ctx
            .data::<RecipeService>()?
            .list()
            .await
            .map_err(|e| e.extend())?;
        Ok(recipes.into_iter().map(Recipe).collect())
    }

    /// A recipe by id, `null` if it does not exist.
    #[graphql(guard = "OperationGuard::new(\"recipe\")")]
    async fn recipe(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Recipe>> {
        let recipe = ctx
            .data::<RecipeService>()?
            .find(id)
            .await
            .map_err(|e| e.extend())?;
        Ok(recipe.map(Recipe))
    }

    /// All likes, oldest first.
    #[graphql(guard = "OperationGuard::new(\"likes\")")]
    async fn likes(&self, ctx: &Context<'_>) -> Result<Vec<Like>> {
        let likes = ctx
            .data::<LikeService>()?
            .list()
            .await
            .map_err(|e| e.extend())?;
        Ok(likes.into_iter().map(Like).collect())
    }

    /// A like by id, `null` if it does not exist.
    #[graphql(guard = "OperationGuard::new(\"like\")")]
    async fn like(&self, ctx: &Context<'_>, id: i32) -> Result<Option<Like>> {
        let like = ctx
            .data::<LikeService>()?
            .find(id)
            .await
            .map_err(|e| e.extend())?;
        Ok(like.map(Like))
    }
}
