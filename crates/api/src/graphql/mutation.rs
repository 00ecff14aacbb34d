//! Mutation root.

use async_graphql::{Context, ErrorExtensions, Object, Result};
use recipebox_core::{LikeService, RecipeService};

use super::types::{
    CreateLikeInput, CreateRecipeInput, Like, Recipe, UpdateLikeInput, UpdateRecipeInput,
};
use crate::operations::OperationGuard;

/// Root mutation type.
#[derive(Debug, Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    #[graphql(guard = "OperationGuard::new(\"createRecipe\")")]
    async fn create_recipe(&self, ctx: &Context<'_>, input: CreateRecipeInput) -> Result<Recipe> {
        ctx.data::<RecipeService>()?
            .create(input.into())
            .await
            .map(Recipe)
            .map_err(|e| e.extend())
    }

    /// Overwrite only the provided fields of a recipe.
    #[graphql(guard = "OperationGuard::new(\"updateRecipe\")")]
    async fn update_recipe(
        &self,
        ctx: &Context<'_>,
        id: i32,
        input: UpdateRecipeInput,
    ) -> Result<Recipe> {
        ctx.data::<RecipeService>()?
            .update(id, input.into())
            .await
            .map(Recipe)
            .map_err(|e| e.extend())
    }

    /// Delete a recipe and its likes, returning the removed recipe.
    #[graphql(guard = "OperationGuard::new(\"deleteRecipe\")")]
    async fn delete_recipe(&self, ctx: &Context<'_>, id: i32) -> Result<Recipe> {
        ctx.data::<RecipeService>()?
            .delete(id)
            .await
            .map(Recipe)
            .map_err(|e| e.extend())
    }

    #[graphql(guard = "OperationGuard::new(\"createLike\")")]
    async fn create_like(&self, ctx: &Context<'_>, input: CreateLikeInput) -> Result<Like> {
        ctx.data::<LikeService>()?
            .create(input.into())
            .await
            .map(Like)
            .map_err(|e| e.extend())
    }

    #[graphql(guard = "OperationGuard::new(\"updateLike\")")]
    async fn update_like(
        &self,
        ctx: &Context<'_>,
        id: i32,
        input: UpdateLikeInput,
    ) -> Result<Like> {
        ctx.data::<LikeService>()?
            .update(id, input.into())
            .await
            .map(Like)
            .map_err(|e| e.extend())
    }

    #[graphql(guard = "OperationGuard::new(\"deleteLike\")")]
    async fn delete_like(&self, ctx: &Context<'_>, id: i32) -> Result<Like> {
        ctx.data::<LikeService>()?
            .delete(id)
            .await
            .map(Like)
            .map_err(|e| e.extend())
    }

    /// Like the recipe if it is not liked, otherwise remove its like.
    /// Returns `null` when the recipe ends up unliked.
    #[graphql(guard = "OperationGuard::new(\"toggleLike\")")]
    async fn toggle_like(&self, ctx: &Context<'_>, recipe_id: i32) -> Result<Option<Like>> {
        ctx.data::<LikeService>()?
            .toggle(recipe_id)
            .await
            .map(|like| like.map(Like))
            .map_err(|e| e.extend())
    }
}
