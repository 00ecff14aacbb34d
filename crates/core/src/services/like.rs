//! Like service.

use recipebox_common::{AppError, AppResult};
use recipebox_db::entities::{like, recipe};
use recipebox_db::repositories::{LikeRepository, RecipeRepository};
use sea_orm::Set;
use tracing::info;

/// Input for creating a like.
#[derive(Debug, Clone, Copy)]
pub struct CreateLikeInput {
    pub recipe_id: i32,
}

/// Input for updating a like.
#[derive(Debug, Clone, Copy, Default)]
pub struct UpdateLikeInput {
    pub recipe_id: Option<i32>,
}

/// Service for managing likes.
#[derive(Clone)]
pub struct LikeService {
    like_repo: LikeRepository,
    recipe_repo: RecipeRepository,
}

impl LikeService {
    /// Create a new like service.
    #[must_use]
    pub const fn new(like_repo: LikeRepository, recipe_repo: RecipeRepository) -> Self {
        Self {
            like_repo,
            recipe_repo,
        }
    }

    /// List all likes.
    pub async fn list(&self) -> AppResult<Vec<like::Model>> {
        self.like_repo.find_all().await
    }

    /// Get a like by ID, `None` if it does not exist.
    pub async fn find(&self, id: i32) -> AppResult<Option<like::Model>> {
        self.like_repo.find_by_id(id).await
    }

    /// Like a recipe.
    pub async fn create(&self, input: CreateLikeInput) -> AppResult<like::Model> {
        self.recipe_repo.get_by_id(input.recipe_id).await?;

        if self.like_repo.find_by_recipe(input.recipe_id).await?.is_some() {
            return Err(AppError::Conflict(format!(
                "Recipe {} is already liked",
                input.recipe_id
            )));
        }

        let model = like::ActiveModel {
            recipe_id: Set(input.recipe_id),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        self.like_repo.create(model).await
    }

    /// Move a like to another recipe.
    pub async fn update(&self, id: i32, input: UpdateLikeInput) -> AppResult<like::Model> {
        let like = self.like_repo.get_by_id(id).await?;

        let Some(recipe_id) = input.recipe_id else {
            return Ok(like);
        };

        self.recipe_repo.get_by_id(recipe_id).await?;

        let mut active: like::ActiveModel = like.into();
        active.recipe_id = Set(recipe_id);

        self.like_repo.update(active).await
    }

    /// Delete a like, returning the removed row.
    pub async fn delete(&self, id: i32) -> AppResult<like::Model> {
        let like = self.like_repo.get_by_id(id).await?;
        self.like_repo.delete(id).await?;
        Ok(like)
    }

    /// Flip the liked state of a recipe.
    ///
    /// Returns the created like, or `None` when the existing like was removed.
    pub async fn toggle(&self, recipe_id: i32) -> AppResult<Option<like::Model>> {
        self.recipe_repo.get_by_id(recipe_id).await?;

        let result = self.like_repo.toggle(recipe_id).await?;
        info!(recipe_id, liked = result.is_some(), "Like toggled");
        Ok(result)
    }

    /// The recipe a like belongs to.
    pub async fn recipe(&self, like: &like::Model) -> AppResult<recipe::Model> {
        self.like_repo
            .find_recipe(like)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Recipe: {}", like.recipe_id)))
    }
}
