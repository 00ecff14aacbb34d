//! Recipe repository.

use std::sync::Arc;

use super::db_err;
use crate::entities::{Like, Recipe, like, recipe};
use recipebox_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

/// Recipe repository for database operations.
#[derive(Clone)]
pub struct RecipeRepository {
    db: Arc<DatabaseConnection>,
}

impl RecipeRepository {
    /// Create a new recipe repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find all recipes, oldest first.
    pub async fn find_all(&self) -> AppResult<Vec<recipe::Model>> {
        Recipe::find()
            .order_by_asc(recipe::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Find a recipe by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<recipe::Model>> {
        Recipe::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Get a recipe by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<recipe::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Recipe: {id}")))
    }

    /// Find a recipe by its share link.
    pub async fn find_by_unique_link(&self, link: &str) -> AppResult<Option<recipe::Model>> {
        Recipe::find()
            .filter(recipe::Column::UniqueLink.eq(link))
            .one(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Check if a share link is used by a recipe other than `except_id`.
    pub async fn unique_link_taken(&self, link: &str, except_id: Option<i32>) -> AppResult<bool> {
        Ok(self
            .find_by_unique_link(link)
            .await?
            .is_some_and(|r| Some(r.id) != except_id))
    }

    /// Create a new recipe.
    pub async fn create(&self, model: recipe::ActiveModel) -> AppResult<recipe::Model> {
        model.insert(self.db.as_ref()).await.map_err(db_err)
    }

    /// Update a recipe.
    pub async fn update(&self, model: recipe::ActiveModel) -> AppResult<recipe::Model> {
        model.update(self.db.as_ref()).await.map_err(db_err)
    }

    /// Delete a recipe. Its likes are removed by the foreign key cascade.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = Recipe::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Recipe: {id}")));
        }
        Ok(())
    }

    /// Find the likes owned by a recipe.
    pub async fn find_likes(&self, recipe_id: i32) -> AppResult<Vec<like::Model>> {
        Like::find()
            .filter(like::Column::RecipeId.eq(recipe_id))
            .order_by_asc(like::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(db_err)
    }
}
