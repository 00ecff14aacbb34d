//! Like repository.

use std::sync::Arc;

use super::db_err;
use crate::entities::{Like, Recipe, like, recipe};
use recipebox_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
    sea_query::OnConflict,
};
use tracing::debug;

/// Like repository for database operations.
#[derive(Clone)]
pub struct LikeRepository {
    db: Arc<DatabaseConnection>,
}

impl LikeRepository {
    /// Create a new like repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find all likes, oldest first.
    pub async fn find_all(&self) -> AppResult<Vec<like::Model>> {
        Like::find()
            .order_by_asc(like::Column::Id)
            .all(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Find a like by ID.
    pub async fn find_by_id(&self, id: i32) -> AppResult<Option<like::Model>> {
        Like::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Get a like by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: i32) -> AppResult<like::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Like: {id}")))
    }

    /// Find the like for a recipe, if any.
    pub async fn find_by_recipe(&self, recipe_id: i32) -> AppResult<Option<like::Model>> {
        Like::find()
            .filter(like::Column::RecipeId.eq(recipe_id))
            .one(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Count likes for a recipe.
    pub async fn count_by_recipe(&self, recipe_id: i32) -> AppResult<u64> {
        Like::find()
            .filter(like::Column::RecipeId.eq(recipe_id))
            .count(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Find the recipe a like belongs to.
    pub async fn find_recipe(&self, like: &like::Model) -> AppResult<Option<recipe::Model>> {
        like.find_related(Recipe)
            .one(self.db.as_ref())
            .await
            .map_err(db_err)
    }

    /// Create a new like.
    pub async fn create(&self, model: like::ActiveModel) -> AppResult<like::Model> {
        model.insert(self.db.as_ref()).await.map_err(db_err)
    }

    /// Update a like.
    pub async fn update(&self, model: like::ActiveModel) -> AppResult<like::Model> {
        model.update(self.db.as_ref()).await.map_err(db_err)
    }

    /// Delete a like.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = Like::delete_by_id(id)
            .exec(self.db.as_ref())
            .await
            .map_err(db_err)?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound(format!("Like: {id}")));
        }
        Ok(())
    }

    /// Flip the liked state of a recipe in a single transaction.
    ///
    /// Returns the new like when the recipe becomes liked, `None` when it
    /// becomes unliked. Concurrent toggles never leave more than one like:
    /// the insert is `ON CONFLICT (recipe_id) DO NOTHING` against the unique
    /// index, and a caller that loses that race returns the winner's row.
    pub async fn toggle(&self, recipe_id: i32) -> AppResult<Option<like::Model>> {
        let txn = self.db.begin().await.map_err(db_err)?;

        let deleted = Like::delete_many()
            .filter(like::Column::RecipeId.eq(recipe_id))
            .exec(&txn)
            .await
            .map_err(db_err)?;

        if deleted.rows_affected > 0 {
            txn.commit().await.map_err(db_err)?;
            debug!(recipe_id, removed = deleted.rows_affected, "Recipe unliked");
            return Ok(None);
        }

        let model = like::ActiveModel {
            recipe_id: Set(recipe_id),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        let inserted = Like::insert(model)
            .on_conflict(
                OnConflict::column(like::Column::RecipeId)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_with_returning(&txn)
            .await;

        let like = match inserted {
            Ok(like) => Some(like),
            // A concurrent toggle won the insert. Its row may already be gone
            // again, in which case the recipe is currently unliked.
            Err(DbErr::RecordNotInserted | DbErr::RecordNotFound(_)) => {
                debug!(recipe_id, "Concurrent toggle already liked recipe");
                Like::find()
                    .filter(like::Column::RecipeId.eq(recipe_id))
                    .one(&txn)
                    .await
                    .map_err(db_err)?
            }
            Err(e) => return Err(db_err(e)),
        };

        txn.commit().await.map_err(db_err)?;
        debug!(recipe_id, like_id = like.as_ref().map(|l| l.id), "Recipe liked");
        Ok(like)
    }
}
