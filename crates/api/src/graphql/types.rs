//! GraphQL object and input types.

#![allow(missing_docs)]

use async_graphql::{Context, ErrorExtensions, InputObject, MaybeUndefined, Object, Result};
use chrono::{DateTime, Utc};
use recipebox_core::{LikeService, RecipeService};
use recipebox_db::entities::{like, recipe};

/// A stored recipe.
pub struct Recipe(pub recipe::Model);

#[Object]
impl Recipe {
    async fn id(&self) -> i32 {
        self.0.id
    }

    async fn title(&self) -> &str {
        &self.0.title
    }

    async fn ingredients(&self) -> &str {
        &self.0.ingredients
    }

    /// Rich text, returned as stored.
    async fn instructions(&self) -> &str {
        &self.0.instructions
    }

    async fn prep_time(&self) -> &str {
        &self.0.prep_time
    }

    async fn servings(&self) -> &str {
        &self.0.servings
    }

    async fn personal_note(&self) -> Option<&str> {
        self.0.personal_note.as_deref()
    }

    async fn unique_link(&self) -> &str {
        &self.0.unique_link
    }

    async fn likes(&self, ctx: &Context<'_>) -> Result<Vec<Option<Like>>> {
        let likes = ctx
            .data::<RecipeService>()?
            .likes(self.0.id)
            .await
            .map_err(|e| e.extend())?;
        Ok(likes.into_iter().map(|l| Some(Like(l))).collect())
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at.with_timezone(&Utc)
    }
}

/// A like on a recipe.
pub struct Like(pub like::Model);

#[Object]
impl Like {
    async fn id(&self) -> i32 {
        self.0.id
    }

    async fn recipe(&self, ctx: &Context<'_>) -> Result<Recipe> {
        ctx.data::<LikeService>()?
            .recipe(&self.0)
            .await
            .map(Recipe)
            .map_err(|e| e.extend())
    }

    async fn recipe_id(&self) -> i32 {
        self.0.recipe_id
    }

    async fn created_at(&self) -> DateTime<Utc> {
        self.0.created_at.with_timezone(&Utc)
    }
}

#[derive(Debug, InputObject)]
pub struct CreateRecipeInput {
    pub title: String,
    pub ingredients: String,
    pub instructions: String,
    pub prep_time: String,
    pub servings: String,
    pub personal_note: Option<String>,
    pub unique_link: String,
}

impl From<CreateRecipeInput> for recipebox_core::CreateRecipeInput {
    fn from(input: CreateRecipeInput) -> Self {
        Self {
            title: input.title,
            ingredients: input.ingredients,
            instructions: input.instructions,
            prep_time: input.prep_time,
            servings: input.servings,
            personal_note: input.personal_note,
            unique_link: input.unique_link,
        }
    }
}

/// Partial recipe update. A `null` required field is left unchanged;
/// `personalNote: null` clears the note.
#[derive(Debug, Default, InputObject)]
pub struct UpdateRecipeInput {
    pub title: Option<String>,
    pub ingredients: Option<String>,
    pub instructions: Option<String>,
    pub prep_time: Option<String>,
    pub servings: Option<String>,
    pub personal_note: MaybeUndefined<String>,
    pub unique_link: Option<String>,
}

impl From<UpdateRecipeInput> for recipebox_core::UpdateRecipeInput {
    fn from(input: UpdateRecipeInput) -> Self {
        let personal_note = match input.personal_note {
            MaybeUndefined::Undefined => None,
            MaybeUndefined::Null => Some(None),
            MaybeUndefined::Value(note) => Some(Some(note)),
        };

        Self {
            title: input.title,
            ingredients: input.ingredients,
            instructions: input.instructions,
            prep_time: input.prep_time,
            servings: input.servings,
            personal_note,
            unique_link: input.unique_link,
        }
    }
}

#[derive(Debug, Clone, Copy, InputObject)]
pub struct CreateLikeInput {
    pub recipe_id: i32,
}

impl From<CreateLikeInput> for recipebox_core::CreateLikeInput {
    fn from(input: CreateLikeInput) -> Self {
        Self {
            recipe_id: input.recipe_id,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, InputObject)]
pub struct UpdateLikeInput {
    pub recipe_id: Option<i32>,
}

impl From<UpdateLikeInput> for recipebox_core::UpdateLikeInput {
    fn from(input: UpdateLikeInput) -> Self {
        Self {
            recipe_id: input.recipe_id,
        }
    }
}
