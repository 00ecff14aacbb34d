//! Business logic services.

#![allow(missing_docs)]

pub mod like;
pub mod recipe;

pub use like::{CreateLikeInput, LikeService, UpdateLikeInput};
pub use recipe::{CreateRecipeInput, RecipeService, UpdateRecipeInput};
