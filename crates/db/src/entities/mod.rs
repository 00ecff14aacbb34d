//! Database entities.

#![allow(missing_docs)]

pub mod like;
pub mod recipe;

pub use like::Entity as Like;
pub use recipe::Entity as Recipe;
