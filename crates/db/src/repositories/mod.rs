//! Database repositories.

mod like;
mod recipe;

pub use like::LikeRepository;
pub use recipe::RecipeRepository;

use recipebox_common::AppError;
use sea_orm::{DbErr, SqlErr};

/// Map a storage error to an [`AppError`].
///
/// Constraint violations become client errors; everything else is a
/// `Database` error.
pub(crate) fn db_err(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(msg)) => AppError::Conflict(msg),
        Some(SqlErr::ForeignKeyConstraintViolation(msg)) => AppError::NotFound(msg),
        _ => AppError::Database(err.to_string()),
    }
}
