//! Recipe service.

use recipebox_common::{AppError, AppResult};
use recipebox_db::entities::{like, recipe};
use recipebox_db::repositories::RecipeRepository;
use sea_orm::Set;
use tracing::info;
use validator::{Validate, ValidationError};

/// Input for creating a recipe.
#[derive(Debug, Clone, Validate)]
pub struct CreateRecipeInput {
    #[validate(length(max = 256), custom(function = "non_blank"))]
    pub title: String,
    #[validate(custom(function = "non_blank"))]
    pub ingredients: String,
    #[validate(custom(function = "non_blank"))]
    pub instructions: String,
    #[validate(length(max = 128), custom(function = "non_blank"))]
    pub prep_time: String,
    #[validate(length(max = 128), custom(function = "non_blank"))]
    pub servings: String,
    pub personal_note: Option<String>,
    #[validate(length(max = 256), custom(function = "non_blank"))]
    pub unique_link: String,
}

/// Input for updating a recipe. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, Validate)]
pub struct UpdateRecipeInput {
    #[validate(length(max = 256), custom(function = "non_blank"))]
    pub title: Option<String>,
    #[validate(custom(function = "non_blank"))]
    pub ingredients: Option<String>,
    #[validate(custom(function = "non_blank"))]
    pub instructions: Option<String>,
    #[validate(length(max = 128), custom(function = "non_blank"))]
    pub prep_time: Option<String>,
    #[validate(length(max = 128), custom(function = "non_blank"))]
    pub servings: Option<String>,
    /// `Some(None)` clears the note.
    pub personal_note: Option<Option<String>>,
    #[validate(length(max = 256), custom(function = "non_blank"))]
    pub unique_link: Option<String>,
}

fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    Ok(())
}

/// Service for managing recipes.
#[derive(Clone)]
pub struct RecipeService {
    recipe_repo: RecipeRepository,
}

impl RecipeService {
    /// Create a new recipe service.
    #[must_use]
    pub const fn new(recipe_repo: RecipeRepository) -> Self {
        Self { recipe_repo }
    }

    /// List all recipes.
    pub async fn list(&self) -> AppResult<Vec<recipe::Model>> {
        self.recipe_repo.find_all().await
    }

    /// Get a recipe by ID, `None` if it does not exist.
    pub async fn find(&self, id: i32) -> AppResult<Option<recipe::Model>> {
        self.recipe_repo.find_by_id(id).await
    }

    /// Create a new recipe.
    pub async fn create(&self, input: CreateRecipeInput) -> AppResult<recipe::Model> {
        input.validate()?;

        if self
            .recipe_repo
            .unique_link_taken(&input.unique_link, None)
            .await?
        {
            return Err(AppError::Conflict(format!(
                "Recipe with link '{}' already exists",
                input.unique_link
            )));
        }

        let model = recipe::ActiveModel {
            title: Set(input.title),
            ingredients: Set(input.ingredients),
            instructions: Set(input.instructions),
            prep_time: Set(input.prep_time),
            servings: Set(input.servings),
            personal_note: Set(input.personal_note),
            unique_link: Set(input.unique_link),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        let recipe = self.recipe_repo.create(model).await?;
        info!(recipe_id = recipe.id, "Recipe created");
        Ok(recipe)
    }

    /// Update a recipe, overwriting only the provided fields.
    pub async fn update(&self, id: i32, input: UpdateRecipeInput) -> AppResult<recipe::Model> {
        input.validate()?;

        let recipe = self.recipe_repo.get_by_id(id).await?;

        if let Some(link) = &input.unique_link
            && self.recipe_repo.unique_link_taken(link, Some(id)).await?
        {
            return Err(AppError::Conflict(format!(
                "Recipe with link '{link}' already exists"
            )));
        }

        let mut active: recipe::ActiveModel = recipe.into();

        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(ingredients) = input.ingredients {
            active.ingredients = Set(ingredients);
        }
        if let Some(instructions) = input.instructions {
            active.instructions = Set(instructions);
        }
        if let Some(prep_time) = input.prep_time {
            active.prep_time = Set(prep_time);
        }
        if let Some(servings) = input.servings {
            active.servings = Set(servings);
        }
        if let Some(personal_note) = input.personal_note {
            active.personal_note = Set(personal_note);
        }
        if let Some(unique_link) = input.unique_link {
            active.unique_link = Set(unique_link);
        }

        self.recipe_repo.update(active).await
    }

    /// Delete a recipe, returning the removed row.
    pub async fn delete(&self, id: i32) -> AppResult<recipe::Model> {
        let recipe = self.recipe_repo.get_by_id(id).await?;
        self.recipe_repo.delete(id).await?;
        info!(recipe_id = id, "Recipe deleted");
        Ok(recipe)
    }

    /// Likes owned by a recipe.
    pub async fn likes(&self, recipe_id: i32) -> AppResult<Vec<like::Model>> {
        self.recipe_repo.find_likes(recipe_id).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use std::sync::Arc;

    fn create_input() -> CreateRecipeInput {
        CreateRecipeInput {
            title: "Brigadeiro".to_string(),
            ingredients: "leite condensado, chocolate, manteiga".to_string(),
            instructions: "<p>Mexa até desgrudar.</p>".to_string(),
            prep_time: "20 min".to_string(),
            servings: "30".to_string(),
            personal_note: Some("<em>Use chocolate 50%</em>".to_string()),
            unique_link: "brigadeiro".to_string(),
        }
    }

    fn model_from(id: i32, input: &CreateRecipeInput) -> recipe::Model {
        recipe::Model {
            id,
            title: input.title.clone(),
            ingredients: input.ingredients.clone(),
            instructions: input.instructions.clone(),
            prep_time: input.prep_time.clone(),
            servings: input.servings.clone(),
            personal_note: input.personal_note.clone(),
            unique_link: input.unique_link.clone(),
            created_at: Utc::now().into(),
        }
    }

    fn service(db: MockDatabase) -> RecipeService {
        RecipeService::new(RecipeRepository::new(Arc::new(db.into_connection())))
    }

    #[tokio::test]
    async fn test_create_returns_input_fields() {
        let input = create_input();
        let stored = model_from(1, &input);

        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                // unique link lookup
                .append_query_results([Vec::<recipe::Model>::new()])
                // INSERT ... RETURNING
                .append_query_results([[stored.clone()]]),
        );

        let created = service.create(input.clone()).await.unwrap();

        assert_eq!(created.id, 1);
        assert_eq!(created.title, input.title);
        assert_eq!(created.ingredients, input.ingredients);
        assert_eq!(created.instructions, input.instructions);
        assert_eq!(created.prep_time, input.prep_time);
        assert_eq!(created.servings, input.servings);
        assert_eq!(created.personal_note, input.personal_note);
        assert_eq!(created.unique_link, input.unique_link);
    }

    #[tokio::test]
    async fn test_create_blank_title_is_validation_error() {
        let mut input = create_input();
        input.title = "   ".to_string();

        let service = service(MockDatabase::new(DatabaseBackend::Postgres));
        let result = service.create(input).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_duplicate_link_is_conflict() {
        let input = create_input();
        let existing = model_from(4, &input);

        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres).append_query_results([[existing]]),
        );
        let result = service.create(input).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<recipe::Model>::new()]),
        );

        let input = UpdateRecipeInput {
            title: Some("Novo".to_string()),
            ..Default::default()
        };
        let result = service.update(77, input).await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_blank_field_is_validation_error() {
        let service = service(MockDatabase::new(DatabaseBackend::Postgres));

        let input = UpdateRecipeInput {
            servings: Some(String::new()),
            ..Default::default()
        };
        let result = service.update(1, input).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_update_keeps_unspecified_fields() {
        let original = model_from(2, &create_input());
        let mut updated = original.clone();
        updated.title = "Brigadeiro gourmet".to_string();

        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[original.clone()]])
                // UPDATE ... RETURNING
                .append_query_results([[updated.clone()]]),
        );

        let input = UpdateRecipeInput {
            title: Some("Brigadeiro gourmet".to_string()),
            ..Default::default()
        };
        let result = service.update(2, input).await.unwrap();

        assert_eq!(result.title, "Brigadeiro gourmet");
        assert_eq!(result.ingredients, original.ingredients);
        assert_eq!(result.unique_link, original.unique_link);
        assert_eq!(result.created_at, original.created_at);
    }

    #[tokio::test]
    async fn test_update_link_owned_by_other_recipe_is_conflict() {
        let original = model_from(2, &create_input());
        let mut other = model_from(5, &create_input());
        other.unique_link = "quindim".to_string();

        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[original]])
                // unique link lookup finds recipe 5
                .append_query_results([[other]]),
        );

        let input = UpdateRecipeInput {
            unique_link: Some("quindim".to_string()),
            ..Default::default()
        };
        let result = service.update(2, input).await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_update_null_personal_note_clears_it() {
        let original = model_from(2, &create_input());
        assert!(original.personal_note.is_some());
        let mut cleared = original.clone();
        cleared.personal_note = None;

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[original.clone()]])
                .append_query_results([[cleared]])
                .into_connection(),
        );
        let service = RecipeService::new(RecipeRepository::new(Arc::clone(&db)));

        let input = UpdateRecipeInput {
            personal_note: Some(None),
            ..Default::default()
        };
        let result = service.update(2, input).await.unwrap();

        assert_eq!(result.personal_note, None);
        assert_eq!(result.title, original.title);

        drop(service);
        let log = Arc::try_unwrap(db).ok().unwrap().into_transaction_log();
        assert_eq!(log.len(), 2);

        // Only the note is written, and it is written as NULL.
        let update = format!("{:?}", log[1]);
        assert!(update.contains(r#"SET \"personal_note\" = $1 WHERE"#), "{update}");
        assert!(update.contains("String(None)"), "{update}");
    }

    #[tokio::test]
    async fn test_delete_returns_removed_recipe() {
        let original = model_from(3, &create_input());

        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[original.clone()]])
                .append_exec_results([MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }]),
        );

        let deleted = service.delete(3).await.unwrap();
        assert_eq!(deleted, original);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let service = service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<recipe::Model>::new()]),
        );

        assert!(matches!(service.delete(3).await, Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_non_blank() {
        assert!(non_blank("x").is_ok());
        assert!(non_blank("").is_err());
        assert!(non_blank(" \n\t").is_err());
    }
}
