//! Root operation table.
//!
//! Every root query and mutation field is listed here with its access policy.
//! Fields look themselves up through [`OperationGuard`], and
//! [`validate_operations`] checks at startup that the table and the built
//! schema agree.

use async_graphql::{
    Context, ErrorExtensions, Guard, ObjectType, Result, Schema, SubscriptionType,
};
use recipebox_common::{AppError, AppResult};
use tracing::{debug, info};

use crate::extractors::AuthCaller;

/// Root type an operation lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationKind {
    /// Field of `Query`.
    Query,
    /// Field of `Mutation`.
    Mutation,
}

/// Who may call an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Requires a configured API token.
    Authenticated,
    /// Open to anonymous callers.
    Public,
}

/// One row of the operation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Root field name as exposed in the schema.
    pub name: &'static str,
    /// Root type.
    pub kind: OperationKind,
    /// Access policy.
    pub access: Access,
}

impl Operation {
    const fn query(name: &'static str, access: Access) -> Self {
        Self {
            name,
            kind: OperationKind::Query,
            access,
        }
    }

    const fn mutation(name: &'static str, access: Access) -> Self {
        Self {
            name,
            kind: OperationKind::Mutation,
            access,
        }
    }
}

/// All root operations served by the API.
pub const OPERATIONS: &[Operation] = &[
    Operation::query("recipes", Access::Authenticated),
    Operation::query("recipe", Access::Authenticated),
    Operation::query("likes", Access::Authenticated),
    Operation::query("like", Access::Authenticated),
    Operation::mutation("createRecipe", Access::Authenticated),
    Operation::mutation("updateRecipe", Access::Authenticated),
    Operation::mutation("deleteRecipe", Access::Authenticated),
    Operation::mutation("createLike", Access::Authenticated),
    Operation::mutation("updateLike", Access::Authenticated),
    Operation::mutation("deleteLike", Access::Authenticated),
    Operation::mutation("toggleLike", Access::Public),
];

/// Look up an operation by root field name.
#[must_use]
pub fn find_operation(name: &str) -> Option<&'static Operation> {
    OPERATIONS.iter().find(|op| op.name == name)
}

/// Enforces the table's access policy for one root field.
#[derive(Debug, Clone, Copy)]
pub struct OperationGuard {
    name: &'static str,
}

impl OperationGuard {
    /// Guard for the root field `name`.
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self { name }
    }
}

impl Guard for OperationGuard {
    async fn check(&self, ctx: &Context<'_>) -> Result<()> {
        let field = ctx.field().name();
        if field != self.name {
            return Err(AppError::Internal(format!(
                "Guard for {} attached to field {field}",
                self.name
            ))
            .extend());
        }

        let Some(operation) = find_operation(self.name) else {
            return Err(
                AppError::Internal(format!("Unregistered operation: {}", self.name)).extend(),
            );
        };

        match operation.access {
            Access::Public => Ok(()),
            Access::Authenticated if ctx.data_opt::<AuthCaller>().is_some() => Ok(()),
            Access::Authenticated => {
                debug!(operation = operation.name, "Anonymous call to protected operation");
                Err(AppError::Unauthorized.extend())
            }
        }
    }
}

const ROOT_FIELDS_QUERY: &str =
    "{ __schema { queryType { fields { name } } mutationType { fields { name } } } }";

/// Check that the schema's root fields and [`OPERATIONS`] match exactly.
pub async fn validate_operations<Q, M, S>(schema: &Schema<Q, M, S>) -> AppResult<()>
where
    Q: ObjectType + 'static,
    M: ObjectType + 'static,
    S: SubscriptionType + 'static,
{
    let response = schema.execute(ROOT_FIELDS_QUERY).await;
    if let Some(err) = response.errors.first() {
        return Err(AppError::Config(format!("Schema introspection failed: {}", err.message)));
    }

    let data = response
        .data
        .into_json()
        .map_err(|e| AppError::Config(format!("Schema introspection failed: {e}")))?;

    let queries = root_field_names(&data["__schema"]["queryType"]);
    let mutations = root_field_names(&data["__schema"]["mutationType"]);

    check_operations(OPERATIONS, &queries, &mutations)?;
    info!(
        queries = queries.len(),
        mutations = mutations.len(),
        "Operation table matches schema"
    );
    Ok(())
}

fn root_field_names(root: &serde_json::Value) -> Vec<String> {
    root["fields"]
        .as_array()
        .map(|fields| {
            fields
                .iter()
                .filter_map(|f| f["name"].as_str())
                .filter(|name| !name.starts_with("__"))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn check_operations(table: &[Operation], queries: &[String], mutations: &[String]) -> AppResult<()> {
    let schema_fields = queries
        .iter()
        .map(|name| (name.as_str(), OperationKind::Query))
        .chain(mutations.iter().map(|name| (name.as_str(), OperationKind::Mutation)));

    let mut problems = Vec::new();

    for (name, kind) in schema_fields.clone() {
        match table.iter().find(|op| op.name == name) {
            None => problems.push(format!("{name} is not in the operation table")),
            Some(op) if op.kind != kind => {
                problems.push(format!("{name} is a {kind:?} but the table says {:?}", op.kind));
            }
            Some(_) => {}
        }
    }

    for op in table {
        if !schema_fields.clone().any(|(name, kind)| name == op.name && kind == op.kind) {
            problems.push(format!("{} is in the operation table but not in the schema", op.name));
        }
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(AppError::Config(format!(
            "Operation table mismatch: {}",
            problems.join("; ")
        )))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_table_names_are_unique() {
        let unique: HashSet<_> = OPERATIONS.iter().map(|op| op.name).collect();
        assert_eq!(unique.len(), OPERATIONS.len());
    }

    #[test]
    fn test_only_toggle_like_is_public() {
        let public: Vec<_> = OPERATIONS
            .iter()
            .filter(|op| op.access == Access::Public)
            .map(|op| op.name)
            .collect();
        assert_eq!(public, vec!["toggleLike"]);
    }

    #[test]
    fn test_find_operation() {
        assert_eq!(
            find_operation("toggleLike").map(|op| op.kind),
            Some(OperationKind::Mutation)
        );
        assert!(find_operation("dropTables").is_none());
    }

    #[test]
    fn test_check_operations_accepts_matching_fields() {
        let table = [
            Operation::query("recipes", Access::Authenticated),
            Operation::mutation("toggleLike", Access::Public),
        ];
        assert!(check_operations(&table, &names(&["recipes"]), &names(&["toggleLike"])).is_ok());
    }

    #[test]
    fn test_check_operations_rejects_unlisted_field() {
        let table = [Operation::query("recipes", Access::Authenticated)];
        let result = check_operations(&table, &names(&["recipes", "secrets"]), &[]);
        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("secrets")));
    }

    #[test]
    fn test_check_operations_rejects_missing_field() {
        let table = [
            Operation::query("recipes", Access::Authenticated),
            Operation::mutation("toggleLike", Access::Public),
        ];
        let result = check_operations(&table, &names(&["recipes"]), &[]);
        assert!(matches!(result, Err(AppError::Config(msg)) if msg.contains("toggleLike")));
    }

    #[test]
    fn test_check_operations_rejects_wrong_kind() {
        let table = [Operation::query("toggleLike", Access::Public)];
        let result = check_operations(&table, &[], &names(&["toggleLike"]));
        assert!(result.is_err());
    }
}
