//! Recipe entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recipe")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    /// Free-text ingredient list
    #[sea_orm(column_type = "Text")]
    pub ingredients: String,

    /// Rich-text (HTML) preparation steps, stored verbatim
    #[sea_orm(column_type = "Text")]
    pub instructions: String,

    pub prep_time: String,

    pub servings: String,

    /// Rich-text (HTML) note, stored verbatim
    #[sea_orm(column_type = "Text", nullable)]
    pub personal_note: Option<String>,

    /// Shareable link slug
    #[sea_orm(unique)]
    pub unique_link: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::like::Entity")]
    Like,
}

impl Related<super::like::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Like.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
