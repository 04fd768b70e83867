use sea_orm::entity::prelude::*;
use sea_orm::prelude::StringLen;
use serde::{Deserialize, Serialize};

/// Kind of engineering skill a problem exercises.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum ProblemType {
    /// Data structures and algorithms.
    #[sea_orm(string_value = "dsa")]
    Dsa,
    /// Low-level design.
    #[sea_orm(string_value = "lld")]
    Lld,
    /// High-level design.
    #[sea_orm(string_value = "hld")]
    Hld,
    #[sea_orm(string_value = "sql")]
    Sql,
    #[sea_orm(string_value = "devops")]
    Devops,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[sea_orm(string_value = "easy")]
    Easy,
    #[sea_orm(string_value = "medium")]
    Medium,
    #[sea_orm(string_value = "hard")]
    Hard,
    #[sea_orm(string_value = "expert")]
    Expert,
}

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "problem")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,
    pub description: String, // in Markdown
    pub problem_type: ProblemType,
    pub difficulty: Difficulty,

    /// Free-form JSON: example inputs/outputs, constraints, code templates.
    #[sea_orm(column_type = "Json", nullable)]
    pub metadata: Option<Json>,

    #[sea_orm(has_many)]
    pub submissions: HasMany<super::submission::Entity>,

    pub created_at: DateTimeUtc,
    /// NULL until the record is first updated.
    pub updated_at: Option<DateTimeUtc>,
}

impl ActiveModelBehavior for ActiveModel {}
