use common::SubmissionStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "submission")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: i32,
    #[sea_orm(belongs_to, from = "user_id", to = "id")]
    pub user: HasOne<super::user::Entity>,

    pub problem_id: i32,
    #[sea_orm(belongs_to, from = "problem_id", to = "id")]
    pub problem: HasOne<super::problem::Entity>,

    /// Raw submission text: source code, a design document, a SQL query.
    pub content: String,
    /// Language tag for code submissions; NULL for prose.
    pub language: Option<String>,

    /// `pending` at creation; written once by the evaluation task, or by an
    /// admin override. Last write wins.
    pub status: SubmissionStatus,
    /// 0-100, NULL until evaluated.
    pub score: Option<f64>,
    /// Structured test outcomes and summary, NULL until evaluated.
    #[sea_orm(column_type = "Json", nullable)]
    pub results: Option<Json>,

    pub created_at: DateTimeUtc,
    /// NULL until the record is first updated.
    pub updated_at: Option<DateTimeUtc>,
}

impl ActiveModelBehavior for ActiveModel {}
