use common::Theme;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub team_id: String,

    pub team_name: String,
    pub num_teammates: i32,
    pub num_males: i32,
    pub num_females: i32,
    pub theme: Theme,

    /// Ordered roster; see `team_member::Model::position`.
    #[sea_orm(has_many)]
    pub members: HasMany<super::team_member::Entity>,

    /// Link to the abstract PDF, attached after registration.
    pub abstract_submission: Option<String>,
    /// Link to the project archive, attached after registration.
    pub project_submission: Option<String>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
