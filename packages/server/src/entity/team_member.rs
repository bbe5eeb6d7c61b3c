use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Links a participant to the single team they belong to.
///
/// `user_id` is the primary key, so a user can never appear on two rosters.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_member")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,
    #[sea_orm(indexed)]
    pub team_id: String,
    #[sea_orm(belongs_to, from = "team_id", to = "team_id")]
    pub team: Option<super::team::Entity>,
    #[sea_orm(belongs_to, from = "user_id", to = "user_id")]
    pub user: Option<super::user::Entity>,

    /// 0-based order in which the member was submitted.
    #[sea_orm(default_value = 0)]
    pub position: i32,
}

impl ActiveModelBehavior for ActiveModel {}
