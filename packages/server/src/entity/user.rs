use common::{Gender, Role};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub user_id: String,

    /// Set for every participant; `None` for admins.
    #[sea_orm(indexed)]
    pub team_id: Option<String>,

    pub name: String,
    pub gender: Gender,
    #[sea_orm(unique)]
    pub email: String,
    #[sea_orm(unique)]
    pub contact: String,
    pub college: String,
    pub stream: String,
    pub year: i32,
    pub role: Role,

    #[sea_orm(has_one)]
    pub membership: HasOne<super::team_member::Entity>,

    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
