use sea_orm::entity::prelude::*;
use serde::Serialize;

/// A celebrity impersonation credited to one performer.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "impressions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub impid: i32,
    pub name: String,
    pub aid: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
