use sea_orm::entity::prelude::*;
use serde::Serialize;

/// An episode may have zero or more hosts; most have exactly one.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "hosts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub epid: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub aid: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
