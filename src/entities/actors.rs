use sea_orm::entity::prelude::*;
use serde::Serialize;

/// One performer, keyed by canonical full name. `gender` is filled by
/// enrichment.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "actors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub aid: String,
    pub url: Option<String>,
    #[sea_orm(column_name = "type")]
    #[serde(rename = "type")]
    pub actor_type: String,
    pub gender: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
