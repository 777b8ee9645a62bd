use sea_orm::entity::prelude::*;
use serde::Serialize;

/// A recurring segment format with its own archive page.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "sketches")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub skid: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
