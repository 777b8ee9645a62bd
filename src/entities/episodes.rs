use sea_orm::entity::prelude::*;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "episodes")]
pub struct Model {
    /// 8-digit air-date id, as in the archive's URLs.
    #[sea_orm(primary_key, auto_increment = false)]
    pub epid: String,
    /// Zero-based ordinal within the season.
    pub epno: i32,
    pub sid: i32,
    pub aired: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
