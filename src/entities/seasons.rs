use sea_orm::entity::prelude::*;
use serde::Serialize;

/// One show-season. The boundary columns are filled by enrichment.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "seasons")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub sid: i32,
    pub year: i32,
    pub first_epid: Option<String>,
    pub last_epid: Option<String>,
    pub n_episodes: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
