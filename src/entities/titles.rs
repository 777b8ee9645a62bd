use sea_orm::entity::prelude::*;
use serde::Serialize;

/// One segment within an episode. `sid` and the share columns are filled by
/// enrichment; the rest comes off the page.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "titles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub tid: String,
    pub epid: String,
    pub category: String,
    pub name: Option<String>,
    pub skid: Option<String>,
    pub order: i32,
    pub sid: Option<i32>,
    pub episode_share: Option<f64>,
    pub n_performers: Option<i32>,
    pub cast_episode_share: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
