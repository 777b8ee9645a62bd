use sea_orm::entity::prelude::*;
use serde::Serialize;

/// One (performer, season) membership. The eligibility columns are filled
/// by enrichment.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "casts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub aid: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub sid: i32,
    pub featured: bool,
    pub update_anchor: bool,
    /// Present only when the membership did not span the whole season.
    pub first_epid: Option<String>,
    pub last_epid: Option<String>,
    pub n_episodes: Option<i32>,
    pub season_fraction: Option<f64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
