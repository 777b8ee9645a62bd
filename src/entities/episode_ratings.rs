use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Vote histogram and demographic breakdown for one episode, from the
/// ratings site. The maps are stored as JSON text.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "episode_ratings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub sid: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub epno: i32,
    pub score_counts: String,
    pub demographic_averages: String,
    pub demographic_counts: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
