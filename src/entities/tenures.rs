use sea_orm::entity::prelude::*;
use serde::Serialize;

/// Fully derived per-performer career statistics; rebuilt on every
/// enrichment run.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "tenures")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub aid: String,
    /// Episodes the performer was eligible for, summed over memberships.
    pub n_episodes: i32,
    /// Distinct episodes actually appeared in, per membership window.
    pub eps_present: i32,
    pub n_seasons: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
