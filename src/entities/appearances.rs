use sea_orm::entity::prelude::*;
use serde::Serialize;

/// One performer's credit in one segment. (aid, tid) is almost unique, but
/// a legitimate dual role can repeat it, so rows carry a surrogate id.
/// `epid` and `sid` are join columns filled by enrichment.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "appearances")]
pub struct Model {
    #[sea_orm(primary_key)]
    #[serde(skip)]
    pub id: i32,
    pub aid: String,
    pub tid: String,
    pub capacity: String,
    pub role: Option<String>,
    pub impid: Option<i32>,
    pub charid: Option<i32>,
    pub voice: bool,
    pub epid: Option<String>,
    pub sid: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
