use crate::entities::{casts, prelude::*};
use crate::models::CastMembership;
use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

pub struct CastRepository {
    conn: DatabaseConnection,
}

impl CastRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, membership: &CastMembership) -> Result<()> {
        let model = casts::ActiveModel {
            aid: Set(membership.aid.clone()),
            sid: Set(membership.sid),
            featured: Set(membership.featured.unwrap_or(false)),
            update_anchor: Set(membership.update_anchor.unwrap_or(false)),
            first_epid: Set(membership.first_epid.clone()),
            last_epid: Set(membership.last_epid.clone()),
            ..Default::default()
        };
        Casts::insert(model)
            .on_conflict(
                OnConflict::columns([casts::Column::Aid, casts::Column::Sid])
                    .update_columns([
                        casts::Column::Featured,
                        casts::Column::UpdateAnchor,
                        casts::Column::FirstEpid,
                        casts::Column::LastEpid,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<casts::Model>> {
        Ok(Casts::find()
            .order_by_asc(casts::Column::Aid)
            .order_by_asc(casts::Column::Sid)
            .all(&self.conn)
            .await?)
    }

    pub async fn set_eligibility(
        &self,
        aid: &str,
        sid: i32,
        n_episodes: i32,
        season_fraction: f64,
    ) -> Result<()> {
        let model = casts::ActiveModel {
            aid: Set(aid.to_string()),
            sid: Set(sid),
            n_episodes: Set(Some(n_episodes)),
            season_fraction: Set(Some(season_fraction)),
            ..Default::default()
        };
        model.update(&self.conn).await?;
        Ok(())
    }

    /// Manual metadata corrections adjust membership windows in place.
    pub async fn set_last_epid(&self, aid: &str, sid: i32, last_epid: &str) -> Result<()> {
        if Casts::find_by_id((aid.to_string(), sid))
            .one(&self.conn)
            .await?
            .is_none()
        {
            return Ok(());
        }
        let model = casts::ActiveModel {
            aid: Set(aid.to_string()),
            sid: Set(sid),
            last_epid: Set(Some(last_epid.to_string())),
            ..Default::default()
        };
        model.update(&self.conn).await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        Casts::delete_many().exec(&self.conn).await?;
        Ok(())
    }
}
