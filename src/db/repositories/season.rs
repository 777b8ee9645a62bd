use crate::entities::{prelude::*, seasons};
use crate::models::Season;
use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

pub struct SeasonRepository {
    conn: DatabaseConnection,
}

impl SeasonRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, season: &Season) -> Result<()> {
        let model = seasons::ActiveModel {
            sid: Set(season.sid),
            year: Set(season.year),
            ..Default::default()
        };
        Seasons::insert(model)
            .on_conflict(
                OnConflict::column(seasons::Column::Sid)
                    .update_column(seasons::Column::Year)
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<seasons::Model>> {
        Ok(Seasons::find()
            .order_by_asc(seasons::Column::Sid)
            .all(&self.conn)
            .await?)
    }

    pub async fn set_boundaries(
        &self,
        sid: i32,
        first_epid: &str,
        last_epid: &str,
        n_episodes: i32,
    ) -> Result<()> {
        let model = seasons::ActiveModel {
            sid: Set(sid),
            first_epid: Set(Some(first_epid.to_string())),
            last_epid: Set(Some(last_epid.to_string())),
            n_episodes: Set(Some(n_episodes)),
            ..Default::default()
        };
        model.update(&self.conn).await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        Seasons::delete_many().exec(&self.conn).await?;
        Ok(())
    }
}
