use crate::entities::{episodes, hosts, prelude::*};
use crate::models::{Episode, Host};
use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, QueryOrder, Set};

pub struct EpisodeRepository {
    conn: DatabaseConnection,
}

impl EpisodeRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, episode: &Episode) -> Result<()> {
        let model = episodes::ActiveModel {
            epid: Set(episode.epid.clone()),
            epno: Set(episode.epno),
            sid: Set(episode.sid),
            aired: Set(episode.aired.clone()),
        };
        Episodes::insert(model)
            .on_conflict(
                OnConflict::column(episodes::Column::Epid)
                    .update_columns([
                        episodes::Column::Epno,
                        episodes::Column::Sid,
                        episodes::Column::Aired,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn insert_host(&self, host: &Host) -> Result<()> {
        let model = hosts::ActiveModel {
            epid: Set(host.epid.clone()),
            aid: Set(host.aid.clone()),
        };
        let insert = Hosts::insert(model)
            .on_conflict(
                OnConflict::columns([hosts::Column::Epid, hosts::Column::Aid])
                    .do_nothing()
                    .to_owned(),
            )
            .exec(&self.conn)
            .await;
        match insert {
            Ok(_) | Err(DbErr::RecordNotInserted) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Episode ids are zero-padded dates, so ordering by epid is
    /// chronological.
    pub async fn list_all(&self) -> Result<Vec<episodes::Model>> {
        Ok(Episodes::find()
            .order_by_asc(episodes::Column::Epid)
            .all(&self.conn)
            .await?)
    }

    pub async fn list_hosts(&self) -> Result<Vec<hosts::Model>> {
        Ok(Hosts::find().all(&self.conn).await?)
    }

    pub async fn clear(&self) -> Result<()> {
        Hosts::delete_many().exec(&self.conn).await?;
        Episodes::delete_many().exec(&self.conn).await?;
        Ok(())
    }
}
