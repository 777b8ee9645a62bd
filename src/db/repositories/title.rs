use crate::entities::{prelude::*, sketches, titles};
use crate::models::{Sketch, Title};
use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

pub struct TitleRepository {
    conn: DatabaseConnection,
}

impl TitleRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, title: &Title) -> Result<()> {
        let model = titles::ActiveModel {
            tid: Set(title.tid.clone()),
            epid: Set(title.epid.clone()),
            category: Set(title.category.clone()),
            name: Set(title.name.clone()),
            skid: Set(title.skid.clone()),
            order: Set(title.order),
            ..Default::default()
        };
        Titles::insert(model)
            .on_conflict(
                OnConflict::column(titles::Column::Tid)
                    .update_columns([
                        titles::Column::Epid,
                        titles::Column::Category,
                        titles::Column::Name,
                        titles::Column::Skid,
                        titles::Column::Order,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn insert_sketch(&self, sketch: &Sketch) -> Result<()> {
        let model = sketches::ActiveModel {
            skid: Set(sketch.skid.clone()),
            name: Set(sketch.name.clone()),
        };
        Sketches::insert(model)
            .on_conflict(
                OnConflict::column(sketches::Column::Skid)
                    .update_column(sketches::Column::Name)
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<titles::Model>> {
        Ok(Titles::find()
            .order_by_asc(titles::Column::Tid)
            .all(&self.conn)
            .await?)
    }

    pub async fn list_sketches(&self) -> Result<Vec<sketches::Model>> {
        Ok(Sketches::find().all(&self.conn).await?)
    }

    pub async fn set_sid(&self, tid: &str, sid: i32) -> Result<()> {
        let model = titles::ActiveModel {
            tid: Set(tid.to_string()),
            sid: Set(Some(sid)),
            ..Default::default()
        };
        model.update(&self.conn).await?;
        Ok(())
    }

    pub async fn set_airtime(
        &self,
        tid: &str,
        episode_share: f64,
        n_performers: i32,
        cast_episode_share: f64,
    ) -> Result<()> {
        let model = titles::ActiveModel {
            tid: Set(tid.to_string()),
            episode_share: Set(Some(episode_share)),
            n_performers: Set(Some(n_performers)),
            cast_episode_share: Set(Some(cast_episode_share)),
            ..Default::default()
        };
        model.update(&self.conn).await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        Sketches::delete_many().exec(&self.conn).await?;
        Titles::delete_many().exec(&self.conn).await?;
        Ok(())
    }
}
