use crate::entities::{appearances, prelude::*};
use crate::models::Appearance;
use anyhow::Result;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

pub struct AppearanceRepository {
    conn: DatabaseConnection,
}

impl AppearanceRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Appearances have no natural single-field key (dual roles repeat
    /// (aid, tid)), so rows are append-only under a surrogate id and the
    /// crawl reset clears the table first.
    pub async fn insert(&self, appearance: &Appearance) -> Result<()> {
        let model = appearances::ActiveModel {
            aid: Set(appearance.aid.clone()),
            tid: Set(appearance.tid.clone()),
            capacity: Set(appearance.capacity.as_str().to_string()),
            role: Set(appearance.role.clone()),
            impid: Set(appearance.impid),
            charid: Set(appearance.charid),
            voice: Set(appearance.voice.unwrap_or(false)),
            ..Default::default()
        };
        model.insert(&self.conn).await?;
        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<appearances::Model>> {
        Ok(Appearances::find()
            .order_by_asc(appearances::Column::Id)
            .all(&self.conn)
            .await?)
    }

    pub async fn set_join_columns(&self, id: i32, epid: &str, sid: i32) -> Result<()> {
        let model = appearances::ActiveModel {
            id: Set(id),
            epid: Set(Some(epid.to_string())),
            sid: Set(Some(sid)),
            ..Default::default()
        };
        model.update(&self.conn).await?;
        Ok(())
    }

    pub async fn clear(&self) -> Result<()> {
        Appearances::delete_many().exec(&self.conn).await?;
        Ok(())
    }
}
