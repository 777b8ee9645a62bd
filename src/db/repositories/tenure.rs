use crate::entities::{prelude::*, tenures};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};

pub struct TenureRepository {
    conn: DatabaseConnection,
}

impl TenureRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// The tenure table is fully derived; every enrichment run rebuilds it
    /// from scratch.
    pub async fn replace_all(&self, rows: Vec<tenures::Model>) -> Result<()> {
        Tenures::delete_many().exec(&self.conn).await?;
        if rows.is_empty() {
            return Ok(());
        }
        let models: Vec<tenures::ActiveModel> = rows
            .into_iter()
            .map(|r| tenures::ActiveModel {
                aid: Set(r.aid),
                n_episodes: Set(r.n_episodes),
                eps_present: Set(r.eps_present),
                n_seasons: Set(r.n_seasons),
            })
            .collect();
        Tenures::insert_many(models).exec(&self.conn).await?;
        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<tenures::Model>> {
        Ok(Tenures::find()
            .order_by_asc(tenures::Column::Aid)
            .all(&self.conn)
            .await?)
    }
}
