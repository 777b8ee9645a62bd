use crate::entities::{actors, characters, impressions, prelude::*};
use crate::models::{Actor, ActorType, Character, Impression};
use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

pub struct ActorRepository {
    conn: DatabaseConnection,
}

impl ActorRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Inserts a performer, or merges into the existing row. The in-crawl
    /// dedupe cache keeps a single crawl from reaching this path; across
    /// crawls, the stronger type wins and a missing url gets filled.
    pub async fn upsert(&self, actor: &Actor) -> Result<()> {
        let existing = Actors::find_by_id(actor.aid.clone())
            .one(&self.conn)
            .await?;
        let Some(existing) = existing else {
            let model = actors::ActiveModel {
                aid: Set(actor.aid.clone()),
                url: Set(actor.url.clone()),
                actor_type: Set(actor.actor_type.as_str().to_string()),
                ..Default::default()
            };
            model.insert(&self.conn).await?;
            return Ok(());
        };

        let known = ActorType::from_str_lossy(&existing.actor_type);
        let mut model: actors::ActiveModel = existing.clone().into();
        let mut dirty = false;
        if actor.actor_type.precedence() > known.precedence() {
            model.actor_type = Set(actor.actor_type.as_str().to_string());
            dirty = true;
        }
        if existing.url.is_none() && actor.url.is_some() {
            model.url = Set(actor.url.clone());
            dirty = true;
        }
        if dirty {
            model.update(&self.conn).await?;
        }
        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<actors::Model>> {
        Ok(Actors::find()
            .order_by_asc(actors::Column::Aid)
            .all(&self.conn)
            .await?)
    }

    pub async fn set_gender(&self, aid: &str, gender: &str) -> Result<()> {
        let model = actors::ActiveModel {
            aid: Set(aid.to_string()),
            gender: Set(Some(gender.to_string())),
            ..Default::default()
        };
        model.update(&self.conn).await?;
        Ok(())
    }

    pub async fn insert_character(&self, character: &Character) -> Result<()> {
        let model = characters::ActiveModel {
            charid: Set(character.charid),
            name: Set(character.name.clone()),
            aid: Set(character.aid.clone()),
        };
        Characters::insert(model)
            .on_conflict(
                OnConflict::column(characters::Column::Charid)
                    .update_columns([characters::Column::Name, characters::Column::Aid])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn insert_impression(&self, impression: &Impression) -> Result<()> {
        let model = impressions::ActiveModel {
            impid: Set(impression.impid),
            name: Set(impression.name.clone()),
            aid: Set(impression.aid.clone()),
        };
        Impressions::insert(model)
            .on_conflict(
                OnConflict::column(impressions::Column::Impid)
                    .update_columns([impressions::Column::Name, impressions::Column::Aid])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn list_characters(&self) -> Result<Vec<characters::Model>> {
        Ok(Characters::find().all(&self.conn).await?)
    }

    pub async fn list_impressions(&self) -> Result<Vec<impressions::Model>> {
        Ok(Impressions::find().all(&self.conn).await?)
    }

    pub async fn clear_credits(&self) -> Result<()> {
        Characters::delete_many().exec(&self.conn).await?;
        Impressions::delete_many().exec(&self.conn).await?;
        Ok(())
    }
}
