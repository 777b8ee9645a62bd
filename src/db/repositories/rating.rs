use crate::entities::{episode_ratings, prelude::*};
use crate::models::EpisodeRating;
use anyhow::Result;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};

pub struct RatingRepository {
    conn: DatabaseConnection,
}

impl RatingRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn insert(&self, rating: &EpisodeRating) -> Result<()> {
        let model = episode_ratings::ActiveModel {
            sid: Set(rating.sid),
            epno: Set(rating.epno),
            score_counts: Set(serde_json::to_string(&rating.score_counts)?),
            demographic_averages: Set(serde_json::to_string(&rating.demographic_averages)?),
            demographic_counts: Set(serde_json::to_string(&rating.demographic_counts)?),
        };
        EpisodeRatings::insert(model)
            .on_conflict(
                OnConflict::columns([
                    episode_ratings::Column::Sid,
                    episode_ratings::Column::Epno,
                ])
                .update_columns([
                    episode_ratings::Column::ScoreCounts,
                    episode_ratings::Column::DemographicAverages,
                    episode_ratings::Column::DemographicCounts,
                ])
                .to_owned(),
            )
            .exec(&self.conn)
            .await?;
        Ok(())
    }

    pub async fn list_all(&self) -> Result<Vec<episode_ratings::Model>> {
        Ok(EpisodeRatings::find()
            .order_by_asc(episode_ratings::Column::Sid)
            .order_by_asc(episode_ratings::Column::Epno)
            .all(&self.conn)
            .await?)
    }

    pub async fn clear(&self) -> Result<()> {
        EpisodeRatings::delete_many().exec(&self.conn).await?;
        Ok(())
    }
}
