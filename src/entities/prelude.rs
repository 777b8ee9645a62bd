pub use super::actors::Entity as Actors;
pub use super::appearances::Entity as Appearances;
pub use super::casts::Entity as Casts;
pub use super::characters::Entity as Characters;
pub use super::episode_ratings::Entity as EpisodeRatings;
pub use super::episodes::Entity as Episodes;
pub use super::hosts::Entity as Hosts;
pub use super::impressions::Entity as Impressions;
pub use super::seasons::Entity as Seasons;
pub use super::sketches::Entity as Sketches;
pub use super::tenures::Entity as Tenures;
pub use super::titles::Entity as Titles;
