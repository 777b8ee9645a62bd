pub mod item;
pub mod schema;

pub use item::{
    Actor, ActorType, Appearance, Capacity, CastMembership, Character, Episode, EpisodeRating,
    Host, Impression, Item, Season, Sketch, Title,
};
