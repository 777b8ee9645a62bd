//! Performer identity resolution.

use crate::crawler::PageError;
use crate::models::{Actor, ActorType};
use unicode_normalization::UnicodeNormalization;

/// The long-time announcer is credited constantly but has no page of his
/// own on the archive; he resolves to a fixed synthetic identity.
pub const ANNOUNCER: &str = "Don Pardo";

/// Canonicalizes a performer name into an aid: NFKD-decompose and keep the
/// ASCII, so accented credits collapse to one spelling.
#[must_use]
pub fn asciify(name: &str) -> String {
    name.nfkd()
        .filter(char::is_ascii)
        .collect::<String>()
        .trim()
        .to_string()
}

/// Builds an actor from a linked credit. The link's path prefix is
/// authoritative for the person's site-wide type; any other prefix means a
/// page-structure assumption broke.
pub fn actor_from_link(href: &str, name: &str) -> Result<Actor, PageError> {
    let actor_type = if href.starts_with("/Guests/") {
        ActorType::Guest
    } else if href.starts_with("/Cast/") {
        ActorType::Cast
    } else if href.starts_with("/Crew/") {
        ActorType::Crew
    } else {
        return Err(PageError::UnrecognizedActorLink(href.to_string()));
    };
    // Guests can carry a different numeric id per episode, so the id in the
    // URL is recorded as part of the page path but never used as a key.
    Ok(Actor {
        aid: asciify(name),
        url: Some(href.to_string()),
        actor_type,
    })
}

/// Fixed identity for the announcer special case.
#[must_use]
pub fn announcer() -> Actor {
    Actor {
        aid: ANNOUNCER.to_string(),
        url: None,
        actor_type: ActorType::Crew,
    }
}

/// Last-resort identity for a name that is neither linked nor present in
/// the episode's extra-cast lookup.
#[must_use]
pub fn unknown_actor(name: &str) -> Actor {
    Actor {
        aid: name.to_string(),
        url: None,
        actor_type: ActorType::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asciify_strips_diacritics() {
        assert_eq!(asciify("Fred Armisen"), "Fred Armisen");
        assert_eq!(asciify("Ana Gasteyér"), "Ana Gasteyer");
        assert_eq!(asciify("  Céline Dion "), "Celine Dion");
    }

    #[test]
    fn link_prefix_decides_the_type() {
        let cast = actor_from_link("/Cast/?TaKi", "Taran Killam").unwrap();
        assert_eq!(cast.actor_type, ActorType::Cast);
        assert_eq!(cast.aid, "Taran Killam");
        assert_eq!(cast.url.as_deref(), Some("/Cast/?TaKi"));

        let guest = actor_from_link("/Guests/?3230", "Alec Baldwin").unwrap();
        assert_eq!(guest.actor_type, ActorType::Guest);

        let crew = actor_from_link("/Crew/?JaDo", "Jim Downey").unwrap();
        assert_eq!(crew.actor_type, ActorType::Crew);
    }

    #[test]
    fn foreign_prefixes_are_fatal() {
        let err = actor_from_link("/Writers/?1", "Anyone").unwrap_err();
        assert!(matches!(err, PageError::UnrecognizedActorLink(_)));
    }

    #[test]
    fn the_announcer_is_crew() {
        let a = announcer();
        assert_eq!(a.aid, "Don Pardo");
        assert_eq!(a.actor_type, ActorType::Crew);
        assert_eq!(a.url, None);
    }
}
