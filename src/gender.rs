//! First-name gender inference with layered manual overrides.
//!
//! Resolution order: full-name override sets (built-in plus any configured
//! name-list files), then first-name override sets for names the base
//! classifier cannot place, then the embedded statistical classifier.
//! Always returns a label; overrides exist to patch known misclassifications
//! without touching the classifier itself.

use anyhow::{Context, Result};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::OnceLock;

/// Frequency table of first names, one `name<TAB>label` pair per line.
const NAME_DATA: &str = include_str!("../data/first_names.tsv");

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    MostlyMale,
    MostlyFemale,
    /// Androgynous: the classifier knows the name and cannot call it.
    Andy,
    Unknown,
}

impl Gender {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::MostlyMale => "mostly_male",
            Self::MostlyFemale => "mostly_female",
            Self::Andy => "andy",
            Self::Unknown => "unknown",
        }
    }

    fn from_label(label: &str) -> Self {
        match label {
            "male" => Self::Male,
            "female" => Self::Female,
            "mostly_male" => Self::MostlyMale,
            "mostly_female" => Self::MostlyFemale,
            "andy" => Self::Andy,
            _ => Self::Unknown,
        }
    }
}

/// First names the base classifier does not recognize.
const EXTRA_MALE_FIRST: &[&str] = &[
    "Beck", "Mikey", "Chevy", "Norm", "Nile", "Lin-Manuel", "Macaulay", "Kiefer", "Spike",
    "Kanye", "Rainn", "Shia", "Sting", "Hulk", "Liberace", "Yogi", "Merv", "Mr.", "O.J.",
];

const EXTRA_FEMALE_FIRST: &[&str] = &[
    "Aidy",
    "Sasheer",
    "Janeane",
    "Danitra",
    "Lorde",
    "Taraji",
    "Uzo",
    "Brie",
    "Rihanna",
    "January",
    "Anjelica",
    "Oprah",
    "Ann-Margret",
];

/// Full names the first-name classifier gets wrong, or leaves androgynous
/// or unknown.
const FEMALE_FULLNAMES: &[&str] = &[
    "Blake Lively",
    "Terry Turner",
    "Dakota Johnson",
    "Cameron Diaz",
    "Taylor Swift",
    "Robin Wright",
    "Sydney Biddle Barrows",
    "Whitney Houston",
    "Morgan Fairchild",
    "Reese Witherspoon",
    "Casey Wilson",
    "Nasim Pedrad",
    "Noel Wells",
    "Jan Hooks",
    "Robin Duke",
];

const MALE_FULLNAMES: &[&str] = &[
    "Kyle Gass",
    "The Rock",
    "Jamie Foxx",
    "Kelsey Grammer",
    "Leslie Nielsen",
    "Kyle MacLachlan",
    "Desi Arnaz Jr.",
    "Desi Arnaz",
    "Kyle Mooney",
    "The Weeknd",
    "Bernie Sanders",
    "Sacha Baron Cohen",
    "A. Whitney Brown",
    "Finesse Mitchell",
    "Dana Carvey",
    "Tracy Morgan",
    "Fran Tarkenton",
    "Ashton Kutcher",
    "Jackie Chan",
];

fn classifier() -> &'static HashMap<String, Gender> {
    static TABLE: OnceLock<HashMap<String, Gender>> = OnceLock::new();
    TABLE.get_or_init(|| {
        NAME_DATA
            .lines()
            .filter_map(|line| {
                let (name, label) = line.split_once('\t')?;
                Some((name.trim().to_lowercase(), Gender::from_label(label.trim())))
            })
            .collect()
    })
}

/// One name per line; used to extend the full-name override sets from
/// configured files.
pub fn names_from_file(path: &Path) -> Result<HashSet<String>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read name list: {}", path.display()))?;
    Ok(content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(ToString::to_string)
        .collect())
}

pub struct GenderResolver {
    male_fullnames: HashSet<String>,
    female_fullnames: HashSet<String>,
    /// Collapse `mostly_male`/`mostly_female` to the plain label.
    confident: bool,
}

impl Default for GenderResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl GenderResolver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            male_fullnames: MALE_FULLNAMES.iter().map(ToString::to_string).collect(),
            female_fullnames: FEMALE_FULLNAMES.iter().map(ToString::to_string).collect(),
            confident: true,
        }
    }

    #[must_use]
    pub fn with_extra_names(
        mut self,
        male: HashSet<String>,
        female: HashSet<String>,
    ) -> Self {
        self.male_fullnames.extend(male);
        self.female_fullnames.extend(female);
        self
    }

    #[must_use]
    pub const fn with_confidence_collapsing(mut self, confident: bool) -> Self {
        self.confident = confident;
        self
    }

    /// Total over all inputs: unknown names come back `unknown`, never an
    /// error.
    #[must_use]
    pub fn genderize(&self, name: &str) -> Gender {
        if self.female_fullnames.contains(name) {
            return Gender::Female;
        }
        if self.male_fullnames.contains(name) {
            return Gender::Male;
        }

        let Some(first) = name.split_whitespace().next() else {
            return Gender::Unknown;
        };
        if EXTRA_MALE_FIRST.contains(&first) {
            return Gender::Male;
        }
        if EXTRA_FEMALE_FIRST.contains(&first) {
            return Gender::Female;
        }

        let guess = classifier()
            .get(&first.to_lowercase())
            .copied()
            .unwrap_or(Gender::Unknown);
        if self.confident {
            match guess {
                Gender::MostlyMale => return Gender::Male,
                Gender::MostlyFemale => return Gender::Female,
                _ => {}
            }
        }
        guess
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_first_names_classify() {
        let resolver = GenderResolver::new();
        assert_eq!(resolver.genderize("John Belushi"), Gender::Male);
        assert_eq!(resolver.genderize("Gilda Radner"), Gender::Female);
    }

    #[test]
    fn fullname_overrides_beat_the_classifier() {
        let resolver = GenderResolver::new();
        // "Dana" alone is androgynous; the full-name set settles it.
        assert_eq!(resolver.genderize("Dana Carvey"), Gender::Male);
        assert_eq!(resolver.genderize("Jan Hooks"), Gender::Female);
    }

    #[test]
    fn first_name_overrides_cover_classifier_gaps() {
        let resolver = GenderResolver::new();
        assert_eq!(resolver.genderize("Chevy Chase"), Gender::Male);
        assert_eq!(resolver.genderize("Aidy Bryant"), Gender::Female);
    }

    #[test]
    fn confidence_collapsing_is_optional() {
        let confident = GenderResolver::new();
        assert_eq!(confident.genderize("Leslie Jones"), Gender::Female);

        let cautious = GenderResolver::new().with_confidence_collapsing(false);
        assert_eq!(cautious.genderize("Leslie Jones"), Gender::MostlyFemale);
    }

    #[test]
    fn unknown_and_androgynous_pass_through() {
        let resolver = GenderResolver::new();
        assert_eq!(resolver.genderize("Dana Smith"), Gender::Andy);
        assert_eq!(resolver.genderize("Zxqwv Nobody"), Gender::Unknown);
        assert_eq!(resolver.genderize(""), Gender::Unknown);
    }

    #[test]
    fn loaded_name_lists_extend_the_overrides() {
        let resolver = GenderResolver::new().with_extra_names(
            HashSet::from(["Dana Andrews".to_string()]),
            HashSet::new(),
        );
        assert_eq!(resolver.genderize("Dana Andrews"), Gender::Male);
    }
}
