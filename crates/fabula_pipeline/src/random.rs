//! Random story concepts built from fixed vocabularies.

use derive_getters::Getters;
use fabula_core::{Genre, StoryLength};
use rand::Rng;
use rand::seq::SliceRandom;

/// Story themes.
pub const THEMES: [&str; 25] = [
    "time travel",
    "parallel universe",
    "alien invasion",
    "zombie apocalypse",
    "magical prophecy",
    "ancient curse",
    "robot rebellion",
    "underwater civilization",
    "space exploration",
    "haunted mansion",
    "supernatural powers",
    "corporate conspiracy",
    "virtual reality",
    "genetic experiment",
    "treasure hunt",
    "survival island",
    "memory loss",
    "hidden identity",
    "revenge quest",
    "forbidden love",
    "dystopian society",
    "mythical creatures",
    "dimension portal",
    "mind control",
    "ancient artifact",
];

/// Where the story takes place.
pub const SETTINGS: [&str; 25] = [
    "futuristic city",
    "medieval kingdom",
    "post-apocalyptic wasteland",
    "mysterious forest",
    "abandoned space station",
    "underwater base",
    "floating islands",
    "desert oasis",
    "frozen tundra",
    "volcanic region",
    "steampunk metropolis",
    "cyber punk city",
    "ancient temple",
    "secret laboratory",
    "parallel dimension",
    "enchanted realm",
    "war-torn country",
    "luxury cruise ship",
    "remote village",
    "haunted castle",
    "military base",
    "research facility",
    "colony on Mars",
    "hidden underground city",
    "tropical paradise",
];

/// Who the story follows.
pub const PROTAGONISTS: [&str; 25] = [
    "reluctant hero",
    "skilled warrior",
    "brilliant scientist",
    "mysterious stranger",
    "young orphan",
    "experienced detective",
    "rebel leader",
    "talented musician",
    "gifted student",
    "retired soldier",
    "ambitious entrepreneur",
    "rogue agent",
    "cursed wanderer",
    "chosen one",
    "time traveler",
    "shapeshifter",
    "telepathic individual",
    "master thief",
    "exiled prince",
    "android with emotions",
    "bounty hunter",
    "struggling artist",
    "genius hacker",
    "supernatural being",
    "dimension walker",
];

/// What drives the protagonist.
pub const CONFLICTS: [&str; 25] = [
    "must save the world from destruction",
    "seeks revenge for a great betrayal",
    "tries to prevent a catastrophic event",
    "discovers a dangerous conspiracy",
    "fights to protect loved ones",
    "searches for a legendary artifact",
    "battles inner demons while facing external threats",
    "uncovers dark family secrets",
    "leads a rebellion against tyranny",
    "races against time to find a cure",
    "struggles with newfound powers",
    "navigates complex political intrigue",
    "fights to survive in hostile environment",
    "solves a series of mysterious crimes",
    "breaks free from mind control",
    "protects an ancient secret",
    "escapes from a deadly trap",
    "restores balance to the universe",
    "reunites with lost family",
    "defeats an ancient evil",
    "prevents war between factions",
    "discovers their true identity",
    "masters forbidden knowledge",
    "breaks an eternal curse",
    "saves their world from invasion",
];

const LENGTHS: [StoryLength; 3] = [StoryLength::Short, StoryLength::Medium, StoryLength::Elaborate];

/// A synthesized prompt with its length and genre selection.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct RandomConcept {
    prompt: String,
    length: StoryLength,
    genres: Vec<String>,
}

impl RandomConcept {
    /// Draw a concept: one entry from each vocabulary, a length, and one to
    /// three distinct genres from `catalog` (none if the catalog is empty).
    ///
    /// # Examples
    ///
    /// ```
    /// use fabula_core::Genre;
    /// use fabula_pipeline::RandomConcept;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let catalog = vec![Genre::new(1, "Fantasy"), Genre::new(2, "Horror")];
    /// let mut rng = StdRng::seed_from_u64(7);
    /// let concept = RandomConcept::draw(&mut rng, &catalog);
    ///
    /// assert!(concept.prompt().starts_with("An epic "));
    /// assert!((1..=2).contains(&concept.genres().len()));
    /// ```
    pub fn draw<R: Rng>(rng: &mut R, catalog: &[Genre]) -> Self {
        let theme = pick(rng, &THEMES);
        let setting = pick(rng, &SETTINGS);
        let protagonist = pick(rng, &PROTAGONISTS);
        let conflict = pick(rng, &CONFLICTS);
        let length = LENGTHS.choose(rng).copied().unwrap_or_default();

        let wanted = rng.gen_range(1..=3);
        let genres = catalog
            .choose_multiple(rng, wanted)
            .map(|g| g.name().clone())
            .collect();

        Self {
            prompt: format!(
                "An epic {} story set in a {}. The protagonist is a {} who {}. Make it unique, creative, and unlike any existing story.",
                theme, setting, protagonist, conflict
            ),
            length,
            genres,
        }
    }
}

fn pick<R: Rng>(rng: &mut R, words: &[&'static str]) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_vocabularies_have_no_duplicates() {
        for words in [&THEMES, &SETTINGS, &PROTAGONISTS, &CONFLICTS] {
            let mut sorted = words.to_vec();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), 25);
        }
    }

    #[test]
    fn test_same_seed_same_concept() {
        let catalog: Vec<Genre> = ["Action", "Drama", "Fantasy", "Horror"]
            .iter()
            .enumerate()
            .map(|(i, name)| Genre::new(i as u32 + 1, *name))
            .collect();

        let a = RandomConcept::draw(&mut StdRng::seed_from_u64(42), &catalog);
        let b = RandomConcept::draw(&mut StdRng::seed_from_u64(42), &catalog);
        assert_eq!(a, b);
    }

    #[test]
    fn test_genres_are_distinct_and_bounded() {
        let catalog: Vec<Genre> = (1..=16).map(|i| Genre::new(i, format!("Genre {}", i))).collect();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..100 {
            let concept = RandomConcept::draw(&mut rng, &catalog);
            let mut names = concept.genres().clone();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), concept.genres().len());
            assert!((1..=3).contains(&names.len()));
            assert!(THEMES.iter().any(|t| concept.prompt().contains(t)));
        }
    }

    #[test]
    fn test_empty_catalog_yields_no_genres() {
        let concept = RandomConcept::draw(&mut StdRng::seed_from_u64(3), &[]);
        assert!(concept.genres().is_empty());
    }
}
