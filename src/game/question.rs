//! Question generation for every online game type.
//!
//! A `Question` bundles the prompt shown to both players, the optional
//! answer choices, and the server-held canonical answer. The canonical
//! answer is fixed at generation time and is only revealed to clients in
//! the round-end broadcast; `PublicQuestion` is the shape that goes over
//! the wire beforehand.

use rand::prelude::{IndexedRandom, IteratorRandom};
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

use crate::config::game::CHOICE_COUNT;
use crate::game::data::{COUNTRIES, US_STATES};
use crate::server::matchmaking::types::GameType;

/// Normalize a raw answer for comparison: trim, casefold, collapse runs of
/// whitespace. Client input is never compared byte-for-byte.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Server-held correct answer for a round.
#[derive(Clone, Debug)]
pub enum CanonicalAnswer {
    /// One valid answer (normalized match).
    Exact(String),
    /// Any member of the set is valid (e.g. "name a country starting with U").
    AnyOf(Vec<String>),
}

impl CanonicalAnswer {
    pub fn accepts(&self, raw: &str) -> bool {
        let given = normalize(raw);
        match self {
            CanonicalAnswer::Exact(expected) => normalize(expected) == given,
            CanonicalAnswer::AnyOf(valid) => valid.iter().any(|v| normalize(v) == given),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Question {
    pub game_type: GameType,
    pub prompt: String,
    /// Empty for free-form questions.
    pub choices: Vec<String>,
    pub(crate) answer: CanonicalAnswer,
    /// Human-readable canonical answer, broadcast at round end.
    pub(crate) display: String,
    /// Key recorded in the match's exclusion set to avoid repeats.
    pub(crate) exclusion_key: String,
}

impl Question {
    pub fn check(&self, raw: &str) -> bool {
        self.answer.accepts(raw)
    }

    pub fn correct_answer(&self) -> &str {
        &self.display
    }

    pub fn exclusion_key(&self) -> &str {
        &self.exclusion_key
    }

    /// Wire shape sent to clients before resolution. Never carries the
    /// canonical answer.
    pub fn public(&self) -> PublicQuestion {
        PublicQuestion {
            game_type: self.game_type,
            prompt: self.prompt.clone(),
            choices: self.choices.clone(),
        }
    }
}

#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PublicQuestion {
    pub game_type: GameType,
    pub prompt: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
}

/// Stateless generator; per-match repeat avoidance comes in through the
/// caller's exclusion set.
#[derive(Clone)]
pub struct QuestionGenerator;

impl QuestionGenerator {
    pub fn new() -> Self {
        QuestionGenerator
    }

    pub fn next_question(&self, game_type: GameType, exclude: &HashSet<String>) -> Question {
        match game_type {
            GameType::Globle => self.globle(exclude),
            GameType::Flagle => self.flagle(exclude),
            GameType::Findle => self.findle(exclude),
            GameType::Population => self.population(exclude),
            GameType::US => self.us_states(exclude),
        }
    }

    fn globle(&self, exclude: &HashSet<String>) -> Question {
        let mut rng = rand::rng();
        let pool: Vec<_> = COUNTRIES
            .iter()
            .filter(|c| !exclude.contains(c.name))
            .collect();
        // Every country already used this match: fall back to the full set.
        let country = pool
            .choose(&mut rng)
            .copied()
            .unwrap_or_else(|| COUNTRIES.choose(&mut rng).unwrap());
        Question {
            game_type: GameType::Globle,
            prompt: format!("Find the country: {}", country.name),
            choices: Vec::new(),
            answer: CanonicalAnswer::Exact(country.name.to_string()),
            display: country.name.to_string(),
            exclusion_key: country.name.to_string(),
        }
    }

    fn flagle(&self, exclude: &HashSet<String>) -> Question {
        let mut rng = rand::rng();
        let pool: Vec<_> = COUNTRIES
            .iter()
            .filter(|c| !exclude.contains(c.name))
            .collect();
        let country = pool
            .choose(&mut rng)
            .copied()
            .unwrap_or_else(|| COUNTRIES.choose(&mut rng).unwrap());

        let mut choices: Vec<String> = COUNTRIES
            .iter()
            .filter(|c| c.name != country.name)
            .choose_multiple(&mut rng, CHOICE_COUNT - 1)
            .into_iter()
            .map(|c| c.name.to_string())
            .collect();
        choices.push(country.name.to_string());
        choices.shuffle(&mut rng);

        Question {
            game_type: GameType::Flagle,
            prompt: format!("Which country does this flag belong to? {}", country.flag),
            choices,
            answer: CanonicalAnswer::Exact(country.name.to_string()),
            display: country.name.to_string(),
            exclusion_key: country.name.to_string(),
        }
    }

    fn findle(&self, exclude: &HashSet<String>) -> Question {
        let mut rng = rand::rng();
        // Group countries by initial; only letters with at least two entries
        // make interesting questions. BTreeMap keeps letter order stable.
        let mut by_letter: BTreeMap<char, Vec<&str>> = BTreeMap::new();
        for country in COUNTRIES {
            if let Some(letter) = country.name.chars().next() {
                by_letter.entry(letter).or_default().push(country.name);
            }
        }
        by_letter.retain(|_, names| names.len() >= 2);

        let available: Vec<_> = by_letter
            .iter()
            .filter(|(letter, _)| !exclude.contains(&letter.to_string()))
            .collect();
        let (letter, names) = available
            .choose(&mut rng)
            .copied()
            .unwrap_or_else(|| by_letter.iter().choose(&mut rng).unwrap());

        let sample = names.choose(&mut rng).unwrap();
        Question {
            game_type: GameType::Findle,
            prompt: format!("Name a country starting with \"{}\"", letter),
            choices: Vec::new(),
            answer: CanonicalAnswer::AnyOf(names.iter().map(|n| n.to_string()).collect()),
            display: format!("e.g. {}", sample),
            exclusion_key: letter.to_string(),
        }
    }

    fn population(&self, exclude: &HashSet<String>) -> Question {
        let mut rng = rand::rng();
        let pool: Vec<_> = COUNTRIES
            .iter()
            .filter(|c| !exclude.contains(c.name))
            .collect();
        let picked = if pool.len() >= 2 {
            pool.choose_multiple(&mut rng, 2).copied().collect::<Vec<_>>()
        } else {
            COUNTRIES.iter().choose_multiple(&mut rng, 2)
        };
        let (larger, smaller) = if picked[0].population >= picked[1].population {
            (picked[0], picked[1])
        } else {
            (picked[1], picked[0])
        };

        let mut choices = vec![larger.name.to_string(), smaller.name.to_string()];
        choices.shuffle(&mut rng);

        Question {
            game_type: GameType::Population,
            prompt: format!(
                "Which country has the larger population: {} or {}?",
                choices[0], choices[1]
            ),
            choices,
            answer: CanonicalAnswer::Exact(larger.name.to_string()),
            display: larger.name.to_string(),
            exclusion_key: larger.name.to_string(),
        }
    }

    fn us_states(&self, exclude: &HashSet<String>) -> Question {
        let mut rng = rand::rng();
        let pool: Vec<_> = US_STATES
            .iter()
            .filter(|s| !exclude.contains(**s))
            .collect();
        let state = pool
            .choose(&mut rng)
            .copied()
            .copied()
            .unwrap_or_else(|| *US_STATES.choose(&mut rng).unwrap());
        Question {
            game_type: GameType::US,
            prompt: format!("Find the state: {}", state),
            choices: Vec::new(),
            answer: CanonicalAnswer::Exact(state.to_string()),
            display: state.to_string(),
            exclusion_key: state.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_case_and_whitespace() {
        assert_eq!(normalize("  United   States "), "united states");
        assert_eq!(normalize("FRANCE"), "france");
    }

    #[test]
    fn exact_answer_accepts_normalized_input() {
        let answer = CanonicalAnswer::Exact("France".to_string());
        assert!(answer.accepts("france"));
        assert!(answer.accepts(" France "));
        assert!(!answer.accepts("Germany"));
    }

    #[test]
    fn any_of_answer_is_set_membership() {
        let answer = CanonicalAnswer::AnyOf(vec![
            "United States".to_string(),
            "United Kingdom".to_string(),
        ]);
        assert!(answer.accepts("united kingdom"));
        assert!(!answer.accepts("France"));
    }

    #[test]
    fn flagle_choices_contain_the_answer() {
        let generator = QuestionGenerator::new();
        for _ in 0..20 {
            let q = generator.next_question(GameType::Flagle, &HashSet::new());
            assert_eq!(q.choices.len(), CHOICE_COUNT);
            assert!(q.choices.iter().any(|c| q.check(c)));
        }
    }

    #[test]
    fn population_answer_is_one_of_the_two_choices() {
        let generator = QuestionGenerator::new();
        for _ in 0..20 {
            let q = generator.next_question(GameType::Population, &HashSet::new());
            assert_eq!(q.choices.len(), 2);
            assert!(q.choices.contains(&q.correct_answer().to_string()));
        }
    }

    #[test]
    fn exclusion_set_is_respected() {
        let generator = QuestionGenerator::new();
        let mut exclude = HashSet::new();
        // Exclude everything except one country; the generator has no choice left.
        for country in COUNTRIES.iter().skip(1) {
            exclude.insert(country.name.to_string());
        }
        for _ in 0..10 {
            let q = generator.next_question(GameType::Globle, &exclude);
            assert_eq!(q.correct_answer(), COUNTRIES[0].name);
        }
    }

    #[test]
    fn exhausted_exclusions_fall_back_to_full_pool() {
        let generator = QuestionGenerator::new();
        let exclude: HashSet<String> =
            COUNTRIES.iter().map(|c| c.name.to_string()).collect();
        let q = generator.next_question(GameType::Globle, &exclude);
        assert!(!q.correct_answer().is_empty());
    }

    #[test]
    fn public_payload_never_carries_the_answer() {
        let generator = QuestionGenerator::new();
        let q = generator.next_question(GameType::Globle, &HashSet::new());
        let json = serde_json::to_value(q.public()).unwrap();
        assert!(json.get("answer").is_none());
        assert!(json.get("display").is_none());
    }

    #[test]
    fn findle_excludes_used_letters() {
        let generator = QuestionGenerator::new();
        let q = generator.next_question(GameType::Findle, &HashSet::new());
        let mut exclude = HashSet::new();
        exclude.insert(q.exclusion_key().to_string());
        for _ in 0..10 {
            let next = generator.next_question(GameType::Findle, &exclude);
            assert_ne!(next.exclusion_key(), q.exclusion_key());
        }
    }
}
