use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A guessable word plus its two hint strings, as defined in the config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WordEntry {
    pub word: String,
    pub hints: [String; 2],
}

impl WordEntry {
    /// Letters the player has to find, i.e. every distinct non-space character.
    pub fn distinct_letters(&self) -> HashSet<char> {
        self.word.chars().filter(|c| *c != ' ').collect()
    }
}

/// Picks a word from `category` that is not in `used`, uniformly at random.
///
/// When every word in the category has been used the used set is cleared and
/// the pick is made from the full list again, so a long session keeps cycling
/// through the category. Returns `None` only for an empty category, which the
/// config validation rules out.
pub fn pick_word<'a, R: Rng>(
    category: &'a [WordEntry],
    used: &mut HashSet<String>,
    rng: &mut R,
) -> Option<&'a WordEntry> {
    if category.is_empty() {
        return None;
    }

    let available: Vec<&WordEntry> = category
        .iter()
        .filter(|entry| !used.contains(&entry.word))
        .collect();

    let picked = if available.is_empty() {
        used.clear();
        category.choose(rng)?
    } else {
        *available.choose(rng)?
    };

    used.insert(picked.word.clone());
    Some(picked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn entry(word: &str) -> WordEntry {
        WordEntry {
            word: word.to_string(),
            hints: ["first hint".to_string(), "second hint".to_string()],
        }
    }

    #[test]
    fn test_distinct_letters_ignores_spaces() {
        let e = entry("ICE CREAM");
        let letters = e.distinct_letters();
        assert_eq!(letters.len(), 6);
        for c in ['I', 'C', 'E', 'R', 'A', 'M'] {
            assert!(letters.contains(&c));
        }
        assert!(!letters.contains(&' '));
    }

    #[test]
    fn test_pick_word_empty_category() {
        let mut used = HashSet::new();
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pick_word(&[], &mut used, &mut rng).is_none());
    }

    #[test]
    fn test_pick_word_never_repeats_until_exhausted() {
        let category = vec![entry("ONE"), entry("TWO"), entry("THREE")];
        let mut used = HashSet::new();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..3 {
            pick_word(&category, &mut used, &mut rng).unwrap();
        }

        // After three picks with no repeats the used set is the whole category.
        assert_eq!(used.len(), 3);
        for e in &category {
            assert!(used.contains(&e.word));
        }
    }

    #[test]
    fn test_pick_word_recycles_when_exhausted() {
        let category = vec![entry("ONE"), entry("TWO"), entry("THREE")];
        let mut used = HashSet::new();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..3 {
            pick_word(&category, &mut used, &mut rng).unwrap();
        }
        assert_eq!(used.len(), 3);

        // Fourth pick resets the used set and may repeat a previous word.
        let fourth = pick_word(&category, &mut used, &mut rng).unwrap().clone();
        assert_eq!(used.len(), 1);
        assert!(used.contains(&fourth.word));
        assert!(category.contains(&fourth));
    }

    #[test]
    fn test_pick_word_single_word_category() {
        let category = vec![entry("ONLY")];
        let mut used = HashSet::new();
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..5 {
            let picked = pick_word(&category, &mut used, &mut rng).unwrap();
            assert_eq!(picked.word, "ONLY");
        }
    }

    #[test]
    fn test_pick_word_is_deterministic_with_seeded_rng() {
        let category = vec![entry("ONE"), entry("TWO"), entry("THREE"), entry("FOUR")];

        let run = |seed: u64| -> Vec<String> {
            let mut used = HashSet::new();
            let mut rng = StdRng::seed_from_u64(seed);
            (0..4)
                .map(|_| pick_word(&category, &mut used, &mut rng).unwrap().word.clone())
                .collect()
        };

        assert_eq!(run(99), run(99));
    }
}
