use crate::words::WordEntry;
use directories::ProjectDirs;
use include_dir::{include_dir, Dir};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

static DATA_DIR: Dir = include_dir!("src/data");

/// Per-difficulty round limits and score parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DifficultySettings {
    pub max_wrong_guesses: u32,
    pub time_per_question: u32,
    pub base_score: i64,
    pub time_bonus: bool,
    pub time_bonus_multiplier: f64,
    pub difficulty_multiplier: f64,
    pub confetti_threshold: i64,
}

/// Global scoring constants shared by all difficulties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringConfig {
    pub hint_bonus: i64,
    pub hint1_penalty: i64,
    pub hint2_penalty: i64,
    pub wrong_guess_penalty: i64,
    pub timeout_penalty: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSettings {
    pub rounds_per_session: u32,
}

/// The full game configuration document.
///
/// A default document ships embedded in the binary; a user-provided JSON file
/// (via `--config` or the per-user config directory) replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub categories: BTreeMap<String, Vec<WordEntry>>,
    pub difficulty: BTreeMap<String, DifficultySettings>,
    pub scoring: ScoringConfig,
    pub game_settings: GameSettings,
}

impl GameConfig {
    /// Parse and validate a config document from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config embedded in the binary.
    pub fn embedded() -> Self {
        let file = DATA_DIR
            .get_file("gallows.json")
            .expect("embedded config not found");
        let json = file
            .contents_utf8()
            .expect("embedded config is not valid utf-8");
        Self::from_json(json).expect("embedded config failed validation")
    }

    pub fn from_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let json = fs::read_to_string(path)
            .map_err(|e| format!("cannot read config {}: {e}", path.display()))?;
        Self::from_json(&json)
    }

    /// Resolve the effective config: explicit path, then the user config
    /// file if one exists, then the embedded default.
    pub fn load(override_path: Option<&Path>) -> Result<Self, Box<dyn Error>> {
        if let Some(path) = override_path {
            return Self::from_file(path);
        }
        if let Some(path) = user_config_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }
        Ok(Self::embedded())
    }

    pub fn category(&self, name: &str) -> Option<&[WordEntry]> {
        self.categories.get(name).map(Vec::as_slice)
    }

    /// Reject documents that would break a session at runtime. A selected
    /// category with zero words must fail here, not produce an empty word.
    pub fn validate(&self) -> Result<(), Box<dyn Error>> {
        if self.categories.is_empty() {
            return Err("config has no categories".into());
        }
        for (name, words) in &self.categories {
            if words.is_empty() {
                return Err(format!("category {name:?} has no words").into());
            }
            for entry in words {
                if entry.word.trim().is_empty() {
                    return Err(format!("category {name:?} contains an empty word").into());
                }
                if !entry.word.chars().all(|c| c.is_ascii_uppercase() || c == ' ') {
                    return Err(format!(
                        "word {:?} in category {name:?} must use A-Z and spaces only",
                        entry.word
                    )
                    .into());
                }
                if entry.hints.iter().any(|h| h.is_empty()) {
                    return Err(
                        format!("word {:?} in category {name:?} has an empty hint", entry.word)
                            .into(),
                    );
                }
            }
            if let Some(dup) = words.iter().map(|e| &e.word).duplicates().next() {
                return Err(format!("category {name:?} lists {dup:?} twice").into());
            }
        }

        if self.difficulty.is_empty() {
            return Err("config has no difficulty levels".into());
        }
        for (level, settings) in &self.difficulty {
            if settings.max_wrong_guesses == 0 {
                return Err(format!("difficulty {level:?}: maxWrongGuesses must be > 0").into());
            }
            if settings.time_per_question == 0 {
                return Err(format!("difficulty {level:?}: timePerQuestion must be > 0").into());
            }
        }

        let s = &self.scoring;
        for (field, value) in [
            ("hintBonus", s.hint_bonus),
            ("hint1Penalty", s.hint1_penalty),
            ("hint2Penalty", s.hint2_penalty),
            ("wrongGuessPenalty", s.wrong_guess_penalty),
            ("timeoutPenalty", s.timeout_penalty),
        ] {
            if value < 0 {
                return Err(format!("scoring.{field} must be >= 0").into());
            }
        }

        if self.game_settings.rounds_per_session == 0 {
            return Err("gameSettings.roundsPerSession must be > 0".into());
        }

        Ok(())
    }
}

/// Location of the optional per-user config override.
pub fn user_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gallows").map(|pd| pd.config_dir().join("gallows.json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn embedded_config_is_valid() {
        let config = GameConfig::embedded();
        assert!(config.categories.contains_key("Animals"));
        assert!(config.difficulty.contains_key("Easy"));
        assert!(config.difficulty.contains_key("Medium"));
        assert!(config.difficulty.contains_key("Hard"));
        assert!(config.game_settings.rounds_per_session > 0);
    }

    #[test]
    fn camel_case_field_names_parse() {
        let json = r#"{
            "categories": {
                "Test": [ { "word": "HELLO", "hints": ["a greeting", "five letters"] } ]
            },
            "difficulty": {
                "Easy": {
                    "maxWrongGuesses": 6,
                    "timePerQuestion": 30,
                    "baseScore": 100,
                    "timeBonus": true,
                    "timeBonusMultiplier": 1.0,
                    "difficultyMultiplier": 1.0,
                    "confettiThreshold": 600
                }
            },
            "scoring": {
                "hintBonus": 20,
                "hint1Penalty": 10,
                "hint2Penalty": 15,
                "wrongGuessPenalty": 5,
                "timeoutPenalty": 10
            },
            "gameSettings": { "roundsPerSession": 5 }
        }"#;

        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.difficulty["Easy"].max_wrong_guesses, 6);
        assert_eq!(config.scoring.wrong_guess_penalty, 5);
        assert_eq!(config.game_settings.rounds_per_session, 5);
    }

    fn valid_config() -> GameConfig {
        GameConfig::embedded()
    }

    #[test]
    fn rejects_empty_category() {
        let mut config = valid_config();
        config.categories.insert("Empty".to_string(), vec![]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_lowercase_word() {
        let mut config = valid_config();
        config.categories.get_mut("Food").unwrap().push(WordEntry {
            word: "taco".to_string(),
            hints: ["mexican".to_string(), "folded".to_string()],
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_duplicate_word_in_category() {
        let mut config = valid_config();
        let first = config.categories["Food"][0].clone();
        config.categories.get_mut("Food").unwrap().push(first);
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_rounds_per_session() {
        let mut config = valid_config();
        config.game_settings.rounds_per_session = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_zero_wrong_guess_budget() {
        let mut config = valid_config();
        config.difficulty.get_mut("Easy").unwrap().max_wrong_guesses = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_negative_penalty() {
        let mut config = valid_config();
        config.scoring.timeout_penalty = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_from_file_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gallows.json");
        let config = valid_config();
        fs::write(&path, serde_json::to_vec_pretty(&config).unwrap()).unwrap();

        let loaded = GameConfig::load(Some(&path)).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn load_rejects_invalid_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gallows.json");
        fs::write(&path, "{}").unwrap();
        assert!(GameConfig::load(Some(&path)).is_err());
    }
}
