use crate::config::{DifficultySettings, GameConfig, ScoringConfig};
use crate::round::{Round, RoundOutcome};
use crate::scoring::compute_round_score;
use crate::words::{pick_word, WordEntry};
use rand::Rng;
use std::collections::HashSet;
use std::error::Error;

/// What a resolved round did to the session.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundResolution {
    pub outcome: RoundOutcome,
    pub round_score: i64,
    pub session_complete: bool,
}

/// Final state handed to the completion screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSummary {
    pub final_score: i64,
    pub confetti: bool,
}

/// Sequences a fixed number of rounds over one category and difficulty,
/// accumulating the score (clamped at 0) and tracking used words so the
/// selector avoids repeats until the category is exhausted.
#[derive(Debug)]
pub struct Session {
    category_name: String,
    difficulty_name: String,
    words: Vec<WordEntry>,
    difficulty: DifficultySettings,
    scoring: ScoringConfig,
    rounds_per_session: u32,
    round_number: u32,
    score: i64,
    used_words: HashSet<String>,
    round: Option<Round>,
    round_resolved: bool,
    complete: bool,
}

impl Session {
    /// Fails fast on an unknown category or difficulty, or a category with
    /// no words; none of these are recoverable at play time.
    pub fn new(
        config: &GameConfig,
        category: &str,
        difficulty: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let words = config
            .category(category)
            .ok_or_else(|| format!("unknown category {category:?}"))?
            .to_vec();
        if words.is_empty() {
            return Err(format!("category {category:?} has no words").into());
        }
        let settings = config
            .difficulty
            .get(difficulty)
            .ok_or_else(|| format!("unknown difficulty {difficulty:?}"))?
            .clone();

        Ok(Self {
            category_name: category.to_string(),
            difficulty_name: difficulty.to_string(),
            words,
            difficulty: settings,
            scoring: config.scoring.clone(),
            rounds_per_session: config.game_settings.rounds_per_session,
            round_number: 1,
            score: 0,
            used_words: HashSet::new(),
            round: None,
            round_resolved: false,
            complete: false,
        })
    }

    /// Begin (or restart) the session: round 1, score 0, no used words.
    pub fn start<R: Rng>(&mut self, rng: &mut R) {
        self.round_number = 1;
        self.score = 0;
        self.used_words.clear();
        self.complete = false;
        self.begin_round(rng);
    }

    fn begin_round<R: Rng>(&mut self, rng: &mut R) {
        let entry = pick_word(&self.words, &mut self.used_words, rng)
            .expect("session category verified non-empty")
            .clone();
        let mut round = Round::new(entry, &self.difficulty);
        round.start();
        self.round = Some(round);
        self.round_resolved = false;
    }

    /// Fold the current round's terminal outcome into the session score and
    /// decide whether the session is over. Idempotent: the second and later
    /// calls for the same round return `None`, as does a call while the round
    /// is still in flight.
    pub fn resolve_round(&mut self) -> Option<RoundResolution> {
        if self.round_resolved {
            return None;
        }
        let outcome = self.round.as_ref()?.outcome()?;
        self.round_resolved = true;

        let round_score = compute_round_score(&outcome, &self.difficulty, &self.scoring);
        self.score += round_score;
        if outcome.timed_out() {
            self.score = (self.score - self.scoring.timeout_penalty).max(0);
        }

        if self.round_number >= self.rounds_per_session {
            self.complete = true;
        }

        Some(RoundResolution {
            outcome,
            round_score,
            session_complete: self.complete,
        })
    }

    /// Move on to the next round. No-op once the session has completed or
    /// while the current round is unresolved.
    pub fn advance_round<R: Rng>(&mut self, rng: &mut R) {
        if self.complete || !self.round_resolved {
            return;
        }
        self.round_number += 1;
        self.begin_round(rng);
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn round_mut(&mut self) -> Option<&mut Round> {
        self.round.as_mut()
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn rounds_per_session(&self) -> u32 {
        self.rounds_per_session
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn category_name(&self) -> &str {
        &self.category_name
    }

    pub fn difficulty_name(&self) -> &str {
        &self.difficulty_name
    }

    pub fn difficulty(&self) -> &DifficultySettings {
        &self.difficulty
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Available once the final round has been resolved. The confetti flag is
    /// decided here and nowhere else.
    pub fn summary(&self) -> Option<SessionSummary> {
        if !self.complete {
            return None;
        }
        Some(SessionSummary {
            final_score: self.score,
            confetti: self.score >= self.difficulty.confetti_threshold,
        })
    }
}
