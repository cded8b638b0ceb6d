use crate::config::{DifficultySettings, ScoringConfig};
use crate::round::RoundOutcome;

/// Score delta earned by a round.
///
/// Only `Won` outcomes score; a lost round contributes 0 here (the session
/// controller applies the timeout penalty separately). The difficulty
/// multiplier applies to base + time bonus only, before the additive hint and
/// wrong-guess adjustments, so the multiplier never compounds penalties.
/// The result is clamped at 0 and truncated to an integer.
pub fn compute_round_score(
    outcome: &RoundOutcome,
    difficulty: &DifficultySettings,
    scoring: &ScoringConfig,
) -> i64 {
    let RoundOutcome::Won {
        wrong_guesses,
        time_left,
        hint1_used,
        hint2_used,
    } = outcome
    else {
        return 0;
    };

    let mut score = difficulty.base_score as f64;

    if difficulty.time_bonus {
        let fraction = f64::from(*time_left) / f64::from(difficulty.time_per_question);
        score += (fraction * 100.0 * difficulty.time_bonus_multiplier).floor();
    }

    score *= difficulty.difficulty_multiplier;

    if *hint1_used {
        score -= scoring.hint1_penalty as f64;
    }
    if *hint2_used {
        score -= scoring.hint2_penalty as f64;
    }
    if !*hint1_used {
        score += scoring.hint_bonus as f64;
    }

    score -= f64::from(*wrong_guesses) * scoring.wrong_guess_penalty as f64;

    score.max(0.0) as i64
}
