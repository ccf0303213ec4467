//! Deterministic response confidence scoring.
//!
//! One explainable heuristic, reused by the dialogue controller for
//! per-turn extraction confidence and by the plan executor for per-step
//! response confidence.

/// Phrases that signal uncertainty in a response.
const UNCERTAINTY_PHRASES: [&str; 9] = [
    "i'm not sure",
    "i don't know",
    "uncertain",
    "unclear",
    "might be",
    "possibly",
    "perhaps",
    "could be",
    "?",
];

/// Starting score before adjustments.
const BASE_SCORE: f64 = 0.8;

/// Penalty per uncertainty phrase found.
const UNCERTAINTY_PENALTY: f64 = 0.2;

/// Adjustment for very short / very detailed responses.
const LENGTH_ADJUSTMENT: f64 = 0.1;

/// Bonus when the response shares vocabulary with the triggering query.
const RELEVANCE_BONUS: f64 = 0.1;

/// Context for a scoring call.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScoreContext<'a> {
    /// The user query or question that triggered the response.
    pub user_query: &'a str,
}

/// Scores responses in [0, 1] with explicit heuristics.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfidenceAnalyzer;

impl ConfidenceAnalyzer {
    /// Creates an analyzer.
    pub fn new() -> Self {
        Self
    }

    /// Scores a response.
    ///
    /// Base 0.8; -0.2 per uncertainty phrase found; -0.1 under 10 words;
    /// +0.1 over 50 words; +0.1 when the response shares at least one word
    /// with the query. Clamped to [0, 1].
    pub fn score(&self, response: &str, context: &ScoreContext<'_>) -> f64 {
        let mut confidence = BASE_SCORE;
        let response_lower = response.to_lowercase();

        for phrase in UNCERTAINTY_PHRASES {
            if response_lower.contains(phrase) {
                confidence -= UNCERTAINTY_PENALTY;
            }
        }

        let word_count = response.split_whitespace().count();
        if word_count < 10 {
            confidence -= LENGTH_ADJUSTMENT;
        }
        if word_count > 50 {
            confidence += LENGTH_ADJUSTMENT;
        }

        if shares_vocabulary(&response_lower, context.user_query) {
            confidence += RELEVANCE_BONUS;
        }

        confidence.clamp(0.0, 1.0)
    }
}

fn shares_vocabulary(response_lower: &str, query: &str) -> bool {
    query
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .filter(|w| !w.is_empty())
        .any(|w| response_lower.contains(&w))
}
