//! Escalation predicates.
//!
//! Evaluated after every interview turn and after every plan step. The
//! predicate order is fixed; the first match wins, so a safety keyword
//! always outranks a low confidence score in the same turn.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::EscalationConfig;

use super::EscalationReason;

/// Substrings that signal an explicit request for a human.
const USER_REQUEST_KEYWORDS: [&str; 4] = ["manager", "human agent", "escalate", "supervisor"];

/// Substrings that signal a safety or health concern.
const SAFETY_KEYWORDS: [&str; 6] = [
    "injury",
    "injured",
    "hospital",
    "allergic reaction",
    "dangerous",
    "unsafe",
];

/// Substrings that signal a legal matter.
const LEGAL_KEYWORDS: [&str; 4] = ["lawsuit", "attorney", "court", "legal action"];

static DOLLAR_AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    // "$1,234.56" or "1234 dollars" / "1234 USD".
    Regex::new(r"(?i)\$\s*([0-9][0-9,]*(?:\.[0-9]{1,2})?)|\b([0-9][0-9,]*(?:\.[0-9]+)?)\s*(?:dollars|usd)\b")
        .expect("amount pattern is valid")
});

/// Everything one escalation evaluation looks at.
#[derive(Debug, Clone, Copy)]
pub struct EscalationCheck<'a> {
    /// The latest user text.
    pub user_text: &'a str,
    /// Confidence score for the turn or step response.
    pub confidence_score: f64,
    /// Step-specific escalation triggers (plan execution only).
    pub step_triggers: &'a [String],
    /// Exchanges so far, for the turn-cap predicate.
    pub exchange_count: usize,
    /// The cap; None disables the turn-cap predicate (the interview
    /// treats its question budget as normal completion instead).
    pub max_exchanges: Option<usize>,
}

impl<'a> EscalationCheck<'a> {
    /// A per-turn check with no step triggers and no turn cap.
    pub fn for_turn(user_text: &'a str, confidence_score: f64) -> Self {
        Self {
            user_text,
            confidence_score,
            step_triggers: &[],
            exchange_count: 0,
            max_exchanges: None,
        }
    }
}

/// Evaluates the fixed-priority escalation predicates.
#[derive(Debug, Clone)]
pub struct EscalationHandler {
    confidence_threshold: f64,
    authorization_ceiling: f64,
}

impl EscalationHandler {
    /// Creates a handler from the escalation configuration.
    pub fn new(config: &EscalationConfig) -> Self {
        Self {
            confidence_threshold: config.confidence_threshold,
            authorization_ceiling: config.authorization_ceiling,
        }
    }

    /// Runs the predicates in priority order; first match wins.
    pub fn evaluate(&self, check: &EscalationCheck<'_>) -> Option<EscalationReason> {
        let lower = check.user_text.to_lowercase();

        if contains_any(&lower, &USER_REQUEST_KEYWORDS) {
            return Some(EscalationReason::UserRequested);
        }
        if contains_any(&lower, &SAFETY_KEYWORDS) {
            return Some(EscalationReason::SafetyConcern);
        }
        if contains_any(&lower, &LEGAL_KEYWORDS) {
            return Some(EscalationReason::LegalMatter);
        }
        if let Some(amount) = largest_amount(check.user_text) {
            if amount > self.authorization_ceiling {
                return Some(EscalationReason::HighValueDispute);
            }
        }
        if check.confidence_score < self.confidence_threshold {
            return Some(EscalationReason::LowConfidence);
        }
        if check
            .step_triggers
            .iter()
            .any(|t| lower.contains(&t.to_lowercase()))
        {
            return Some(EscalationReason::KeywordTrigger);
        }
        if let Some(max) = check.max_exchanges {
            if check.exchange_count >= max {
                return Some(EscalationReason::MaxTurnsReached);
            }
        }
        None
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Finds the largest monetary amount mentioned, in dollars.
fn largest_amount(text: &str) -> Option<f64> {
    DOLLAR_AMOUNT_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let digits = caps.get(1).or_else(|| caps.get(2))?;
            digits.as_str().replace(',', "").parse::<f64>().ok()
        })
        .fold(None, |max, amount| match max {
            Some(m) if m >= amount => Some(m),
            _ => Some(amount),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler() -> EscalationHandler {
        EscalationHandler::new(&EscalationConfig::default())
    }

    fn check(text: &str, confidence: f64) -> Option<EscalationReason> {
        handler().evaluate(&EscalationCheck::for_turn(text, confidence))
    }

    mod user_request {
        use super::*;

        #[test]
        fn manager_request_escalates() {
            assert_eq!(
                check("I want to speak to a manager", 0.9),
                Some(EscalationReason::UserRequested)
            );
        }

        #[test]
        fn human_agent_request_escalates() {
            assert_eq!(
                check("give me a HUMAN AGENT please", 0.9),
                Some(EscalationReason::UserRequested)
            );
        }
    }

    mod safety_and_legal {
        use super::*;

        #[test]
        fn safety_keyword_escalates() {
            assert_eq!(
                check("the charger sparked, it is dangerous", 0.9),
                Some(EscalationReason::SafetyConcern)
            );
        }

        #[test]
        fn legal_keyword_escalates() {
            assert_eq!(
                check("my attorney will be in touch", 0.9),
                Some(EscalationReason::LegalMatter)
            );
        }

        #[test]
        fn safety_outranks_low_confidence() {
            // Priority order is fixed: both conditions hold, safety wins.
            assert_eq!(
                check("I ended up in hospital because of this", 0.1),
                Some(EscalationReason::SafetyConcern)
            );
        }

        #[test]
        fn user_request_outranks_safety() {
            assert_eq!(
                check("this was dangerous, get me a supervisor", 0.9),
                Some(EscalationReason::UserRequested)
            );
        }
    }

    mod monetary_ceiling {
        use super::*;

        #[test]
        fn amount_over_ceiling_escalates() {
            assert_eq!(
                check("I was charged $1,200.50 for this", 0.9),
                Some(EscalationReason::HighValueDispute)
            );
        }

        #[test]
        fn spelled_out_dollars_are_detected() {
            assert_eq!(
                check("they took 750 dollars from my account", 0.9),
                Some(EscalationReason::HighValueDispute)
            );
        }

        #[test]
        fn amount_at_ceiling_does_not_escalate() {
            assert_eq!(check("the item cost $500", 0.9), None);
        }

        #[test]
        fn small_amount_does_not_escalate() {
            assert_eq!(check("a $29.99 subscription charge", 0.9), None);
        }

        #[test]
        fn largest_mentioned_amount_is_compared() {
            assert_eq!(
                check("I paid $20 shipping on a $900 item", 0.9),
                Some(EscalationReason::HighValueDispute)
            );
        }
    }

    mod confidence_and_caps {
        use super::*;

        #[test]
        fn low_confidence_escalates() {
            assert_eq!(check("fine", 0.3), Some(EscalationReason::LowConfidence));
        }

        #[test]
        fn threshold_is_exclusive() {
            assert_eq!(check("that resolves it, thanks for the help today", 0.6), None);
        }

        #[test]
        fn step_trigger_match_escalates() {
            let triggers = vec!["unable to verify account".to_string()];
            let result = handler().evaluate(&EscalationCheck {
                user_text: "it says Unable to Verify Account again",
                confidence_score: 0.9,
                step_triggers: &triggers,
                exchange_count: 2,
                max_exchanges: Some(20),
            });
            assert_eq!(result, Some(EscalationReason::KeywordTrigger));
        }

        #[test]
        fn exchange_cap_escalates() {
            let result = handler().evaluate(&EscalationCheck {
                user_text: "and another thing about the delivery schedule",
                confidence_score: 0.9,
                step_triggers: &[],
                exchange_count: 20,
                max_exchanges: Some(20),
            });
            assert_eq!(result, Some(EscalationReason::MaxTurnsReached));
        }

        #[test]
        fn no_cap_means_no_cap_predicate() {
            let result = handler().evaluate(&EscalationCheck {
                user_text: "all good so far with the replacement process",
                confidence_score: 0.9,
                step_triggers: &[],
                exchange_count: 500,
                max_exchanges: None,
            });
            assert_eq!(result, None);
        }
    }

    mod clean_turns {
        use super::*;

        #[test]
        fn ordinary_turn_does_not_escalate() {
            assert_eq!(
                check("my toaster arrived with a cracked handle yesterday", 0.8),
                None
            );
        }
    }
}
