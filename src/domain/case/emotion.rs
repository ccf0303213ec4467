//! Customer emotion tracking across the interview.

use serde::{Deserialize, Serialize};

/// Emotional state inferred from one customer response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Calm,
    Frustrated,
    Angry,
    Disappointed,
    Worried,
    Satisfied,
    Confused,
    Neutral,
}

impl Emotion {
    /// Parses an emotion from loosely-formatted collaborator output.
    pub fn parse_lenient(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "calm" => Some(Self::Calm),
            "frustrated" | "frustration" => Some(Self::Frustrated),
            "angry" | "anger" | "furious" => Some(Self::Angry),
            "disappointed" | "disappointment" => Some(Self::Disappointed),
            "worried" | "anxious" | "concerned" => Some(Self::Worried),
            "satisfied" | "happy" => Some(Self::Satisfied),
            "confused" => Some(Self::Confused),
            "neutral" => Some(Self::Neutral),
            _ => None,
        }
    }
}

/// Intensity of an observed emotion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum EmotionIntensity {
    Low,
    #[default]
    Medium,
    High,
}

impl EmotionIntensity {
    /// Parses an intensity from loosely-formatted collaborator output.
    pub fn parse_lenient(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "moderate" => Some(Self::Medium),
            "high" | "extreme" => Some(Self::High),
            _ => None,
        }
    }
}

/// An emotion observed in a single response, before it is pinned to a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionObservation {
    pub emotion: Emotion,
    pub intensity: EmotionIntensity,
    /// Emotional words or phrases found in the response.
    pub keywords: Vec<String>,
}

impl EmotionObservation {
    /// Creates a new observation.
    pub fn new(emotion: Emotion, intensity: EmotionIntensity, keywords: Vec<String>) -> Self {
        Self {
            emotion,
            intensity,
            keywords,
        }
    }
}

/// One entry in the case's append-only emotion trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionEntry {
    pub turn_index: u32,
    pub emotion: Emotion,
    pub intensity: EmotionIntensity,
    pub keywords: Vec<String>,
}

impl EmotionEntry {
    /// Pins an observation to the turn it was made on.
    pub fn from_observation(turn_index: u32, observation: EmotionObservation) -> Self {
        Self {
            turn_index,
            emotion: observation.emotion,
            intensity: observation.intensity,
            keywords: observation.keywords,
        }
    }

    /// Returns true if this entry indicates meaningful distress.
    pub fn is_distressed(&self) -> bool {
        matches!(
            self.emotion,
            Emotion::Angry | Emotion::Frustrated | Emotion::Disappointed | Emotion::Worried
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_lenient_maps_synonyms() {
        assert_eq!(Emotion::parse_lenient("furious"), Some(Emotion::Angry));
        assert_eq!(Emotion::parse_lenient("anxious"), Some(Emotion::Worried));
    }

    #[test]
    fn parse_lenient_rejects_unknown() {
        assert_eq!(Emotion::parse_lenient("sleepy"), None);
    }

    #[test]
    fn intensity_is_ordered() {
        assert!(EmotionIntensity::Low < EmotionIntensity::High);
    }

    #[test]
    fn observation_pins_to_turn() {
        let obs = EmotionObservation::new(
            Emotion::Angry,
            EmotionIntensity::High,
            vec!["furious".to_string()],
        );
        let entry = EmotionEntry::from_observation(2, obs);
        assert_eq!(entry.turn_index, 2);
        assert_eq!(entry.emotion, Emotion::Angry);
        assert!(entry.is_distressed());
    }

    #[test]
    fn satisfied_is_not_distressed() {
        let entry = EmotionEntry::from_observation(
            0,
            EmotionObservation::new(Emotion::Satisfied, EmotionIntensity::Low, vec![]),
        );
        assert!(!entry.is_distressed());
    }
}
