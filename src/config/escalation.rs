//! Escalation gating configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Thresholds for the escalation predicates.
#[derive(Debug, Clone, Deserialize)]
pub struct EscalationConfig {
    /// Responses scoring below this confidence escalate.
    #[serde(default = "default_confidence_threshold")]
    pub confidence_threshold: f64,

    /// Per-agent monetary authorization ceiling in dollars.
    #[serde(default = "default_authorization_ceiling")]
    pub authorization_ceiling: f64,

    /// Hard cap on plan-execution exchanges before forced escalation.
    #[serde(default = "default_max_conversation_turns")]
    pub max_conversation_turns: usize,
}

impl EscalationConfig {
    /// Validate escalation configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(0.0..=1.0).contains(&self.confidence_threshold) {
            return Err(ValidationError::InvalidConfidenceThreshold);
        }
        if self.authorization_ceiling <= 0.0 {
            return Err(ValidationError::InvalidAuthorizationCeiling);
        }
        if self.max_conversation_turns == 0 {
            return Err(ValidationError::InvalidConversationCap);
        }
        Ok(())
    }
}

impl Default for EscalationConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: default_confidence_threshold(),
            authorization_ceiling: default_authorization_ceiling(),
            max_conversation_turns: default_max_conversation_turns(),
        }
    }
}

fn default_confidence_threshold() -> f64 {
    0.6
}

fn default_authorization_ceiling() -> f64 {
    500.0
}

fn default_max_conversation_turns() -> usize {
    20
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(EscalationConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_threshold() {
        let config = EscalationConfig {
            confidence_threshold: 1.5,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ValidationError::InvalidConfidenceThreshold)
        );
    }

    #[test]
    fn rejects_zero_turn_cap() {
        let config = EscalationConfig {
            max_conversation_turns: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidConversationCap));
    }
}
