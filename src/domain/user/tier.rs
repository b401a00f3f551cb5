//! Subscription tier definitions.

use serde::{Deserialize, Serialize};

/// Subscription tier of an account.
///
/// Determines access to premium guidance features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    /// Free tier - daily chat allowance only.
    #[default]
    Free,
    /// Premium tier - guidance plans and natal readings.
    Premium,
    /// Elite tier - every reading type, unlimited chat.
    Elite,
}

impl SubscriptionTier {
    /// Parses the wire name, returning `None` for unknown tiers.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "free" => Some(SubscriptionTier::Free),
            "premium" => Some(SubscriptionTier::Premium),
            "elite" => Some(SubscriptionTier::Elite),
            _ => None,
        }
    }

    /// Returns the wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "free",
            SubscriptionTier::Premium => "premium",
            SubscriptionTier::Elite => "elite",
        }
    }

    /// Returns true if this tier is a paid tier.
    pub fn is_paid(&self) -> bool {
        !matches!(self, SubscriptionTier::Free)
    }

    /// Returns the display name for this tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            SubscriptionTier::Free => "Free",
            SubscriptionTier::Premium => "Premium",
            SubscriptionTier::Elite => "Elite",
        }
    }
}

impl std::fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_tier_is_not_paid() {
        assert!(!SubscriptionTier::Free.is_paid());
    }

    #[test]
    fn premium_and_elite_are_paid() {
        assert!(SubscriptionTier::Premium.is_paid());
        assert!(SubscriptionTier::Elite.is_paid());
    }

    #[test]
    fn parse_round_trips_wire_names() {
        for tier in [
            SubscriptionTier::Free,
            SubscriptionTier::Premium,
            SubscriptionTier::Elite,
        ] {
            assert_eq!(SubscriptionTier::parse(tier.as_str()), Some(tier));
        }
        assert_eq!(SubscriptionTier::parse("platinum"), None);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SubscriptionTier::Elite).unwrap(),
            "\"elite\""
        );
    }
}
