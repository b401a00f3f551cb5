//! Onboarding profile attached to a user.

use serde::{Deserialize, Serialize};

/// Onboarding state and declared interests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default)]
    pub onboarding_completed: bool,
    #[serde(default)]
    pub interests: Vec<String>,
}

impl UserProfile {
    pub fn new(onboarding_completed: bool, interests: Vec<String>) -> Self {
        Self {
            onboarding_completed,
            interests,
        }
    }

    /// Returns true if the user declared `interest` (case-insensitive).
    pub fn has_interest(&self, interest: &str) -> bool {
        self.interests
            .iter()
            .any(|i| i.eq_ignore_ascii_case(interest))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let profile: UserProfile = serde_json::from_str("{}").unwrap();
        assert_eq!(profile, UserProfile::default());
    }

    #[test]
    fn has_interest_ignores_case() {
        let profile = UserProfile::new(true, vec!["Meditation".to_string()]);
        assert!(profile.has_interest("meditation"));
        assert!(!profile.has_interest("tarot"));
    }
}
