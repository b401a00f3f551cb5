//! User entity - the authenticated account holder.

use serde::{Deserialize, Serialize};

use super::credentials::is_valid_email;
use super::{SubscriptionTier, UserProfile};
use crate::domain::foundation::{DomainError, Timestamp, UserId};

/// Raw input for constructing a [`User`].
#[derive(Debug, Clone)]
pub struct UserProps {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub subscription_tier: SubscriptionTier,
    pub created_at: Timestamp,
    pub profile: Option<UserProfile>,
}

/// Immutable account holder.
///
/// Derived values (`full_name`, `initials`, `is_premium`) are computed on
/// demand and never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "UserRecord", try_from = "UserRecord")]
pub struct User {
    id: UserId,
    email: String,
    first_name: String,
    last_name: String,
    subscription_tier: SubscriptionTier,
    created_at: Timestamp,
    profile: Option<UserProfile>,
}

impl User {
    /// Creates a user, validating id, email and first name in that order.
    pub fn new(props: UserProps) -> Result<Self, DomainError> {
        let id = UserId::new(props.id)
            .map_err(|_| DomainError::validation("id", "User ID cannot be empty"))?;

        if !is_valid_email(&props.email) {
            return Err(DomainError::validation("email", "Invalid email format"));
        }
        if props.first_name.trim().is_empty() {
            return Err(DomainError::validation("firstName", "First name is required"));
        }

        Ok(Self {
            id,
            email: props.email,
            first_name: props.first_name,
            last_name: props.last_name,
            subscription_tier: props.subscription_tier,
            created_at: props.created_at,
            profile: props.profile,
        })
    }

    /// Rebuilds a user from the wire/persisted form.
    pub fn from_record(record: UserRecord) -> Result<Self, DomainError> {
        let subscription_tier = match record.subscription_tier.as_deref() {
            None => SubscriptionTier::default(),
            Some(raw) => SubscriptionTier::parse(raw).ok_or_else(|| {
                DomainError::validation("subscriptionTier", "Invalid subscription tier")
            })?,
        };

        let created_at = match record.created_at.as_deref() {
            None => Timestamp::now(),
            Some(raw) => Timestamp::parse(raw).map_err(|_| {
                DomainError::validation("createdAt", "User createdAt must be a valid date")
            })?,
        };

        Self::new(UserProps {
            id: record.id,
            email: record.email,
            first_name: record.first_name,
            last_name: record.last_name,
            subscription_tier,
            created_at,
            profile: record.profile,
        })
    }

    pub fn to_record(&self) -> UserRecord {
        UserRecord {
            id: self.id.as_str().to_string(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            subscription_tier: Some(self.subscription_tier.as_str().to_string()),
            created_at: Some(self.created_at.to_rfc3339()),
            profile: self.profile.clone(),
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn subscription_tier(&self) -> SubscriptionTier {
        self.subscription_tier
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// "First Last", or just the first name when the last name is blank.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    /// Upper-cased first letters of first and last name.
    pub fn initials(&self) -> String {
        [&self.first_name, &self.last_name]
            .iter()
            .filter_map(|name| name.trim().chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }

    pub fn is_premium(&self) -> bool {
        self.subscription_tier.is_paid()
    }

    pub fn has_completed_onboarding(&self) -> bool {
        self.profile
            .as_ref()
            .is_some_and(|p| p.onboarding_completed)
    }
}

impl From<User> for UserRecord {
    fn from(user: User) -> Self {
        user.to_record()
    }
}

impl TryFrom<UserRecord> for User {
    type Error = DomainError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        User::from_record(record)
    }
}

/// Wire/persisted form of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub subscription_tier: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
}
