//! RequestSpiritualGuidance command handler.

use std::sync::Arc;

use crate::application::errors::GuidanceError;
use crate::domain::guidance::ExperienceLevel;
use crate::ports::{AiRepository, GuidanceContext, SpiritualGuidanceRequest, SpiritualGuidanceResponse};

const MAX_TOPIC_LENGTH: usize = 200;
const MAX_TIME_AVAILABLE_LENGTH: usize = 50;

/// Bounds for one list field of the seeker profile.
struct ListRule {
    label: &'static str,
    singular: &'static str,
    required: bool,
    max_items: usize,
    max_chars: usize,
}

const SPIRITUAL_GOALS: ListRule = ListRule {
    label: "Spiritual goals",
    singular: "spiritual goal",
    required: true,
    max_items: 10,
    max_chars: 100,
};

const CURRENT_CHALLENGES: ListRule = ListRule {
    label: "Current challenges",
    singular: "current challenge",
    required: true,
    max_items: 10,
    max_chars: 100,
};

const PREFERRED_PRACTICES: ListRule = ListRule {
    label: "Preferred practices",
    singular: "preferred practice",
    required: true,
    max_items: 15,
    max_chars: 50,
};

const PREVIOUS_EXPERIENCES: ListRule = ListRule {
    label: "Previous experiences",
    singular: "previous experience",
    required: false,
    max_items: 20,
    max_chars: 200,
};

impl ListRule {
    /// Checks `items` and returns them trimmed.
    fn apply(&self, items: &[String]) -> Result<Vec<String>, GuidanceError> {
        if self.required && items.is_empty() {
            return Err(invalid(format!("At least one {} is required", self.singular)));
        }
        if items.len() > self.max_items {
            return Err(invalid(format!(
                "{} cannot exceed {} items",
                self.label, self.max_items
            )));
        }
        items
            .iter()
            .map(|item| {
                let item = item.trim();
                if item.is_empty() {
                    Err(invalid(format!("{} cannot contain empty entries", self.label)))
                } else if item.chars().count() > self.max_chars {
                    Err(invalid(format!(
                        "Each {} must be {} characters or less",
                        self.singular, self.max_chars
                    )))
                } else {
                    Ok(item.to_string())
                }
            })
            .collect()
    }
}

fn invalid(message: impl Into<String>) -> GuidanceError {
    GuidanceError::Validation(message.into())
}

/// Seeker profile as entered.
#[derive(Debug, Clone, Default)]
pub struct GuidanceUserContext {
    pub experience_level: String,
    pub spiritual_goals: Vec<String>,
    pub current_challenges: Vec<String>,
    pub preferred_practices: Vec<String>,
    pub previous_experiences: Vec<String>,
    pub time_available: Option<String>,
}

/// Command to request guidance on a topic.
#[derive(Debug, Clone, Default)]
pub struct RequestSpiritualGuidanceCommand {
    pub topic: String,
    pub user_context: Option<GuidanceUserContext>,
}

#[derive(Debug, Clone)]
pub struct RequestSpiritualGuidanceResult {
    /// Backend payload, unmodified.
    pub guidance: SpiritualGuidanceResponse,
}

/// Handler for spiritual guidance requests.
pub struct RequestSpiritualGuidanceHandler {
    repository: Arc<dyn AiRepository>,
}

impl RequestSpiritualGuidanceHandler {
    pub fn new(repository: Arc<dyn AiRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: RequestSpiritualGuidanceCommand,
    ) -> Result<RequestSpiritualGuidanceResult, GuidanceError> {
        let request = Self::validate(&cmd).inspect_err(|e| {
            tracing::debug!("Rejected guidance request: {}", e);
        })?;

        let guidance = self
            .repository
            .request_spiritual_guidance(&request)
            .await
            .inspect_err(|e| tracing::warn!("Guidance request failed: {}", e))?;

        tracing::debug!(topic = %request.topic, "Guidance received");
        Ok(RequestSpiritualGuidanceResult { guidance })
    }

    /// Validates the command and builds the trimmed request.
    fn validate(cmd: &RequestSpiritualGuidanceCommand) -> Result<SpiritualGuidanceRequest, GuidanceError> {
        let topic = cmd.topic.trim();
        if topic.is_empty() {
            return Err(invalid("Topic is required"));
        }
        if topic.chars().count() > MAX_TOPIC_LENGTH {
            return Err(invalid(format!(
                "Topic must be {} characters or less",
                MAX_TOPIC_LENGTH
            )));
        }

        let context = cmd
            .user_context
            .as_ref()
            .ok_or_else(|| invalid("User context is required"))?;

        let experience_level = ExperienceLevel::parse(context.experience_level.trim())
            .ok_or_else(|| {
                invalid("Invalid experience level. Must be beginner, intermediate, or advanced.")
            })?;

        let spiritual_goals = SPIRITUAL_GOALS.apply(&context.spiritual_goals)?;
        let current_challenges = CURRENT_CHALLENGES.apply(&context.current_challenges)?;
        let preferred_practices = PREFERRED_PRACTICES.apply(&context.preferred_practices)?;
        let previous_experiences = PREVIOUS_EXPERIENCES.apply(&context.previous_experiences)?;

        let time_available = match context.time_available.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(t) if t.chars().count() > MAX_TIME_AVAILABLE_LENGTH => {
                return Err(invalid(format!(
                    "Time available must be {} characters or less",
                    MAX_TIME_AVAILABLE_LENGTH
                )))
            }
            Some(t) => Some(t.to_string()),
        };

        Ok(SpiritualGuidanceRequest {
            topic: topic.to_string(),
            user_context: GuidanceContext {
                experience_level,
                spiritual_goals,
                current_challenges,
                preferred_practices,
                previous_experiences,
                time_available,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiRepository;
    use crate::ports::RepositoryError;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn valid_command() -> RequestSpiritualGuidanceCommand {
        RequestSpiritualGuidanceCommand {
            topic: "  Finding inner peace ".to_string(),
            user_context: Some(GuidanceUserContext {
                experience_level: "beginner".to_string(),
                spiritual_goals: strings(&[" calm ", "clarity"]),
                current_challenges: strings(&["stress"]),
                preferred_practices: strings(&["meditation"]),
                previous_experiences: vec![],
                time_available: Some("15 minutes".to_string()),
            }),
        }
    }

    fn with_context(f: impl FnOnce(&mut GuidanceUserContext)) -> RequestSpiritualGuidanceCommand {
        let mut cmd = valid_command();
        if let Some(ctx) = cmd.user_context.as_mut() {
            f(ctx);
        }
        cmd
    }

    fn message(cmd: &RequestSpiritualGuidanceCommand) -> String {
        RequestSpiritualGuidanceHandler::validate(cmd)
            .unwrap_err()
            .to_string()
    }

    mod validation {
        use super::*;

        #[test]
        fn accepts_and_trims_valid_command() {
            let request = RequestSpiritualGuidanceHandler::validate(&valid_command()).unwrap();
            assert_eq!(request.topic, "Finding inner peace");
            assert_eq!(request.user_context.spiritual_goals, strings(&["calm", "clarity"]));
            assert_eq!(request.user_context.experience_level, ExperienceLevel::Beginner);
        }

        #[test]
        fn topic_rules() {
            let mut cmd = valid_command();
            cmd.topic = "   ".to_string();
            assert_eq!(message(&cmd), "Topic is required");

            cmd.topic = "t".repeat(201);
            assert_eq!(message(&cmd), "Topic must be 200 characters or less");
        }

        #[test]
        fn user_context_is_required() {
            let cmd = RequestSpiritualGuidanceCommand {
                topic: "Peace".to_string(),
                user_context: None,
            };
            assert_eq!(message(&cmd), "User context is required");
        }

        #[test]
        fn experience_level_is_trimmed_before_parsing() {
            let cmd = with_context(|c| c.experience_level = " advanced ".to_string());
            let request = RequestSpiritualGuidanceHandler::validate(&cmd).unwrap();
            assert_eq!(request.user_context.experience_level, ExperienceLevel::Advanced);
        }

        #[test]
        fn experience_level_must_be_known() {
            let cmd = with_context(|c| c.experience_level = "master".to_string());
            assert_eq!(
                message(&cmd),
                "Invalid experience level. Must be beginner, intermediate, or advanced."
            );
        }

        #[test]
        fn required_lists_must_not_be_empty() {
            let cmd = with_context(|c| c.spiritual_goals.clear());
            assert_eq!(message(&cmd), "At least one spiritual goal is required");

            let cmd = with_context(|c| c.preferred_practices.clear());
            assert_eq!(message(&cmd), "At least one preferred practice is required");
        }

        #[test]
        fn list_sizes_are_capped() {
            let cmd = with_context(|c| c.current_challenges = vec!["x".to_string(); 11]);
            assert_eq!(message(&cmd), "Current challenges cannot exceed 10 items");

            let cmd = with_context(|c| c.preferred_practices = vec!["x".to_string(); 15]);
            assert!(RequestSpiritualGuidanceHandler::validate(&cmd).is_ok());

            let cmd = with_context(|c| c.previous_experiences = vec!["x".to_string(); 21]);
            assert_eq!(message(&cmd), "Previous experiences cannot exceed 20 items");
        }

        #[test]
        fn list_entries_are_checked() {
            let cmd = with_context(|c| c.spiritual_goals = strings(&["calm", "  "]));
            assert_eq!(message(&cmd), "Spiritual goals cannot contain empty entries");

            let cmd = with_context(|c| c.preferred_practices = vec!["p".repeat(51)]);
            assert_eq!(message(&cmd), "Each preferred practice must be 50 characters or less");
        }

        #[test]
        fn time_available_is_capped() {
            let cmd = with_context(|c| c.time_available = Some("t".repeat(51)));
            assert_eq!(message(&cmd), "Time available must be 50 characters or less");
        }
    }

    mod handling {
        use super::*;

        #[tokio::test]
        async fn forwards_trimmed_request_and_returns_payload() {
            let payload = SpiritualGuidanceResponse {
                guidance: "Begin each morning with stillness.".to_string(),
                practices: strings(&["breath counting"]),
                ..Default::default()
            };
            let repo = MockAiRepository::new().with_guidance_response(payload.clone());
            let handler = RequestSpiritualGuidanceHandler::new(Arc::new(repo.clone()));

            let result = handler.handle(valid_command()).await.unwrap();

            assert_eq!(result.guidance, payload);
            assert_eq!(repo.guidance_requests()[0].topic, "Finding inner peace");
        }

        #[tokio::test]
        async fn validation_failure_skips_backend() {
            let repo = MockAiRepository::new();
            let handler = RequestSpiritualGuidanceHandler::new(Arc::new(repo.clone()));

            let cmd = with_context(|c| c.current_challenges.clear());
            assert!(handler.handle(cmd).await.is_err());
            assert!(repo.guidance_requests().is_empty());
        }

        #[tokio::test]
        async fn maps_rate_limit() {
            let repo = MockAiRepository::new().with_guidance_error(RepositoryError::RateLimited);
            let handler = RequestSpiritualGuidanceHandler::new(Arc::new(repo));

            let err = handler.handle(valid_command()).await.unwrap_err();
            assert_eq!(err, GuidanceError::RateLimited);
        }
    }
}
