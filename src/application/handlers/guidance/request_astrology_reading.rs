//! RequestAstrologyReading command handler.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use crate::application::errors::AstrologyError;
use crate::domain::guidance::{BirthInfo, BirthSubject, ReadingType};
use crate::ports::{AiRepository, AstrologyReadingRequest, AstrologyReadingResponse};

/// Birth details as entered.
#[derive(Debug, Clone, Default)]
pub struct BirthInfoInput {
    /// `YYYY-MM-DD`
    pub date_of_birth: String,
    /// `HH:MM`, 24-hour
    pub time_of_birth: String,
    pub place_of_birth: String,
    pub timezone: Option<String>,
}

impl BirthInfoInput {
    pub fn new(
        date_of_birth: impl Into<String>,
        time_of_birth: impl Into<String>,
        place_of_birth: impl Into<String>,
    ) -> Self {
        Self {
            date_of_birth: date_of_birth.into(),
            time_of_birth: time_of_birth.into(),
            place_of_birth: place_of_birth.into(),
            timezone: None,
        }
    }

    fn validate(&self, subject: BirthSubject, today: NaiveDate) -> Result<BirthInfo, AstrologyError> {
        Ok(BirthInfo::validate_at(
            subject,
            &self.date_of_birth,
            &self.time_of_birth,
            &self.place_of_birth,
            self.timezone.as_deref(),
            today,
        )?)
    }
}

/// Command to request an astrology reading.
#[derive(Debug, Clone, Default)]
pub struct RequestAstrologyReadingCommand {
    /// Wire name of the reading, e.g. `natal_chart`.
    pub reading_type: String,
    pub birth_info: BirthInfoInput,
    pub partner_birth_info: Option<BirthInfoInput>,
}

#[derive(Debug, Clone)]
pub struct RequestAstrologyReadingResult {
    pub reading: AstrologyReadingResponse,
}

/// Handler for astrology readings.
pub struct RequestAstrologyReadingHandler {
    repository: Arc<dyn AiRepository>,
}

impl RequestAstrologyReadingHandler {
    pub fn new(repository: Arc<dyn AiRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(
        &self,
        cmd: RequestAstrologyReadingCommand,
    ) -> Result<RequestAstrologyReadingResult, AstrologyError> {
        let request = Self::validate(&cmd, Utc::now().date_naive()).inspect_err(|e| {
            tracing::debug!("Rejected astrology request: {}", e);
        })?;

        let reading = self
            .repository
            .request_astrology_reading(&request)
            .await
            .inspect_err(|e| tracing::warn!("Astrology request failed: {}", e))?;

        tracing::debug!(reading_type = %request.reading_type, "Astrology reading received");
        Ok(RequestAstrologyReadingResult { reading })
    }

    /// Checks subject birth data, reading type, the partner rule, then
    /// partner birth data.
    fn validate(
        cmd: &RequestAstrologyReadingCommand,
        today: NaiveDate,
    ) -> Result<AstrologyReadingRequest, AstrologyError> {
        let birth_info = cmd.birth_info.validate(BirthSubject::Primary, today)?;

        let reading_type = ReadingType::parse(cmd.reading_type.trim()).ok_or_else(|| {
            let allowed: Vec<&str> = ReadingType::ALL.iter().map(ReadingType::as_str).collect();
            AstrologyError::Validation(format!(
                "Invalid reading type. Must be one of: {}",
                allowed.join(", ")
            ))
        })?;

        let partner_birth_info = match (&cmd.partner_birth_info, reading_type.requires_partner()) {
            (None, true) => {
                return Err(AstrologyError::Validation(format!(
                    "Partner birth information is required for {} readings",
                    reading_type.label()
                )))
            }
            (Some(_), false) => {
                return Err(AstrologyError::Validation(
                    "Partner birth information is only needed for compatibility, composite chart, or synastry readings"
                        .to_string(),
                ))
            }
            (Some(partner), true) => Some(partner.validate(BirthSubject::Partner, today)?),
            (None, false) => None,
        };

        Ok(AstrologyReadingRequest {
            reading_type,
            birth_info,
            partner_birth_info,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::MockAiRepository;
    use crate::ports::RepositoryError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 20).unwrap()
    }

    fn natal() -> RequestAstrologyReadingCommand {
        RequestAstrologyReadingCommand {
            reading_type: "natal_chart".to_string(),
            birth_info: BirthInfoInput::new("1990-01-15", "14:30", "Santa Fe, New Mexico"),
            partner_birth_info: None,
        }
    }

    fn message(cmd: &RequestAstrologyReadingCommand) -> String {
        RequestAstrologyReadingHandler::validate(cmd, today())
            .unwrap_err()
            .to_string()
    }

    mod validation {
        use super::*;

        #[test]
        fn accepts_natal_chart() {
            let request = RequestAstrologyReadingHandler::validate(&natal(), today()).unwrap();
            assert_eq!(request.reading_type, ReadingType::NatalChart);
            assert!(request.partner_birth_info.is_none());
        }

        #[test]
        fn reports_bad_date_format() {
            let mut cmd = natal();
            cmd.birth_info.date_of_birth = "15-01-1990".to_string();
            assert!(message(&cmd).contains("date of birth must be in YYYY-MM-DD format"));
        }

        #[test]
        fn subject_birth_data_is_checked_before_reading_type() {
            let mut cmd = natal();
            cmd.reading_type = "tarot".to_string();
            cmd.birth_info.time_of_birth = "25:00".to_string();
            assert_eq!(message(&cmd), "Your time of birth must be in HH:MM format (24-hour)");
        }

        #[test]
        fn rejects_unknown_reading_type() {
            let mut cmd = natal();
            cmd.reading_type = "tarot".to_string();
            assert!(message(&cmd).starts_with("Invalid reading type. Must be one of: natal_chart"));
        }

        #[test]
        fn relationship_readings_require_partner() {
            for reading_type in ["compatibility", "composite_chart", "synastry"] {
                let mut cmd = natal();
                cmd.reading_type = reading_type.to_string();
                assert!(message(&cmd).contains("Partner birth information is required"));
            }
        }

        #[test]
        fn other_readings_reject_partner() {
            let mut cmd = natal();
            cmd.partner_birth_info = Some(BirthInfoInput::new("1991-05-05", "09:00", "Taos"));
            assert_eq!(
                message(&cmd),
                "Partner birth information is only needed for compatibility, composite chart, or synastry readings"
            );
        }

        #[test]
        fn partner_data_uses_partner_prefix() {
            let mut cmd = natal();
            cmd.reading_type = "synastry".to_string();
            cmd.partner_birth_info = Some(BirthInfoInput::new("2030-01-01", "09:00", "Taos"));
            assert_eq!(message(&cmd), "Partner's date of birth cannot be in the future");
        }

        #[test]
        fn accepts_valid_compatibility() {
            let mut cmd = natal();
            cmd.reading_type = "compatibility".to_string();
            cmd.partner_birth_info = Some(BirthInfoInput::new("1991-05-05", "09:00", "Taos"));
            let request = RequestAstrologyReadingHandler::validate(&cmd, today()).unwrap();
            assert_eq!(
                request.partner_birth_info.unwrap().place_of_birth(),
                "Taos"
            );
        }
    }

    mod handling {
        use super::*;

        #[tokio::test]
        async fn returns_backend_reading() {
            let repo = MockAiRepository::new().with_astrology_response(AstrologyReadingResponse {
                reading: "Your sun sits in Capricorn.".to_string(),
                ..Default::default()
            });
            let handler = RequestAstrologyReadingHandler::new(Arc::new(repo.clone()));

            let result = handler.handle(natal()).await.unwrap();
            assert_eq!(result.reading.reading, "Your sun sits in Capricorn.");
            assert_eq!(repo.astrology_requests().len(), 1);
        }

        #[tokio::test]
        async fn maps_invalid_birth_data() {
            let repo = MockAiRepository::new()
                .with_astrology_error(RepositoryError::InvalidBirthData("unknown place".to_string()));
            let handler = RequestAstrologyReadingHandler::new(Arc::new(repo));

            let err = handler.handle(natal()).await.unwrap_err();
            assert_eq!(
                err.to_string(),
                "Invalid birth data. Please check your birth information and try again."
            );
        }
    }
}
