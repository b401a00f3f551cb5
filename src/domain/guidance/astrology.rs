//! Astrology value objects: reading types and validated birth data.

use chrono::{Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;

/// Earliest birth year accepted for a chart.
pub const MIN_BIRTH_YEAR: i32 = 1900;

const MAX_PLACE_LENGTH: usize = 100;
const MIN_PLACE_LENGTH: usize = 2;
const MAX_TIMEZONE_LENGTH: usize = 50;

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("date pattern compiles"));
static TIME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$").expect("time pattern compiles"));
static TIMEZONE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_+\-0-9/]+$").expect("timezone pattern compiles"));

/// Kind of astrology reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingType {
    NatalChart,
    DailyHoroscope,
    Compatibility,
    Transit,
    SolarReturn,
    LunarReturn,
    CompositeChart,
    Synastry,
}

impl ReadingType {
    /// Every reading type, in wire order.
    pub const ALL: [ReadingType; 8] = [
        ReadingType::NatalChart,
        ReadingType::DailyHoroscope,
        ReadingType::Compatibility,
        ReadingType::Transit,
        ReadingType::SolarReturn,
        ReadingType::LunarReturn,
        ReadingType::CompositeChart,
        ReadingType::Synastry,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingType::NatalChart => "natal_chart",
            ReadingType::DailyHoroscope => "daily_horoscope",
            ReadingType::Compatibility => "compatibility",
            ReadingType::Transit => "transit",
            ReadingType::SolarReturn => "solar_return",
            ReadingType::LunarReturn => "lunar_return",
            ReadingType::CompositeChart => "composite_chart",
            ReadingType::Synastry => "synastry",
        }
    }

    /// Human form of the wire name ("composite chart").
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }

    /// Relationship readings need a second chart.
    pub fn requires_partner(&self) -> bool {
        matches!(
            self,
            ReadingType::Compatibility | ReadingType::CompositeChart | ReadingType::Synastry
        )
    }
}

impl std::fmt::Display for ReadingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whose birth data is being validated; selects the message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BirthSubject {
    Primary,
    Partner,
}

impl BirthSubject {
    fn prefix(&self) -> &'static str {
        match self {
            BirthSubject::Primary => "Your",
            BirthSubject::Partner => "Partner's",
        }
    }
}

/// Validated birth data for one chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthInfo {
    date_of_birth: NaiveDate,
    time_of_birth: String,
    place_of_birth: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    timezone: Option<String>,
}

impl BirthInfo {
    /// Validates raw birth fields against today's UTC date.
    pub fn new(
        subject: BirthSubject,
        date_of_birth: &str,
        time_of_birth: &str,
        place_of_birth: &str,
        timezone: Option<&str>,
    ) -> Result<Self, DomainError> {
        Self::validate_at(
            subject,
            date_of_birth,
            time_of_birth,
            place_of_birth,
            timezone,
            Utc::now().date_naive(),
        )
    }

    /// Validates raw birth fields against an explicit `today`.
    ///
    /// Checks run date, time, place, timezone; inputs are trimmed.
    pub fn validate_at(
        subject: BirthSubject,
        date_of_birth: &str,
        time_of_birth: &str,
        place_of_birth: &str,
        timezone: Option<&str>,
        today: NaiveDate,
    ) -> Result<Self, DomainError> {
        let p = subject.prefix();

        let date_of_birth = Self::validate_date(p, date_of_birth.trim(), today)?;

        let time_of_birth = time_of_birth.trim();
        if time_of_birth.is_empty() {
            return Err(DomainError::validation(
                "timeOfBirth",
                format!("{p} time of birth is required"),
            ));
        }
        if !TIME_PATTERN.is_match(time_of_birth) {
            return Err(DomainError::validation(
                "timeOfBirth",
                format!("{p} time of birth must be in HH:MM format (24-hour)"),
            ));
        }

        let place_of_birth = place_of_birth.trim();
        let place_len = place_of_birth.chars().count();
        if !(MIN_PLACE_LENGTH..=MAX_PLACE_LENGTH).contains(&place_len) {
            return Err(DomainError::validation(
                "placeOfBirth",
                format!(
                    "{p} place of birth must be between {MIN_PLACE_LENGTH} and {MAX_PLACE_LENGTH} characters"
                ),
            ));
        }

        let timezone = match timezone.map(str::trim).filter(|tz| !tz.is_empty()) {
            None => None,
            Some(tz) if tz.chars().count() > MAX_TIMEZONE_LENGTH => {
                return Err(DomainError::validation(
                    "timezone",
                    format!("{p} timezone must be {MAX_TIMEZONE_LENGTH} characters or less"),
                ))
            }
            Some(tz) if !TIMEZONE_PATTERN.is_match(tz) => {
                return Err(DomainError::validation(
                    "timezone",
                    format!("{p} timezone contains invalid characters"),
                ))
            }
            Some(tz) => Some(tz.to_string()),
        };

        Ok(Self {
            date_of_birth,
            time_of_birth: time_of_birth.to_string(),
            place_of_birth: place_of_birth.to_string(),
            timezone,
        })
    }

    pub fn date_of_birth(&self) -> NaiveDate {
        self.date_of_birth
    }

    pub fn time_of_birth(&self) -> &str {
        &self.time_of_birth
    }

    pub fn place_of_birth(&self) -> &str {
        &self.place_of_birth
    }

    pub fn timezone(&self) -> Option<&str> {
        self.timezone.as_deref()
    }

    fn validate_date(p: &str, raw: &str, today: NaiveDate) -> Result<NaiveDate, DomainError> {
        if raw.is_empty() {
            return Err(DomainError::validation(
                "dateOfBirth",
                format!("{p} date of birth is required"),
            ));
        }
        if !DATE_PATTERN.is_match(raw) {
            return Err(DomainError::validation(
                "dateOfBirth",
                format!("{p} date of birth must be in YYYY-MM-DD format"),
            ));
        }
        let date = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
            DomainError::validation("dateOfBirth", format!("{p} date of birth is not a valid date"))
        })?;
        if date > today {
            return Err(DomainError::validation(
                "dateOfBirth",
                format!("{p} date of birth cannot be in the future"),
            ));
        }
        if date.year() < MIN_BIRTH_YEAR {
            return Err(DomainError::validation(
                "dateOfBirth",
                format!("{p} date of birth must be in {MIN_BIRTH_YEAR} or later"),
            ));
        }
        Ok(date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn check(date: &str, time: &str, place: &str, tz: Option<&str>) -> Result<BirthInfo, DomainError> {
        BirthInfo::validate_at(BirthSubject::Primary, date, time, place, tz, today())
    }

    mod reading_type {
        use super::*;

        #[test]
        fn parses_every_wire_name() {
            for t in ReadingType::ALL {
                assert_eq!(ReadingType::parse(t.as_str()), Some(t));
            }
            assert_eq!(ReadingType::parse("tarot"), None);
        }

        #[test]
        fn relationship_readings_require_partner() {
            let needing: Vec<_> = ReadingType::ALL
                .into_iter()
                .filter(ReadingType::requires_partner)
                .collect();
            assert_eq!(
                needing,
                vec![
                    ReadingType::Compatibility,
                    ReadingType::CompositeChart,
                    ReadingType::Synastry
                ]
            );
        }

        #[test]
        fn serde_matches_wire_names() {
            assert_eq!(
                serde_json::to_string(&ReadingType::SolarReturn).unwrap(),
                "\"solar_return\""
            );
            assert_eq!(ReadingType::CompositeChart.label(), "composite chart");
        }
    }

    mod birth_info {
        use super::*;

        #[test]
        fn accepts_valid_data_and_trims() {
            let info = check(" 1990-01-15 ", "08:30", "  Lisbon, Portugal ", Some("Europe/Lisbon")).unwrap();
            assert_eq!(info.date_of_birth(), NaiveDate::from_ymd_opt(1990, 1, 15).unwrap());
            assert_eq!(info.place_of_birth(), "Lisbon, Portugal");
            assert_eq!(info.timezone(), Some("Europe/Lisbon"));
        }

        #[test]
        fn rejects_wrong_date_format() {
            let err = check("15-01-1990", "08:30", "Lisbon", None).unwrap_err();
            assert_eq!(err.message, "Your date of birth must be in YYYY-MM-DD format");
        }

        #[test]
        fn rejects_impossible_dates() {
            let err = check("1990-02-30", "08:30", "Lisbon", None).unwrap_err();
            assert_eq!(err.message, "Your date of birth is not a valid date");
        }

        #[test]
        fn rejects_future_dates() {
            let err = check("2024-06-02", "08:30", "Lisbon", None).unwrap_err();
            assert_eq!(err.message, "Your date of birth cannot be in the future");
            assert!(check("2024-06-01", "08:30", "Lisbon", None).is_ok());
        }

        #[test]
        fn rejects_dates_before_1900() {
            let err = check("1899-12-31", "08:30", "Lisbon", None).unwrap_err();
            assert_eq!(err.message, "Your date of birth must be in 1900 or later");
            assert!(check("1900-01-01", "08:30", "Lisbon", None).is_ok());
        }

        #[test]
        fn rejects_bad_times() {
            for time in ["24:00", "8:30", "08:60", "0830"] {
                let err = check("1990-01-15", time, "Lisbon", None).unwrap_err();
                assert_eq!(err.message, "Your time of birth must be in HH:MM format (24-hour)");
            }
            let err = check("1990-01-15", "", "Lisbon", None).unwrap_err();
            assert_eq!(err.message, "Your time of birth is required");
        }

        #[test]
        fn place_length_is_bounded() {
            assert!(check("1990-01-15", "23:59", "X", None).is_err());
            assert!(check("1990-01-15", "23:59", &"x".repeat(101), None).is_err());
            assert!(check("1990-01-15", "23:59", &"x".repeat(100), None).is_ok());
        }

        #[test]
        fn timezone_rules() {
            assert!(check("1990-01-15", "00:00", "Rome", Some("UTC+1")).is_ok());
            let err = check("1990-01-15", "00:00", "Rome", Some("Europe Rome")).unwrap_err();
            assert_eq!(err.message, "Your timezone contains invalid characters");
            let err = check("1990-01-15", "00:00", "Rome", Some(&"A".repeat(51))).unwrap_err();
            assert_eq!(err.message, "Your timezone must be 50 characters or less");
        }

        #[test]
        fn partner_messages_use_partner_prefix() {
            let err = BirthInfo::validate_at(
                BirthSubject::Partner,
                "1990/01/15",
                "08:30",
                "Lisbon",
                None,
                today(),
            )
            .unwrap_err();
            assert_eq!(err.message, "Partner's date of birth must be in YYYY-MM-DD format");
        }

        #[test]
        fn serializes_camel_case_with_iso_date() {
            let info = check("1990-01-15", "08:30", "Lisbon", None).unwrap();
            let value = serde_json::to_value(&info).unwrap();
            assert_eq!(value["dateOfBirth"], "1990-01-15");
            assert_eq!(value["timeOfBirth"], "08:30");
            assert!(value.get("timezone").is_none());
        }
    }
}
