//! Guidance module - vocabulary shared by spiritual guidance and astrology
//! requests.

mod astrology;
mod experience;

pub use astrology::{BirthInfo, BirthSubject, ReadingType, MIN_BIRTH_YEAR};
pub use experience::ExperienceLevel;
