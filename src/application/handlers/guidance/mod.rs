//! Guidance handlers.
//!
//! Commands for spiritual guidance and astrology readings. Both validate
//! input fully before any backend call.

mod request_astrology_reading;
mod request_spiritual_guidance;

pub use request_astrology_reading::{
    BirthInfoInput, RequestAstrologyReadingCommand, RequestAstrologyReadingHandler,
    RequestAstrologyReadingResult,
};
pub use request_spiritual_guidance::{
    GuidanceUserContext, RequestSpiritualGuidanceCommand, RequestSpiritualGuidanceHandler,
    RequestSpiritualGuidanceResult,
};
