//! The four independent day classifiers: PTI, Vedic, Personal, and
//! Panch Pakshi bird periods.
//!
//! Each classifier is a state-free mapping from (date, location, optional
//! birth chart) to a discrete label, a numeric score, and an explanation.
//! They share the aspect/scoring building blocks from `muhurta_aspects`
//! but encode distinct rule sets and priority orders; a score from one
//! classifier is never reinterpreted by another.
//!
//! Labels are enums with a separate presentation mapping — control flow
//! never matches on display strings.

pub mod birds;
pub mod error;
pub mod personal;
pub mod pti;
pub mod result;
pub mod vedic;

pub use birds::{
    Bird, BirdActivity, BirdClass, BirdClassifier, BirdConfig, BirdPeriod, BirdScheduleConfig,
    birth_bird, bird_periods_for_date,
};
pub use error::ClassifyError;
pub use personal::{
    PersonalClassifier, PersonalConfig, PersonalDayScore, PersonalQuality, score_personal_day,
};
pub use pti::{PtiClass, PtiClassifier, PtiConfig, pti_from_aspects};
pub use result::{ClassificationResult, DayClassifier};
pub use vedic::{
    VedicClass, VedicClassifier, VedicConfig, VedicDayContext, vedic_from_context,
};
