//! Conversions from the calendars holidays are defined in to Gregorian
//! dates.

pub mod chinese;
pub mod gregorian;
pub mod hebrew;
pub mod islamic;
pub mod julian;
pub mod korean;
pub mod persian;
