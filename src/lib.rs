pub mod calendar;
pub mod calendars;
mod category;
mod country;
mod data;
mod date;
pub mod ical;
pub mod l10n;
pub mod observed;
pub mod query;
mod rule;

pub use calendar::{country_holidays, HolidayCalendar, HolidayCalendarBuilder, Lookup};
pub use category::Category;
pub use country::{Country, CountrySet};
pub use data::Subdivision;
pub use date::{Date, DateExt, Weekday};
pub use ical::ICalExporter;
pub use l10n::{list_localized_countries, list_supported_countries};
pub use query::Query;

/// First and last year of the window open ended queries are bounded by.
pub use data::{DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR};

/// Represents a holiday.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Holiday {
    /// Date of holiday.
    pub date: Date,
    /// two-letter country code defined in ISO 3166-1 alpha-2.
    pub code: Country,
    /// Name of holiday.
    pub name: String,
}

pub fn get(country: Country, date: impl Into<Date>) -> query::Iter {
    Query::country(country).and(Query::date(date)).run()
}
pub fn get_in_many<C>(countries: C, date: impl Into<Date>) -> query::Iter
where
    C: IntoIterator<Item = Country>,
{
    Query::countries(countries).and(Query::date(date)).run()
}
#[inline]
pub fn contains(country: Country, date: impl Into<Date>) -> bool {
    get(country, date).next().is_some()
}
#[inline]
pub fn contains_in_many<C>(countries: C, date: impl Into<Date>) -> bool
where
    C: IntoIterator<Item = Country>,
{
    get_in_many(countries, date).next().is_some()
}
#[inline]
pub fn query(query: Query) -> query::Iter {
    query.run()
}

/// Error states the holiday crate might encounter.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Holiday is not available for this country.
    #[error("Holiday is not available for this country")]
    CountryNotAvailable,
    /// Subdivision is not defined for the country.
    #[error("Subdivision is not available for this country")]
    SubdivisionNotAvailable,
    /// Category is not defined for the country.
    #[error("Category is not available for this country")]
    CategoryNotAvailable,
    /// No translation into the requested language.
    #[error("Language is not available for this country")]
    LanguageNotAvailable,
    /// Language code is not of the `ll` or `ll_CC` form.
    #[error("Invalid language code")]
    InvalidLanguageCode,
    #[error("Invalid date")]
    InvalidDate,
    /// Conversion to another date format is not supported.
    #[error("Date is too large for conversion")]
    DateTooLarge,
    #[error("Holiday not found")]
    HolidayNotFound,
    #[error("Export path does not exist")]
    ExportPathNotFound,
    #[error("Export path is not a directory")]
    ExportPathNotDirectory,
    /// Nothing to export.
    #[error("Calendar has no holidays to export")]
    EmptyExport,
    #[error("I/O error: {0}")]
    Io(std::io::ErrorKind),
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Error::Io(value.kind())
    }
}
