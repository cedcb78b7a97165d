use crate::calendars::islamic::{IslamicOverride, IslamicOverrides};
use crate::category::Category;
use crate::country::Country;
use crate::date::{Date, Weekday};
use crate::observed::{ObservedRule, Shift};
use crate::rule::{
    DateExpr, DateWindow, Observance, ObservedMode, Rule, SubdivFilter, YearFilter, YearRange,
};

/// ISO 3166-2 subdivision of a country.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subdivision {
    pub code: &'static str,
    pub name: &'static str,
    /// Alternative names accepted in place of the code.
    pub aliases: &'static [&'static str],
}

/// Everything known about a country, compiled from `data/*.csv`.
///
/// Labels are message ids in the default language; an empty label is
/// absent.
#[derive(Debug)]
pub(crate) struct CountryInfo {
    pub default_language: Option<&'static str>,
    pub languages: &'static [&'static str],
    pub categories: &'static [Category],
    /// Weekend day bitmasks (bit 0 is Monday) and the year they apply from.
    pub weekend: &'static [(isize, u8)],
    /// Dates whose holidays get observed days; empty means every date.
    pub observed_since: &'static [DateWindow],
    pub observed_label: &'static str,
    pub observed_label_before: &'static str,
    pub estimated_label: &'static str,
    pub observed_estimated_label: &'static str,
    pub substituted_label: &'static str,
    pub substituted_date_format: &'static str,
    pub start_year: Option<isize>,
    pub end_year: Option<isize>,
    pub subdivisions: &'static [Subdivision],
    pub rules: &'static [Rule],
    pub islamic: IslamicOverrides,
}

include!(concat!(env!("OUT_DIR"), "/country_data.rs"));

impl CountryInfo {
    /// Whether the country had holidays in `year` at all.
    pub(crate) fn covers(&self, year: isize) -> bool {
        self.start_year.map_or(true, |start| year >= start)
            && self.end_year.map_or(true, |end| year <= end)
    }

    pub(crate) fn weekend_mask(&self, year: isize) -> u8 {
        self.weekend
            .iter()
            .rev()
            .find(|(since, _)| *since <= year)
            .map_or(0, |(_, mask)| *mask)
    }

    #[inline]
    pub(crate) fn is_weekend(&self, date: Date) -> bool {
        (self.weekend_mask(date.year()) >> date.weekday() as u8) & 1 == 1
    }

    pub(crate) fn subdivision(&self, code_or_alias: &str) -> Option<&'static Subdivision> {
        self.subdivisions
            .iter()
            .find(|it| it.code == code_or_alias)
            .or_else(|| {
                self.subdivisions
                    .iter()
                    .find(|it| it.aliases.contains(&code_or_alias))
            })
    }
}

#[inline]
pub(crate) fn country_info(country: Country) -> &'static CountryInfo {
    // Country discriminants index the table generated alongside them
    &COUNTRY_INFO[country as usize]
}
