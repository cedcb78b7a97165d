//! Holiday calendars of one or more countries.

use std::collections::{btree_map, BTreeMap, BTreeSet};
use std::ops::Range;

use crate::category::Category;
use crate::country::Country;
use crate::data::country_info;
use crate::date::Date;
use crate::l10n::{self, Translator};
use crate::rule::Selection;
use crate::Error;

/// Separator between names of holidays sharing a date.
pub const NAME_DELIMITER: &str = "; ";

/// How [`HolidayCalendar::get_named`] compares holiday names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lookup {
    Contains,
    Exact,
    StartsWith,
    #[default]
    IContains,
    IExact,
    IStartsWith,
}

impl Lookup {
    fn matches(&self, query: &str, name: &str) -> bool {
        match self {
            Lookup::Contains => name.contains(query),
            Lookup::Exact => name == query,
            Lookup::StartsWith => name.starts_with(query),
            Lookup::IContains => name.to_lowercase().contains(&query.to_lowercase()),
            Lookup::IExact => name.to_lowercase() == query.to_lowercase(),
            Lookup::IStartsWith => name.to_lowercase().starts_with(&query.to_lowercase()),
        }
    }
}

/// One country selection feeding a calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Source {
    country: Country,
    subdiv: Option<&'static str>,
    categories: Vec<Category>,
    language: Option<String>,
    observed: bool,
    years: BTreeSet<isize>,
}

impl Source {
    fn populate(&mut self, year: isize) -> Option<crate::rule::YearHolidays> {
        if !self.years.insert(year) {
            return None;
        }
        log::debug!(
            "populating {} {year}{}",
            self.country,
            self.subdiv.map(|it| format!(" ({it})")).unwrap_or_default()
        );
        let selection = Selection {
            info: country_info(self.country),
            subdiv: self.subdiv,
            categories: &self.categories,
            observed: self.observed,
        };
        let translator = Translator::new(self.country, self.language.as_deref());
        Some(selection.populate(year, &translator))
    }
}

/// Ordered mapping of dates to holiday names.
///
/// A date carries at most one entry; names of holidays falling on the same
/// date are joined with [`NAME_DELIMITER`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HolidayCalendar {
    entries: BTreeMap<Date, String>,
    sources: Vec<Source>,
    years: BTreeSet<isize>,
    expand: bool,
    observed: bool,
    weekend_workdays: BTreeSet<Date>,
}

/// Starts building the holiday calendar of `country`.
pub fn country_holidays(country: Country) -> HolidayCalendarBuilder {
    HolidayCalendarBuilder {
        country,
        subdiv: None,
        years: Vec::new(),
        expand: true,
        observed: true,
        language: None,
        categories: vec![Category::Public],
    }
}

#[derive(Debug, Clone)]
pub struct HolidayCalendarBuilder {
    country: Country,
    subdiv: Option<String>,
    years: Vec<isize>,
    expand: bool,
    observed: bool,
    language: Option<String>,
    categories: Vec<Category>,
}

impl HolidayCalendarBuilder {
    /// Subdivision code or one of its aliases.
    pub fn subdiv(mut self, subdiv: impl Into<String>) -> Self {
        self.subdiv = Some(subdiv.into());
        self
    }

    pub fn year(mut self, year: isize) -> Self {
        self.years.push(year);
        self
    }

    pub fn years(mut self, years: impl IntoIterator<Item = isize>) -> Self {
        self.years.extend(years);
        self
    }

    /// Populate years on first lookup. Enabled by default.
    pub fn expand(mut self, expand: bool) -> Self {
        self.expand = expand;
        self
    }

    /// Add observed days of holidays falling on weekends. Enabled by
    /// default.
    pub fn observed(mut self, observed: bool) -> Self {
        self.observed = observed;
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn categories(mut self, categories: impl IntoIterator<Item = Category>) -> Self {
        self.categories = categories.into_iter().collect();
        self
    }

    pub fn build(self) -> Result<HolidayCalendar, Error> {
        let info = country_info(self.country);

        let subdiv = match &self.subdiv {
            Some(subdiv) => Some(
                info.subdivision(subdiv)
                    .ok_or(Error::SubdivisionNotAvailable)?
                    .code,
            ),
            None => None,
        };

        let mut categories = self.categories;
        categories.sort();
        categories.dedup();
        if categories.is_empty() {
            return Err(Error::CategoryNotAvailable);
        }
        if let Some(category) = categories.iter().find(|it| !info.categories.contains(*it)) {
            log::debug!("{} has no {category} holidays", self.country);
            return Err(Error::CategoryNotAvailable);
        }

        if let Some(language) = &self.language {
            l10n::check_language(self.country, language)?;
        }

        let mut calendar = HolidayCalendar {
            entries: BTreeMap::new(),
            sources: vec![Source {
                country: self.country,
                subdiv,
                categories,
                language: self.language,
                observed: self.observed,
                years: BTreeSet::new(),
            }],
            years: BTreeSet::new(),
            expand: self.expand,
            observed: self.observed,
            weekend_workdays: BTreeSet::new(),
        };
        for year in self.years {
            calendar.populate(year);
        }
        Ok(calendar)
    }
}

impl HolidayCalendar {
    fn populate(&mut self, year: isize) {
        self.years.insert(year);
        for index in 0..self.sources.len() {
            let Some(populated) = self.sources[index].populate(year) else {
                continue;
            };
            for (date, name) in populated.holidays {
                self.insert(date, name);
            }
            self.weekend_workdays.extend(populated.weekend_workdays);
        }
    }

    fn expand_to(&mut self, date: Date) {
        let year = date.year();
        if self.expand && !self.years.contains(&year) {
            self.populate(year);
        }
    }

    /// Countries the calendar was built from.
    pub fn countries(&self) -> Vec<Country> {
        let mut countries: Vec<_> = self.sources.iter().map(|it| it.country).collect();
        countries.dedup();
        countries
    }

    /// Language of the first country selection, if one was requested.
    pub fn language(&self) -> Option<&str> {
        self.sources.first().and_then(|it| it.language.as_deref())
    }

    pub fn is_observed(&self) -> bool {
        self.observed
    }

    pub fn is_expanding(&self) -> bool {
        self.expand
    }

    pub fn years(&self) -> &BTreeSet<isize> {
        &self.years
    }

    pub fn contains(&mut self, date: impl Into<Date>) -> bool {
        let date = date.into();
        self.expand_to(date);
        self.entries.contains_key(&date)
    }

    pub fn get(&mut self, date: impl Into<Date>) -> Option<&str> {
        let date = date.into();
        self.expand_to(date);
        self.entries.get(&date).map(String::as_str)
    }

    /// Names of every holiday on `date`.
    pub fn get_list(&mut self, date: impl Into<Date>) -> Vec<&str> {
        self.get(date)
            .map(|it| it.split(NAME_DELIMITER).collect())
            .unwrap_or_default()
    }

    /// Dates of populated holidays whose name matches `name`.
    ///
    /// With `split_multiple_names` every name of a date is compared on its
    /// own, otherwise the joined names are.
    pub fn get_named(&self, name: &str, lookup: Lookup, split_multiple_names: bool) -> Vec<Date> {
        self.entries
            .iter()
            .filter(|(_, names)| {
                if split_multiple_names {
                    names
                        .split(NAME_DELIMITER)
                        .any(|it| lookup.matches(name, it))
                } else {
                    lookup.matches(name, names)
                }
            })
            .map(|(date, _)| *date)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> Iter<'_> {
        Iter(self.entries.iter())
    }

    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        self.entries.keys().copied()
    }

    /// Adds a holiday, keeping names already present on `date`.
    pub fn insert(&mut self, date: impl Into<Date>, name: impl Into<String>) {
        let name = name.into();
        match self.entries.entry(date.into()) {
            btree_map::Entry::Vacant(entry) => {
                entry.insert(name);
            }
            btree_map::Entry::Occupied(mut entry) => {
                let names = entry.get_mut();
                let mut merged: Vec<&str> = names.split(NAME_DELIMITER).collect();
                merged.extend(name.split(NAME_DELIMITER));
                merged.sort_unstable();
                merged.dedup();
                *names = merged.join(NAME_DELIMITER);
            }
        }
    }

    pub fn pop(&mut self, date: impl Into<Date>) -> Option<String> {
        let date = date.into();
        self.expand_to(date);
        self.entries.remove(&date)
    }

    /// Removes holidays matching `name` (case-insensitive substring) and
    /// returns their dates.
    ///
    /// Other holidays sharing a date with a removed one are kept, unless
    /// `name` itself contains the [`NAME_DELIMITER`] in which case it has to
    /// match the joined names.
    pub fn pop_named(&mut self, name: &str) -> Result<Vec<Date>, Error> {
        let use_exact_name = name.contains(NAME_DELIMITER);
        let dates = self.get_named(name, Lookup::IContains, !use_exact_name);
        if dates.is_empty() {
            return Err(Error::HolidayNotFound);
        }

        let query = name.to_lowercase();
        for date in &dates {
            let Some(names) = self.entries.remove(date) else {
                continue;
            };
            if use_exact_name {
                continue;
            }
            let rest: Vec<&str> = names
                .split(NAME_DELIMITER)
                .filter(|it| !it.to_lowercase().contains(&query))
                .collect();
            if !rest.is_empty() {
                self.entries.insert(*date, rest.join(NAME_DELIMITER));
            }
        }
        Ok(dates)
    }

    /// Holiday dates in `range`; a reversed range is walked backwards.
    pub fn range<D: Into<Date>>(&mut self, range: Range<D>) -> Vec<Date> {
        let start: Date = range.start.into();
        let end: Date = range.end.into();
        if self.expand {
            for year in start.year().min(end.year())..=start.year().max(end.year()) {
                if !self.years.contains(&year) {
                    self.populate(year);
                }
            }
        }

        if start <= end {
            self.entries.range(start..end).map(|(date, _)| *date).collect()
        } else {
            self.entries
                .range(end.add_days(1)..=start)
                .rev()
                .map(|(date, _)| *date)
                .collect()
        }
    }

    fn is_weekend(&self, date: Date) -> bool {
        self.sources
            .iter()
            .any(|it| country_info(it.country).is_weekend(date))
    }

    /// Whether `date` is a working day.
    ///
    /// Weekend days count as workdays only when a holiday was substituted
    /// from them.
    pub fn is_workday(&mut self, date: impl Into<Date>) -> bool {
        let date = date.into();
        self.expand_to(date);
        if self.is_weekend(date) {
            self.weekend_workdays.contains(&date)
        } else {
            !self.entries.contains_key(&date)
        }
    }

    /// The `n`-th workday after `date`, or before it for negative `n`.
    pub fn get_nth_workday(&mut self, date: impl Into<Date>, n: isize) -> Date {
        let step = n.signum();
        let mut date = date.into();
        for _ in 0..n.unsigned_abs() {
            date = date.add_days(step);
            while !self.is_workday(date) {
                date = date.add_days(step);
            }
        }
        date
    }

    /// Number of workdays between two dates, both included.
    pub fn get_workdays_number(&mut self, start: impl Into<Date>, end: impl Into<Date>) -> usize {
        let (mut start, mut end) = (start.into(), end.into());
        if start > end {
            std::mem::swap(&mut start, &mut end);
        }
        let mut count = 0;
        let mut date = start;
        while date <= end {
            if self.is_workday(date) {
                count += 1;
            }
            date = date.add_days(1);
        }
        count
    }
}

impl<D, S> Extend<(D, S)> for HolidayCalendar
where
    D: Into<Date>,
    S: Into<String>,
{
    fn extend<I: IntoIterator<Item = (D, S)>>(&mut self, iter: I) {
        for (date, name) in iter {
            self.insert(date, name);
        }
    }
}

impl std::ops::AddAssign for HolidayCalendar {
    fn add_assign(&mut self, rhs: Self) {
        let HolidayCalendar {
            entries,
            sources,
            years,
            expand,
            observed,
            weekend_workdays,
        } = rhs;

        self.sources.extend(sources);
        for (date, name) in entries {
            self.insert(date, name);
        }
        self.weekend_workdays.extend(weekend_workdays);
        self.expand |= expand;
        self.observed |= observed;

        let years: BTreeSet<isize> = self.years.union(&years).copied().collect();
        for year in years {
            self.populate(year);
        }
    }
}

impl std::ops::Add for HolidayCalendar {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self::Output {
        self += rhs;
        self
    }
}

pub struct Iter<'a>(btree_map::Iter<'a, Date, String>);

impl<'a> Iterator for Iter<'a> {
    type Item = (Date, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(date, name)| (*date, name.as_str()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.next_back().map(|(date, name)| (*date, name.as_str()))
    }
}

impl<'a> IntoIterator for &'a HolidayCalendar {
    type Item = (Date, &'a str);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for HolidayCalendar {
    type Item = (Date, String);
    type IntoIter = btree_map::IntoIter<Date, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(date: &str) -> Date {
        date.parse().unwrap()
    }

    fn manual() -> HolidayCalendar {
        HolidayCalendar {
            entries: BTreeMap::new(),
            sources: Vec::new(),
            years: BTreeSet::new(),
            expand: false,
            observed: false,
            weekend_workdays: BTreeSet::new(),
        }
    }

    #[test]
    fn names_are_merged() {
        let mut calendar = manual();
        calendar.insert(day("2024-01-01"), "New Year's Day");
        calendar.insert(day("2024-01-01"), "Bank Holiday");
        calendar.insert(day("2024-01-01"), "New Year's Day");
        assert_eq!(
            calendar.get(day("2024-01-01")),
            Some("Bank Holiday; New Year's Day")
        );
        assert_eq!(
            calendar.get_list(day("2024-01-01")),
            vec!["Bank Holiday", "New Year's Day"]
        );
        assert_eq!(calendar.len(), 1);
    }

    #[test]
    fn named_lookups() {
        let mut calendar = manual();
        calendar.extend([
            (day("2024-01-01"), "New Year's Day; Bank Holiday"),
            (day("2024-12-25"), "Christmas Day"),
            (day("2024-12-26"), "Boxing Day"),
        ]);
        assert_eq!(
            calendar.get_named("day", Lookup::IContains, true),
            vec![day("2024-01-01"), day("2024-12-25"), day("2024-12-26")]
        );
        assert_eq!(
            calendar.get_named("Bank Holiday", Lookup::Exact, true),
            vec![day("2024-01-01")]
        );
        assert!(calendar
            .get_named("Bank Holiday", Lookup::Exact, false)
            .is_empty());
        assert_eq!(
            calendar.get_named("christmas", Lookup::IStartsWith, true),
            vec![day("2024-12-25")]
        );
        assert!(calendar
            .get_named("christmas", Lookup::StartsWith, true)
            .is_empty());
    }

    #[test]
    fn pop_named_keeps_other_names() {
        let mut calendar = manual();
        calendar.extend([
            (day("2024-01-01"), "New Year's Day; Bank Holiday"),
            (day("2024-12-25"), "Christmas Day"),
        ]);
        assert_eq!(calendar.pop_named("bank"), Ok(vec![day("2024-01-01")]));
        assert_eq!(calendar.get(day("2024-01-01")), Some("New Year's Day"));
        assert_eq!(
            calendar.pop_named("Easter"),
            Err(Error::HolidayNotFound)
        );
        assert_eq!(calendar.pop(day("2024-12-25")), Some("Christmas Day".into()));
        assert_eq!(calendar.pop(day("2024-12-25")), None);
    }

    #[test]
    fn ranges() {
        let mut calendar = manual();
        calendar.extend([
            (day("2024-01-01"), "A"),
            (day("2024-01-05"), "B"),
            (day("2024-01-10"), "C"),
        ]);
        assert_eq!(
            calendar.range(day("2024-01-01")..day("2024-01-10")),
            vec![day("2024-01-01"), day("2024-01-05")]
        );
        assert_eq!(
            calendar.range(day("2024-01-10")..day("2024-01-01")),
            vec![day("2024-01-10"), day("2024-01-05")]
        );
        assert!(calendar
            .range(day("2024-01-02")..day("2024-01-02"))
            .is_empty());
    }

    #[test]
    fn iterates_in_date_order() {
        let mut calendar = manual();
        calendar.insert(day("2024-12-25"), "Christmas Day");
        calendar.insert(day("2024-01-01"), "New Year's Day");
        let names: Vec<_> = calendar.iter().map(|(_, name)| name).collect();
        assert_eq!(names, vec!["New Year's Day", "Christmas Day"]);
        assert_eq!(
            calendar.into_iter().next(),
            Some((day("2024-01-01"), "New Year's Day".to_string()))
        );
    }
}
