//! Holidays of several countries filtered by date.

use crate::calendar::{country_holidays, NAME_DELIMITER};
use crate::country::{Country, CountrySet};
use crate::data::{DEFAULT_MAX_YEAR, DEFAULT_MIN_YEAR};
use crate::{date::Date, Holiday};

use std::ops::{Bound, Range, RangeBounds};

/// Years reachable through [`Query::year`] and [`Query::year_range`].
const FIRST_YEAR: isize = 1;
const LAST_YEAR: isize = 9999;

/// Selection of countries and dates, combined with [`Query::and`] or `&`.
///
/// Open ended date ranges are bounded by [`DEFAULT_MIN_YEAR`] and
/// [`DEFAULT_MAX_YEAR`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query {
    countries: CountrySet,
    date_filter: Option<Span>,
}

impl Query {
    pub fn country(value: Country) -> Self {
        Query {
            countries: value.into(),
            date_filter: None,
        }
    }

    pub fn countries<I>(value: I) -> Self
    where
        I: IntoIterator<Item = Country>,
    {
        Query {
            countries: value.into_iter().collect(),
            date_filter: None,
        }
    }

    pub fn year(value: isize) -> Self {
        Self::year_range(value..=value)
    }

    pub fn year_range<R: RangeBounds<isize>>(value: R) -> Self {
        let from = match value.start_bound() {
            Bound::Included(it) => Some(year_start(*it)),
            Bound::Excluded(it) => Some(year_start(it.saturating_add(1))),
            Bound::Unbounded => None,
        };
        let to = match value.end_bound() {
            Bound::Included(it) => Some(year_start(it.saturating_add(1))),
            Bound::Excluded(it) => Some(year_start(*it)),
            Bound::Unbounded => None,
        };
        Query::dates(Span { from, to })
    }

    pub fn date(value: impl Into<Date>) -> Self {
        let date = value.into();
        Query::dates(Span {
            from: Some(date),
            to: Some(date.add_days(1)),
        })
    }

    pub fn date_range<D, R>(value: R) -> Self
    where
        D: Into<Date> + Clone,
        R: RangeBounds<D>,
    {
        let date = |it: &D| -> Date { it.clone().into() };
        let from = match value.start_bound() {
            Bound::Included(it) => Some(date(it)),
            Bound::Excluded(it) => Some(date(it).add_days(1)),
            Bound::Unbounded => None,
        };
        let to = match value.end_bound() {
            Bound::Included(it) => Some(date(it).add_days(1)),
            Bound::Excluded(it) => Some(date(it)),
            Bound::Unbounded => None,
        };
        Query::dates(Span { from, to })
    }

    fn dates(span: Span) -> Self {
        Query {
            countries: CountrySet::new(),
            date_filter: (!span.is_unbounded()).then_some(span),
        }
    }

    pub fn and(self, other: Self) -> Self {
        self & other
    }

    /// Holidays matching the query, sorted by date, country and name.
    pub fn run(&self) -> Iter {
        let range = self.date_filter.unwrap_or(Span::UNBOUNDED).bounded();
        if range.is_empty() || self.countries.is_empty() {
            return Iter::empty();
        }
        let years = range.start.year()..=range.end.add_days(-1).year();

        let mut holidays = Vec::new();
        for country in self.countries.iter() {
            let calendar = match country_holidays(country).years(years.clone()).build() {
                Ok(it) => it,
                Err(err) => {
                    log::warn!("skipping {country}: {err}");
                    continue;
                }
            };
            for (date, names) in calendar.iter() {
                if !range.contains(&date) {
                    continue;
                }
                holidays.extend(names.split(NAME_DELIMITER).map(|name| Holiday {
                    date,
                    code: country,
                    name: name.to_string(),
                }));
            }
        }
        holidays.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then(a.code.cmp(&b.code))
                .then(a.name.cmp(&b.name))
        });
        Iter {
            inner: holidays.into_iter(),
        }
    }
}

impl std::ops::BitAnd for Query {
    type Output = Self;

    fn bitand(mut self, rhs: Self) -> Self::Output {
        self &= rhs;
        self
    }
}

impl std::ops::BitAndAssign for Query {
    fn bitand_assign(&mut self, rhs: Self) {
        self.countries |= rhs.countries;
        self.date_filter = match (self.date_filter, rhs.date_filter) {
            (Some(a), Some(b)) => Some(a.intersect(b)),
            (a, b) => a.or(b),
        };
    }
}

/// First day of `year`, with years clamped to `FIRST_YEAR..=LAST_YEAR + 1`.
fn year_start(year: isize) -> Date {
    Date::from_year(year.clamp(FIRST_YEAR, LAST_YEAR + 1))
}

/// Half-open date interval, `None` ends are open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Span {
    from: Option<Date>,
    to: Option<Date>,
}

impl Span {
    const UNBOUNDED: Span = Span {
        from: None,
        to: None,
    };

    fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    fn intersect(self, other: Span) -> Span {
        Span {
            from: self.from.max(other.from),
            to: match (self.to, other.to) {
                (Some(a), Some(b)) => Some(a.min(b)),
                (a, b) => a.or(b),
            },
        }
    }

    /// Dates covered, open ends closed by the default year window.
    fn bounded(&self) -> Range<Date> {
        let from = self.from.unwrap_or(Date::from_year(DEFAULT_MIN_YEAR));
        let to = self.to.unwrap_or(Date::from_year(DEFAULT_MAX_YEAR + 1));
        from..to
    }
}

/// Iterator over holiday query results.
pub struct Iter {
    inner: std::vec::IntoIter<Holiday>,
}

impl Iter {
    fn empty() -> Self {
        Iter {
            inner: Vec::new().into_iter(),
        }
    }
}

impl Iterator for Iter {
    type Item = Holiday;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Iter {}
