//! Declarative holiday rules and the interpreter turning them into the
//! holidays of one year.

use crate::calendars::{chinese, gregorian, hebrew, julian, korean, persian};
use crate::category::Category;
use crate::data::CountryInfo;
use crate::date::{Date, Weekday};
use crate::l10n::{self, Translator};
use crate::observed::{self, ObservedRule, Shift};

/// Subdivisions a rule applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SubdivFilter {
    /// The whole country and every subdivision.
    All,
    /// Only when no subdivision is selected.
    NationalOnly,
    Only(&'static [&'static str]),
    /// The whole country and every subdivision except the listed ones.
    Except(&'static [&'static str]),
    /// The whole country and the listed subdivisions.
    NationalAnd(&'static [&'static str]),
}

impl SubdivFilter {
    pub(crate) fn matches(&self, subdiv: Option<&str>) -> bool {
        match (self, subdiv) {
            (SubdivFilter::All, _) => true,
            (SubdivFilter::NationalOnly, subdiv) => subdiv.is_none(),
            (SubdivFilter::Only(codes), Some(subdiv)) => codes.contains(&subdiv),
            (SubdivFilter::Only(_), None) => false,
            (SubdivFilter::Except(codes), Some(subdiv)) => !codes.contains(&subdiv),
            (SubdivFilter::NationalAnd(codes), Some(subdiv)) => codes.contains(&subdiv),
            (SubdivFilter::Except(_) | SubdivFilter::NationalAnd(_), None) => true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct YearRange {
    pub since: Option<isize>,
    pub until: Option<isize>,
    /// Every `step`-th year counted from `since`.
    pub step: isize,
}

impl YearRange {
    pub(crate) const fn contains(&self, year: isize) -> bool {
        if let Some(since) = self.since {
            if year < since || (self.step > 1 && (year - since) % self.step != 0) {
                return false;
            }
        }
        match self.until {
            Some(until) => year <= until,
            None => true,
        }
    }
}

/// Years a rule (or an observance) is in effect; no ranges means always.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct YearFilter {
    pub ranges: &'static [YearRange],
    pub except: &'static [isize],
}

impl YearFilter {
    pub(crate) const ALWAYS: YearFilter = YearFilter {
        ranges: &[],
        except: &[],
    };

    pub(crate) fn contains(&self, year: isize) -> bool {
        (self.ranges.is_empty() || self.ranges.iter().any(|it| it.contains(year)))
            && !self.except.contains(&year)
    }
}

/// Inclusive span of dates, `None` ends are open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DateWindow {
    pub since: Option<Date>,
    pub until: Option<Date>,
}

impl DateWindow {
    pub(crate) fn contains(&self, date: Date) -> bool {
        self.since.map_or(true, |since| date >= since)
            && self.until.map_or(true, |until| date <= until)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DateExpr {
    Fixed {
        month: usize,
        day: usize,
    },
    Julian {
        month: usize,
        day: usize,
    },
    Easter,
    OrthodoxEaster,
    RoshHashanah,
    Passover,
    NthWeekdayOfMonth {
        n: isize,
        weekday: Weekday,
        month: usize,
    },
    /// The `n`-th weekday on or after (`n > 0`), or on or before, a day.
    NthWeekdayFrom {
        n: isize,
        weekday: Weekday,
        month: usize,
        day: usize,
    },
    Hijri {
        month: usize,
        day: usize,
    },
    Chinese {
        month: usize,
        day: usize,
    },
    Korean {
        month: usize,
        day: usize,
    },
    Persian {
        month: usize,
        day: usize,
        /// Counted in the Persian year that began in the previous
        /// Gregorian year.
        prev: bool,
    },
    VernalEquinox,
    AutumnalEquinox,
    Qingming,
    Special(Date),
    /// Day off on `to`, worked off on the weekend day `from`.
    Substitute {
        to: Date,
        from: Date,
    },
    /// The day between two holidays exactly two days apart.
    Bridge(&'static DateExpr, &'static DateExpr),
}

impl DateExpr {
    /// Dates the expression yields in `year`, each paired with whether it
    /// is an estimate.
    pub(crate) fn resolve(&self, year: isize, info: &CountryInfo) -> Vec<(Date, bool)> {
        let exact = |date: Option<Date>| -> Vec<(Date, bool)> {
            date.into_iter().map(|it| (it, false)).collect()
        };
        match *self {
            DateExpr::Fixed { month, day } => exact(Date::try_from_ymd(year, month, day).ok()),
            DateExpr::Julian { month, day } => {
                exact(julian::julian_in_gregorian_year(year, month, day))
            }
            DateExpr::Easter => exact(Some(gregorian::easter(year))),
            DateExpr::OrthodoxEaster => exact(Some(julian::orthodox_easter(year))),
            DateExpr::RoshHashanah => exact(Some(hebrew::rosh_hashanah(year))),
            DateExpr::Passover => exact(Some(hebrew::passover(year))),
            DateExpr::NthWeekdayOfMonth { n, weekday, month } => exact(Some(
                gregorian::nth_weekday_of_month(year, month, n, weekday),
            )),
            DateExpr::NthWeekdayFrom {
                n,
                weekday,
                month,
                day,
            } => exact(Some(gregorian::nth_weekday_from(
                n,
                weekday,
                Date::from_ymd(year, month, day),
            ))),
            DateExpr::Hijri { month, day } => info.islamic.resolve(year, month, day),
            DateExpr::Chinese { month, day } => {
                exact(chinese::lunar_to_gregorian(year, month, day))
            }
            DateExpr::Korean { month, day } => exact(korean::korean_to_gregorian(year, month, day)),
            DateExpr::Persian { month, day, prev } => {
                let persian_year = if prev { year - 1 } else { year };
                exact(persian::persian_to_gregorian(persian_year, month, day))
            }
            DateExpr::VernalEquinox => exact(Some(gregorian::vernal_equinox(year))),
            DateExpr::AutumnalEquinox => exact(Some(gregorian::autumnal_equinox(year))),
            DateExpr::Qingming => exact(Some(gregorian::qingming(year))),
            DateExpr::Special(date) => exact(Some(date)),
            DateExpr::Substitute { to, .. } => exact(Some(to)),
            DateExpr::Bridge(a, b) => {
                let first = a.resolve(year, info).first().map(|it| it.0);
                let second = b.resolve(year, info).first().map(|it| it.0);
                match (first, second) {
                    (Some(a), Some(b)) if (a.0 - b.0).abs() == 2 => {
                        exact(Some(a.min(b).add_days(1)))
                    }
                    _ => Vec::new(),
                }
            }
        }
    }
}

/// How an observance treats the holiday it shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ObservedMode {
    /// The holiday stays, a labelled entry is added on the observed day.
    Add,
    /// The holiday is relocated.
    Move,
    /// The holiday is relocated and labelled as observed.
    MoveObserved,
    /// The holiday exists only when observance is on.
    Only,
    /// A one-off labelled entry present only when observance is on.
    Label,
    /// The holiday is relocated whether or not observance is on.
    Shift,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Observance {
    pub mode: ObservedMode,
    pub rule: ObservedRule,
    /// Overrides the country's observed years.
    pub since: Option<isize>,
    /// Observe on the next workday when the holiday shares its date.
    pub overlap: bool,
    /// Name the observed entry is labelled with instead of the holiday's.
    pub label: Option<&'static str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Rule {
    pub subdivs: SubdivFilter,
    pub category: Category,
    pub years: YearFilter,
    pub date: DateExpr,
    pub offset: i16,
    pub name: &'static str,
    pub observance: Option<Observance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Holiday { estimated: bool },
    Observed { before: bool, estimated: bool },
    Substituted { from: Date },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Entry {
    date: Date,
    name: &'static str,
    kind: Kind,
    rule: usize,
}

#[derive(Default)]
struct State {
    entries: Vec<Entry>,
    weekend_workdays: Vec<Date>,
}

impl State {
    fn occupied(&self, date: Date) -> bool {
        self.entries.iter().any(|it| it.date == date)
    }

    fn names_on(&self, date: Date) -> usize {
        let mut names: Vec<&str> = self
            .entries
            .iter()
            .filter(|it| it.date == date)
            .map(|it| it.name)
            .collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    }
}

/// Holidays of one year, names already localized.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct YearHolidays {
    pub holidays: Vec<(Date, String)>,
    pub weekend_workdays: Vec<Date>,
}

/// What to evaluate the rules of a country for.
pub(crate) struct Selection<'a> {
    pub info: &'static CountryInfo,
    pub subdiv: Option<&'a str>,
    pub categories: &'a [Category],
    pub observed: bool,
}

impl Selection<'_> {
    pub(crate) fn populate(&self, year: isize, translator: &Translator) -> YearHolidays {
        if !self.info.covers(year) {
            return YearHolidays::default();
        }

        let mut state = self.evaluate(year);
        for neighbour in [year - 1, year + 1] {
            if !self.info.covers(neighbour) {
                continue;
            }
            let spilled = self.evaluate(neighbour).entries.into_iter().filter(|it| {
                it.date.year() == year && matches!(it.kind, Kind::Observed { .. })
            });
            state.entries.extend(spilled);
        }

        let holidays = state
            .entries
            .iter()
            .filter(|it| it.date.year() == year)
            .map(|it| (it.date, self.render(it, translator)))
            .collect();
        YearHolidays {
            holidays,
            weekend_workdays: state.weekend_workdays,
        }
    }

    fn is_workday(&self, state: &State, date: Date) -> bool {
        if self.info.is_weekend(date) {
            state.weekend_workdays.contains(&date)
        } else {
            !state.occupied(date)
        }
    }

    /// Whether the holiday on `date` gets `observance` applied.
    fn observance_active(&self, date: Date, observance: &Observance) -> bool {
        let windows = self.info.observed_since;
        self.observed
            && match observance.since {
                Some(since) => date.year() >= since,
                None => windows.is_empty() || windows.iter().any(|it| it.contains(date)),
            }
    }

    fn evaluate(&self, year: isize) -> State {
        let mut state = State::default();
        self.add_rule_dates(year, &mut state);
        self.relocate(&mut state);
        self.add_observed(&mut state);
        state
    }

    fn add_rule_dates(&self, year: isize, state: &mut State) {
        for (index, rule) in self.info.rules.iter().enumerate() {
            if !rule.subdivs.matches(self.subdiv)
                || !self.categories.contains(&rule.category)
                || !rule.years.contains(year)
            {
                continue;
            }

            if let DateExpr::Substitute { to, from } = rule.date {
                if to.year() == year {
                    log::trace!("{} substituted from {from}", to);
                    state.entries.push(Entry {
                        date: to,
                        name: rule.name,
                        kind: Kind::Substituted { from },
                        rule: index,
                    });
                    state.weekend_workdays.push(from);
                }
                continue;
            }

            let mode = rule.observance.map(|it| it.mode);
            if mode == Some(ObservedMode::Label) && !self.observed {
                continue;
            }

            for (date, estimated) in rule.date.resolve(year, self.info) {
                let mut date = date.add_days(rule.offset as isize);
                if let Some(observance) = rule.observance.filter(|it| it.mode == ObservedMode::Only) {
                    if !self.observance_active(date, &observance) {
                        continue;
                    }
                }
                if let Some(observance) = rule.observance.filter(|it| {
                    it.mode == ObservedMode::Shift && it.since.map_or(true, |since| year >= since)
                }) {
                    match observance.rule.shift(date.weekday()) {
                        Shift::Days(days) => date = date.add_days(days as isize),
                        Shift::Remove => continue,
                        _ => {}
                    }
                }
                if date.year() != year {
                    continue;
                }

                log::trace!("{} on {date} ({})", rule.name, rule.category);
                let kind = if mode == Some(ObservedMode::Label) {
                    Kind::Observed {
                        before: false,
                        estimated,
                    }
                } else {
                    Kind::Holiday { estimated }
                };
                state.entries.push(Entry {
                    date,
                    name: rule.name,
                    kind,
                    rule: index,
                });
            }
        }
    }

    fn relocate(&self, state: &mut State) {
        for (index, rule) in self.info.rules.iter().enumerate() {
            let Some(observance) = rule.observance else {
                continue;
            };
            if !matches!(
                observance.mode,
                ObservedMode::Move | ObservedMode::MoveObserved | ObservedMode::Only
            ) {
                continue;
            }

            let mut i = 0;
            while i < state.entries.len() {
                let entry = state.entries[i];
                let Kind::Holiday { estimated } = entry.kind else {
                    i += 1;
                    continue;
                };
                if entry.rule != index || !self.observance_active(entry.date, &observance) {
                    i += 1;
                    continue;
                }

                let observed =
                    observed::observed_date(entry.date, &observance.rule, |date| {
                        self.is_workday(state, date)
                    });
                match observed {
                    None => {
                        log::trace!("{} on {} dropped", entry.name, entry.date);
                        state.entries.remove(i);
                        continue;
                    }
                    Some(date) if date != entry.date => {
                        log::trace!("{} moved from {} to {date}", entry.name, entry.date);
                        let moved = &mut state.entries[i];
                        moved.date = date;
                        if observance.mode == ObservedMode::MoveObserved {
                            moved.kind = Kind::Observed {
                                before: date < entry.date,
                                estimated,
                            };
                        }
                    }
                    Some(_) => {}
                }
                i += 1;
            }
        }
    }

    fn add_observed(&self, state: &mut State) {
        let mut snapshot = state.entries.clone();
        snapshot.sort_by_key(|it| it.date);

        for entry in snapshot {
            let Kind::Holiday { estimated } = entry.kind else {
                continue;
            };
            let Some(observance) = self.info.rules[entry.rule].observance else {
                continue;
            };
            if observance.mode != ObservedMode::Add
                || !self.observance_active(entry.date, &observance)
            {
                continue;
            }

            let rule = &observance.rule;
            let observed = if observance.overlap
                && rule.shift(entry.date.weekday()) == Shift::Keep
                && state.names_on(entry.date) > 1
            {
                Some(observed::find_workday(entry.date, 1, &|date| {
                    self.is_workday(state, date)
                }))
            } else {
                observed::observed_date(entry.date, rule, |date| self.is_workday(state, date))
            };

            match observed {
                None => {
                    if let Some(position) = state.entries.iter().position(|it| *it == entry) {
                        state.entries.remove(position);
                    }
                }
                Some(date) if date != entry.date => {
                    log::trace!("{} observed on {date}", entry.name);
                    state.entries.push(Entry {
                        date,
                        name: observance.label.unwrap_or(entry.name),
                        kind: Kind::Observed {
                            before: date < entry.date,
                            estimated,
                        },
                        rule: entry.rule,
                    });
                }
                Some(_) => {}
            }
        }
    }

    fn with_estimate(&self, name: &str, estimated: bool, translator: &Translator) -> String {
        let label = self.info.estimated_label;
        if estimated && !label.is_empty() {
            fill(translator.tr(label), name)
        } else {
            name.to_string()
        }
    }

    fn render(&self, entry: &Entry, translator: &Translator) -> String {
        let info = self.info;
        match entry.kind {
            Kind::Holiday { estimated } => {
                self.with_estimate(translator.tr(entry.name), estimated, translator)
            }
            Kind::Observed { before, estimated } => {
                let name = translator.tr(entry.name);
                if estimated && !info.observed_estimated_label.is_empty() {
                    return fill(translator.tr(info.observed_estimated_label), name);
                }
                let label = match (before, info.observed_label_before, info.observed_label) {
                    (true, before, _) if !before.is_empty() => before,
                    (_, _, "") => "%s",
                    (_, _, label) => label,
                };
                fill(
                    translator.tr(label),
                    &self.with_estimate(name, estimated, translator),
                )
            }
            Kind::Substituted { from } => {
                let format = match info.substituted_date_format {
                    "" => "%Y-%m-%d",
                    format => format,
                };
                let label = match info.substituted_label {
                    "" => "Day off (substituted from %s)",
                    label => label,
                };
                fill(
                    translator.tr(label),
                    &l10n::format_date(from, translator.tr(format)),
                )
            }
        }
    }
}

/// Replaces the first `%s` of `template` with `value`.
pub(crate) fn fill(template: &str, value: &str) -> String {
    match template.find("%s") {
        Some(position) => {
            let mut result = String::with_capacity(template.len() + value.len());
            result.push_str(&template[..position]);
            result.push_str(value);
            result.push_str(&template[position + 2..]);
            result
        }
        None => template.to_string(),
    }
}
