//! Weekday based rules deciding when a holiday is observed.

use crate::date::{Date, Weekday};

/// What happens to a holiday falling on a particular weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shift {
    /// Observed on the day itself.
    Keep,
    /// Observed the given number of days later (or earlier when negative).
    Days(i8),
    /// Observed on the first following workday of the same year.
    NextWorkday,
    /// Observed on the last preceding workday of the same year.
    PrevWorkday,
    /// Not observed at all.
    Remove,
}

/// Mapping from weekday to [`Shift`].
///
/// Rules combine with `+` (or the const [`ObservedRule::plus`]), the
/// right-hand side taking precedence for every weekday it shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObservedRule([Shift; 7]);

impl ObservedRule {
    pub const NONE: ObservedRule = ObservedRule([Shift::Keep; 7]);

    #[inline]
    pub const fn new(shifts: [Shift; 7]) -> Self {
        ObservedRule(shifts)
    }

    pub const fn with(self, weekday: Weekday, shift: Shift) -> Self {
        let mut shifts = self.0;
        shifts[weekday as usize] = shift;
        ObservedRule(shifts)
    }

    pub const fn plus(self, other: Self) -> Self {
        let mut shifts = self.0;
        let mut i = 0;
        while i < 7 {
            if !matches!(other.0[i], Shift::Keep) {
                shifts[i] = other.0[i];
            }
            i += 1;
        }
        ObservedRule(shifts)
    }

    #[inline]
    pub const fn shift(&self, weekday: Weekday) -> Shift {
        self.0[weekday as usize]
    }

    pub const fn is_empty(&self) -> bool {
        let mut i = 0;
        while i < 7 {
            if !matches!(self.0[i], Shift::Keep) {
                return false;
            }
            i += 1;
        }
        true
    }
}

impl Default for ObservedRule {
    fn default() -> Self {
        ObservedRule::NONE
    }
}

impl std::ops::Add for ObservedRule {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        self.plus(rhs)
    }
}

impl std::ops::AddAssign for ObservedRule {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = self.plus(rhs);
    }
}

/// Computes the date `date` is observed on under `rule`.
///
/// Workday searches never leave the year of `date`; when no workday is
/// found the holiday stays where it is. Returns `None` if the rule drops
/// the holiday.
pub fn observed_date<F>(date: Date, rule: &ObservedRule, is_workday: F) -> Option<Date>
where
    F: Fn(Date) -> bool,
{
    match rule.shift(date.weekday()) {
        Shift::Keep => Some(date),
        Shift::Days(n) => Some(date.add_days(n as isize)),
        Shift::NextWorkday => Some(find_workday(date, 1, &is_workday)),
        Shift::PrevWorkday => Some(find_workday(date, -1, &is_workday)),
        Shift::Remove => None,
    }
}

pub(crate) fn find_workday<F>(date: Date, step: isize, is_workday: &F) -> Date
where
    F: Fn(Date) -> bool,
{
    let year = date.year();
    let mut current = date.add_days(step);
    while current.year() == year {
        if is_workday(current) {
            return current;
        }
        current = current.add_days(step);
    }
    date
}

const MON: Weekday = Weekday::Monday;
const TUE: Weekday = Weekday::Tuesday;
const WED: Weekday = Weekday::Wednesday;
const THU: Weekday = Weekday::Thursday;
const FRI: Weekday = Weekday::Friday;
const SAT: Weekday = Weekday::Saturday;
const SUN: Weekday = Weekday::Sunday;

const fn rule(entries: &[(Weekday, Shift)]) -> ObservedRule {
    let mut result = ObservedRule::NONE;
    let mut i = 0;
    while i < entries.len() {
        result = result.with(entries[i].0, entries[i].1);
        i += 1;
    }
    result
}

use Shift::{Days, NextWorkday, PrevWorkday, Remove};

pub const MON_TO_NEXT_TUE: ObservedRule = rule(&[(MON, Days(1))]);
pub const MON_ONLY: ObservedRule = rule(&[
    (TUE, Remove),
    (WED, Remove),
    (THU, Remove),
    (FRI, Remove),
    (SAT, Remove),
    (SUN, Remove),
]);
pub const TUE_TO_PREV_MON: ObservedRule = rule(&[(TUE, Days(-1))]);
pub const TUE_TO_PREV_FRI: ObservedRule = rule(&[(TUE, Days(-4))]);
pub const TUE_TO_NONE: ObservedRule = rule(&[(TUE, Remove)]);
pub const WED_TO_PREV_MON: ObservedRule = rule(&[(WED, Days(-2))]);
pub const WED_TO_NEXT_FRI: ObservedRule = rule(&[(WED, Days(2))]);
pub const THU_TO_PREV_MON: ObservedRule = rule(&[(THU, Days(-3))]);
pub const THU_TO_PREV_WED: ObservedRule = rule(&[(THU, Days(-1))]);
pub const THU_TO_NEXT_MON: ObservedRule = rule(&[(THU, Days(4))]);
pub const THU_TO_NEXT_FRI: ObservedRule = rule(&[(THU, Days(1))]);
pub const FRI_TO_PREV_WED: ObservedRule = rule(&[(FRI, Days(-2))]);
pub const FRI_TO_PREV_THU: ObservedRule = rule(&[(FRI, Days(-1))]);
pub const FRI_TO_NEXT_MON: ObservedRule = rule(&[(FRI, Days(3))]);
pub const FRI_TO_NEXT_TUE: ObservedRule = rule(&[(FRI, Days(4))]);
pub const FRI_TO_NEXT_SAT: ObservedRule = rule(&[(FRI, Days(1))]);
pub const FRI_TO_NEXT_WORKDAY: ObservedRule = rule(&[(FRI, NextWorkday)]);
pub const FRI_ONLY: ObservedRule = rule(&[
    (MON, Remove),
    (TUE, Remove),
    (WED, Remove),
    (THU, Remove),
    (SAT, Remove),
    (SUN, Remove),
]);
pub const SAT_TO_PREV_THU: ObservedRule = rule(&[(SAT, Days(-2))]);
pub const SAT_TO_PREV_FRI: ObservedRule = rule(&[(SAT, Days(-1))]);
pub const SAT_TO_PREV_WORKDAY: ObservedRule = rule(&[(SAT, PrevWorkday)]);
pub const SAT_TO_NEXT_MON: ObservedRule = rule(&[(SAT, Days(2))]);
pub const SAT_TO_NEXT_TUE: ObservedRule = rule(&[(SAT, Days(3))]);
pub const SAT_TO_NEXT_SUN: ObservedRule = rule(&[(SAT, Days(1))]);
pub const SAT_TO_NEXT_WORKDAY: ObservedRule = rule(&[(SAT, NextWorkday)]);
pub const SAT_TO_NONE: ObservedRule = rule(&[(SAT, Remove)]);
pub const SUN_TO_NEXT_MON: ObservedRule = rule(&[(SUN, Days(1))]);
pub const SUN_TO_NEXT_TUE: ObservedRule = rule(&[(SUN, Days(2))]);
pub const SUN_TO_NEXT_WED: ObservedRule = rule(&[(SUN, Days(3))]);
pub const SUN_TO_NEXT_WORKDAY: ObservedRule = rule(&[(SUN, NextWorkday)]);
pub const SUN_TO_NONE: ObservedRule = rule(&[(SUN, Remove)]);
pub const ALL_TO_NEAREST_MON: ObservedRule = rule(&[
    (TUE, Days(-1)),
    (WED, Days(-2)),
    (THU, Days(-3)),
    (FRI, Days(3)),
    (SAT, Days(2)),
    (SUN, Days(1)),
]);
pub const ALL_TO_NEAREST_MON_LATAM: ObservedRule = rule(&[
    (TUE, Days(-1)),
    (WED, Days(-2)),
    (THU, Days(4)),
    (FRI, Days(3)),
    (SAT, Days(2)),
    (SUN, Days(1)),
]);
pub const ALL_TO_NEXT_MON: ObservedRule = rule(&[
    (TUE, Days(6)),
    (WED, Days(5)),
    (THU, Days(4)),
    (FRI, Days(3)),
    (SAT, Days(2)),
    (SUN, Days(1)),
]);
pub const ALL_TO_NEXT_SUN: ObservedRule = rule(&[
    (MON, Days(6)),
    (TUE, Days(5)),
    (WED, Days(4)),
    (THU, Days(3)),
    (FRI, Days(2)),
    (SAT, Days(1)),
]);
pub const WORKDAY_TO_NEAREST_MON: ObservedRule = rule(&[
    (TUE, Days(-1)),
    (WED, Days(-2)),
    (THU, Days(-3)),
    (FRI, Days(3)),
]);
pub const WORKDAY_TO_NEXT_MON: ObservedRule = rule(&[
    (TUE, Days(6)),
    (WED, Days(5)),
    (THU, Days(4)),
    (FRI, Days(3)),
]);
pub const WORKDAY_TO_NEXT_WORKDAY: ObservedRule = rule(&[
    (MON, NextWorkday),
    (TUE, NextWorkday),
    (WED, NextWorkday),
    (THU, NextWorkday),
    (FRI, NextWorkday),
]);
pub const MON_FRI_ONLY: ObservedRule = rule(&[
    (TUE, Remove),
    (WED, Remove),
    (THU, Remove),
    (SAT, Remove),
    (SUN, Remove),
]);
pub const TUE_WED_TO_PREV_MON: ObservedRule = rule(&[(TUE, Days(-1)), (WED, Days(-2))]);
pub const TUE_WED_THU_TO_PREV_MON: ObservedRule = rule(&[
    (TUE, Days(-1)),
    (WED, Days(-2)),
    (THU, Days(-3)),
]);
pub const TUE_WED_THU_TO_NEXT_FRI: ObservedRule = rule(&[
    (TUE, Days(3)),
    (WED, Days(2)),
    (THU, Days(1)),
]);
pub const WED_THU_TO_NEXT_FRI: ObservedRule = rule(&[(WED, Days(2)), (THU, Days(1))]);
pub const THU_FRI_TO_NEXT_MON: ObservedRule = rule(&[(THU, Days(4)), (FRI, Days(3))]);
pub const THU_FRI_TO_NEXT_WORKDAY: ObservedRule = rule(&[(THU, NextWorkday), (FRI, NextWorkday)]);
pub const THU_FRI_SUN_TO_NEXT_MON: ObservedRule = rule(&[
    (THU, Days(4)),
    (FRI, Days(3)),
    (SUN, Days(1)),
]);
pub const FRI_SAT_TO_NEXT_WORKDAY: ObservedRule = rule(&[(FRI, NextWorkday), (SAT, NextWorkday)]);
pub const FRI_SUN_TO_NEXT_MON: ObservedRule = rule(&[(FRI, Days(3)), (SUN, Days(1))]);
pub const FRI_SUN_TO_NEXT_SAT_MON: ObservedRule = rule(&[(FRI, Days(1)), (SUN, Days(1))]);
pub const SAT_SUN_TO_PREV_FRI: ObservedRule = rule(&[(SAT, Days(-1)), (SUN, Days(-2))]);
pub const SAT_SUN_TO_NEXT_MON: ObservedRule = rule(&[(SAT, Days(2)), (SUN, Days(1))]);
pub const SAT_SUN_TO_NEXT_TUE: ObservedRule = rule(&[(SAT, Days(3)), (SUN, Days(2))]);
pub const SAT_SUN_TO_NEXT_WED: ObservedRule = rule(&[(SAT, Days(4)), (SUN, Days(3))]);
pub const SAT_SUN_TO_NEXT_MON_TUE: ObservedRule = rule(&[(SAT, Days(2)), (SUN, Days(2))]);
pub const SAT_SUN_TO_NEXT_WORKDAY: ObservedRule = rule(&[(SAT, NextWorkday), (SUN, NextWorkday)]);
