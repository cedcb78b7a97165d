//! Korean lunisolar dates.
//!
//! Korea follows the Chinese table except in years where the new moon
//! falls on a different day at the Korean meridian.

use crate::calendars::chinese;
use crate::date::Date;

const SEOLLAL: &[Date] = &[
    Date::from_ymd(1916, 2, 4),
    Date::from_ymd(1944, 1, 26),
    Date::from_ymd(1954, 2, 4),
    Date::from_ymd(1958, 2, 19),
    Date::from_ymd(1966, 1, 22),
    Date::from_ymd(1988, 2, 18),
    Date::from_ymd(1997, 2, 8),
    Date::from_ymd(2027, 2, 7),
    Date::from_ymd(2028, 1, 27),
];

const BUDDHAS_BIRTHDAY: &[Date] = &[
    Date::from_ymd(1931, 5, 25),
    Date::from_ymd(1968, 5, 5),
    Date::from_ymd(2001, 5, 1),
    Date::from_ymd(2012, 5, 28),
    Date::from_ymd(2023, 5, 27),
    Date::from_ymd(2025, 5, 5),
];

const CHUSEOK: &[Date] = &[Date::from_ymd(1942, 9, 25), Date::from_ymd(2040, 9, 21)];

fn overrides(month: usize, day: usize) -> &'static [Date] {
    match (month, day) {
        (1, 1) => SEOLLAL,
        (4, 8) => BUDDHAS_BIRTHDAY,
        (8, 15) => CHUSEOK,
        _ => &[],
    }
}

/// Gregorian date of a lunar month and day in the Korean calendar.
pub fn korean_to_gregorian(year: isize, month: usize, day: usize) -> Option<Date> {
    overrides(month, day)
        .iter()
        .find(|date| date.year() == year)
        .copied()
        .or_else(|| chinese::lunar_to_gregorian(year, month, day))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2027, 1, 1, Date::from_ymd(2027, 2, 7))]
    #[case(2023, 4, 8, Date::from_ymd(2023, 5, 27))]
    #[case(2040, 8, 15, Date::from_ymd(2040, 9, 21))]
    #[case(2024, 1, 1, Date::from_ymd(2024, 2, 10))]
    #[case(2024, 8, 15, Date::from_ymd(2024, 9, 17))]
    fn korean_dates(
        #[case] year: isize,
        #[case] month: usize,
        #[case] day: usize,
        #[case] expected: Date,
    ) {
        assert_eq!(korean_to_gregorian(year, month, day), Some(expected));
    }

    #[test]
    fn day_after_override_is_not_shifted() {
        assert_eq!(
            korean_to_gregorian(2027, 1, 2),
            chinese::lunar_to_gregorian(2027, 1, 2)
        );
    }
}
