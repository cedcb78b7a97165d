//! Solar Hijri (Persian) calendar.

use crate::date::Date;

pub const SUPPORTED_YEARS: std::ops::RangeInclusive<isize> = 1901..=2100;

// Persian years in which the 33 year leap cycle is interrupted
const BREAKS: [isize; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

// Day of March on which Farvardin 1 falls, for a Gregorian year
const fn march_day(year: isize) -> usize {
    let persian_year = year - 621;
    let mut leap_days = -14;
    let mut previous = BREAKS[0];
    let mut jump = 0;
    let mut i = 1;
    while i < BREAKS.len() {
        let current = BREAKS[i];
        jump = current - previous;
        if persian_year < current {
            break;
        }
        leap_days += (jump / 33) * 8 + (jump % 33) / 4;
        previous = current;
        i += 1;
    }
    let n = persian_year - previous;
    leap_days += (n / 33) * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_days += 1;
    }
    let gregorian_leap_days = year / 4 - ((year / 100 + 1) * 3) / 4 - 150;
    (20 + leap_days - gregorian_leap_days) as usize
}

/// Nowruz (1 Farvardin) of the Persian year starting in Gregorian `year`.
pub const fn new_year(year: isize) -> Option<Date> {
    if year < *SUPPORTED_YEARS.start() || year > *SUPPORTED_YEARS.end() {
        return None;
    }
    Some(Date::from_ymd(year, 3, march_day(year)))
}

/// Gregorian date of a month and day of the Persian year starting in
/// Gregorian `year`.
pub const fn persian_to_gregorian(year: isize, month: usize, day: usize) -> Option<Date> {
    let Some(nowruz) = new_year(year) else {
        return None;
    };
    let month = month as isize;
    let month_offset = if month <= 6 {
        31 * (month - 1)
    } else {
        186 + 30 * (month - 7)
    };
    Some(nowruz.add_days(month_offset + day as isize - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1901, 21)]
    #[case(2024, 20)]
    #[case(2025, 21)]
    #[case(2100, 21)]
    fn nowruz(#[case] year: isize, #[case] day: usize) {
        assert_eq!(new_year(year), Some(Date::from_ymd(year, 3, day)));
    }

    #[rstest]
    // Islamic Revolution Day
    #[case(2023, 11, 22, Date::from_ymd(2024, 2, 11))]
    #[case(2024, 12, 29, Date::from_ymd(2025, 3, 19))]
    #[case(2023, 3, 14, Date::from_ymd(2023, 6, 4))]
    fn conversion(
        #[case] year: isize,
        #[case] month: usize,
        #[case] day: usize,
        #[case] expected: Date,
    ) {
        assert_eq!(persian_to_gregorian(year, month, day), Some(expected));
    }

    #[test]
    fn outside_range() {
        assert_eq!(new_year(1900), None);
        assert_eq!(persian_to_gregorian(2101, 1, 1), None);
    }
}
