use crate::date::{Date, Weekday};

/// Western Easter Sunday.
pub const fn easter(year: isize) -> Date {
    // Anonymous Gregorian algorithm (Meeus/Jones/Butcher)
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;
    Date::from_ymd(year, month as usize, day as usize)
}

/// The `n`-th `weekday` counting from `date`, `date` itself included.
///
/// Positive `n` counts forward, negative `n` backward.
pub const fn nth_weekday_from(n: isize, weekday: Weekday, date: Date) -> Date {
    let target = weekday as isize;
    let current = date.weekday() as isize;
    if n > 0 {
        date.add_days((n - 1) * 7 + (target - current).rem_euclid(7))
    } else {
        date.add_days((n + 1) * 7 - (current - target).rem_euclid(7))
    }
}

/// The `n`-th `weekday` of a month; negative `n` counts from the end.
pub const fn nth_weekday_of_month(year: isize, month: usize, n: isize, weekday: Weekday) -> Date {
    if n > 0 {
        nth_weekday_from(n, weekday, Date::from_ymd(year, month, 1))
    } else {
        let last = Date::days_in_month(year, month);
        nth_weekday_from(n, weekday, Date::from_ymd(year, month, last))
    }
}

/// Vernal equinox day as fixed by the Japanese almanac approximation.
pub const fn vernal_equinox(year: isize) -> Date {
    let day = match year % 4 {
        0 if year <= 1956 => 21,
        1 if year <= 1989 => 21,
        2 if year <= 2022 => 21,
        3 if year <= 2055 => 21,
        0 if year >= 2092 => 19,
        _ => 20,
    };
    Date::from_ymd(year, 3, day)
}

/// Autumnal equinox day as fixed by the Japanese almanac approximation.
pub const fn autumnal_equinox(year: isize) -> Date {
    let day = match year % 4 {
        3 if year <= 1979 => 24,
        0 if year >= 2012 => 22,
        1 if year >= 2045 => 22,
        2 if year >= 2078 => 22,
        _ => 23,
    };
    Date::from_ymd(year, 9, day)
}

/// Qingming, the fifth solar term.
pub const fn qingming(year: isize) -> Date {
    let day = if year % 4 < 1 || (year % 4 < 2 && year >= 2009) {
        4
    } else {
        5
    };
    Date::from_ymd(year, 4, day)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2000, 4, 23)]
    #[case(2019, 4, 21)]
    #[case(2024, 3, 31)]
    #[case(2025, 4, 20)]
    #[case(2038, 4, 25)]
    fn western_easter(#[case] year: isize, #[case] month: usize, #[case] day: usize) {
        assert_eq!(easter(year), Date::from_ymd(year, month, day));
    }

    #[rstest]
    // Thanksgiving
    #[case(2023, 11, 4, Weekday::Thursday, 23)]
    // Memorial Day
    #[case(2024, 5, -1, Weekday::Monday, 27)]
    // Labor Day
    #[case(2025, 9, 1, Weekday::Monday, 1)]
    fn nth_weekday(
        #[case] year: isize,
        #[case] month: usize,
        #[case] n: isize,
        #[case] weekday: Weekday,
        #[case] day: usize,
    ) {
        assert_eq!(
            nth_weekday_of_month(year, month, n, weekday),
            Date::from_ymd(year, month, day)
        );
    }

    #[test]
    fn weekday_from_is_inclusive() {
        // Wednesday
        let date = Date::from_ymd(2023, 11, 22);
        assert_eq!(nth_weekday_from(1, Weekday::Wednesday, date), date);
        assert_eq!(nth_weekday_from(-1, Weekday::Wednesday, date), date);
        assert_eq!(
            nth_weekday_from(-1, Weekday::Monday, date),
            Date::from_ymd(2023, 11, 20)
        );
        assert_eq!(
            nth_weekday_from(2, Weekday::Monday, date),
            Date::from_ymd(2023, 12, 4)
        );
    }

    #[rstest]
    #[case(2023, 21, 23)]
    #[case(2024, 20, 22)]
    #[case(2025, 20, 23)]
    fn equinoxes(#[case] year: isize, #[case] vernal: usize, #[case] autumnal: usize) {
        assert_eq!(vernal_equinox(year), Date::from_ymd(year, 3, vernal));
        assert_eq!(autumnal_equinox(year), Date::from_ymd(year, 9, autumnal));
    }

    #[rstest]
    #[case(2008, 4)]
    #[case(2023, 5)]
    #[case(2024, 4)]
    #[case(2025, 4)]
    fn qingming_day(#[case] year: isize, #[case] day: usize) {
        assert_eq!(qingming(year), Date::from_ymd(year, 4, day));
    }
}
