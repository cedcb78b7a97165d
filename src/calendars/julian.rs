use crate::date::{Date, UNIX_EPOCH_JULIAN_DAY};

/// Gregorian date of a Julian calendar date.
pub const fn julian_to_gregorian(year: isize, month: usize, day: usize) -> Date {
    let a = (14 - month as isize) / 12;
    let y = year + 4800 - a;
    let m = month as isize + 12 * a - 3;
    let julian_day = day as isize + (153 * m + 2) / 5 + 365 * y + y / 4 - 32083;
    Date(julian_day - UNIX_EPOCH_JULIAN_DAY)
}

/// Gregorian date in `year` of a recurring Julian calendar month/day.
///
/// Late December Julian dates fall into the following Gregorian year, so
/// the Julian year before `year` is tried as well.
pub const fn julian_in_gregorian_year(year: isize, month: usize, day: usize) -> Option<Date> {
    let same_year = julian_to_gregorian(year, month, day);
    if same_year.year() == year {
        return Some(same_year);
    }
    let previous_year = julian_to_gregorian(year - 1, month, day);
    if previous_year.year() == year {
        return Some(previous_year);
    }
    None
}

/// Orthodox Easter Sunday, computed on the Julian calendar.
pub const fn orthodox_easter(year: isize) -> Date {
    let a = year % 4;
    let b = year % 7;
    let c = year % 19;
    let d = (19 * c + 15) % 30;
    let e = (2 * a + 4 * b - d + 34) % 7;
    let month = (d + e + 114) / 31;
    let day = (d + e + 114) % 31 + 1;
    julian_to_gregorian(year, month as usize, day as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2023, 4, 16)]
    #[case(2024, 5, 5)]
    #[case(2025, 4, 20)]
    #[case(2010, 4, 4)]
    fn easter(#[case] year: isize, #[case] month: usize, #[case] day: usize) {
        assert_eq!(orthodox_easter(year), Date::from_ymd(year, month, day));
    }

    #[test]
    fn christmas_moves_into_january() {
        assert_eq!(
            julian_in_gregorian_year(2024, 12, 25),
            Some(Date::from_ymd(2024, 1, 7))
        );
        assert_eq!(
            julian_to_gregorian(1899, 12, 25),
            Date::from_ymd(1900, 1, 6)
        );
    }

    #[test]
    fn same_year_date() {
        assert_eq!(
            julian_in_gregorian_year(2022, 1, 1),
            Some(Date::from_ymd(2022, 1, 14))
        );
    }
}
