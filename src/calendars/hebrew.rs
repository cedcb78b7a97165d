//! Hebrew calendar: the fixed arithmetic calendar, counted from the molad
//! of Tishrei.

use crate::date::Date;

// Day before 1 Tishrei AM 1, as days since the Unix epoch
const EPOCH: isize = -2_092_590;

// Gregorian year `y` contains 1 Tishrei of Hebrew year `y + 3761`.
const YEAR_OFFSET: isize = 3761;

// First day of Passover, counted back from the following 1 Tishrei
const PASSOVER_TO_NEW_YEAR: isize = 163;

/// Days from the epoch to the molad of Tishrei of `year`, with the
/// weekday postponements that keep Rosh Hashanah off Sunday, Wednesday and
/// Friday.
fn elapsed_days(year: isize) -> isize {
    let months = (235 * year - 234).div_euclid(19);
    let parts = 12084 + 13753 * months;
    let days = 29 * months + parts.div_euclid(25920);
    if (3 * (days + 1)).rem_euclid(7) < 3 {
        days + 1
    } else {
        days
    }
}

// Keeps common years within 353..=355 days and leap years within 383..=385.
fn year_length_correction(year: isize) -> isize {
    let previous = elapsed_days(year - 1);
    let current = elapsed_days(year);
    let next = elapsed_days(year + 1);
    if next - current == 356 {
        2
    } else if current - previous == 382 {
        1
    } else {
        0
    }
}

/// 1 Tishrei of Hebrew `year`.
pub fn new_year(year: isize) -> Date {
    Date(EPOCH + elapsed_days(year) + year_length_correction(year))
}

/// Rosh Hashanah (1 Tishrei) falling in Gregorian `year`.
pub fn rosh_hashanah(year: isize) -> Date {
    new_year(year + YEAR_OFFSET)
}

/// First day of Passover (15 Nisan) falling in Gregorian `year`.
pub fn passover(year: isize) -> Date {
    rosh_hashanah(year).add_days(-PASSOVER_TO_NEW_YEAR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1996, Date::from_ymd(1996, 9, 14))]
    #[case(2019, Date::from_ymd(2019, 9, 30))]
    #[case(2022, Date::from_ymd(2022, 9, 26))]
    #[case(2024, Date::from_ymd(2024, 10, 3))]
    #[case(2025, Date::from_ymd(2025, 9, 23))]
    fn new_years(#[case] year: isize, #[case] expected: Date) {
        assert_eq!(rosh_hashanah(year), expected);
    }

    #[rstest]
    #[case(2007, Date::from_ymd(2007, 4, 3))]
    #[case(2008, Date::from_ymd(2008, 4, 20))]
    #[case(2018, Date::from_ymd(2018, 3, 31))]
    #[case(2022, Date::from_ymd(2022, 4, 16))]
    fn passovers(#[case] year: isize, #[case] expected: Date) {
        assert_eq!(passover(year), expected);
    }

    #[test]
    fn year_lengths_stay_in_range() {
        for year in 5700..5900 {
            let length = new_year(year + 1).0 - new_year(year).0;
            assert!(
                matches!(length, 353..=355 | 383..=385),
                "{year}: {length}"
            );
        }
    }
}
