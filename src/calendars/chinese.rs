//! Chinese lunisolar calendar, 1901 to 2099.

use crate::date::Date;

const FIRST_YEAR: isize = 1901;
const LAST_YEAR: isize = 2099;
// Lunar New Year 1901
const START: Date = Date::from_ymd(1901, 2, 19);
const NO_LEAP_MONTH: u32 = 0xF;

// One entry per lunar year. Bits 1 to 13 hold the length of each month in
// sequence (leap month included), set meaning 30 days. Bits 16 to 19 hold
// the month the leap month follows, 0xF when there is none.
const MONTH_DAYS: [u32; 199] = [
    0xF0EA4, 0xF1D4A, 0x52C94, 0xF0C96, 0xF1536, 0x42AAC, 0xF0AD4, 0xF16B2, 0x22EA4, 0xF0EA4,
    0x6364A, 0xF164A, 0xF1496, 0x52956, 0xF055A, 0xF0AD6, 0x216D2, 0xF1B52, 0x73B24, 0xF1D24,
    0xF1A4A, 0x5349A, 0xF14AC, 0xF056C, 0x42B6A, 0xF0DA8, 0xF1D52, 0x23D24, 0xF1D24, 0x61A4C,
    0xF0A56, 0xF14AE, 0x5256C, 0xF16B4, 0xF0DA8, 0x31D92, 0xF0E92, 0x72D26, 0xF1526, 0xF0A56,
    0x614B6, 0xF155A, 0xF0AD4, 0x436AA, 0xF1748, 0xF1692, 0x23526, 0xF152A, 0x72A5A, 0xF0A6C,
    0xF155A, 0x52B54, 0xF0B64, 0xF1B4A, 0x33A94, 0xF1A94, 0x8152A, 0xF152E, 0xF0AAC, 0x6156A,
    0xF15AA, 0xF0DA4, 0x41D4A, 0xF1D4A, 0xF0C94, 0x3192E, 0xF1536, 0x72AB4, 0xF0AD4, 0xF16D2,
    0x52EA4, 0xF16A4, 0xF164A, 0x42C96, 0xF1496, 0x82956, 0xF055A, 0xF0ADA, 0x616D2, 0xF1B52,
    0xF1B24, 0x43A4A, 0xF1A4A, 0xA349A, 0xF14AC, 0xF056C, 0x60B6A, 0xF0DAA, 0xF1D92, 0x53D24,
    0xF1D24, 0xF1A4C, 0x314AC, 0xF14AE, 0x829AC, 0xF06B4, 0xF0DAA, 0x52D92, 0xF0E92, 0xF0D26,
    0x42A56, 0xF0A56, 0xF14B6, 0x22AB4, 0xF0AD4, 0x736AA, 0xF1748, 0xF1692, 0x53526, 0xF152A,
    0xF0A5A, 0x4155A, 0xF156A, 0x92B54, 0xF0BA4, 0xF1B4A, 0x63A94, 0xF1A94, 0xF192A, 0x42A5C,
    0xF0AAC, 0xF156A, 0x22B64, 0xF0DA4, 0x61D52, 0xF0E4A, 0xF0C96, 0x5192E, 0xF1956, 0xF0AB4,
    0x315AC, 0xF16D2, 0xB2EA4, 0xF16A4, 0xF164A, 0x63496, 0xF1496, 0xF0956, 0x50AB6, 0xF0B5A,
    0xF16D4, 0x236A4, 0xF1B24, 0x73A4A, 0xF1A4A, 0xF14AA, 0x5295A, 0xF096C, 0xF0B6A, 0x31B54,
    0xF1D92, 0x83D24, 0xF1D24, 0xF1A4C, 0x614AC, 0xF14AE, 0xF09AC, 0x40DAA, 0xF0EAA, 0xF0E92,
    0x31D26, 0xF0D26, 0x72A56, 0xF0A56, 0xF14B6, 0x52AB4, 0xF0AD4, 0xF16CA, 0x42E94, 0xF1694,
    0x8352A, 0xF152A, 0xF0A5A, 0x6155A, 0xF156A, 0xF0B54, 0x4174A, 0xF1B4A, 0xF1A94, 0x3392A,
    0xF192C, 0x7329C, 0xF0AAC, 0xF156A, 0x52B64, 0xF0DA4, 0xF1D4A, 0x41C94, 0xF0C96, 0x8192E,
    0xF0956, 0xF0AB6, 0x615AC, 0xF16D4, 0xF0EA4, 0x42E4A, 0xF164A, 0xF1516, 0x22936,
];

const fn entry(year: isize) -> Option<u32> {
    if year < FIRST_YEAR || year > LAST_YEAR {
        None
    } else {
        Some(MONTH_DAYS[(year - FIRST_YEAR) as usize])
    }
}

const fn month_length(entry: u32, slot: usize) -> isize {
    29 + ((entry >> slot) & 1) as isize
}

const fn year_length(entry: u32) -> isize {
    let months = if (entry >> 16) & 0xF == NO_LEAP_MONTH {
        12
    } else {
        13
    };
    let mut days = 0;
    let mut slot = 1;
    while slot <= months {
        days += month_length(entry, slot);
        slot += 1;
    }
    days
}

/// The month a leap month follows in the lunar year starting in `year`.
pub const fn leap_month(year: isize) -> Option<usize> {
    match entry(year) {
        Some(entry) if (entry >> 16) & 0xF != NO_LEAP_MONTH => {
            Some(((entry >> 16) & 0xF) as usize)
        }
        _ => None,
    }
}

/// Gregorian date of the Lunar New Year falling in `year`.
pub const fn lunar_new_year(year: isize) -> Option<Date> {
    if entry(year).is_none() {
        return None;
    }
    let mut days = 0;
    let mut current = FIRST_YEAR;
    while current < year {
        days += year_length(MONTH_DAYS[(current - FIRST_YEAR) as usize]);
        current += 1;
    }
    Some(START.add_days(days))
}

/// Gregorian date of a regular (non-leap) month and day of the lunar year
/// starting in Gregorian `year`.
pub const fn lunar_to_gregorian(year: isize, month: usize, day: usize) -> Option<Date> {
    let (entry, new_year) = match (entry(year), lunar_new_year(year)) {
        (Some(entry), Some(new_year)) => (entry, new_year),
        _ => return None,
    };
    let mut slots = month - 1;
    if let Some(leap) = leap_month(year) {
        if leap < month {
            slots += 1;
        }
    }
    let mut days = day as isize - 1;
    let mut slot = 1;
    while slot <= slots {
        days += month_length(entry, slot);
        slot += 1;
    }
    Some(new_year.add_days(days))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1901, 1, 1, Date::from_ymd(1901, 2, 19))]
    #[case(2021, 1, 1, Date::from_ymd(2021, 2, 12))]
    #[case(2023, 1, 1, Date::from_ymd(2023, 1, 22))]
    // Mid-Autumn Festival after the leap fourth month
    #[case(2020, 8, 15, Date::from_ymd(2020, 10, 1))]
    // Dragon Boat Festival before the leap sixth month
    #[case(2017, 5, 5, Date::from_ymd(2017, 5, 30))]
    #[case(2033, 12, 30, Date::from_ymd(2034, 2, 18))]
    #[case(2099, 1, 1, Date::from_ymd(2099, 1, 21))]
    fn conversion(
        #[case] year: isize,
        #[case] month: usize,
        #[case] day: usize,
        #[case] expected: Date,
    ) {
        assert_eq!(lunar_to_gregorian(year, month, day), Some(expected));
    }

    #[test]
    fn leap_months() {
        assert_eq!(leap_month(2020), Some(4));
        assert_eq!(leap_month(2017), Some(6));
        assert_eq!(leap_month(2021), None);
    }

    #[test]
    fn outside_table() {
        assert_eq!(lunar_to_gregorian(1900, 1, 1), None);
        assert_eq!(lunar_new_year(2100), None);
    }
}
