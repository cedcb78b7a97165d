use std::time::Duration;

use crate::Error;

#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct Date(
    /// Days since 1st of January, 1970. (UNIX epoch)
    pub(crate) isize,
);

/// Day of the week, starting with Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum Weekday {
    Monday = 0,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 7]
    }

    pub const fn short_name(&self) -> &'static str {
        match self {
            Weekday::Monday => "mon",
            Weekday::Tuesday => "tue",
            Weekday::Wednesday => "wed",
            Weekday::Thursday => "thu",
            Weekday::Friday => "fri",
            Weekday::Saturday => "sat",
            Weekday::Sunday => "sun",
        }
    }
}

impl std::str::FromStr for Weekday {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .iter()
            .find(|it| it.short_name() == s)
            .copied()
            .ok_or(Error::InvalidDate)
    }
}

impl Date {
    pub const fn from_ymd(year: isize, month: usize, day: usize) -> Self {
        // Source: https://howardhinnant.github.io/date_algorithms.html

        let y = year;
        let m = month as isize;
        let d = day as isize;

        let adjusted_year = y - if m <= 2 { 1 } else { 0 };

        let era = if adjusted_year >= 0 {
            adjusted_year / 400
        } else {
            (adjusted_year - 399) / 400
        };

        let year_of_era = adjusted_year - era * 400;
        let month_part = if m > 2 { m - 3 } else { m + 9 };
        let day_of_year = (153 * month_part + 2) / 5 + d - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;

        Self(era * 146097 + day_of_era - 719468)
    }

    /// Same as [`Date::from_ymd`], but rejects days that don't exist.
    pub fn try_from_ymd(year: isize, month: usize, day: usize) -> Result<Self, Error> {
        if !(1..=12).contains(&month) || day == 0 || day > Self::days_in_month(year, month) {
            return Err(Error::InvalidDate);
        }
        Ok(Self::from_ymd(year, month, day))
    }

    #[inline]
    pub const fn from_year(year: isize) -> Self {
        Self::from_ymd(year, 1, 1)
    }

    pub const fn ymd(&self) -> (isize, usize, usize) {
        // Source: https://howardhinnant.github.io/date_algorithms.html

        let shifted = self.0 + 719468;
        let era = if shifted >= 0 {
            shifted
        } else {
            shifted - 146096
        } / 146097;
        let day_of_era = shifted - era * 146097;
        let year_of_era =
            (day_of_era - day_of_era / 1460 + day_of_era / 36524 - day_of_era / 146096) / 365;
        let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
        let month_part = (5 * day_of_year + 2) / 153;

        let day = day_of_year - (153 * month_part + 2) / 5 + 1;
        let month = if month_part < 10 {
            month_part + 3
        } else {
            month_part - 9
        };
        let year = year_of_era + era * 400 + if month <= 2 { 1 } else { 0 };

        (year, month as usize, day as usize)
    }

    /// Day of the month
    #[inline]
    pub const fn day(&self) -> usize {
        self.ymd().2
    }

    /// Month of the year
    #[inline]
    pub const fn month(&self) -> usize {
        self.ymd().1
    }

    /// Year
    #[inline]
    pub const fn year(&self) -> isize {
        self.ymd().0
    }

    #[inline]
    pub const fn weekday(&self) -> Weekday {
        // 1970-01-01 was a Thursday
        Weekday::from_index((self.0 + 3).rem_euclid(7) as usize)
    }

    #[inline]
    pub const fn add_days(self, days: isize) -> Self {
        Self(self.0 + days)
    }

    pub const fn is_leap_year(year: isize) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    pub const fn days_in_month(year: isize, month: usize) -> usize {
        match month {
            2 if Self::is_leap_year(year) => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        }
    }

    pub const fn days_since(&self, other: &Self) -> Result<usize, usize> {
        if self.0 > other.0 {
            Ok((self.0 - other.0) as usize)
        } else {
            Err((other.0 - self.0) as usize)
        }
    }

    pub const fn duration_since(&self, other: &Self) -> Result<Duration, Duration> {
        if self.0 > other.0 {
            Ok(Duration::from_secs(
                SECONDS_IN_DAY as u64 * (self.0 - other.0) as u64,
            ))
        } else {
            Err(Duration::from_secs(
                SECONDS_IN_DAY as u64 * (other.0 - self.0) as u64,
            ))
        }
    }
}

const SECONDS_IN_DAY: isize = 86400;
// Julian day number of 1970-01-01
pub(crate) const UNIX_EPOCH_JULIAN_DAY: isize = 2440588;

impl std::str::FromStr for Date {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.trim().splitn(3, '-');
        let mut next = || parts.next().ok_or(Error::InvalidDate);
        let year = next()?.parse().map_err(|_| Error::InvalidDate)?;
        let month = next()?.parse().map_err(|_| Error::InvalidDate)?;
        let day = next()?.parse().map_err(|_| Error::InvalidDate)?;
        Date::try_from_ymd(year, month, day)
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "Date({y:04}-{m:02}-{d:02})")
    }
}

impl TryFrom<Date> for std::time::SystemTime {
    type Error = Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let secs = (value.0.unsigned_abs() as u64)
            .checked_mul(SECONDS_IN_DAY as u64)
            .ok_or(Error::DateTooLarge)?;
        let offset = Duration::from_secs(secs);
        let instant = if value.0 < 0 {
            std::time::SystemTime::UNIX_EPOCH.checked_sub(offset)
        } else {
            std::time::SystemTime::UNIX_EPOCH.checked_add(offset)
        };
        instant.ok_or(Error::DateTooLarge)
    }
}

impl From<std::time::SystemTime> for Date {
    fn from(value: std::time::SystemTime) -> Self {
        let days = match value.duration_since(std::time::SystemTime::UNIX_EPOCH) {
            Ok(duration) => duration.as_secs() as isize / SECONDS_IN_DAY,
            Err(err) => {
                let secs = err.duration().as_secs() as isize;
                -((secs + SECONDS_IN_DAY - 1) / SECONDS_IN_DAY)
            }
        };

        Date(days)
    }
}

#[cfg(feature = "chrono")]
impl TryFrom<Date> for chrono::NaiveDate {
    type Error = Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        if value.0 > i32::MAX as isize - 719163 || value.0 < i32::MIN as isize + 719163 {
            return Err(Error::DateTooLarge);
        }
        chrono::NaiveDate::from_num_days_from_ce_opt(value.0 as i32 + 719163)
            .ok_or(Error::DateTooLarge)
    }
}
#[cfg(feature = "chrono")]
impl TryFrom<Date> for chrono::DateTime<chrono::Utc> {
    type Error = Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let naive = chrono::NaiveDate::try_from(value)?
            .and_hms_opt(0, 0, 0)
            .ok_or(Error::DateTooLarge)?;

        Ok(chrono::TimeZone::from_utc_datetime(&chrono::Utc, &naive))
    }
}
#[cfg(feature = "chrono")]
impl TryFrom<Date> for chrono::DateTime<chrono::Local> {
    type Error = Error;

    #[inline]
    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let dt_utc = chrono::DateTime::<chrono::Utc>::try_from(value)?;
        Ok(dt_utc.with_timezone(&chrono::Local))
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDate> for Date {
    fn from(value: chrono::NaiveDate) -> Self {
        use chrono::Datelike;
        Date(value.num_days_from_ce() as isize - 719163)
    }
}
#[cfg(feature = "chrono")]
impl From<chrono::DateTime<chrono::Utc>> for Date {
    #[inline]
    fn from(value: chrono::DateTime<chrono::Utc>) -> Self {
        Date::from(value.date_naive())
    }
}
#[cfg(feature = "chrono")]
impl From<chrono::DateTime<chrono::Local>> for Date {
    #[inline]
    fn from(value: chrono::DateTime<chrono::Local>) -> Self {
        Date::from(value.naive_local().date())
    }
}

#[cfg(feature = "time")]
impl TryFrom<Date> for time::Date {
    type Error = Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let julian_day =
            i32::try_from(value.0 + UNIX_EPOCH_JULIAN_DAY).map_err(|_| Error::DateTooLarge)?;
        time::Date::from_julian_day(julian_day).map_err(|_| Error::DateTooLarge)
    }
}
#[cfg(feature = "time")]
impl From<time::Date> for Date {
    #[inline]
    fn from(value: time::Date) -> Self {
        Date(value.to_julian_day() as isize - UNIX_EPOCH_JULIAN_DAY)
    }
}
#[cfg(feature = "time")]
impl From<time::OffsetDateTime> for Date {
    #[inline]
    fn from(value: time::OffsetDateTime) -> Self {
        Date::from(value.date())
    }
}

pub trait DateExt: Into<Date> + Clone {
    fn is_holiday(&self, country: crate::country::Country) -> bool {
        crate::contains(country, self.clone())
    }

    fn is_holiday_in_any<C>(&self, countries: C) -> bool
    where
        C: IntoIterator<Item = crate::country::Country>,
    {
        crate::contains_in_many(countries, self.clone())
    }
}

impl DateExt for Date {}
impl DateExt for std::time::SystemTime {}

#[cfg(feature = "chrono")]
impl DateExt for chrono::NaiveDate {}
#[cfg(feature = "chrono")]
impl DateExt for chrono::DateTime<chrono::Utc> {}
#[cfg(feature = "chrono")]
impl DateExt for chrono::DateTime<chrono::Local> {}

#[cfg(feature = "time")]
impl DateExt for time::Date {}
#[cfg(feature = "time")]
impl DateExt for time::OffsetDateTime {}
