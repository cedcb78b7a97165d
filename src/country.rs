use std::collections::BTreeMap;

use crate::category::Category;
use crate::data::{country_info, Subdivision};
use crate::Error;

macro_rules! declare_countries {
    ($($code: ident: $str_code: literal $name: literal $val:literal),* $(,)?) => {
        /// Two-letter country codes as specified by ISO 3166-1 alpha-2.
        #[allow(dead_code)]
        #[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
        #[repr(u16)]
        pub enum Country {$(
            #[doc = $name]
            $code = $val
        ),*}

        impl Country {
            /// Every country compiled into the crate.
            pub const ALL: &[Country] = &[$(
                Country::$code
            ),*];
            const CODES: &[&'static str] = &[$(
                $str_code
            ),*];
            const NAMES: &[&'static str] = &[$(
                $name
            ),*];
        }

        impl std::str::FromStr for Country {
            type Err = Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Ok(match s {
                    $(
                        #[cfg(feature = $str_code)]
                        $str_code => Country::$code,
                    )*
                    _ => return Err(Error::CountryNotAvailable),
                })
            }
        }
    };
}

include!(concat!(env!("OUT_DIR"), "/decl_countries.rs"));

impl Country {
    pub fn name(&self) -> &'static str {
        Self::NAMES[*self as usize]
    }

    /// Language holiday names are written in, when translations exist.
    pub fn default_language(&self) -> Option<&'static str> {
        country_info(*self).default_language
    }

    /// Languages holiday names can be translated to.
    pub fn languages(&self) -> &'static [&'static str] {
        country_info(*self).languages
    }

    /// Holiday categories the country defines, [`Category::Public`] included.
    pub fn categories(&self) -> &'static [Category] {
        country_info(*self).categories
    }

    pub fn subdivisions(&self) -> &'static [Subdivision] {
        country_info(*self).subdivisions
    }

    /// Alternative names of subdivisions, keyed by subdivision code.
    pub fn subdivision_aliases(&self) -> BTreeMap<&'static str, &'static [&'static str]> {
        self.subdivisions()
            .iter()
            .filter(|it| !it.aliases.is_empty())
            .map(|it| (it.code, it.aliases))
            .collect()
    }

    /// First year the country has holidays for.
    pub fn start_year(&self) -> Option<isize> {
        country_info(*self).start_year
    }

    /// Last year the country has holidays for.
    pub fn end_year(&self) -> Option<isize> {
        country_info(*self).end_year
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl AsRef<str> for Country {
    fn as_ref(&self) -> &str {
        Self::CODES[*self as usize]
    }
}

const _: () = assert!(Country::ALL.len() <= u64::BITS as usize);

/// Set of countries, one bit per enum discriminant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountrySet(u64);

impl CountrySet {
    pub const fn new() -> Self {
        CountrySet(0)
    }

    pub fn insert(&mut self, country: Country) {
        self.0 |= 1u64 << country as u16;
    }

    pub fn contains(&self, country: Country) -> bool {
        self.0 & (1u64 << country as u16) != 0
    }

    pub fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = Country>,
    {
        for country in iter {
            self.insert(country);
        }
    }

    /// Countries in discriminant order.
    pub fn iter(&self) -> CountrySetIter {
        CountrySetIter(self.0)
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Country> for CountrySet {
    fn from_iter<I: IntoIterator<Item = Country>>(iter: I) -> Self {
        let mut set = CountrySet::new();
        set.extend(iter);
        set
    }
}

impl From<Country> for CountrySet {
    fn from(country: Country) -> Self {
        let mut set = CountrySet::new();
        set.insert(country);
        set
    }
}

impl std::ops::BitOr for CountrySet {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        CountrySet(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for CountrySet {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for CountrySet {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        CountrySet(self.0 & rhs.0)
    }
}

impl std::ops::BitAndAssign for CountrySet {
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}

impl IntoIterator for CountrySet {
    type Item = Country;
    type IntoIter = CountrySetIter;

    fn into_iter(self) -> Self::IntoIter {
        CountrySetIter(self.0)
    }
}

pub struct CountrySetIter(u64);

impl Iterator for CountrySetIter {
    type Item = Country;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        // clear lowest set bit
        self.0 &= self.0 - 1;
        Country::ALL.get(index).copied()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}
