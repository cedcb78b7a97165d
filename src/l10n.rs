//! Localized holiday names.
//!
//! Names and labels are message ids written in a country's default
//! language. Other languages are served from catalogs compiled from
//! `data/translations.csv`; missing messages fall back to the id.

use std::collections::BTreeMap;

use crate::country::Country;
use crate::date::Date;
use crate::Error;

type Catalog = phf::Map<&'static str, &'static str>;

include!(concat!(env!("OUT_DIR"), "/catalogs.rs"));

#[derive(Debug, Clone, Copy)]
pub(crate) struct Translator {
    catalog: Option<&'static Catalog>,
}

impl Translator {
    #[cfg(test)]
    pub(crate) const NONE: Translator = Translator { catalog: None };

    pub(crate) fn new(country: Country, language: Option<&str>) -> Self {
        let catalog = language.and_then(|language| {
            CATALOGS
                .get(format!("{country}:{language}").as_str())
                .copied()
        });
        Translator { catalog }
    }

    pub(crate) fn tr(&self, msgid: &'static str) -> &'static str {
        self.catalog
            .and_then(|catalog| catalog.get(msgid).copied())
            .unwrap_or(msgid)
    }
}

fn is_language_code(language: &str) -> bool {
    let mut parts = language.split('_');
    let lang = parts.next().unwrap_or_default();
    let region = parts.next();
    (2..=3).contains(&lang.len())
        && lang.bytes().all(|it| it.is_ascii_lowercase())
        && region.map_or(true, |region| {
            region.len() == 2 && region.bytes().all(|it| it.is_ascii_uppercase())
        })
        && parts.next().is_none()
}

/// Checks `language` against the languages `country` is translated to.
///
/// Countries without translations accept any well formed code and keep
/// their default names.
pub(crate) fn check_language(country: Country, language: &str) -> Result<(), Error> {
    if !is_language_code(language) {
        return Err(Error::InvalidLanguageCode);
    }
    let languages = country.languages();
    if languages.is_empty() {
        log::warn!("{country} has no translations, {language} falls back to default names");
        return Ok(());
    }
    if languages.contains(&language) {
        Ok(())
    } else {
        Err(Error::LanguageNotAvailable)
    }
}

/// Formats `date` with the `%Y`, `%m` and `%d` directives of `format`.
pub(crate) fn format_date(date: Date, format: &str) -> String {
    let (year, month, day) = date.ymd();
    let mut result = String::with_capacity(format.len() + 4);
    let mut chars = format.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('Y') => result.push_str(&format!("{year:04}")),
            Some('m') => result.push_str(&format!("{month:02}")),
            Some('d') => result.push_str(&format!("{day:02}")),
            Some('%') => result.push('%'),
            Some(other) => {
                result.push('%');
                result.push(other);
            }
            None => result.push('%'),
        }
    }
    result
}

/// Every compiled in country with the codes of its subdivisions.
pub fn list_supported_countries() -> BTreeMap<Country, Vec<&'static str>> {
    Country::ALL
        .iter()
        .map(|country| {
            let codes = country.subdivisions().iter().map(|it| it.code).collect();
            (*country, codes)
        })
        .collect()
}

/// Every compiled in country that has translations, with its languages.
pub fn list_localized_countries() -> BTreeMap<Country, &'static [&'static str]> {
    Country::ALL
        .iter()
        .filter(|country| !country.languages().is_empty())
        .map(|country| (*country, country.languages()))
        .collect()
}
