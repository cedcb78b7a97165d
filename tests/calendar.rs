use holidays::{country_holidays, Category, Country, Date, Error, Lookup, Query};
use rstest::rstest;

fn day(date: &str) -> Date {
    date.parse().unwrap()
}

#[cfg(feature = "US")]
#[rstest]
#[case::unknown_subdivision(country_holidays(Country::US).subdiv("XX"), Error::SubdivisionNotAvailable)]
#[case::unsupported_category(
    country_holidays(Country::US).categories([Category::Bank]),
    Error::CategoryNotAvailable
)]
#[case::no_categories(
    country_holidays(Country::US).categories(Vec::new()),
    Error::CategoryNotAvailable
)]
#[case::malformed_language(country_holidays(Country::US).language("english"), Error::InvalidLanguageCode)]
fn rejects_bad_selections(
    #[case] builder: holidays::HolidayCalendarBuilder,
    #[case] error: Error,
) {
    assert_eq!(builder.build().unwrap_err(), error);
}

#[cfg(feature = "UA")]
#[test]
fn rejects_languages_without_translations() {
    assert_eq!(
        country_holidays(Country::UA)
            .language("fr")
            .build()
            .unwrap_err(),
        Error::LanguageNotAvailable
    );
}

#[cfg(feature = "US")]
#[test]
fn subdivisions_add_their_holidays() {
    let calendar = country_holidays(Country::US)
        .subdiv("NY")
        .year(2024)
        .build()
        .unwrap();
    assert_eq!(calendar.len(), 14);
    assert_eq!(
        calendar.get_named("Election", Lookup::StartsWith, true),
        vec![day("2024-11-05")]
    );
}

#[cfg(feature = "GB")]
#[test]
fn subdivision_aliases_resolve_to_codes() {
    let mut by_alias = country_holidays(Country::GB)
        .subdiv("Scotland")
        .year(2024)
        .build()
        .unwrap();
    let mut by_code = country_holidays(Country::GB)
        .subdiv("SCT")
        .year(2024)
        .build()
        .unwrap();
    assert_eq!(by_alias.get(day("2024-11-30")), by_code.get(day("2024-11-30")));
    assert_eq!(by_alias.len(), by_code.len());
}

#[cfg(feature = "US")]
#[test]
fn years_are_populated_on_lookup() {
    let mut calendar = country_holidays(Country::US).build().unwrap();
    assert!(calendar.is_empty());
    assert!(calendar.contains(day("2024-12-25")));
    assert!(calendar.years().contains(&2024));
    assert_eq!(calendar.len(), 11);

    let mut fixed = country_holidays(Country::US)
        .expand(false)
        .year(2023)
        .build()
        .unwrap();
    assert!(!fixed.contains(day("2024-12-25")));
    assert!(fixed.contains(day("2023-12-25")));
}

#[cfg(all(feature = "US", feature = "GB"))]
#[test]
fn calendars_combine() {
    let gb = country_holidays(Country::GB).year(2024).build().unwrap();
    let us = country_holidays(Country::US).year(2024).build().unwrap();
    let mut both = gb + us;

    assert_eq!(both.countries(), vec![Country::GB, Country::US]);
    assert_eq!(both.get(day("2024-12-25")), Some("Christmas Day"));
    assert_eq!(
        both.get(day("2024-05-27")),
        Some("Memorial Day; Spring Bank Holiday")
    );
    assert_eq!(
        both.get_named("christmas", Lookup::IContains, true),
        vec![day("2024-12-25")]
    );

    // Both sources keep expanding.
    assert!(both.contains(day("2025-07-04")));
    assert!(both.contains(day("2025-04-18")));
}

#[cfg(feature = "US")]
#[test]
fn workdays() {
    let mut calendar = country_holidays(Country::US).build().unwrap();
    assert!(!calendar.is_workday(day("2024-07-04")));
    assert!(!calendar.is_workday(day("2024-07-06")));
    assert!(calendar.is_workday(day("2024-07-05")));
    assert_eq!(calendar.get_nth_workday(day("2024-07-03"), 1), day("2024-07-05"));
    assert_eq!(calendar.get_nth_workday(day("2024-07-08"), -2), day("2024-07-03"));
    assert_eq!(
        calendar.get_workdays_number(day("2024-12-23"), day("2024-12-27")),
        4
    );
    assert_eq!(
        calendar.get_workdays_number(day("2024-12-27"), day("2024-12-23")),
        4
    );
}

#[cfg(feature = "JP")]
#[rstest]
#[case(None, "元日")]
#[case(Some("en_US"), "New Year's Day")]
fn languages(#[case] language: Option<&str>, #[case] name: &str) {
    let mut builder = country_holidays(Country::JP).year(2022);
    if let Some(language) = language {
        builder = builder.language(language);
    }
    let mut calendar = builder.build().unwrap();
    assert_eq!(calendar.get(day("2022-01-01")), Some(name));
}

#[cfg(feature = "US")]
#[test]
fn free_functions() {
    assert!(holidays::contains(Country::US, day("2024-07-04")));
    assert!(!holidays::contains(Country::US, day("2024-07-05")));

    let found: Vec<_> = holidays::get(Country::US, day("2024-07-04")).collect();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name, "Independence Day");
    assert_eq!(found[0].code, Country::US);
}

#[cfg(all(feature = "US", feature = "GB"))]
#[test]
fn queries_span_countries_and_dates() {
    let holidays: Vec<_> = holidays::query(
        Query::countries([Country::GB, Country::US])
            & Query::date_range(day("2024-12-24")..day("2024-12-27")),
    )
    .map(|it| (it.date.to_string(), it.code, it.name))
    .collect();
    assert_eq!(
        holidays,
        vec![
            ("2024-12-25".to_string(), Country::GB, "Christmas Day".to_string()),
            ("2024-12-25".to_string(), Country::US, "Christmas Day".to_string()),
            ("2024-12-26".to_string(), Country::GB, "Boxing Day".to_string()),
        ]
    );
}

#[cfg(all(feature = "GB", feature = "chrono"))]
#[test]
fn chrono_dates() {
    use holidays::DateExt;

    let christmas = chrono::NaiveDate::from_ymd_opt(2024, 12, 25).unwrap();
    assert!(christmas.is_holiday(Country::GB));
    assert_eq!(Date::from(christmas), day("2024-12-25"));
    let back: chrono::NaiveDate = day("2024-12-25").try_into().unwrap();
    assert_eq!(back, christmas);
}

#[cfg(feature = "UA")]
#[test]
fn popping_named_holidays() {
    let mut calendar = country_holidays(Country::UA)
        .language("en_US")
        .year(2021)
        .build()
        .unwrap();
    let before = calendar.len();
    let removed = calendar.pop_named("(observed)").unwrap();
    assert!(!removed.is_empty());
    assert_eq!(calendar.len(), before - removed.len());
    assert!(calendar
        .get_named("observed", Lookup::IContains, true)
        .is_empty());
}
