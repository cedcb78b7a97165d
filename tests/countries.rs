use holidays::{country_holidays, Category, Country, Date};
use rstest::rstest;

fn day(date: &str) -> Date {
    date.parse().unwrap()
}

fn entries(
    country: Country,
    year: isize,
    configure: impl FnOnce(holidays::HolidayCalendarBuilder) -> holidays::HolidayCalendarBuilder,
) -> Vec<(String, String)> {
    let calendar = configure(country_holidays(country).year(year))
        .build()
        .unwrap();
    calendar
        .iter()
        .map(|(date, name)| (date.to_string(), name.to_string()))
        .collect()
}

fn expected(rows: &[(&str, &str)]) -> Vec<(String, String)> {
    rows.iter()
        .map(|(date, name)| (date.to_string(), name.to_string()))
        .collect()
}

#[cfg(feature = "US")]
#[test]
fn united_states_2026() {
    assert_eq!(
        entries(Country::US, 2026, |it| it),
        expected(&[
            ("2026-01-01", "New Year's Day"),
            ("2026-01-19", "Martin Luther King Jr. Day"),
            ("2026-02-16", "Washington's Birthday"),
            ("2026-05-25", "Memorial Day"),
            ("2026-06-19", "Juneteenth National Independence Day"),
            ("2026-07-03", "Independence Day (observed)"),
            ("2026-07-04", "Independence Day"),
            ("2026-09-07", "Labor Day"),
            ("2026-10-12", "Columbus Day"),
            ("2026-11-11", "Veterans Day"),
            ("2026-11-26", "Thanksgiving"),
            ("2026-12-25", "Christmas Day"),
        ])
    );
}

#[cfg(feature = "US")]
#[test]
fn new_year_observed_in_the_previous_year() {
    let holidays = entries(Country::US, 2021, |it| it);
    assert_eq!(
        holidays.last(),
        Some(&("2021-12-31".to_string(), "New Year's Day (observed)".to_string()))
    );
    assert!(entries(Country::US, 2022, |it| it)
        .iter()
        .all(|(date, _)| date != "2021-12-31"));
}

#[cfg(feature = "US")]
#[test]
fn observed_days_can_be_left_out() {
    let holidays = entries(Country::US, 2026, |it| it.observed(false));
    assert_eq!(holidays.len(), 11);
    assert!(!holidays.iter().any(|(date, _)| date == "2026-07-03"));
}

#[cfg(feature = "GB")]
#[test]
fn united_kingdom_2022() {
    assert_eq!(
        entries(Country::GB, 2022, |it| it),
        expected(&[
            ("2022-01-01", "New Year's Day"),
            ("2022-01-03", "New Year's Day (observed)"),
            ("2022-04-15", "Good Friday"),
            ("2022-05-02", "May Day"),
            ("2022-06-02", "Spring Bank Holiday"),
            ("2022-06-03", "Platinum Jubilee of Elizabeth II"),
            ("2022-09-19", "State Funeral of Queen Elizabeth II"),
            ("2022-12-25", "Christmas Day"),
            ("2022-12-26", "Boxing Day"),
            ("2022-12-27", "Christmas Day (observed)"),
        ])
    );
}

#[cfg(feature = "GB")]
#[test]
fn scotland_adds_its_own_holidays() {
    let mut calendar = country_holidays(Country::GB)
        .subdiv("SCT")
        .year(2022)
        .build()
        .unwrap();
    assert_eq!(calendar.len(), 14);
    assert_eq!(calendar.get(day("2022-01-02")), Some("New Year Holiday"));
    assert_eq!(
        calendar.get(day("2022-01-04")),
        Some("New Year Holiday (observed)")
    );
    assert_eq!(calendar.get(day("2022-08-01")), Some("Summer Bank Holiday"));
    assert_eq!(calendar.get(day("2022-11-30")), Some("Saint Andrew's Day"));
    assert_eq!(calendar.get(day("2022-04-18")), None);
}

#[cfg(feature = "JP")]
#[test]
fn japan_2019_golden_week() {
    let mut calendar = country_holidays(Country::JP).year(2019).build().unwrap();
    assert_eq!(calendar.len(), 22);
    let golden_week = calendar.range(day("2019-04-27")..day("2019-05-07"));
    assert_eq!(golden_week.len(), 8);
    assert_eq!(calendar.get(day("2019-04-30")), Some("国民の休日"));
    assert_eq!(calendar.get(day("2019-05-01")), Some("天皇の即位の日"));
    assert_eq!(calendar.get(day("2019-05-06")), Some("振替休日"));
    assert_eq!(
        calendar.get(day("2019-10-22")),
        Some("即位礼正殿の儀が行われる日")
    );
    assert_eq!(calendar.get(day("2019-03-21")), Some("春分の日"));
    assert_eq!(calendar.get(day("2019-09-23")), Some("秋分の日"));
}

#[cfg(feature = "KR")]
#[test]
fn south_korea_2023_alternative_holidays() {
    assert_eq!(
        entries(Country::KR, 2023, |it| it.language("en_US")),
        expected(&[
            ("2023-01-01", "New Year's Day"),
            ("2023-01-21", "The day preceding Korean New Year"),
            ("2023-01-22", "Korean New Year"),
            ("2023-01-23", "The second day of Korean New Year"),
            ("2023-01-24", "Alternative holiday for Korean New Year"),
            ("2023-03-01", "Independence Movement Day"),
            ("2023-05-05", "Children's Day"),
            ("2023-05-27", "Buddha's Birthday"),
            ("2023-05-29", "Alternative holiday for Buddha's Birthday"),
            ("2023-06-06", "Memorial Day"),
            ("2023-08-15", "Liberation Day"),
            ("2023-09-28", "The day preceding Chuseok"),
            ("2023-09-29", "Chuseok"),
            ("2023-09-30", "The second day of Chuseok"),
            ("2023-10-02", "Temporary Public Holiday"),
            ("2023-10-03", "National Foundation Day"),
            ("2023-10-09", "Hangul Day"),
            ("2023-12-25", "Christmas Day"),
        ])
    );
}

#[cfg(feature = "CN")]
#[test]
fn china_2024_substituted_days() {
    let mut calendar = country_holidays(Country::CN)
        .language("en_US")
        .year(2024)
        .build()
        .unwrap();
    assert_eq!(calendar.len(), 21);
    assert_eq!(
        calendar.get(day("2024-02-15")),
        Some("Day off (substituted from 02/04/2024)")
    );
    assert_eq!(
        calendar.get(day("2024-10-07")),
        Some("Day off (substituted from 10/12/2024)")
    );
    assert_eq!(calendar.get(day("2024-09-17")), Some("Mid-Autumn Festival"));

    // Weekend days worked in place of a holiday are workdays.
    assert!(calendar.is_workday(day("2024-02-04")));
    assert!(calendar.is_workday(day("2024-10-12")));
    assert!(!calendar.is_workday(day("2024-02-03")));
    assert!(!calendar.is_workday(day("2024-10-04")));
}

#[cfg(feature = "UA")]
#[test]
fn ukraine_2021_observed_days() {
    let mut calendar = country_holidays(Country::UA).year(2021).build().unwrap();
    assert_eq!(calendar.get(day("2021-05-03")), Some("День праці (вихідний)"));
    assert_eq!(
        calendar.get(day("2021-05-04")),
        Some("Великдень (Пасха) (вихідний)")
    );
    assert_eq!(
        calendar.get(day("2021-01-08")),
        Some("Вихідний день (перенесено з 16.01.2021)")
    );
    assert_eq!(calendar.get(day("2021-06-21")), Some("Трійця (вихідний)"));
}

#[cfg(feature = "UA")]
#[rstest]
#[case::before_the_first_law("1995-01-02", None)]
#[case::substitute_day("1999-04-12", Some("Вихідний день (перенесено з 24.04.1999)"))]
#[case::before_the_second_law("1999-04-13", None)]
#[case::after_the_second_law("2022-01-03", Some("Новий рік (вихідний)"))]
fn ukraine_observance_periods(#[case] date: &str, #[case] name: Option<&str>) {
    let mut calendar = country_holidays(Country::UA)
        .years([1995, 1999, 2022])
        .expand(false)
        .build()
        .unwrap();
    assert_eq!(calendar.get(day(date)), name);
}

#[cfg(feature = "JP")]
#[rstest]
#[case::before_substitute_holidays("1973-02-12", None)]
#[case::first_substitute_holiday("1973-04-30", Some("振替休日"))]
fn japan_substitute_holidays_start_in_april_1973(
    #[case] date: &str,
    #[case] name: Option<&str>,
) {
    let mut calendar = country_holidays(Country::JP)
        .year(1973)
        .expand(false)
        .build()
        .unwrap();
    assert_eq!(calendar.get(day(date)), name);
}

#[cfg(feature = "AR")]
#[test]
fn argentina_hebrew_holidays() {
    assert_eq!(
        entries(Country::AR, 2022, |it| it.categories([Category::Hebrew])),
        expected(&[
            ("2022-04-16", "Pascua Judía (Pésaj)"),
            ("2022-04-17", "Pascua Judía (Pésaj)"),
            ("2022-04-22", "Pascua Judía (Pésaj)"),
            ("2022-04-23", "Pascua Judía (Pésaj)"),
            ("2022-09-26", "Año Nuevo Judío (Rosh Hashana)"),
            ("2022-09-27", "Año Nuevo Judío (Rosh Hashana)"),
            ("2022-10-05", "Día del Perdón (Iom Kipur)"),
        ])
    );
}

#[cfg(feature = "AR")]
#[test]
fn argentina_hebrew_holidays_start_with_their_laws() {
    let calendar = country_holidays(Country::AR)
        .categories([Category::Hebrew])
        .years([1995, 2006])
        .build()
        .unwrap();
    let dates: Vec<_> = calendar.dates().map(|it| it.to_string()).collect();
    assert_eq!(dates, vec!["2006-09-23", "2006-09-24", "2006-10-02"]);
}

#[cfg(feature = "SA")]
#[test]
fn saudi_arabia_2023_estimated_labels() {
    assert_eq!(
        entries(Country::SA, 2023, |it| it.language("en_US")),
        expected(&[
            ("2023-02-22", "Founding Day Holiday"),
            ("2023-04-21", "Eid al-Fitr Holiday (estimated)"),
            ("2023-04-22", "Eid al-Fitr Holiday (estimated)"),
            ("2023-04-23", "Eid al-Fitr Holiday (estimated)"),
            ("2023-04-24", "Eid al-Fitr Holiday (estimated)"),
            ("2023-04-25", "Eid al-Fitr Holiday (observed, estimated)"),
            ("2023-04-26", "Eid al-Fitr Holiday (observed, estimated)"),
            ("2023-06-27", "Arafat Day (estimated)"),
            ("2023-06-28", "Eid al-Adha Holiday (estimated)"),
            ("2023-06-29", "Eid al-Adha Holiday (estimated)"),
            ("2023-06-30", "Eid al-Adha Holiday (estimated)"),
            ("2023-07-02", "Eid al-Adha Holiday (observed, estimated)"),
            ("2023-09-23", "National Day Holiday"),
            ("2023-09-24", "National Day Holiday (observed)"),
        ])
    );
}

#[cfg(feature = "IR")]
#[rstest]
#[case("2023-03-07", "Birthday of Mahdi (estimated)")]
#[case("2023-03-21", "Persian New Year")]
#[case("2023-03-24", "Persian New Year")]
#[case("2023-04-12", "Martyrdom of Ali (estimated)")]
#[case("2023-09-05", "Arbaeen (estimated)")]
#[case("2023-09-15", "Martyrdom of Ali al-Rida (estimated)")]
fn iran_2023(#[case] date: &str, #[case] name: &str) {
    let mut calendar = country_holidays(Country::IR)
        .language("en_US")
        .year(2023)
        .build()
        .unwrap();
    assert_eq!(calendar.get(day(date)), Some(name));
}

#[cfg(feature = "DE")]
#[rstest]
#[case(None, 9)]
#[case(Some("BY"), 12)]
#[case(Some("BE"), 10)]
fn germany_2022_per_state(#[case] subdiv: Option<&str>, #[case] count: usize) {
    let mut builder = country_holidays(Country::DE).year(2022);
    if let Some(subdiv) = subdiv {
        builder = builder.subdiv(subdiv);
    }
    assert_eq!(builder.build().unwrap().len(), count);
}

#[cfg(feature = "CA")]
#[test]
fn canada_2022_in_french() {
    assert_eq!(
        entries(Country::CA, 2022, |it| it.language("fr")),
        expected(&[
            ("2022-01-01", "Jour de l'an"),
            ("2022-01-03", "Jour de l'an (Observé)"),
            ("2022-04-15", "Vendredi saint"),
            ("2022-07-01", "Fête du Canada"),
            ("2022-09-05", "Fête du Travail"),
            ("2022-12-25", "Jour de Noël"),
            ("2022-12-26", "Jour de Noël (Observé)"),
        ])
    );
}

#[cfg(feature = "all-countries")]
#[rstest]
#[case::united_arab_emirates(Country::AE, "2023-12-02", "National Day")]
#[case::argentina(Country::AR, "2022-05-25", "May Revolution Day")]
#[case::brazil(Country::BR, "2023-04-21", "Tiradentes' Day")]
#[case::canada(Country::CA, "2022-07-01", "Canada Day")]
#[case::china(Country::CN, "2022-01-01", "New Year's Day")]
#[case::germany(Country::DE, "2022-10-03", "German Unity Day")]
#[case::egypt(Country::EG, "2023-07-23", "July 23 Revolution Day")]
#[case::finland(Country::FI, "2022-01-06", "Epiphany")]
#[case::france(Country::FR, "2022-05-08", "Victory Day")]
#[case::hungary(Country::HU, "2022-03-15", "National Day")]
#[case::iran(Country::IR, "2023-02-11", "Islamic Revolution Day")]
#[case::italy(Country::IT, "2022-06-02", "Republic Day")]
#[case::japan(Country::JP, "2022-02-11", "Foundation Day")]
#[case::south_korea(Country::KR, "2022-03-01", "Independence Movement Day")]
#[case::saudi_arabia(Country::SA, "2023-02-22", "Founding Day Holiday")]
#[case::turkey(Country::TR, "2023-05-19", "Commemoration of Atatürk, Youth and Sports Day")]
#[case::ukraine(Country::UA, "2021-03-08", "International Women's Day")]
fn names_in_american_english(#[case] country: Country, #[case] date: &str, #[case] name: &str) {
    let date = day(date);
    let mut calendar = country_holidays(country)
        .language("en_US")
        .year(date.year())
        .build()
        .unwrap();
    assert_eq!(calendar.get(date), Some(name));
}
