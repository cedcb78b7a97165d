use chrono::NaiveDate;
use holidays::{Country, Query};

fn main() {
    let query = Query::country(Country::US).and(Query::year(2024));
    for holiday in query.run() {
        let date: NaiveDate = holiday.date.try_into().expect("Invalid date");
        println!("{date} {}", holiday.name);
    }

    let mut ny = holidays::country_holidays(Country::US)
        .subdiv("NY")
        .build()
        .expect("NY is a US state");
    let start = NaiveDate::from_ymd_opt(2024, 11, 1).expect("Invalid date");
    let end = NaiveDate::from_ymd_opt(2024, 12, 31).expect("Invalid date");
    for date in ny.range(start..end) {
        println!("{date} {:?}", ny.get(date));
    }
    println!(
        "{} workdays in November and December",
        ny.get_workdays_number(start, end)
    );
}
