use chrono::NaiveDate;
use holidays::{Country, DateExt};

fn main() -> anyhow::Result<()> {
    let d = NaiveDate::from_ymd_opt(2024, 1, 1).expect("Invalid date");
    println!(
        "Is {d} a holiday in Japan? Answer is {}",
        d.is_holiday(Country::JP)
    );

    println!("{:?}", holidays::get(Country::JP, d).next());

    let mut jp = holidays::country_holidays(Country::JP)
        .language("en_US")
        .year(2024)
        .build()?;
    for (date, name) in jp.iter() {
        println!("{date} {name}");
    }
    println!("{:?}", jp.get(NaiveDate::from_ymd_opt(2024, 2, 12).expect("Invalid date")));

    Ok(())
}
