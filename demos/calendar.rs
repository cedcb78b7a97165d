use holidays::{country_holidays, Country, ICalExporter, Lookup};

fn main() -> Result<(), holidays::Error> {
    let gb = country_holidays(Country::GB).subdiv("SCT").year(2024).build()?;
    let us = country_holidays(Country::US).year(2024).build()?;
    let both = gb + us;

    for (date, names) in &both {
        println!("{date} {names}");
    }
    println!("Christmas: {:?}", both.get_named("christmas", Lookup::IContains, true));

    let path = ICalExporter::new(&both)?.export_ics(std::env::temp_dir(), "gb-us-2024")?;
    println!("exported to {}", path.display());
    Ok(())
}
