use csv::StringRecord;
use std::{
    collections::{BTreeMap, HashMap, HashSet},
    fmt::Display,
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

#[path = "build/observed.rs"]
mod observed;
#[path = "build/rules.rs"]
mod rules;

use rules::{Context, RuleRow};

// Years open ended queries are bounded by
const DEFAULT_MIN_YEAR: isize = 2000;
const DEFAULT_MAX_YEAR: isize = 2035;

const WEEKDAYS: [&str; 7] = ["mon", "tue", "wed", "thu", "fri", "sat", "sun"];

struct Country {
    index: u16,
    code: String,
    name: String,
    record: StringRecord,
}

impl Country {
    fn field(&self, name: &str) -> &str {
        let index = COUNTRY_COLUMNS
            .iter()
            .position(|it| *it == name)
            .unwrap_or_else(|| panic!("unknown countries.csv column {name}"));
        self.record.get(index).unwrap_or_default()
    }
}

impl Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Country::{}", self.code)
    }
}

const COUNTRY_COLUMNS: &[&str] = &[
    "code",
    "name",
    "default_language",
    "languages",
    "categories",
    "weekend",
    "observed_rule",
    "observed_since",
    "observed_label",
    "observed_label_before",
    "estimated_label",
    "observed_estimated_label",
    "substituted_label",
    "substituted_date_format",
    "start_year",
    "end_year",
    "islamic_confirmed",
];

pub fn is_country_enabled(code: &str) -> bool {
    let feature = format!("CARGO_FEATURE_{code}");
    std::env::var(&feature).is_ok()
}

fn read_csv(path: &Path) -> Vec<(usize, StringRecord)> {
    println!("cargo:rerun-if-changed={}", path.display());
    let file = match File::open(path) {
        Ok(it) => it,
        Err(_) => panic!("missing {}", path.display()),
    };
    csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(BufReader::new(file))
        .records()
        .enumerate()
        .map(|(i, row)| match row {
            // Line 1 is the header
            Ok(row) => (i + 2, row),
            Err(err) => panic!("{}: {err}", path.display()),
        })
        .collect()
}

fn column<'a>(path: &str, line: usize, row: &'a StringRecord, index: usize) -> &'a str {
    row.get(index)
        .unwrap_or_else(|| panic!("{path}:{line}: missing column {}", index + 1))
}

fn string_list(text: &str) -> String {
    let items: Vec<String> = text
        .split('|')
        .filter(|it| !it.is_empty())
        .map(|it| format!("{it:?}"))
        .collect();
    format!("&[{}]", items.join(", "))
}

fn optional_year(text: &str) -> String {
    match text {
        "" => "None".to_string(),
        year => format!(
            "Some({})",
            year.parse::<isize>()
                .unwrap_or_else(|_| panic!("invalid year {year}"))
        ),
    }
}

fn weekend_mask(days: &str) -> u8 {
    days.split('|').fold(0, |mask, day| {
        let bit = WEEKDAYS
            .iter()
            .position(|it| *it == day)
            .unwrap_or_else(|| panic!("invalid weekend day {day}"));
        mask | 1 << bit
    })
}

/// `fri|sat;2022:sat|sun` lists weekend days and the year they change.
fn weekend(text: &str) -> String {
    let entries: Vec<String> = text
        .split(';')
        .enumerate()
        .map(|(i, part)| match part.split_once(':') {
            Some((year, days)) if i > 0 => format!(
                "({}, {})",
                year.parse::<isize>()
                    .unwrap_or_else(|_| panic!("invalid weekend year {year}")),
                weekend_mask(days)
            ),
            None if i == 0 => format!("(isize::MIN, {})", weekend_mask(part)),
            _ => panic!("invalid weekend {text}"),
        })
        .collect();
    format!("&[{}]", entries.join(", "))
}

fn read_countries(root: &Path) -> Vec<Country> {
    let mut countries: Vec<Country> = read_csv(&root.join("countries.csv"))
        .into_iter()
        .map(|(line, record)| {
            if record.len() != COUNTRY_COLUMNS.len() {
                panic!("countries.csv:{line}: expected {} columns", COUNTRY_COLUMNS.len());
            }
            Country {
                index: 0,
                code: record[0].to_string(),
                name: record[1].to_string(),
                record,
            }
        })
        .filter(|it| is_country_enabled(&it.code))
        .collect();
    countries.sort_by(|a, b| a.code.cmp(&b.code));
    countries.iter_mut().enumerate().for_each(|(i, it)| {
        it.index = i as u16;
    });
    countries
}

fn gen_country_enum_decl<'a, W: Write, C: Iterator<Item = &'a Country>>(
    out: &mut W,
    countries: C,
) -> std::io::Result<()> {
    out.write_all(b"declare_countries![\n")?;
    for c in countries {
        writeln!(out, "{0}: \"{0}\" \"{1}\" {2},", c.code, c.name, c.index)?;
    }
    out.write_all(b"];\n")?;
    Ok(())
}

#[derive(Default)]
struct CountryData {
    subdivisions: Vec<String>,
    subdivision_codes: HashSet<String>,
    rules: Vec<String>,
    // (hijri month, hijri day, year) -> dates
    islamic: BTreeMap<(usize, usize, isize), Vec<isize>>,
}

fn read_subdivisions(root: &Path, data: &mut HashMap<String, CountryData>) {
    for (line, row) in read_csv(&root.join("subdivisions.csv")) {
        let get = |i| column("subdivisions.csv", line, &row, i);
        let Some(country) = data.get_mut(get(0)) else {
            continue;
        };
        let code = get(1);
        if !country.subdivision_codes.insert(code.to_string()) {
            panic!("subdivisions.csv:{line}: duplicate subdivision {code}");
        }
        country.subdivisions.push(format!(
            "Subdivision {{ code: {code:?}, name: {:?}, aliases: {} }}",
            get(2),
            string_list(get(3))
        ));
    }
}

fn read_rules(root: &Path, countries: &[Country], data: &mut HashMap<String, CountryData>) {
    let defaults: HashMap<&str, Option<observed::Rule>> = countries
        .iter()
        .map(|c| {
            let rule = match c.field("observed_rule") {
                "" => None,
                text => Some(observed::parse_tokens(text.split(' ')).unwrap_or_else(|err| {
                    panic!("countries.csv: {}: {err}", c.code)
                })),
            };
            (c.code.as_str(), rule)
        })
        .collect();

    for (line, row) in read_csv(&root.join("rules.csv")) {
        let get = |i| column("rules.csv", line, &row, i).to_string();
        let code = get(0);
        let (Some(country), Some(info)) = (
            data.get_mut(&code),
            countries.iter().find(|it| it.code == code),
        ) else {
            continue;
        };
        let categories: Vec<String> = info
            .field("categories")
            .split('|')
            .map(String::from)
            .collect();
        let ctx = Context {
            categories: &categories,
            subdivisions: &country.subdivision_codes,
            default_rule: defaults.get(code.as_str()).copied().flatten(),
        };
        let row = RuleRow {
            subdiv: get(1),
            category: get(2),
            date: get(3),
            years: get(4),
            name: get(5),
            observed: get(6),
        };
        let rule = rules::parse_rule(&row, &ctx)
            .unwrap_or_else(|err| panic!("rules.csv:{line}: {err}"));
        country.rules.push(rule);
    }
}

fn read_islamic(root: &Path, data: &mut HashMap<String, CountryData>) {
    for (line, row) in read_csv(&root.join("islamic.csv")) {
        let get = |i| column("islamic.csv", line, &row, i);
        let Some(country) = data.get_mut(get(0)) else {
            continue;
        };
        let Some((month, day)) = get(1)
            .split_once('-')
            .and_then(|(m, d)| Some((m.parse::<usize>().ok()?, d.parse::<usize>().ok()?)))
        else {
            panic!("islamic.csv:{line}: invalid hijri date")
        };
        let Ok(year) = get(2).parse::<isize>() else {
            panic!("islamic.csv:{line}: invalid year")
        };
        let Ok(date) = rules::parse_iso_date(&format!("{year}-{}", get(3))) else {
            panic!("islamic.csv:{line}: invalid date")
        };
        country
            .islamic
            .entry((month, day, year))
            .or_default()
            .push(date);
    }
}

fn islamic_confirmed(text: &str) -> String {
    match text.split_once('-') {
        None if text.is_empty() => "None".to_string(),
        Some((from, to)) => match (from.parse::<isize>(), to.parse::<isize>()) {
            (Ok(from), Ok(to)) => format!("Some(({from}, {to}))"),
            _ => panic!("invalid islamic_confirmed {text}"),
        },
        None => panic!("invalid islamic_confirmed {text}"),
    }
}

fn gen_country_info<W: Write>(out: &mut W, c: &Country, data: &CountryData) -> std::io::Result<()> {
    let default_language = match c.field("default_language") {
        "" => "None".to_string(),
        language => format!("Some({language:?})"),
    };
    let categories: Vec<String> = c
        .field("categories")
        .split('|')
        .map(rules::category_variant)
        .collect();
    let observed_since = rules::parse_date_windows(c.field("observed_since"))
        .unwrap_or_else(|err| panic!("countries.csv: {}: {err}", c.code));
    let overrides: Vec<String> = data
        .islamic
        .iter()
        .map(|((month, day, year), dates)| {
            let dates: Vec<String> = dates.iter().map(|it| format!("Date({it})")).collect();
            format!(
                "IslamicOverride {{ month: {month}, day: {day}, year: {year}, dates: &[{}] }}",
                dates.join(", ")
            )
        })
        .collect();

    writeln!(out, "// {}", c.name)?;
    writeln!(out, "CountryInfo {{")?;
    writeln!(out, "default_language: {default_language},")?;
    writeln!(out, "languages: {},", string_list(c.field("languages")))?;
    writeln!(out, "categories: &[{}],", categories.join(", "))?;
    writeln!(out, "weekend: {},", weekend(c.field("weekend")))?;
    writeln!(out, "observed_since: {observed_since},")?;
    for label in [
        "observed_label",
        "observed_label_before",
        "estimated_label",
        "observed_estimated_label",
        "substituted_label",
        "substituted_date_format",
    ] {
        writeln!(out, "{label}: {:?},", c.field(label))?;
    }
    writeln!(out, "start_year: {},", optional_year(c.field("start_year")))?;
    writeln!(out, "end_year: {},", optional_year(c.field("end_year")))?;
    writeln!(out, "subdivisions: &[")?;
    for subdivision in &data.subdivisions {
        writeln!(out, "{subdivision},")?;
    }
    writeln!(out, "],")?;
    writeln!(out, "rules: &[")?;
    for rule in &data.rules {
        writeln!(out, "{rule},")?;
    }
    writeln!(out, "],")?;
    writeln!(
        out,
        "islamic: IslamicOverrides {{ confirmed: {}, overrides: &[{}] }},",
        islamic_confirmed(c.field("islamic_confirmed")),
        overrides.join(", ")
    )?;
    writeln!(out, "}},")?;
    Ok(())
}

fn gen_data_tables<W: Write>(
    out: &mut W,
    countries: &[Country],
    data: &HashMap<String, CountryData>,
) -> std::io::Result<()> {
    let min_year = year_from_env("HOLIDAYS_MIN_YEAR", DEFAULT_MIN_YEAR);
    let max_year = year_from_env("HOLIDAYS_MAX_YEAR", DEFAULT_MAX_YEAR);
    if min_year > max_year {
        panic!("HOLIDAYS_MIN_YEAR is after HOLIDAYS_MAX_YEAR");
    }
    writeln!(out, "pub const DEFAULT_MIN_YEAR: isize = {min_year};")?;
    writeln!(out, "pub const DEFAULT_MAX_YEAR: isize = {max_year};")?;

    out.write_all(b"pub(crate) static COUNTRY_INFO: &[CountryInfo] = &[\n")?;
    for c in countries {
        gen_country_info(out, c, &data[&c.code])?;
    }
    out.write_all(b"];\n")?;
    Ok(())
}

fn year_from_env(name: &str, default: isize) -> isize {
    println!("cargo:rerun-if-env-changed={name}");
    std::env::var(name)
        .map(|it| it.parse().unwrap_or(default))
        .unwrap_or(default)
}

fn gen_catalogs<W: Write>(out: &mut W, root: &Path, countries: &[Country]) -> std::io::Result<()> {
    // "CC:language" -> msgid -> msgstr
    let mut catalogs: BTreeMap<String, BTreeMap<String, String>> = BTreeMap::new();
    for (line, row) in read_csv(&root.join("translations.csv")) {
        let get = |i| column("translations.csv", line, &row, i);
        let Some(country) = countries.iter().find(|it| it.code == get(0)) else {
            continue;
        };
        let language = get(1);
        if !country.field("languages").split('|').any(|it| it == language) {
            panic!("translations.csv:{line}: {language} is not listed for {}", country.code);
        }
        let catalog = catalogs
            .entry(format!("{}:{language}", country.code))
            .or_default();
        if catalog.contains_key(get(2)) {
            println!("cargo:warning=translations.csv:{line}: duplicate message {:?}", get(2));
            continue;
        }
        catalog.insert(get(2).to_string(), get(3).to_string());
    }

    let mut lookup = phf_codegen::Map::<&str>::new();
    for (i, (key, messages)) in catalogs.iter().enumerate() {
        let mut catalog = phf_codegen::Map::<&str>::new();
        for (msgid, msgstr) in messages {
            catalog.entry(msgid, format!("{msgstr:?}"));
        }
        writeln!(out, "static CATALOG_{i}: Catalog = {};", catalog.build())?;
        lookup.entry(key, format!("&CATALOG_{i}"));
    }
    writeln!(
        out,
        "static CATALOGS: phf::Map<&'static str, &'static Catalog> = {};",
        lookup.build()
    )?;
    Ok(())
}

fn main() {
    let root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").unwrap()).join("data");
    let countries = read_countries(&root);

    let out_dir = PathBuf::from(&std::env::var("OUT_DIR").unwrap());
    let countries_out = out_dir.join("decl_countries.rs");
    let mut countries_out =
        BufWriter::new(File::create(countries_out).expect("unable to create decl_countries.rs"));
    gen_country_enum_decl(&mut countries_out, countries.iter()).unwrap();

    let mut data: HashMap<String, CountryData> = countries
        .iter()
        .map(|it| (it.code.clone(), CountryData::default()))
        .collect();
    read_subdivisions(&root, &mut data);
    read_rules(&root, &countries, &mut data);
    read_islamic(&root, &mut data);

    let data_out = out_dir.join("country_data.rs");
    let mut data_out =
        BufWriter::new(File::create(data_out).expect("unable to create country_data.rs"));
    gen_data_tables(&mut data_out, &countries, &data).unwrap();

    let catalogs_out = out_dir.join("catalogs.rs");
    let mut catalogs_out =
        BufWriter::new(File::create(catalogs_out).expect("unable to create catalogs.rs"));
    gen_catalogs(&mut catalogs_out, &root, &countries).unwrap();
}
