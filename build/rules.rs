use std::collections::HashSet;

use crate::observed::{self, weekday_index, Rule as ShiftRule};

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];
const WEEKDAY_VARIANTS: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

pub type ParseResult<T> = Result<T, String>;

/// One row of `rules.csv`.
pub struct RuleRow {
    pub subdiv: String,
    pub category: String,
    pub date: String,
    pub years: String,
    pub name: String,
    pub observed: String,
}

/// What a rule is validated against.
pub struct Context<'a> {
    pub categories: &'a [String],
    pub subdivisions: &'a HashSet<String>,
    pub default_rule: Option<ShiftRule>,
}

pub const fn days_from_civil(y: isize, m: isize, d: isize) -> isize {
    // Source: https://howardhinnant.github.io/date_algorithms.html
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
    era * 146097 + day_of_era - 719468
}

fn days_in_month(year: isize, month: usize) -> usize {
    match month {
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn number<T: std::str::FromStr>(text: &str) -> ParseResult<T> {
    text.parse().map_err(|_| format!("invalid number {text}"))
}

/// Parses `YYYY-MM-DD` into days since the Unix epoch.
pub fn parse_iso_date(text: &str) -> ParseResult<isize> {
    let mut parts = text.split('-');
    let (Some(y), Some(m), Some(d), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(format!("invalid date {text}"));
    };
    let (year, month, day): (isize, usize, usize) = (number(y)?, number(m)?, number(d)?);
    if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
        return Err(format!("invalid date {text}"));
    }
    Ok(days_from_civil(year, month as isize, day as isize))
}

/// Parses `MM-DD` of a calendar whose months have at most 31 days.
fn parse_month_day(text: &str, max_month: usize) -> ParseResult<(usize, usize)> {
    let (month, day) = text
        .split_once('-')
        .ok_or_else(|| format!("invalid month-day {text}"))?;
    let (month, day): (usize, usize) = (number(month)?, number(day)?);
    if !(1..=max_month).contains(&month) || !(1..=31).contains(&day) {
        return Err(format!("invalid month-day {text}"));
    }
    Ok((month, day))
}

fn month(name: &str) -> ParseResult<usize> {
    MONTHS
        .iter()
        .position(|it| *it == name)
        .map(|it| it + 1)
        .ok_or_else(|| format!("invalid month {name}"))
}

fn weekday(name: &str) -> ParseResult<&'static str> {
    weekday_index(name)
        .map(|it| WEEKDAY_VARIANTS[it])
        .ok_or_else(|| format!("invalid weekday {name}"))
}

fn ordinal(text: &str) -> ParseResult<isize> {
    Ok(match text {
        "1st" => 1,
        "2nd" => 2,
        "3rd" => 3,
        "4th" => 4,
        "5th" => 5,
        "last" => -1,
        _ => return Err(format!("invalid ordinal {text}")),
    })
}

fn fixed_day(month: usize, day: &str) -> ParseResult<usize> {
    let day = number(day)?;
    if day == 0 || day > days_in_month(2000, month) {
        return Err(format!("invalid day {day}"));
    }
    Ok(day)
}

fn parse_base_date(tokens: &[&str]) -> ParseResult<String> {
    Ok(match tokens {
        ["easter"] => "DateExpr::Easter".to_string(),
        ["orthodox_easter"] => "DateExpr::OrthodoxEaster".to_string(),
        ["rosh_hashanah"] => "DateExpr::RoshHashanah".to_string(),
        ["passover"] => "DateExpr::Passover".to_string(),
        ["vernal_equinox"] => "DateExpr::VernalEquinox".to_string(),
        ["autumnal_equinox"] => "DateExpr::AutumnalEquinox".to_string(),
        ["qingming"] => "DateExpr::Qingming".to_string(),
        [date] => format!("DateExpr::Special(Date({}))", parse_iso_date(date)?),
        ["julian", m, d] => {
            let month = month(m)?;
            format!(
                "DateExpr::Julian {{ month: {month}, day: {} }}",
                fixed_day(month, d)?
            )
        }
        ["hijri", md] => {
            let (month, day) = parse_month_day(md, 12)?;
            format!("DateExpr::Hijri {{ month: {month}, day: {day} }}")
        }
        ["chinese", md] => {
            let (month, day) = parse_month_day(md, 12)?;
            format!("DateExpr::Chinese {{ month: {month}, day: {day} }}")
        }
        ["korean", md] => {
            let (month, day) = parse_month_day(md, 12)?;
            format!("DateExpr::Korean {{ month: {month}, day: {day} }}")
        }
        ["persian", md, rest @ ..] => {
            let (month, day) = parse_month_day(md, 12)?;
            let prev = match rest {
                [] => false,
                ["prev"] => true,
                _ => return Err(format!("invalid persian date {}", tokens.join(" "))),
            };
            format!("DateExpr::Persian {{ month: {month}, day: {day}, prev: {prev} }}")
        }
        [n, wd, "of", m] => format!(
            "DateExpr::NthWeekdayOfMonth {{ n: {}, weekday: Weekday::{}, month: {} }}",
            ordinal(n)?,
            weekday(wd)?,
            month(m)?
        ),
        [n, wd, direction @ ("before" | "from"), m, d] => {
            let n = match ordinal(n)? {
                -1 => return Err("`last` needs a month".to_string()),
                n if *direction == "before" => -n,
                n => n,
            };
            let month = month(m)?;
            format!(
                "DateExpr::NthWeekdayFrom {{ n: {n}, weekday: Weekday::{}, month: {month}, day: {} }}",
                weekday(wd)?,
                fixed_day(month, d)?
            )
        }
        [m, d] => {
            let month = month(m)?;
            format!(
                "DateExpr::Fixed {{ month: {month}, day: {} }}",
                fixed_day(month, d)?
            )
        }
        _ => return Err(format!("invalid date expression {}", tokens.join(" "))),
    })
}

/// Parses a date expression into a `DateExpr` and its day offset.
pub fn parse_date(text: &str) -> ParseResult<(String, i16)> {
    let mut tokens: Vec<&str> = text.split(' ').collect();
    let mut offset = 0;
    if let Some(last) = tokens.last() {
        if tokens.len() > 1 && (last.starts_with('+') || last.starts_with('-')) {
            offset = number(last.trim_start_matches('+'))?;
            tokens.pop();
        }
    }

    let expr = match tokens.as_slice() {
        ["substitute", to, "from", from] => format!(
            "DateExpr::Substitute {{ to: Date({}), from: Date({}) }}",
            parse_iso_date(to)?,
            parse_iso_date(from)?
        ),
        ["bridge", rest @ ..] => {
            let split = rest
                .iter()
                .position(|it| *it == "and")
                .ok_or_else(|| format!("invalid bridge {text}"))?;
            format!(
                "DateExpr::Bridge(&{}, &{})",
                parse_base_date(&rest[..split])?,
                parse_base_date(&rest[split + 1..])?
            )
        }
        tokens => parse_base_date(tokens)?,
    };
    Ok((expr, offset))
}

fn parse_year_range(text: &str) -> ParseResult<String> {
    let (range, step) = match text.split_once('/') {
        Some((range, step)) => (range, number::<isize>(step)?),
        None => (text, 1),
    };
    if step < 1 {
        return Err(format!("invalid year step in {text}"));
    }
    let optional = |year: &str| -> ParseResult<String> {
        Ok(if year.is_empty() {
            "None".to_string()
        } else {
            format!("Some({})", number::<isize>(year)?)
        })
    };
    let (since, until) = match range.split_once('-') {
        Some((since, until)) => (optional(since)?, optional(until)?),
        None => {
            let year = optional(range)?;
            (year.clone(), year)
        }
    };
    if since == "None" && step > 1 {
        return Err(format!("stepped years need a start in {text}"));
    }
    Ok(format!(
        "YearRange {{ since: {since}, until: {until}, step: {step} }}"
    ))
}

/// Parses `RANGE(|RANGE)*(;!YEAR(|YEAR)*)?` into a `YearFilter`.
pub fn parse_years(text: &str) -> ParseResult<String> {
    if text.is_empty() {
        return Ok("YearFilter::ALWAYS".to_string());
    }
    let (ranges, except) = match text.split_once(';') {
        Some((ranges, except)) => (
            ranges,
            except
                .strip_prefix('!')
                .ok_or_else(|| format!("invalid year exceptions in {text}"))?,
        ),
        None => (text, ""),
    };
    let ranges = ranges
        .split('|')
        .filter(|it| !it.is_empty())
        .map(parse_year_range)
        .collect::<ParseResult<Vec<_>>>()?;
    let except = except
        .split('|')
        .filter(|it| !it.is_empty())
        .map(|it| number::<isize>(it).map(|it| it.to_string()))
        .collect::<ParseResult<Vec<_>>>()?;
    Ok(format!(
        "YearFilter {{ ranges: &[{}], except: &[{}] }}",
        ranges.join(", "),
        except.join(", ")
    ))
}

/// Parses `FROM..TO(|FROM..TO)*` into inclusive date windows. Each end is
/// `YYYY-MM-DD`, a bare `YYYY` (its first or last day) or empty (open).
pub fn parse_date_windows(text: &str) -> ParseResult<String> {
    let bound = |text: &str, last_day: bool| -> ParseResult<String> {
        Ok(match text {
            "" => "None".to_string(),
            _ if text.contains('-') => format!("Some(Date({}))", parse_iso_date(text)?),
            _ => {
                let year = number::<isize>(text)?;
                let days = if last_day {
                    days_from_civil(year, 12, 31)
                } else {
                    days_from_civil(year, 1, 1)
                };
                format!("Some(Date({days}))")
            }
        })
    };
    let windows = text
        .split('|')
        .filter(|it| !it.is_empty())
        .map(|window| {
            let (since, until) = window
                .split_once("..")
                .ok_or_else(|| format!("invalid date window {window}"))?;
            Ok(format!(
                "DateWindow {{ since: {}, until: {} }}",
                bound(since, false)?,
                bound(until, true)?
            ))
        })
        .collect::<ParseResult<Vec<_>>>()?;
    Ok(format!("&[{}]", windows.join(", ")))
}

fn parse_subdivs(text: &str, known: &HashSet<String>) -> ParseResult<String> {
    let (variant, codes) = match text {
        "" => return Ok("SubdivFilter::All".to_string()),
        "-" => return Ok("SubdivFilter::NationalOnly".to_string()),
        _ if text.starts_with('!') => ("Except", &text[1..]),
        _ if text.starts_with('+') => ("NationalAnd", &text[1..]),
        _ => ("Only", text),
    };
    let codes = codes
        .split('|')
        .map(|code| {
            if known.contains(code) {
                Ok(format!("{code:?}"))
            } else {
                Err(format!("unknown subdivision {code}"))
            }
        })
        .collect::<ParseResult<Vec<_>>>()?;
    Ok(format!("SubdivFilter::{variant}(&[{}])", codes.join(", ")))
}

fn parse_observance(text: &str, ctx: &Context) -> ParseResult<String> {
    if text.is_empty() {
        return Ok("None".to_string());
    }

    let mut mode = "Add";
    let mut use_default = false;
    let mut overlap = false;
    let mut since = "None".to_string();
    let mut label = "None".to_string();
    let mut rule_tokens = Vec::new();

    let tokens: Vec<&str> = text.split(' ').collect();
    for (i, token) in tokens.iter().enumerate() {
        match *token {
            "move" => mode = "Move",
            "move-observed" => mode = "MoveObserved",
            "only" => mode = "Only",
            "label" => mode = "Label",
            "shift" => mode = "Shift",
            "yes" => use_default = true,
            "overlap" => overlap = true,
            _ if token.starts_with("as:") => {
                let name = std::iter::once(&token[3..])
                    .chain(tokens[i + 1..].iter().copied())
                    .collect::<Vec<_>>()
                    .join(" ");
                label = format!("Some({name:?})");
                break;
            }
            _ if token.starts_with('@') => {
                since = format!("Some({})", number::<isize>(&token[1..])?);
            }
            _ => rule_tokens.push(*token),
        }
    }

    let rule = if rule_tokens.is_empty() {
        if use_default || matches!(mode, "Add" | "Move" | "MoveObserved") {
            ctx.default_rule
                .ok_or("country has no default observed rule")?
        } else {
            ShiftRule::NONE
        }
    } else {
        observed::parse_tokens(rule_tokens)?
    };
    if mode == "Shift" && rule.moves_to_workday() {
        return Err("shifts can't move to workdays".to_string());
    }

    Ok(format!(
        "Some(Observance {{ mode: ObservedMode::{mode}, rule: {rule}, since: {since}, overlap: {overlap}, label: {label} }})"
    ))
}

fn category(name: &str) -> String {
    name.split('_')
        .map(|part| {
            let mut chars = part.chars();
            chars
                .next()
                .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
                .unwrap_or_default()
        })
        .collect::<String>()
}

/// `Category::Variant` for a category name.
pub fn category_variant(name: &str) -> String {
    format!("Category::{}", category(name))
}

/// Renders a `Rule` literal for `row`.
pub fn parse_rule(row: &RuleRow, ctx: &Context) -> ParseResult<String> {
    if !ctx.categories.iter().any(|it| *it == row.category) {
        return Err(format!("category {} is not available", row.category));
    }
    let is_substitute = row.date.starts_with("substitute ");
    if is_substitute != row.name.is_empty() {
        return Err("only substituted days are unnamed".to_string());
    }

    let (date, offset) = parse_date(&row.date)?;
    Ok(format!(
        "Rule {{ subdivs: {}, category: {}, years: {}, date: {date}, offset: {offset}, name: {:?}, observance: {} }}",
        parse_subdivs(&row.subdiv, ctx.subdivisions)?,
        category_variant(&row.category),
        parse_years(&row.years)?,
        row.name,
        parse_observance(&row.observed, ctx)?,
    ))
}
