//! iCalendar (RFC 5545) export of holiday calendars.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::calendar::{HolidayCalendar, NAME_DELIMITER};
use crate::date::Date;
use crate::Error;

const CRLF: &str = "\r\n";
const MAX_LINE_OCTETS: usize = 75;

/// A single iCalendar event spanning `days` consecutive days.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Event<'a> {
    name: &'a str,
    start: Date,
    days: usize,
}

impl Event<'_> {
    // First day after the event
    fn end(&self) -> Date {
        self.start.add_days(self.days as isize)
    }
}

/// Serializes a [`HolidayCalendar`] into iCalendar text.
pub struct ICalExporter<'a> {
    calendar: &'a HolidayCalendar,
    show_language: bool,
    language: String,
    prod_id: String,
    stamp: String,
}

impl<'a> ICalExporter<'a> {
    /// Fails with [`Error::InvalidLanguageCode`] when the calendar language
    /// has no two-letter ISO 639-1 form.
    pub fn new(calendar: &'a HolidayCalendar) -> Result<Self, Error> {
        let language = calendar.language().or_else(|| {
            calendar
                .countries()
                .first()
                .and_then(|it| it.default_language())
        });
        Ok(ICalExporter {
            calendar,
            show_language: false,
            language: language_tag(language)?,
            prod_id: format!(
                "-//holidays//holidays {}//EN",
                env!("CARGO_PKG_VERSION")
            ),
            stamp: timestamp(std::time::SystemTime::now()),
        })
    }

    /// Tag summaries with the calendar language.
    pub fn show_language(mut self, show: bool) -> Self {
        self.show_language = show;
        self
    }

    /// Time written to every `DTSTAMP`, the creation time by default.
    pub fn timestamp(mut self, time: std::time::SystemTime) -> Self {
        self.stamp = timestamp(time);
        self
    }

    /// Uppercase ISO 639-1 code of the calendar language.
    pub fn language(&self) -> &str {
        &self.language
    }

    fn events(&self) -> Vec<Event<'a>> {
        let mut events: Vec<Event<'a>> = Vec::new();
        let mut open: HashMap<&str, usize> = HashMap::new();
        let calendar: &'a HolidayCalendar = self.calendar;
        for (date, names) in calendar.iter() {
            for name in names.split(NAME_DELIMITER) {
                let last = open.get(name).copied();
                match last {
                    Some(index) if events[index].end() == date => {
                        events[index].days += 1;
                    }
                    _ => {
                        open.insert(name, events.len());
                        events.push(Event {
                            name,
                            start: date,
                            days: 1,
                        });
                    }
                }
            }
        }
        events
    }

    /// Full iCalendar document, lines delimited with CRLF.
    pub fn generate(&self) -> String {
        let summary = if self.show_language {
            format!("SUMMARY;LANGUAGE={}:", self.language)
        } else {
            "SUMMARY:".to_string()
        };

        let mut lines = vec![
            "BEGIN:VCALENDAR".to_string(),
            format!("PRODID:{}", self.prod_id),
            "VERSION:2.0".to_string(),
            "CALSCALE:GREGORIAN".to_string(),
        ];
        for event in self.events() {
            let (y, m, d) = event.start.ymd();
            lines.extend([
                "BEGIN:VEVENT".to_string(),
                format!("DTSTAMP:{}", self.stamp),
                format!("UID:{}", uuid::Uuid::new_v4()),
                format!("{summary}{}", escape(event.name)),
                format!("DTSTART;VALUE=DATE:{y:04}{m:02}{d:02}"),
                format!("DURATION:P{}D", event.days),
                "END:VEVENT".to_string(),
            ]);
        }
        lines.push("END:VCALENDAR".to_string());

        let mut output = String::new();
        for line in lines {
            output.push_str(&fold(&line));
            output.push_str(CRLF);
        }
        output
    }

    /// Writes `dir/filename.ics` and returns its path.
    pub fn export_ics(&self, dir: impl AsRef<Path>, filename: &str) -> Result<PathBuf, Error> {
        let dir = dir.as_ref();
        if !dir.exists() {
            return Err(Error::ExportPathNotFound);
        }
        if !dir.is_dir() {
            return Err(Error::ExportPathNotDirectory);
        }
        if self.calendar.is_empty() {
            log::warn!("nothing to export to {}", dir.display());
            return Err(Error::EmptyExport);
        }

        let path = if filename.ends_with(".ics") {
            dir.join(filename)
        } else {
            dir.join(format!("{filename}.ics"))
        };
        std::fs::write(&path, self.generate())?;
        log::debug!("exported holidays to {}", path.display());
        Ok(path)
    }
}

/// `ll` part of an `ll` or `ll_CC` code, uppercased; `EN` when unset.
fn language_tag(language: Option<&str>) -> Result<String, Error> {
    let Some(language) = language else {
        return Ok("EN".to_string());
    };
    let code = language.split(['_', '-']).next().unwrap_or_default();
    if code.len() != 2 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        log::warn!("{language} has no two-letter language code");
        return Err(Error::InvalidLanguageCode);
    }
    Ok(code.to_ascii_uppercase())
}

fn escape(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | ';' | ',' => {
                result.push('\\');
                result.push(c);
            }
            '\n' => result.push_str("\\n"),
            _ => result.push(c),
        }
    }
    result
}

/// Folds `line` into chunks of at most 75 octets, never splitting a UTF-8
/// sequence; continuation lines start with a space.
fn fold(line: &str) -> String {
    let mut result = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut octets = 0;
    for c in line.chars() {
        if octets + c.len_utf8() > MAX_LINE_OCTETS {
            result.push_str(CRLF);
            result.push(' ');
            octets = 1;
        }
        result.push(c);
        octets += c.len_utf8();
    }
    result
}

fn timestamp(time: std::time::SystemTime) -> String {
    let secs = time
        .duration_since(std::time::SystemTime::UNIX_EPOCH)
        .map(|it| it.as_secs())
        .unwrap_or_default();
    let (y, m, d) = Date::from(time).ymd();
    let seconds_of_day = secs % 86400;
    format!(
        "{y:04}{m:02}{d:02}T{:02}{:02}{:02}Z",
        seconds_of_day / 3600,
        seconds_of_day % 3600 / 60,
        seconds_of_day % 60
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("New Year's Day", "New Year's Day")]
    #[case("Día 1; Día 2", "Día 1\\; Día 2")]
    #[case("a,b\\c", "a\\,b\\\\c")]
    #[case("Time: 12:00", "Time: 12:00")]
    fn escapes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(escape(input), expected);
    }

    #[test]
    fn short_lines_are_not_folded() {
        assert_eq!(fold("SUMMARY:Christmas Day"), "SUMMARY:Christmas Day");
    }

    #[test]
    fn folds_on_character_boundaries() {
        let line = format!("SUMMARY:{}", "é".repeat(60));
        let folded = fold(&line);
        for part in folded.split(CRLF) {
            assert!(part.len() <= MAX_LINE_OCTETS);
        }
        let unfolded = folded.replace("\r\n ", "");
        assert_eq!(unfolded, line);
    }

    #[rstest]
    #[case(None, Ok("EN"))]
    #[case(Some("ja"), Ok("JA"))]
    #[case(Some("en_US"), Ok("EN"))]
    #[case(Some("pt-BR"), Ok("PT"))]
    #[case(Some("pap_AW"), Err(Error::InvalidLanguageCode))]
    #[case(Some("fil"), Err(Error::InvalidLanguageCode))]
    fn language_tags(#[case] language: Option<&str>, #[case] expected: Result<&str, Error>) {
        assert_eq!(language_tag(language), expected.map(str::to_string));
    }

    #[test]
    fn formats_timestamp() {
        let time = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_700_000_000);
        assert_eq!(timestamp(time), "20231114T221320Z");
    }

    #[cfg(feature = "US")]
    mod calendar {
        use super::super::*;
        use crate::{country_holidays, Country};

        #[test]
        fn merges_consecutive_days() {
            let mut calendar = country_holidays(Country::US)
                .expand(false)
                .build()
                .unwrap();
            calendar.insert(Date::from_ymd(2024, 12, 24), "Winter Break");
            calendar.insert(Date::from_ymd(2024, 12, 25), "Winter Break; Christmas Day");
            calendar.insert(Date::from_ymd(2024, 12, 27), "Winter Break");

            let exporter = ICalExporter::new(&calendar).unwrap();
            let events = exporter.events();
            assert_eq!(
                events,
                vec![
                    Event {
                        name: "Winter Break",
                        start: Date::from_ymd(2024, 12, 24),
                        days: 2
                    },
                    Event {
                        name: "Christmas Day",
                        start: Date::from_ymd(2024, 12, 25),
                        days: 1
                    },
                    Event {
                        name: "Winter Break",
                        start: Date::from_ymd(2024, 12, 27),
                        days: 1
                    },
                ]
            );

            let text = exporter.generate();
            assert!(text.starts_with("BEGIN:VCALENDAR\r\nPRODID:-//holidays//holidays "));
            assert!(text.ends_with("END:VCALENDAR\r\n"));
            assert_eq!(text.matches("BEGIN:VEVENT").count(), 3);
            assert!(text.contains("DTSTART;VALUE=DATE:20241224\r\nDURATION:P2D\r\n"));
        }

        #[test]
        fn rejects_bad_exports() {
            let calendar = country_holidays(Country::US)
                .expand(false)
                .build()
                .unwrap();
            let exporter = ICalExporter::new(&calendar).unwrap();
            let dir = std::env::temp_dir();
            assert_eq!(
                exporter.export_ics(dir.join("holidays-missing-dir"), "us"),
                Err(Error::ExportPathNotFound)
            );
            assert_eq!(exporter.export_ics(&dir, "us"), Err(Error::EmptyExport));
        }

        #[test]
        fn writes_file() {
            let calendar = country_holidays(Country::US).year(2024).build().unwrap();
            let dir = std::env::temp_dir();
            let path = ICalExporter::new(&calendar)
                .unwrap()
                .export_ics(&dir, "holidays-us-2024")
                .unwrap();
            assert_eq!(path, dir.join("holidays-us-2024.ics"));
            let text = std::fs::read_to_string(&path).unwrap();
            assert!(text.contains("SUMMARY:Independence Day\r\n"));
            std::fs::remove_file(path).unwrap();
        }

        #[test]
        fn fixed_timestamp_and_language() {
            let calendar = country_holidays(Country::US)
                .language("en_US")
                .year(2024)
                .build()
                .unwrap();
            let time = std::time::SystemTime::UNIX_EPOCH
                + std::time::Duration::from_secs(1_743_494_400);
            let exporter = ICalExporter::new(&calendar)
                .unwrap()
                .show_language(true)
                .timestamp(time);
            assert_eq!(exporter.language(), "EN");
            let text = exporter.generate();
            assert_eq!(
                text.matches("DTSTAMP:20250401T080000Z\r\n").count(),
                text.matches("BEGIN:VEVENT").count()
            );
            assert!(text.contains("SUMMARY;LANGUAGE=EN:Independence Day\r\n"));
        }

        #[test]
        fn rejects_three_letter_languages() {
            let calendar = country_holidays(Country::US)
                .language("pap_AW")
                .year(2024)
                .build()
                .unwrap();
            assert_eq!(
                ICalExporter::new(&calendar).err(),
                Some(Error::InvalidLanguageCode)
            );
        }
    }
}
