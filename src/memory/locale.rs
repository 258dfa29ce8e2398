//! pt-BR renderings of a capture instant.
//!
//! Journal entries carry human-readable date strings computed once at
//! creation. The locale is fixed to Brazilian Portuguese.

use chrono::{DateTime, Datelike, TimeZone, Timelike, Weekday};

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

/// Display strings derived from one instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayStamp {
    /// `"19 de outubro de 2026"`
    pub date: String,
    /// `"Segunda-feira"`
    pub weekday: String,
    /// `"14:05"`
    pub time: String,
}

impl DisplayStamp {
    pub fn from_datetime<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self {
            date: format_date(at),
            weekday: capitalize(weekday_name(at.weekday())),
            time: format_time(at),
        }
    }
}

pub fn format_date<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    let month = MONTHS[at.month0() as usize];
    format!("{} de {} de {}", at.day(), month, at.year())
}

pub fn format_time<Tz: TimeZone>(at: &DateTime<Tz>) -> String {
    format!("{:02}:{:02}", at.hour(), at.minute())
}

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "segunda-feira",
        Weekday::Tue => "terça-feira",
        Weekday::Wed => "quarta-feira",
        Weekday::Thu => "quinta-feira",
        Weekday::Fri => "sexta-feira",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn renders_monday_afternoon() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 14, 5, 0).unwrap();
        let stamp = DisplayStamp::from_datetime(&at);
        assert_eq!(stamp.date, "19 de outubro de 2026");
        assert_eq!(stamp.weekday, "Segunda-feira");
        assert_eq!(stamp.time, "14:05");
    }

    #[test]
    fn capitalizes_accented_weekday() {
        let at = Utc.with_ymd_and_hms(2026, 3, 7, 9, 0, 0).unwrap();
        let stamp = DisplayStamp::from_datetime(&at);
        assert_eq!(stamp.weekday, "Sábado");
        assert_eq!(stamp.date, "7 de março de 2026");
        assert_eq!(stamp.time, "09:00");
    }

    #[test]
    fn uses_the_instant_offset() {
        let brt = FixedOffset::west_opt(3 * 3600).unwrap();
        let at = brt.with_ymd_and_hms(2026, 1, 1, 0, 30, 0).unwrap();
        let stamp = DisplayStamp::from_datetime(&at);
        assert_eq!(stamp.date, "1 de janeiro de 2026");
        assert_eq!(stamp.weekday, "Quinta-feira");
        assert_eq!(stamp.time, "00:30");
    }
}
