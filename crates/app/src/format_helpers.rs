/// Shared formatting utilities for the UI layer. All output is in Spanish.
use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};

const MONTH_NAMES: [&str; 12] = [
    "enero", "febrero", "marzo", "abril", "mayo", "junio",
    "julio", "agosto", "septiembre", "octubre", "noviembre", "diciembre",
];

fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "lunes",
        Weekday::Tue => "martes",
        Weekday::Wed => "miércoles",
        Weekday::Thu => "jueves",
        Weekday::Fri => "viernes",
        Weekday::Sat => "sábado",
        Weekday::Sun => "domingo",
    }
}

/// Format a date as "lunes, 19 de octubre de 2026".
pub fn format_long_date(date: NaiveDate) -> String {
    format!(
        "{}, {} de {} de {}",
        weekday_name(date.weekday()),
        date.day(),
        MONTH_NAMES[date.month0() as usize],
        date.year()
    )
}

/// Format a timestamp as "19/10/2026 14:05" (UTC).
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%d/%m/%Y %H:%M").to_string()
}

/// "1 alerta", "3 alertas".
pub fn pluralize(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{count} {singular}")
    } else {
        format!("{count} {plural}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn long_date_in_spanish() {
        assert_eq!(format_long_date(date(2026, 10, 19)), "lunes, 19 de octubre de 2026");
        assert_eq!(format_long_date(date(2026, 1, 3)), "sábado, 3 de enero de 2026");
        assert_eq!(format_long_date(date(2025, 12, 31)), "miércoles, 31 de diciembre de 2025");
    }

    #[test]
    fn timestamp_is_day_first() {
        let ts = DateTime::<Utc>::from_timestamp(1_792_418_700, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "19/10/2026 14:05");
    }

    #[test]
    fn pluralizes_counts() {
        assert_eq!(pluralize(0, "alerta", "alertas"), "0 alertas");
        assert_eq!(pluralize(1, "alerta", "alertas"), "1 alerta");
        assert_eq!(pluralize(5, "alerta", "alertas"), "5 alertas");
    }
}
