//! Date helper functions

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Display format for dates that only name a month
const MONTH_FORMAT: &str = "MM/YY";

/// How much of a date string was actually given
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Precision {
    Year,
    Month,
    Day,
}

/// Parse a front-matter date into a sortable timestamp.
///
/// Accepts `YYYY`, `YYYY-MM`, `YYYY-MM-DD` (or `/` separated), the same with
/// a time of day, and RFC 3339. Partial dates resolve to their first day.
pub fn parse_date(s: &str) -> Option<NaiveDateTime> {
    parse_with_precision(s).map(|(dt, _)| dt)
}

/// Format a front-matter date for display.
///
/// `format` uses Moment.js-style tokens (`DD/MM/YY`). Dates naming only a
/// month render as `MM/YY`; anything else that does not parse, a bare year
/// included, is returned trimmed but otherwise unchanged.
///
/// # Examples
/// ```
/// use inked_rs::helpers::format_date;
///
/// assert_eq!(format_date("2024-01-15", "DD/MM/YY"), "15/01/24");
/// assert_eq!(format_date("2024-03", "DD/MM/YY"), "03/24");
/// assert_eq!(format_date("2024", "DD/MM/YY"), "2024");
/// ```
pub fn format_date(s: &str, format: &str) -> String {
    match parse_with_precision(s) {
        Some((dt, Precision::Day)) => dt.format(&moment_to_chrono_format(format)).to_string(),
        Some((dt, Precision::Month)) => dt
            .format(&moment_to_chrono_format(MONTH_FORMAT))
            .to_string(),
        Some((_, Precision::Year)) | None => s.trim().to_string(),
    }
}

fn parse_with_precision(s: &str) -> Option<(NaiveDateTime, Precision)> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let datetime_formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y/%m/%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];
    for fmt in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some((dt, Precision::Day));
        }
    }

    // Try RFC 3339 / ISO 8601 with offset
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some((dt.naive_utc(), Precision::Day));
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some((d.and_hms_opt(0, 0, 0)?, Precision::Day));
        }
    }

    for fmt in ["%Y-%m-%d", "%Y/%m/%d"] {
        let sep = if fmt.contains('/') { '/' } else { '-' };
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{}{}01", s, sep), fmt) {
            return Some((d.and_hms_opt(0, 0, 0)?, Precision::Month));
        }
    }

    if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        let year: i32 = s.parse().ok()?;
        let d = NaiveDate::from_ymd_opt(year, 1, 1)?;
        return Some((d.and_hms_opt(0, 0, 0)?, Precision::Year));
    }

    None
}

/// Convert Moment.js format to chrono format
fn moment_to_chrono_format(format: &str) -> String {
    // Longest tokens first within each unit
    let replacements = [
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MMMM", "%B"),
        ("MMM", "%b"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("dddd", "%A"),
        ("ddd", "%a"),
    ];

    let mut result = format.to_string();

    for (from, to) in replacements {
        result = result.replace(from, to);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_full_dates() {
        assert_eq!(format_date("2024-01-15", "DD/MM/YY"), "15/01/24");
        assert_eq!(format_date("2024/01/15", "DD/MM/YY"), "15/01/24");
        assert_eq!(format_date("2024-01-15 10:30:00", "DD/MM/YY"), "15/01/24");
        assert_eq!(format_date("2024-01-15T23:30:00Z", "DD/MM/YY"), "15/01/24");
        assert_eq!(format_date("2024-01-15", "YYYY-MM-DD"), "2024-01-15");
        assert_eq!(format_date("2024-01-15", "DD MMM YY"), "15 Jan 24");
    }

    #[test]
    fn test_format_partial_dates() {
        assert_eq!(format_date("2024-03", "DD/MM/YY"), "03/24");
        assert_eq!(format_date("2023", "DD/MM/YY"), "2023");
    }

    #[test]
    fn test_format_unparseable_passthrough() {
        assert_eq!(format_date("", "DD/MM/YY"), "");
        assert_eq!(format_date(" someday ", "DD/MM/YY"), "someday");
        assert_eq!(format_date("2024-13-45", "DD/MM/YY"), "2024-13-45");
    }

    #[test]
    fn test_parse_date_orders_partial_dates() {
        let year = parse_date("2024").unwrap();
        let month = parse_date("2024-03").unwrap();
        let day = parse_date("2024-03-02").unwrap();
        assert!(year < month);
        assert!(month < day);
        assert!(parse_date("soon").is_none());
    }

    #[test]
    fn test_moment_to_chrono() {
        assert_eq!(moment_to_chrono_format("YYYY-MM-DD"), "%Y-%m-%d");
        assert_eq!(moment_to_chrono_format("DD/MM/YY"), "%d/%m/%y");
        assert_eq!(moment_to_chrono_format("HH:mm"), "%H:%M");
    }
}
