use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static BARE_YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^-?\d{1,6}$").unwrap());

/// Largest year magnitude a calendar timestamp can carry.
const MAX_BARE_YEAR: i64 = 275_760;

static YEAR_MONTH_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}[-/]\d{1,2}$").unwrap());

const DATETIME_FORMATS: &[&str] = &[
    // ISO formats
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    // US formats
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M:%S %p",
    "%m/%d/%Y %I:%M %p",
    // EU formats
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d.%m.%Y %H:%M:%S",
    // Month name formats
    "%b %d %Y %H:%M:%S",
    "%d %b %Y %H:%M:%S",
    "%a %b %d %Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%m-%d-%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%b %d, %Y",
    "%b %d %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d %b %Y",
    "%d %B %Y",
    "%d-%b-%Y",
    "%a %b %d %Y",
    "%a, %d %b %Y",
];

/// Non-empty decimal literal that parses to a finite number. Surrounding
/// whitespace is ignored; currency symbols and separators are not stripped.
pub fn looks_numeric(value: &str) -> bool {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return false;
    }

    trimmed
        .parse::<f64>()
        .map(|n| n.is_finite())
        .unwrap_or(false)
}

/// Permissive calendar date / date-time check.
///
/// Accepts ISO 8601, RFC 3339, RFC 2822, common numeric day/month/year
/// orderings, month-name forms, `YYYY-MM`, and bare integers of up to six
/// digits read as a year when within +/-275760. Plain integer columns
/// therefore usually count as dates.
pub fn looks_date(value: &str) -> bool {
    let s = value.trim();
    if s.is_empty() {
        return false;
    }

    if BARE_YEAR_PATTERN.is_match(s) {
        return s
            .parse::<i64>()
            .map(|year| year.abs() <= MAX_BARE_YEAR)
            .unwrap_or(false);
    }

    if YEAR_MONTH_PATTERN.is_match(s) {
        let normalized = s.replace('/', "-");
        return NaiveDate::parse_from_str(&format!("{}-01", normalized), "%Y-%m-%d").is_ok();
    }

    if DateTime::parse_from_rfc3339(s).is_ok() || DateTime::parse_from_rfc2822(s).is_ok() {
        return true;
    }

    DATETIME_FORMATS
        .iter()
        .any(|fmt| NaiveDateTime::parse_from_str(s, fmt).is_ok())
        || DATE_FORMATS
            .iter()
            .any(|fmt| NaiveDate::parse_from_str(s, fmt).is_ok())
}
