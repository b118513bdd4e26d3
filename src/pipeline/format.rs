//! Derived-field formatter
//!
//! Price and page values for sorting and display, plus the fixed el-GR
//! renderings of dates and counts.

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::model::Record;
use crate::core::paths::basename;

/// Shown in the price column when a listing has no price at all
pub const PRICE_PLACEHOLDER: &str = "—";

pub const CURRENCY_SUFFIX: &str = "€";

/// Leading decimal number, the way a lenient float parser reads it
static LEADING_FLOAT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+\.?\d*|\.\d+)").expect("Invalid LEADING_FLOAT_RE regex"));

static LEADING_INT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("Invalid LEADING_INT_RE regex"));

/// Dated export names: `20YYMMDD_sep_data.csv`
static DATED_SOURCE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(20\d{6})_sep_data\.csv$").expect("Invalid DATED_SOURCE_RE regex")
});

/// Abbreviated month names, el-GR
const SHORT_MONTHS: [&str; 12] = [
    "Ιαν", "Φεβ", "Μαρ", "Απρ", "Μαΐ", "Ιουν", "Ιουλ", "Αυγ", "Σεπ", "Οκτ", "Νοε", "Δεκ",
];

/// Full month names in the genitive, as used in manifest labels
const GENITIVE_MONTHS: [&str; 12] = [
    "Γενάρη",
    "Φλεβάρη",
    "Μάρτη",
    "Απρίλη",
    "Μάη",
    "Ιούνη",
    "Ιούλη",
    "Αύγουστο",
    "Σεπτέμβρη",
    "Οχτώβρη",
    "Νοέμβρη",
    "Δεκέμβρη",
];

/// Raw price a listing is shown and sorted by: the discount price when
/// present, otherwise the list price
pub fn effective_price(record: &Record) -> &str {
    match record.discount_price() {
        "" => record.price(),
        discounted => discounted,
    }
}

/// Interpret a raw price string.
///
/// Everything except digits, commas and periods is dropped, the first comma
/// becomes the decimal point, and the leading number is read. `None` when no
/// number is left.
pub fn parse_price(raw: &str) -> Option<f64> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',' || *c == '.')
        .collect();
    let normalized = kept.replacen(',', ".", 1);

    LEADING_FLOAT_RE
        .find(&normalized)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Numeric price used for sorting; unparsable or missing prices sort as 0
pub fn price_sort_value(record: &Record) -> f64 {
    parse_price(effective_price(record)).unwrap_or(0.0)
}

/// Price column text: two decimals plus the currency marker, the placeholder
/// for a missing price, or the raw text when it holds no number
pub fn price_display(record: &Record) -> String {
    let raw = effective_price(record);
    if raw.is_empty() {
        return PRICE_PLACEHOLDER.to_string();
    }
    match parse_price(raw) {
        // Ties round away from zero, so 1.125 shows as 1.13.
        Some(value) => format!("{:.2}{}", (value * 100.0).round() / 100.0, CURRENCY_SUFFIX),
        None => raw.to_string(),
    }
}

/// Leading integer of a page count; unparsable counts read as 0
pub fn pages_value(raw: &str) -> f64 {
    LEADING_INT_RE
        .captures(raw)
        .and_then(|c| c[1].parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Date encoded in a dated source name, if any
pub fn source_date(source: &str) -> Option<NaiveDate> {
    let caps = DATED_SOURCE_RE.captures(basename(source))?;
    NaiveDate::parse_from_str(&caps[1], "%Y%m%d").ok()
}

/// "Last updated" header text for a source: the date in its file name, or
/// `today` for undated sources
pub fn last_updated(source: &str, today: NaiveDate) -> String {
    format_date(source_date(source).unwrap_or(today))
}

/// Day, abbreviated month and year, el-GR ("5 Μαρ 2025")
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        SHORT_MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Day, genitive month name and year ("5 Μάρτη 2025")
pub fn format_genitive_date(date: NaiveDate) -> String {
    format!(
        "{} {} {}",
        date.day(),
        GENITIVE_MONTHS[date.month0() as usize],
        date.year()
    )
}

/// Group thousands with '.', el-GR
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn priced(price: &str, discount: &str) -> Record {
        Record::from_pairs([("price", price), ("discount_price", discount)])
    }

    #[test]
    fn test_effective_price_prefers_discount() {
        assert_eq!(effective_price(&priced("20,00€", "15,00€")), "15,00€");
        assert_eq!(effective_price(&priced("20,00€", "")), "20,00€");
        assert_eq!(effective_price(&Record::default()), "");
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("10,50"), Some(10.5));
        assert_eq!(parse_price("9.99"), Some(9.99));
        assert_eq!(parse_price("12,00€"), Some(12.0));
        assert_eq!(parse_price("€ 7"), Some(7.0));
        assert_eq!(parse_price(""), None);
        assert_eq!(parse_price("free"), None);
        assert_eq!(parse_price(".5"), Some(0.5));
    }

    #[test]
    fn test_parse_price_keeps_literal_separator_handling() {
        // "1.234,56" becomes "1.234.56"; the leading number is 1.234
        assert_eq!(parse_price("1.234,56"), Some(1.234));
        // only the first comma is normalized
        assert_eq!(parse_price("1,234,56"), Some(1.234));
    }

    #[test]
    fn test_price_sort_value() {
        assert_eq!(price_sort_value(&priced("10,50", "")), 10.5);
        assert_eq!(price_sort_value(&priced("", "")), 0.0);
        assert_eq!(price_sort_value(&priced("n/a", "")), 0.0);
        assert_eq!(price_sort_value(&priced("30", "9.99")), 9.99);
    }

    #[test]
    fn test_price_display() {
        assert_eq!(price_display(&priced("10,5", "")), "10.50€");
        assert_eq!(price_display(&priced("", "")), "—");
        assert_eq!(price_display(&priced("on request", "")), "on request");
        assert_eq!(price_display(&priced("20", "15,3€")), "15.30€");
    }

    #[test]
    fn test_price_display_rounds_ties_up() {
        assert_eq!(price_display(&priced("1,125", "")), "1.13€");
        assert_eq!(price_display(&priced("0,005", "")), "0.01€");
        assert_eq!(price_display(&priced("2,124", "")), "2.12€");
    }

    #[test]
    fn test_pages_value() {
        assert_eq!(pages_value("320"), 320.0);
        assert_eq!(pages_value(" 96 σελ."), 96.0);
        assert_eq!(pages_value("1.200"), 1.0);
        assert_eq!(pages_value("-4"), -4.0);
        assert_eq!(pages_value(""), 0.0);
        assert_eq!(pages_value("xx"), 0.0);
    }

    #[test]
    fn test_source_date() {
        assert_eq!(
            source_date("20250305_sep_data.csv"),
            NaiveDate::from_ymd_opt(2025, 3, 5)
        );
        assert_eq!(
            source_date("archive/20241231_sep_data.csv"),
            NaiveDate::from_ymd_opt(2024, 12, 31)
        );
        assert_eq!(source_date("latest.csv"), None);
        assert_eq!(source_date("20251345_sep_data.csv"), None);
        assert_eq!(source_date("2025035_sep_data.csv"), None);
    }

    #[test]
    fn test_last_updated() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 17).unwrap();
        assert_eq!(last_updated("20250305_sep_data.csv", today), "5 Μαρ 2025");
        assert_eq!(last_updated("latest.csv", today), "17 Οκτ 2026");
        assert_eq!(last_updated("20250230_sep_data.csv", today), "17 Οκτ 2026");
    }

    #[test]
    fn test_format_genitive_date() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 5).unwrap();
        assert_eq!(format_genitive_date(date), "5 Μάρτη 2025");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1.000");
        assert_eq!(format_count(1234567), "1.234.567");
    }
}
