//! Display formatting for report values.
//!
//! Every function here is total: invalid input produces a safe default
//! display string, never a panic or an error. The report pipeline calls these
//! with values coerced straight out of untrusted API responses.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use time::{Date, PrimitiveDateTime, format_description::BorrowedFormatItem, macros::format_description};
use unicode_segmentation::UnicodeSegmentation;

/// The default truncation length for labels and table cells.
pub const TRUNCATE_LENGTH: usize = 50;

const ISO_DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");
const ISO_DATE_TIME: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]");
const ISO_DATE_TIME_SPACED: &[BorrowedFormatItem<'_>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Format `value` as a currency amount with a thousands separator and exactly
/// two fractional digits, e.g. `format_currency(Some(1234.5), "LKR")` is
/// `"Rs. 1,234.50"`.
///
/// `None` and non-finite values render as `"0.00"` with no prefix. Codes
/// without a known symbol are used verbatim as the prefix.
pub fn format_currency(value: Option<f64>, code: &str) -> String {
    let Some(value) = value.filter(|value| value.is_finite()) else {
        return "0.00".to_owned();
    };

    let prefix = currency_prefix(code);
    let sign = if value < 0.0 { "-" } else { "" };
    let digits = thousands_separated(value.abs(), 2);

    match prefix {
        Some(prefix) => format!("{prefix}{sign}{digits}"),
        None => format!("{code} {sign}{digits}"),
    }
}

fn currency_prefix(code: &str) -> Option<&'static str> {
    match code {
        "LKR" => Some("Rs. "),
        "USD" => Some("$"),
        "EUR" => Some("€"),
        _ => None,
    }
}

/// Format `value` with a thousands separator and `decimals` fractional
/// digits. `None` and non-finite values render as `"0"`.
pub fn format_number(value: Option<f64>, decimals: usize) -> String {
    let Some(value) = value.filter(|value| value.is_finite()) else {
        return "0".to_owned();
    };

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}", thousands_separated(value.abs(), decimals))
}

/// Format `value` as a percentage string such as `"66.67%"`.
///
/// A magnitude in `(1, 100]` is treated as already being a percentage;
/// anything else is multiplied by 100. This heuristic is ambiguous for
/// fractional percentages expressed as whole numbers (`0.5` renders as
/// `"50.00%"`) but is kept as-is because changing it would silently change
/// displayed values. `None` and non-finite values render as `"0%"`.
pub fn format_percentage(value: Option<f64>, decimals: usize) -> String {
    let Some(value) = value.filter(|value| value.is_finite()) else {
        return "0%".to_owned();
    };

    let magnitude = value.abs();
    let percent = if magnitude > 1.0 && magnitude <= 100.0 {
        value
    } else {
        value * 100.0
    };

    format!("{percent:.precision$}%", precision = decimals)
}

/// Format an ISO date or date-time string as `"<Mon> <day>, <year>"`,
/// optionally followed by `"<HH>:<MM>"`. Unparseable input renders as `""`.
pub fn format_date(value: &str, include_time: bool) -> String {
    let Some((date, time)) = parse_date_time(value) else {
        return String::new();
    };

    let formatted = format!(
        "{} {}, {}",
        month_abbreviation(date),
        date.day(),
        date.year()
    );

    match (include_time, time) {
        (true, Some((hour, minute))) => format!("{formatted} {hour:02}:{minute:02}"),
        _ => formatted,
    }
}

/// Parse the supported ISO shapes: RFC 3339, `T`- or space-separated
/// date-times, and bare dates.
fn parse_date_time(value: &str) -> Option<(Date, Option<(u8, u8)>)> {
    let trimmed = value.trim();

    if let Ok(date_time) = PrimitiveDateTime::parse(trimmed.trim_end_matches('Z'), ISO_DATE_TIME)
        .or_else(|_| PrimitiveDateTime::parse(trimmed, ISO_DATE_TIME_SPACED))
    {
        return Some((
            date_time.date(),
            Some((date_time.hour(), date_time.minute())),
        ));
    }

    // Timestamps with sub-second precision or offsets still carry a plain
    // date in the first ten bytes. `get` rather than a slice: byte 10 may
    // fall inside a multi-byte character in garbage input.
    let date_portion = trimmed.get(..10).unwrap_or(trimmed);
    let date = Date::parse(date_portion, ISO_DATE).ok()?;

    Some((date, None))
}

fn month_abbreviation(date: Date) -> &'static str {
    use time::Month;

    match date.month() {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    }
}

/// Turn a snake_case field or metric key into a display label, e.g.
/// `total_sales` becomes `Total Sales`.
pub fn humanize_key(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut characters = word.chars();
            match characters.next() {
                Some(first) => first.to_uppercase().collect::<String>() + characters.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Truncate `text` to `length` graphemes, appending `…` when truncated.
pub fn truncate_text(text: &str, length: usize) -> String {
    let graphemes: Vec<&str> = text.graphemes(true).collect();

    if graphemes.len() <= length {
        return text.to_owned();
    }

    let mut truncated: String = graphemes[..length].concat();
    truncated.push('…');
    truncated
}

/// Render the absolute value of `value` with a comma separator and exactly
/// `decimals` fractional digits.
fn thousands_separated(value: f64, decimals: usize) -> String {
    if value == 0.0 {
        return pad_decimals("0".to_owned(), decimals);
    }

    let formatted = if decimals == 2 {
        static TWO_DECIMAL_FMT: OnceLock<Formatter> = OnceLock::new();

        let formatter = TWO_DECIMAL_FMT.get_or_init(|| {
            Formatter::new()
                .separator(',')
                .unwrap()
                .precision(Precision::Decimals(2))
        });

        formatter.fmt_string(value)
    } else {
        let formatter = Formatter::new()
            .separator(',')
            .unwrap()
            .precision(Precision::Decimals(decimals as u8));

        formatter.fmt_string(value)
    };

    // numfmt drops trailing zeros in the fraction, e.g. "12.30" is rendered
    // as "12.3", so restore the requested width.
    pad_decimals(formatted, decimals)
}

fn pad_decimals(mut text: String, decimals: usize) -> String {
    if decimals == 0 {
        return text;
    }

    let fraction_digits = match text.find('.') {
        Some(position) => text.len() - position - 1,
        None => {
            text.push('.');
            0
        }
    };

    for _ in fraction_digits..decimals {
        text.push('0');
    }

    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_formats_with_lkr_prefix_and_separators() {
        assert_eq!(format_currency(Some(1234.5), "LKR"), "Rs. 1,234.50");
    }

    #[test]
    fn currency_defaults_on_missing_value() {
        assert_eq!(format_currency(None, "LKR"), "0.00");
        assert_eq!(format_currency(Some(f64::NAN), "USD"), "0.00");
    }

    #[test]
    fn currency_formats_zero_with_symbol() {
        assert_eq!(format_currency(Some(0.0), "USD"), "$0.00");
    }

    #[test]
    fn currency_uses_raw_code_for_unknown_currencies() {
        assert_eq!(format_currency(Some(12.0), "GBP"), "GBP 12.00");
    }

    #[test]
    fn currency_formats_negative_amounts() {
        assert_eq!(format_currency(Some(-1234.5), "USD"), "$-1,234.50");
    }

    #[test]
    fn currency_formats_euro() {
        assert_eq!(format_currency(Some(99.9), "EUR"), "€99.90");
    }

    #[test]
    fn number_separates_thousands() {
        assert_eq!(format_number(Some(1234567.0), 0), "1,234,567");
        assert_eq!(format_number(Some(1234.5), 2), "1,234.50");
    }

    #[test]
    fn number_defaults_to_zero() {
        assert_eq!(format_number(None, 0), "0");
        assert_eq!(format_number(Some(f64::INFINITY), 2), "0");
    }

    #[test]
    fn percentage_treats_midrange_values_as_percentages() {
        assert_eq!(format_percentage(Some(66.666), 2), "66.67%");
        assert_eq!(format_percentage(Some(100.0), 2), "100.00%");
    }

    #[test]
    fn percentage_multiplies_fractions_by_one_hundred() {
        assert_eq!(format_percentage(Some(0.25), 2), "25.00%");
        // Documented ambiguity: 0.5 could mean "0.5%" but the heuristic
        // renders it as a ratio.
        assert_eq!(format_percentage(Some(0.5), 2), "50.00%");
        assert_eq!(format_percentage(Some(1.0), 2), "100.00%");
    }

    #[test]
    fn percentage_multiplies_values_above_one_hundred() {
        assert_eq!(format_percentage(Some(150.0), 0), "15000%");
    }

    #[test]
    fn percentage_defaults_on_missing_value() {
        assert_eq!(format_percentage(None, 2), "0%");
        assert_eq!(format_percentage(Some(f64::NAN), 2), "0%");
    }

    #[test]
    fn date_formats_iso_dates() {
        assert_eq!(format_date("2024-03-01", false), "Mar 1, 2024");
        assert_eq!(format_date("2023-12-25", false), "Dec 25, 2023");
    }

    #[test]
    fn date_formats_date_times_with_time() {
        assert_eq!(format_date("2024-03-01T09:05:00", true), "Mar 1, 2024 09:05");
        assert_eq!(format_date("2024-03-01 14:30:00", true), "Mar 1, 2024 14:30");
    }

    #[test]
    fn date_ignores_time_when_not_requested() {
        assert_eq!(format_date("2024-03-01T09:05:00", false), "Mar 1, 2024");
    }

    #[test]
    fn date_takes_the_date_portion_of_long_timestamps() {
        assert_eq!(format_date("2024-03-01T09:05:00.123Z", false), "Mar 1, 2024");
    }

    #[test]
    fn date_renders_empty_string_for_garbage() {
        assert_eq!(format_date("not a date", false), "");
        assert_eq!(format_date("", true), "");
        assert_eq!(format_date("2024-13-40", false), "");
        // Byte 10 of this input is inside a multi-byte character.
        assert_eq!(format_date("日本語日", false), "");
    }

    #[test]
    fn humanize_title_cases_snake_case_keys() {
        assert_eq!(humanize_key("total_sales"), "Total Sales");
        assert_eq!(humanize_key("average_order_value"), "Average Order Value");
        assert_eq!(humanize_key("quantity"), "Quantity");
    }

    #[test]
    fn truncate_leaves_short_text_unchanged() {
        assert_eq!(truncate_text("Woven basket", 50), "Woven basket");
    }

    #[test]
    fn truncate_appends_ellipsis() {
        assert_eq!(truncate_text("Handmade ceramic vase", 8), "Handmade…");
    }

    #[test]
    fn truncate_counts_graphemes_not_bytes() {
        // Each grapheme may be multiple bytes; truncation must not split one.
        assert_eq!(truncate_text("héllo wörld", 5), "héllo…");
    }
}
