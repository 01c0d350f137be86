//! The open-record row shape returned by the report API.
//!
//! Report rows are schema-per-category: the backend returns a flat JSON
//! object per row and the fields that matter are chosen by the category's
//! schema (see [super::schema]). Coercion out of a row never fails; missing
//! or malformed fields fall back to `"Unknown"` and `0` so one bad row cannot
//! break an aggregation.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

const ISO_DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// The label used for rows missing their group field.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// A single row of report data with a category-determined field set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportRow(pub Map<String, Value>);

impl ReportRow {
    /// The grouping key for `field`, or [UNKNOWN_LABEL] when the field is
    /// missing, null, or empty.
    pub fn group_key(&self, field: &str) -> String {
        match self.0.get(field) {
            Some(Value::String(text)) if !text.is_empty() => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            Some(Value::Bool(flag)) => flag.to_string(),
            _ => UNKNOWN_LABEL.to_owned(),
        }
    }

    /// The numeric value of `field` with `parseFloat(value) || 0` semantics:
    /// numbers pass through, numeric string prefixes are parsed, everything
    /// else is `0`.
    pub fn number(&self, field: &str) -> f64 {
        match self.0.get(field) {
            Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
            Some(Value::String(text)) => parse_float(text).unwrap_or(0.0),
            _ => 0.0,
        }
    }

    /// The calendar day of `field`, taken from the ISO date portion of the
    /// value (timestamps are bucketed by day, not by full timestamp).
    pub fn day(&self, field: &str) -> Option<Date> {
        let Some(Value::String(text)) = self.0.get(field) else {
            return None;
        };

        let trimmed = text.trim();
        // `get` rather than a byte slice: byte 10 may fall inside a
        // multi-byte character in garbage input.
        let date_portion = trimmed.get(..10).unwrap_or(trimmed);

        Date::parse(date_portion, ISO_DATE).ok()
    }

    /// The raw display text of `field` for table cells.
    pub fn display(&self, field: &str) -> String {
        match self.0.get(field) {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            Some(Value::Bool(flag)) => flag.to_string(),
            _ => String::new(),
        }
    }
}

/// Parse the longest numeric prefix of `text`, matching JavaScript's
/// `parseFloat`.
fn parse_float(text: &str) -> Option<f64> {
    let trimmed = text.trim();

    if let Ok(value) = trimmed.parse::<f64>() {
        return Some(value);
    }

    let mut end = 0;
    for (position, character) in trimmed.char_indices() {
        if character.is_ascii_digit() || matches!(character, '.' | '-' | '+' | 'e' | 'E') {
            end = position + character.len_utf8();
        } else {
            break;
        }
    }

    // The scan may overshoot into a dangling exponent or sign ("12e",
    // "3.5e+"); back off until the prefix parses, as parseFloat does. The
    // accepted characters are all one byte, so stepping back by one stays on
    // a char boundary.
    while end > 0 {
        if let Ok(value) = trimmed[..end].parse::<f64>() {
            return Some(value);
        }
        end -= 1;
    }

    None
}

/// A report response from the backend API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ReportResponse {
    pub success: bool,
    pub data: Vec<ReportRow>,
    /// Pre-aggregated metrics keyed by metric name. Formatted for display
    /// only, never recomputed here.
    pub summary: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub applied_filters: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_empty_response: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ReportResponse {
    /// Whether the selected filters matched no rows. Distinct from a fetch
    /// failure: this renders an informational notice, not an error alert.
    pub fn is_empty(&self) -> bool {
        self.is_empty_response == Some(true) || self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::date;

    use super::*;

    fn row(value: Value) -> ReportRow {
        let Value::Object(map) = value else {
            panic!("test rows must be JSON objects");
        };
        ReportRow(map)
    }

    #[test]
    fn group_key_reads_strings_and_numbers() {
        let row = row(json!({"product_name": "Clay Pot", "order_id": 42}));

        assert_eq!(row.group_key("product_name"), "Clay Pot");
        assert_eq!(row.group_key("order_id"), "42");
    }

    #[test]
    fn group_key_defaults_to_unknown() {
        let row = row(json!({"product_name": null, "category_name": ""}));

        assert_eq!(row.group_key("product_name"), UNKNOWN_LABEL);
        assert_eq!(row.group_key("category_name"), UNKNOWN_LABEL);
        assert_eq!(row.group_key("missing"), UNKNOWN_LABEL);
    }

    #[test]
    fn number_coerces_like_parse_float() {
        let row = row(json!({
            "a": 12.5,
            "b": "300",
            "c": "45.5 LKR",
            "d": "not a number",
            "e": null,
        }));

        assert_eq!(row.number("a"), 12.5);
        assert_eq!(row.number("b"), 300.0);
        assert_eq!(row.number("c"), 45.5);
        assert_eq!(row.number("d"), 0.0);
        assert_eq!(row.number("e"), 0.0);
        assert_eq!(row.number("missing"), 0.0);
    }

    #[test]
    fn number_parses_exponents_like_parse_float() {
        let row = row(json!({
            "exponent": "1e5 units",
            "signed_exponent": "2.5E+2 kg",
            "dangling_exponent": "12e items",
            "bare_exponent": "e5",
        }));

        assert_eq!(row.number("exponent"), 100_000.0);
        assert_eq!(row.number("signed_exponent"), 250.0);
        assert_eq!(row.number("dangling_exponent"), 12.0);
        assert_eq!(row.number("bare_exponent"), 0.0);
    }

    #[test]
    fn day_buckets_timestamps_by_calendar_day() {
        let row = row(json!({
            "order_date": "2024-03-01T18:45:00Z",
            "plain": "2023-12-25",
            "bad": "soon",
        }));

        assert_eq!(row.day("order_date"), Some(date!(2024 - 03 - 01)));
        assert_eq!(row.day("plain"), Some(date!(2023 - 12 - 25)));
        assert_eq!(row.day("bad"), None);
        assert_eq!(row.day("missing"), None);
    }

    #[test]
    fn day_tolerates_multibyte_garbage() {
        // 12 bytes of 3-byte characters, so byte 10 is not a char boundary.
        let row = row(json!({"order_date": "日本語日"}));

        assert_eq!(row.day("order_date"), None);
    }

    #[test]
    fn response_deserializes_wire_names() {
        let response: ReportResponse = serde_json::from_value(json!({
            "success": true,
            "data": [{"product_name": "A", "total_amount": "100"}],
            "summary": {"total_sales": 100.0},
            "isEmptyResponse": false,
            "appliedFilters": {"includeGraphs": true},
        }))
        .unwrap();

        assert!(response.success);
        assert_eq!(response.data.len(), 1);
        assert_eq!(response.is_empty_response, Some(false));
        assert!(!response.is_empty());
    }

    #[test]
    fn empty_flag_and_zero_rows_both_count_as_empty() {
        let flagged: ReportResponse = serde_json::from_value(json!({
            "success": true,
            "data": [{"a": 1}],
            "summary": {},
            "isEmptyResponse": true,
        }))
        .unwrap();
        assert!(flagged.is_empty());

        let no_rows = ReportResponse::default();
        assert!(no_rows.is_empty());
    }
}
