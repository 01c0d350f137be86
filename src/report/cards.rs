//! Summary cards for pre-aggregated report metrics.
//!
//! The backend returns a `summary` map of metric keys to scalars alongside
//! the raw rows. These values are never recomputed here, only formatted and
//! displayed. Each metric key has a registered [FieldKind] so formatting is
//! driven by metadata rather than by guessing from the key text.

use maud::{Markup, html};
use serde_json::{Map, Value};

use crate::{
    formatters::{format_currency, format_date, format_number, format_percentage, humanize_key},
    report::schema::FieldKind,
};

/// Known summary metric keys and how to format them. Unregistered numeric
/// metrics fall back to [FieldKind::Count] and everything else to
/// [FieldKind::Text].
static SUMMARY_METRIC_KINDS: &[(&str, FieldKind)] = &[
    ("total_sales", FieldKind::Currency),
    ("total_revenue", FieldKind::Currency),
    ("total_amount", FieldKind::Currency),
    ("total_spent", FieldKind::Currency),
    ("average_order_value", FieldKind::Currency),
    ("total_commission", FieldKind::Currency),
    ("total_orders", FieldKind::Count),
    ("total_customers", FieldKind::Count),
    ("total_products", FieldKind::Count),
    ("total_items", FieldKind::Count),
    ("units_sold", FieldKind::Count),
    ("total_stock", FieldKind::Count),
    ("growth_rate", FieldKind::Percentage),
    ("commission_rate", FieldKind::Percentage),
    ("period_start", FieldKind::Date),
    ("period_end", FieldKind::Date),
];

fn metric_kind(key: &str, value: &Value) -> FieldKind {
    SUMMARY_METRIC_KINDS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, kind)| *kind)
        .unwrap_or(match value {
            Value::Number(_) => FieldKind::Count,
            _ => FieldKind::Text,
        })
}

fn metric_value(value: &Value, kind: FieldKind, currency_code: &str) -> String {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    };

    match kind {
        FieldKind::Currency => format_currency(number, currency_code),
        FieldKind::Count => format_number(number, 0),
        FieldKind::Percentage => format_percentage(number, 2),
        FieldKind::Date => match value {
            Value::String(text) => format_date(text, false),
            _ => String::new(),
        },
        FieldKind::Text => match value {
            Value::String(text) => text.clone(),
            Value::Number(number) => number.to_string(),
            Value::Bool(flag) => flag.to_string(),
            _ => String::new(),
        },
    }
}

/// Renders the summary card grid for a report.
///
/// Renders nothing when the summary map is empty; an absent summary is not an
/// error state.
pub fn summary_cards_view(summary: &Map<String, Value>, currency_code: &str) -> Markup {
    if summary.is_empty() {
        return html! {};
    }

    html! {
        section id="report-summary" class="w-full mx-auto mb-6" {
            div class="grid grid-cols-1 sm:grid-cols-2 md:grid-cols-3 lg:grid-cols-4 gap-4" {
                @for (key, value) in summary {
                    (summary_card(key, value, currency_code))
                }
            }
        }
    }
}

fn summary_card(key: &str, value: &Value, currency_code: &str) -> Markup {
    let kind = metric_kind(key, value);

    html! {
        div class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md" {
            div class="text-sm text-gray-600 dark:text-gray-400 mb-1" {
                (humanize_key(key))
            }
            div class="text-2xl font-bold" {
                (metric_value(value, kind, currency_code))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn summary(value: Value) -> Map<String, Value> {
        let Value::Object(map) = value else {
            panic!("test summaries must be JSON objects");
        };
        map
    }

    #[test]
    fn registered_currency_metrics_render_with_the_currency_prefix() {
        let summary = summary(json!({"total_sales": 45250.5}));
        let html = summary_cards_view(&summary, "LKR").into_string();

        assert!(html.contains("Total Sales"));
        assert!(html.contains("Rs. 45,250.50"));
    }

    #[test]
    fn registered_count_metrics_render_without_decimals() {
        let summary = summary(json!({"total_orders": 1234}));
        let html = summary_cards_view(&summary, "LKR").into_string();

        assert!(html.contains("Total Orders"));
        assert!(html.contains("1,234"));
        assert!(!html.contains("Rs."));
    }

    #[test]
    fn percentage_metrics_render_with_two_decimals() {
        let summary = summary(json!({"growth_rate": 12.5}));
        let html = summary_cards_view(&summary, "LKR").into_string();

        assert!(html.contains("12.50%"));
    }

    #[test]
    fn unregistered_numeric_metrics_fall_back_to_counts() {
        let summary = summary(json!({"repeat_buyers": 42}));
        let html = summary_cards_view(&summary, "LKR").into_string();

        assert!(html.contains("Repeat Buyers"));
        assert!(html.contains("42"));
    }

    #[test]
    fn string_metrics_render_verbatim() {
        let summary = summary(json!({"top_region": "Galle"}));
        let html = summary_cards_view(&summary, "LKR").into_string();

        assert!(html.contains("Top Region"));
        assert!(html.contains("Galle"));
    }

    #[test]
    fn numeric_strings_still_format_for_registered_metrics() {
        let summary = summary(json!({"total_sales": "1999.9"}));
        let html = summary_cards_view(&summary, "USD").into_string();

        assert!(html.contains("$1,999.90"));
    }

    #[test]
    fn empty_summary_renders_nothing() {
        let html = summary_cards_view(&Map::new(), "LKR").into_string();
        assert!(html.is_empty());
    }
}
