//! Grouping and percentage aggregation for report charts.
//!
//! Turns a flat list of report rows into grouped, sorted, percentage-
//! annotated segments. All functions degrade on bad data instead of erroring:
//! missing group fields become an "Unknown" group and unparseable values
//! count as zero, so the segment totals stay consistent with the row count.

use std::collections::HashMap;

use crate::{
    report::row::ReportRow,
    theme::{Palette, ReportCategory},
};

/// Default number of bars on a bar chart.
pub const BAR_TOP_N: usize = 6;
/// Number of named pie slices before the remainder folds into "Other".
pub const PIE_TOP_N: usize = 4;
/// The label of the folded remainder slice on pie charts.
pub const OTHER_LABEL: &str = "Other";

/// How many groups to keep after sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Truncation {
    /// Keep the `n` largest groups and discard the rest (bar charts).
    Top(usize),
    /// Keep the `n` largest groups and fold the rest into a single
    /// [OTHER_LABEL] segment holding their summed value (pie charts).
    TopWithOther(usize),
}

/// One grouped, colored slice of a report.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedSegment {
    pub label: String,
    pub value: f64,
    /// Share of the total across *all* original groups, 0 to 100. Exactly 0
    /// for every segment when the total is 0.
    pub percentage: f64,
    pub color: String,
}

/// Group `rows` by `group_field`, sum `value_field` per group, sort
/// descending, truncate, and annotate with percentages and palette colors.
///
/// Ties keep first-seen insertion order (the sort is stable). Percentages are
/// computed against the total over all groups, including any folded into
/// "Other", so they sum to 100 for a non-zero total.
pub fn aggregate(
    rows: &[ReportRow],
    category: ReportCategory,
    group_field: &str,
    value_field: &str,
    truncation: Truncation,
) -> Vec<AggregatedSegment> {
    if rows.is_empty() {
        return Vec::new();
    }

    // Accumulate in first-seen order so the later stable sort breaks ties
    // deterministically.
    let mut groups: Vec<(String, f64)> = Vec::new();
    let mut index_by_label: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let label = row.group_key(group_field);
        let value = row.number(value_field);

        match index_by_label.get(&label) {
            Some(&index) => groups[index].1 += value,
            None => {
                index_by_label.insert(label.clone(), groups.len());
                groups.push((label, value));
            }
        }
    }

    let total: f64 = groups.iter().map(|(_, value)| value).sum();

    groups.sort_by(|a, b| b.1.total_cmp(&a.1));

    let segments: Vec<(String, f64)> = match truncation {
        Truncation::Top(keep) => {
            groups.truncate(keep);
            groups
        }
        Truncation::TopWithOther(keep) if groups.len() > keep => {
            let folded: f64 = groups[keep..].iter().map(|(_, value)| value).sum();
            groups.truncate(keep);
            groups.push((OTHER_LABEL.to_owned(), folded));
            groups
        }
        Truncation::TopWithOther(_) => groups,
    };

    let palette = Palette::for_category(category);

    segments
        .into_iter()
        .enumerate()
        .map(|(index, (label, value))| AggregatedSegment {
            label,
            value,
            percentage: if total == 0.0 {
                0.0
            } else {
                100.0 * value / total
            },
            color: palette.color(index).to_owned(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn rows(values: Vec<Value>) -> Vec<ReportRow> {
        values
            .into_iter()
            .map(|value| {
                let Value::Object(map) = value else {
                    panic!("test rows must be JSON objects");
                };
                ReportRow(map)
            })
            .collect()
    }

    fn sales_rows(entries: &[(&str, &str)]) -> Vec<ReportRow> {
        rows(entries
            .iter()
            .map(|(name, amount)| json!({"product_name": name, "total_amount": amount}))
            .collect())
    }

    #[test]
    fn empty_input_produces_no_segments() {
        let segments = aggregate(
            &[],
            ReportCategory::Sales,
            "product_name",
            "total_amount",
            Truncation::Top(BAR_TOP_N),
        );

        assert!(segments.is_empty());
    }

    #[test]
    fn groups_sum_and_sort_descending() {
        let rows = sales_rows(&[("A", "100"), ("B", "300"), ("A", "50")]);

        let segments = aggregate(
            &rows,
            ReportCategory::Sales,
            "product_name",
            "total_amount",
            Truncation::Top(BAR_TOP_N),
        );

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].label, "B");
        assert_eq!(segments[0].value, 300.0);
        assert!((segments[0].percentage - 66.666_666).abs() < 1e-3);
        assert_eq!(segments[1].label, "A");
        assert_eq!(segments[1].value, 150.0);
        assert!((segments[1].percentage - 33.333_333).abs() < 1e-3);
    }

    #[test]
    fn ties_keep_first_seen_order() {
        let rows = sales_rows(&[("Mug", "100"), ("Vase", "100"), ("Rug", "100")]);

        let segments = aggregate(
            &rows,
            ReportCategory::Sales,
            "product_name",
            "total_amount",
            Truncation::Top(BAR_TOP_N),
        );

        let labels: Vec<&str> = segments.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["Mug", "Vase", "Rug"]);
    }

    #[test]
    fn top_truncation_keeps_the_largest_groups_without_other() {
        let rows = sales_rows(&[
            ("A", "10"),
            ("B", "90"),
            ("C", "80"),
            ("D", "70"),
            ("E", "60"),
            ("F", "50"),
            ("G", "40"),
            ("H", "30"),
        ]);

        let segments = aggregate(
            &rows,
            ReportCategory::Sales,
            "product_name",
            "total_amount",
            Truncation::Top(BAR_TOP_N),
        );

        assert_eq!(segments.len(), BAR_TOP_N);
        let labels: Vec<&str> = segments.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["B", "C", "D", "E", "F", "G"]);
        assert!(segments.iter().all(|s| s.label != OTHER_LABEL));
    }

    #[test]
    fn other_folding_sums_the_dropped_groups() {
        let rows = sales_rows(&[
            ("A", "50"),
            ("B", "40"),
            ("C", "30"),
            ("D", "20"),
            ("E", "7"),
            ("F", "3"),
        ]);

        let segments = aggregate(
            &rows,
            ReportCategory::Sales,
            "product_name",
            "total_amount",
            Truncation::TopWithOther(PIE_TOP_N),
        );

        assert_eq!(segments.len(), PIE_TOP_N + 1);
        assert_eq!(segments[PIE_TOP_N].label, OTHER_LABEL);
        assert_eq!(segments[PIE_TOP_N].value, 10.0);
    }

    #[test]
    fn no_other_segment_when_groups_fit() {
        let rows = sales_rows(&[("A", "50"), ("B", "40"), ("C", "30"), ("D", "20")]);

        let segments = aggregate(
            &rows,
            ReportCategory::Sales,
            "product_name",
            "total_amount",
            Truncation::TopWithOther(PIE_TOP_N),
        );

        assert_eq!(segments.len(), 4);
        assert!(segments.iter().all(|s| s.label != OTHER_LABEL));
    }

    #[test]
    fn percentages_sum_to_one_hundred_including_other() {
        let rows = sales_rows(&[
            ("A", "13"),
            ("B", "29"),
            ("C", "7"),
            ("D", "41"),
            ("E", "3"),
            ("F", "17"),
            ("G", "23"),
        ]);

        let segments = aggregate(
            &rows,
            ReportCategory::Sales,
            "product_name",
            "total_amount",
            Truncation::TopWithOther(PIE_TOP_N),
        );

        let sum: f64 = segments.iter().map(|s| s.percentage).sum();
        assert!((sum - 100.0).abs() < 1e-6, "percentages summed to {sum}");
    }

    #[test]
    fn zero_total_gives_zero_percentages() {
        let rows = sales_rows(&[("A", "0"), ("B", "0"), ("C", "0")]);

        let segments = aggregate(
            &rows,
            ReportCategory::Sales,
            "product_name",
            "total_amount",
            Truncation::TopWithOther(PIE_TOP_N),
        );

        assert_eq!(segments.len(), 3);
        for segment in &segments {
            assert_eq!(segment.percentage, 0.0);
            assert!(segment.percentage.is_finite());
        }
    }

    #[test]
    fn missing_fields_become_unknown_and_zero() {
        let rows = rows(vec![
            json!({"total_amount": "25"}),
            json!({"product_name": "A", "total_amount": "75"}),
            json!({"product_name": "A"}),
        ]);

        let segments = aggregate(
            &rows,
            ReportCategory::Sales,
            "product_name",
            "total_amount",
            Truncation::Top(BAR_TOP_N),
        );

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].label, "A");
        assert_eq!(segments[0].value, 75.0);
        assert_eq!(segments[1].label, "Unknown");
        assert_eq!(segments[1].value, 25.0);
    }

    #[test]
    fn coloring_is_deterministic_across_calls() {
        let rows = sales_rows(&[("A", "10"), ("B", "20"), ("C", "30"), ("D", "40")]);

        let first = aggregate(
            &rows,
            ReportCategory::Sales,
            "product_name",
            "total_amount",
            Truncation::TopWithOther(PIE_TOP_N),
        );
        let second = aggregate(
            &rows,
            ReportCategory::Sales,
            "product_name",
            "total_amount",
            Truncation::TopWithOther(PIE_TOP_N),
        );

        assert_eq!(first, second);

        let palette = Palette::for_category(ReportCategory::Sales);
        for (index, segment) in first.iter().enumerate() {
            assert_eq!(segment.color, palette.color(index));
        }
    }
}
