//! The raw data table shown beneath report charts.
//!
//! Columns and their formatting come from the category's schema, so the table
//! never guesses what a field means from its name. Rows beyond
//! [MAX_TABLE_ROWS] are dropped with a notice; the PDF service applies the
//! same cap on its side.

use maud::{Markup, html};

use crate::{
    formatters::{
        TRUNCATE_LENGTH, format_currency, format_date, format_number, format_percentage,
        humanize_key, truncate_text,
    },
    html::{TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE},
    report::{
        row::ReportRow,
        schema::{FieldKind, ReportSchema},
    },
};

/// Maximum rows rendered in the data table.
pub const MAX_TABLE_ROWS: usize = 100;

fn cell_text(row: &ReportRow, field: &str, kind: FieldKind, currency_code: &str) -> String {
    match kind {
        FieldKind::Currency => format_currency(Some(row.number(field)), currency_code),
        FieldKind::Count => format_number(Some(row.number(field)), 0),
        FieldKind::Percentage => format_percentage(Some(row.number(field)), 2),
        FieldKind::Date => format_date(&row.display(field), false),
        FieldKind::Text => truncate_text(&row.display(field), TRUNCATE_LENGTH),
    }
}

/// Renders the data table for a report.
///
/// Renders nothing when there are no rows; the empty-dataset notice is
/// handled by the report partial, not here.
pub fn data_table_view(rows: &[ReportRow], schema: &ReportSchema, currency_code: &str) -> Markup {
    if rows.is_empty() {
        return html! {};
    }

    let truncated = rows.len() > MAX_TABLE_ROWS;
    let visible = &rows[..rows.len().min(MAX_TABLE_ROWS)];

    html! {
        section id="report-table" class="w-full mx-auto mb-4" {
            h3 class="text-xl font-semibold mb-4" { "Report Data" }

            div class="overflow-x-auto rounded-lg shadow" {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" {
                    thead class=(TABLE_HEADER_STYLE) {
                        tr {
                            @for (field, _) in schema.columns {
                                th scope="col" class={(TABLE_CELL_STYLE) " font-semibold"} {
                                    (humanize_key(field))
                                }
                            }
                        }
                    }
                    tbody {
                        @for row in visible {
                            tr class=(TABLE_ROW_STYLE) {
                                @for (field, kind) in schema.columns {
                                    td class=(TABLE_CELL_STYLE) {
                                        (cell_text(row, field, *kind, currency_code))
                                    }
                                }
                            }
                        }
                    }
                }
            }

            @if truncated {
                p class="text-sm text-gray-600 dark:text-gray-400 mt-2" {
                    "Showing the first " (MAX_TABLE_ROWS) " of " (rows.len()) " rows."
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::theme::ReportCategory;

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

    fn sales_schema() -> &'static ReportSchema {
        ReportSchema::for_category(ReportCategory::Sales)
    }

    #[test]
    fn renders_headers_from_the_schema_columns() {
        let rows = rows(vec![json!({"product_name": "Clay Pot"})]);
        let html = data_table_view(&rows, sales_schema(), "LKR").into_string();

        assert!(html.contains("Order Date"));
        assert!(html.contains("Product Name"));
        assert!(html.contains("Category Name"));
        assert!(html.contains("Quantity"));
        assert!(html.contains("Total Amount"));
    }

    #[test]
    fn formats_cells_by_field_kind() {
        let rows = rows(vec![json!({
            "order_date": "2024-03-01T10:00:00Z",
            "product_name": "Clay Pot",
            "category_name": "Pottery",
            "quantity": 3,
            "total_amount": "1234.5",
        })]);

        let html = data_table_view(&rows, sales_schema(), "LKR").into_string();

        assert!(html.contains("Mar 1, 2024"));
        assert!(html.contains("Clay Pot"));
        assert!(html.contains("Rs. 1,234.50"));
        assert!(html.contains("<td class=\"px-6 py-4\">3</td>"));
    }

    #[test]
    fn truncates_long_text_cells() {
        let long_name = "a".repeat(60);
        let rows = rows(vec![json!({"product_name": long_name})]);

        let html = data_table_view(&rows, sales_schema(), "LKR").into_string();

        assert!(html.contains(&format!("{}…", "a".repeat(50))));
    }

    #[test]
    fn caps_the_table_at_one_hundred_rows() {
        let rows = rows((0..150)
            .map(|i| json!({"product_name": format!("P{i}"), "total_amount": 1}))
            .collect());

        let html = data_table_view(&rows, sales_schema(), "LKR").into_string();

        assert!(html.contains("P99"));
        assert!(!html.contains("P100<"));
        assert!(html.contains("Showing the first 100 of 150 rows."));
    }

    #[test]
    fn renders_nothing_without_rows() {
        let html = data_table_view(&[], sales_schema(), "LKR").into_string();
        assert!(html.is_empty());
    }

    #[test]
    fn missing_fields_render_safe_defaults() {
        let rows = rows(vec![json!({"product_name": "Basket"})]);
        let html = data_table_view(&rows, sales_schema(), "LKR").into_string();

        // Missing currency coerces to zero, missing dates to empty cells.
        assert!(html.contains("Rs. 0.00"));
    }
}
