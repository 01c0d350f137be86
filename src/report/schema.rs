//! The per-category field registry and chart configuration.
//!
//! Each report category names its grouping fields, value field, and column
//! metadata here, so aggregation and rendering never guess field semantics
//! from field-name substrings. The registry is total over [ReportCategory];
//! unknown categories only exist at the string-parsing boundary.

use crate::theme::ReportCategory;

/// How a field's values should be formatted for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Currency,
    Count,
    Percentage,
    Date,
    Text,
}

/// The aggregation and display schema for one report category.
#[derive(Debug, Clone, Copy)]
pub struct ReportSchema {
    /// Grouping field for the bar chart.
    pub bar_group_field: &'static str,
    /// Grouping field for the pie chart (may differ from the bar grouping).
    pub pie_group_field: &'static str,
    /// The numeric field summed per group.
    pub value_field: &'static str,
    /// The date field used to bucket the line chart, if the category has one.
    pub date_field: Option<&'static str>,
    /// Whether summed values are money. Static per category, never inferred
    /// from the data.
    pub currency_values: bool,
    pub bar_title: &'static str,
    pub pie_title: &'static str,
    pub line_title: &'static str,
    /// Data-table columns in display order with their formatting kind.
    pub columns: &'static [(&'static str, FieldKind)],
}

impl ReportSchema {
    /// The schema for `category`.
    pub fn for_category(category: ReportCategory) -> &'static ReportSchema {
        match category {
            ReportCategory::Sales => &SALES_SCHEMA,
            ReportCategory::Products => &PRODUCTS_SCHEMA,
            ReportCategory::Customers => &CUSTOMERS_SCHEMA,
            ReportCategory::Artisans => &ARTISANS_SCHEMA,
            ReportCategory::Orders => &ORDERS_SCHEMA,
            ReportCategory::Assignments => &ASSIGNMENTS_SCHEMA,
            ReportCategory::Inventory => &INVENTORY_SCHEMA,
            ReportCategory::CustomPerformance => &CUSTOM_PERFORMANCE_SCHEMA,
            ReportCategory::Performance => &PERFORMANCE_SCHEMA,
        }
    }

    /// The formatting kind of `field`, defaulting to [FieldKind::Text] for
    /// fields outside the registry.
    pub fn field_kind(&self, field: &str) -> FieldKind {
        self.columns
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, kind)| *kind)
            .unwrap_or(FieldKind::Text)
    }
}

static SALES_SCHEMA: ReportSchema = ReportSchema {
    bar_group_field: "product_name",
    pie_group_field: "category_name",
    value_field: "total_amount",
    date_field: Some("order_date"),
    currency_values: true,
    bar_title: "Top Products by Revenue",
    pie_title: "Revenue by Category",
    line_title: "Daily Sales",
    columns: &[
        ("order_date", FieldKind::Date),
        ("product_name", FieldKind::Text),
        ("category_name", FieldKind::Text),
        ("quantity", FieldKind::Count),
        ("total_amount", FieldKind::Currency),
    ],
};

static PRODUCTS_SCHEMA: ReportSchema = ReportSchema {
    bar_group_field: "product_name",
    pie_group_field: "category_name",
    value_field: "units_sold",
    date_field: None,
    currency_values: false,
    bar_title: "Best-Selling Products",
    pie_title: "Units Sold by Category",
    line_title: "Units Sold Over Time",
    columns: &[
        ("product_name", FieldKind::Text),
        ("category_name", FieldKind::Text),
        ("units_sold", FieldKind::Count),
        ("unit_price", FieldKind::Currency),
        ("stock_quantity", FieldKind::Count),
    ],
};

static CUSTOMERS_SCHEMA: ReportSchema = ReportSchema {
    bar_group_field: "customer_name",
    pie_group_field: "customer_name",
    value_field: "order_count",
    date_field: Some("last_order_date"),
    currency_values: false,
    bar_title: "Most Active Customers",
    pie_title: "Orders by Customer",
    line_title: "Customer Activity",
    columns: &[
        ("customer_name", FieldKind::Text),
        ("order_count", FieldKind::Count),
        ("total_spent", FieldKind::Currency),
        ("last_order_date", FieldKind::Date),
    ],
};

static ARTISANS_SCHEMA: ReportSchema = ReportSchema {
    bar_group_field: "artisan_name",
    pie_group_field: "artisan_name",
    value_field: "total_revenue",
    date_field: None,
    currency_values: true,
    bar_title: "Top Artisans by Revenue",
    pie_title: "Revenue Share by Artisan",
    line_title: "Artisan Revenue Over Time",
    columns: &[
        ("artisan_name", FieldKind::Text),
        ("product_count", FieldKind::Count),
        ("order_count", FieldKind::Count),
        ("total_revenue", FieldKind::Currency),
        ("commission_rate", FieldKind::Percentage),
    ],
};

static ORDERS_SCHEMA: ReportSchema = ReportSchema {
    bar_group_field: "product_name",
    pie_group_field: "status",
    value_field: "total_amount",
    date_field: Some("order_date"),
    currency_values: true,
    bar_title: "Order Value by Product",
    pie_title: "Orders by Status",
    line_title: "Daily Order Value",
    columns: &[
        ("order_date", FieldKind::Date),
        ("product_name", FieldKind::Text),
        ("status", FieldKind::Text),
        ("quantity", FieldKind::Count),
        ("total_amount", FieldKind::Currency),
    ],
};

static ASSIGNMENTS_SCHEMA: ReportSchema = ReportSchema {
    bar_group_field: "product_name",
    pie_group_field: "status",
    value_field: "item_count",
    date_field: Some("assigned_date"),
    currency_values: false,
    bar_title: "Assigned Items by Product",
    pie_title: "Assignments by Status",
    line_title: "Assignments Over Time",
    columns: &[
        ("assigned_date", FieldKind::Date),
        ("product_name", FieldKind::Text),
        ("status", FieldKind::Text),
        ("item_count", FieldKind::Count),
    ],
};

static INVENTORY_SCHEMA: ReportSchema = ReportSchema {
    bar_group_field: "product_name",
    pie_group_field: "category_name",
    value_field: "stock_quantity",
    date_field: None,
    currency_values: false,
    bar_title: "Stock by Product",
    pie_title: "Stock by Category",
    line_title: "Stock Over Time",
    columns: &[
        ("product_name", FieldKind::Text),
        ("category_name", FieldKind::Text),
        ("stock_quantity", FieldKind::Count),
        ("unit_price", FieldKind::Currency),
    ],
};

static CUSTOM_PERFORMANCE_SCHEMA: ReportSchema = ReportSchema {
    bar_group_field: "product_name",
    pie_group_field: "product_name",
    value_field: "total_sales",
    date_field: Some("sale_date"),
    currency_values: true,
    bar_title: "Sales by Product",
    pie_title: "Sales Share by Product",
    line_title: "Sales Over the Selected Period",
    columns: &[
        ("sale_date", FieldKind::Date),
        ("product_name", FieldKind::Text),
        ("units_sold", FieldKind::Count),
        ("total_sales", FieldKind::Currency),
    ],
};

static PERFORMANCE_SCHEMA: ReportSchema = ReportSchema {
    bar_group_field: "product_name",
    pie_group_field: "product_name",
    value_field: "total_sales",
    date_field: Some("sale_date"),
    currency_values: true,
    bar_title: "Sales by Product",
    pie_title: "Sales Share by Product",
    line_title: "Monthly Sales",
    columns: &[
        ("sale_date", FieldKind::Date),
        ("product_name", FieldKind::Text),
        ("units_sold", FieldKind::Count),
        ("total_sales", FieldKind::Currency),
        ("growth_rate", FieldKind::Percentage),
    ],
};

/// Which chart is rendered where in a report view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
}

/// The charts and sections shown for one generated report.
///
/// Derived once per `(category, row_count)` pair when a report is rendered
/// and discarded with the report; it has no independent lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub show_bar_chart: bool,
    pub show_pie_chart: bool,
    pub show_line_chart: bool,
    pub show_tables: bool,
    pub show_summary: bool,
    /// Charts in render order.
    pub dashboard_charts: Vec<ChartKind>,
    pub bar_title: &'static str,
    pub pie_title: &'static str,
    pub line_title: &'static str,
}

impl ChartConfig {
    /// Derive the chart configuration for a category and its row count.
    pub fn derive(category: ReportCategory, row_count: usize) -> Self {
        let schema = ReportSchema::for_category(category);

        let show_bar_chart = row_count > 0;
        let show_pie_chart = row_count > 0;
        // A line of fewer than two points carries no trend.
        let show_line_chart = schema.date_field.is_some() && row_count > 1;
        let show_tables = row_count > 0;

        let mut dashboard_charts = Vec::new();
        if show_bar_chart {
            dashboard_charts.push(ChartKind::Bar);
        }
        if show_pie_chart {
            dashboard_charts.push(ChartKind::Pie);
        }
        if show_line_chart {
            dashboard_charts.push(ChartKind::Line);
        }

        Self {
            show_bar_chart,
            show_pie_chart,
            show_line_chart,
            show_tables,
            show_summary: true,
            dashboard_charts,
            bar_title: schema.bar_title,
            pie_title: schema.pie_title,
            line_title: schema.line_title,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::theme::ReportScope;

    use super::*;

    #[test]
    fn sales_schema_matches_the_backend_field_names() {
        let schema = ReportSchema::for_category(ReportCategory::Sales);

        assert_eq!(schema.bar_group_field, "product_name");
        assert_eq!(schema.pie_group_field, "category_name");
        assert_eq!(schema.value_field, "total_amount");
        assert!(schema.currency_values);
    }

    #[test]
    fn customers_count_orders_not_money() {
        let schema = ReportSchema::for_category(ReportCategory::Customers);

        assert_eq!(schema.bar_group_field, "customer_name");
        assert_eq!(schema.value_field, "order_count");
        assert!(!schema.currency_values);
    }

    #[test]
    fn field_kind_comes_from_the_registry() {
        let schema = ReportSchema::for_category(ReportCategory::Sales);

        assert_eq!(schema.field_kind("total_amount"), FieldKind::Currency);
        assert_eq!(schema.field_kind("order_date"), FieldKind::Date);
        assert_eq!(schema.field_kind("quantity"), FieldKind::Count);
        assert_eq!(schema.field_kind("never_registered"), FieldKind::Text);
    }

    #[test]
    fn every_category_has_a_schema_with_columns() {
        for scope in [ReportScope::Admin, ReportScope::Artisan] {
            for &category in scope.categories() {
                let schema = ReportSchema::for_category(category);
                assert!(
                    !schema.columns.is_empty(),
                    "{category} has no table columns"
                );
            }
        }
    }

    #[test]
    fn chart_config_disables_everything_for_zero_rows() {
        let config = ChartConfig::derive(ReportCategory::Sales, 0);

        assert!(!config.show_bar_chart);
        assert!(!config.show_pie_chart);
        assert!(!config.show_line_chart);
        assert!(!config.show_tables);
        assert!(config.show_summary);
        assert!(config.dashboard_charts.is_empty());
    }

    #[test]
    fn chart_config_orders_charts_bar_pie_line() {
        let config = ChartConfig::derive(ReportCategory::Sales, 10);

        assert_eq!(
            config.dashboard_charts,
            vec![ChartKind::Bar, ChartKind::Pie, ChartKind::Line]
        );
    }

    #[test]
    fn line_chart_requires_a_date_field() {
        let config = ChartConfig::derive(ReportCategory::Inventory, 10);

        assert!(!config.show_line_chart);
        assert_eq!(
            config.dashboard_charts,
            vec![ChartKind::Bar, ChartKind::Pie]
        );
    }

    #[test]
    fn line_chart_requires_more_than_one_row() {
        let config = ChartConfig::derive(ReportCategory::Sales, 1);

        assert!(!config.show_line_chart);
    }
}
