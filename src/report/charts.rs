//! Chart-shape builders and ECharts rendering for report views.
//!
//! Each builder turns aggregated segments into the exact label/value/color
//! tuples a chart needs: bar heights scaled against the tallest bar, pie
//! slices with running start/end angles, and line points bucketed by calendar
//! day. The shapes are lowered into ECharts configurations (via `charming`)
//! and rendered with container divs plus initialization JavaScript.

use std::collections::HashMap;

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger,
    },
    series::{Line, Pie, bar::Bar},
};
use maud::{Markup, PreEscaped, html};
use time::Date;

use crate::{
    formatters::format_date,
    report::{
        aggregation::{AggregatedSegment, BAR_TOP_N, PIE_TOP_N, Truncation, aggregate},
        row::ReportRow,
        schema::{ChartConfig, ChartKind, ReportSchema},
    },
    theme::ReportCategory,
};

/// The tallest bar uses 90% of the available height to leave room for its
/// value label.
const BAR_HEIGHT_SCALE: f64 = 0.9;

/// One bar of a bar chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSegment {
    pub label: String,
    pub value: f64,
    pub percentage: f64,
    pub color: String,
    /// Rendered height as a percentage of the chart area, scaled by
    /// [BAR_HEIGHT_SCALE].
    pub height_pct: f64,
}

/// The top-N bar chart for a report.
#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub title: &'static str,
    pub is_currency: bool,
    pub segments: Vec<BarSegment>,
}

/// One slice of a pie chart with its angular extent in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct PieSegment {
    pub label: String,
    pub value: f64,
    pub percentage: f64,
    pub color: String,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// The 4-plus-Other pie chart for a report.
#[derive(Debug, Clone, PartialEq)]
pub struct PieChart {
    pub title: &'static str,
    pub is_currency: bool,
    pub segments: Vec<PieSegment>,
}

/// One day's point on a line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePoint {
    pub date: Date,
    pub label: String,
    pub value: f64,
}

/// The per-day line chart for a report, in chronological order.
#[derive(Debug, Clone, PartialEq)]
pub struct LineChart {
    pub title: &'static str,
    pub is_currency: bool,
    pub points: Vec<LinePoint>,
}

/// Build the bar chart: top six groups, no "Other" bucket, heights scaled so
/// the largest bar is 90% of the available height.
pub fn build_bar_chart(rows: &[ReportRow], category: ReportCategory) -> BarChart {
    let schema = ReportSchema::for_category(category);
    let segments = aggregate(
        rows,
        category,
        schema.bar_group_field,
        schema.value_field,
        Truncation::Top(BAR_TOP_N),
    );

    let max = segments
        .iter()
        .map(|segment| segment.value)
        .fold(0.0_f64, f64::max);

    let segments = segments
        .into_iter()
        .map(|AggregatedSegment { label, value, percentage, color }| BarSegment {
            height_pct: if max == 0.0 {
                0.0
            } else {
                100.0 * value / max * BAR_HEIGHT_SCALE
            },
            label,
            value,
            percentage,
            color,
        })
        .collect();

    BarChart {
        title: schema.bar_title,
        is_currency: schema.currency_values,
        segments,
    }
}

/// Build the pie chart: four named slices plus a folded "Other", with
/// start/end angles accumulated as a running sum in segment order.
pub fn build_pie_chart(rows: &[ReportRow], category: ReportCategory) -> PieChart {
    let schema = ReportSchema::for_category(category);
    let segments = aggregate(
        rows,
        category,
        schema.pie_group_field,
        schema.value_field,
        Truncation::TopWithOther(PIE_TOP_N),
    );

    // The angle of each slice depends on every slice before it, so this walk
    // must preserve the order the percentages were computed in.
    let mut cumulative = 0.0;
    let segments = segments
        .into_iter()
        .map(|AggregatedSegment { label, value, percentage, color }| {
            let start_angle = cumulative;
            cumulative += percentage / 100.0 * 360.0;

            PieSegment {
                label,
                value,
                percentage,
                color,
                start_angle,
                end_angle: cumulative,
            }
        })
        .collect();

    PieChart {
        title: schema.pie_title,
        is_currency: schema.currency_values,
        segments,
    }
}

/// Build the line chart: rows bucketed by calendar day, summed per bucket,
/// sorted by the underlying date before labels are formatted.
///
/// Returns `None` when the category has no date field.
pub fn build_line_chart(rows: &[ReportRow], category: ReportCategory) -> Option<LineChart> {
    let schema = ReportSchema::for_category(category);
    let date_field = schema.date_field?;

    let mut totals_by_day: HashMap<Date, f64> = HashMap::new();

    for row in rows {
        let Some(day) = row.day(date_field) else {
            continue;
        };
        *totals_by_day.entry(day).or_insert(0.0) += row.number(schema.value_field);
    }

    let mut days: Vec<Date> = totals_by_day.keys().copied().collect();
    // Sort on the date itself; formatted labels such as "Jan 5" do not sort
    // correctly across months or years.
    days.sort_unstable();

    let points = days
        .into_iter()
        .map(|date| LinePoint {
            label: format_date(&date.to_string(), false),
            value: totals_by_day[&date],
            date,
        })
        .collect();

    Some(LineChart {
        title: schema.line_title,
        is_currency: schema.currency_values,
        points,
    })
}

/// A report chart with its HTML container ID and ECharts configuration.
pub struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Build the ECharts configurations for every chart the config enables, in
/// dashboard order.
pub fn build_dashboard_charts(
    rows: &[ReportRow],
    category: ReportCategory,
    config: &ChartConfig,
    currency_code: &str,
) -> Vec<DashboardChart> {
    config
        .dashboard_charts
        .iter()
        .filter_map(|kind| match kind {
            ChartKind::Bar => Some(DashboardChart {
                id: "report-bar-chart",
                options: bar_chart_options(&build_bar_chart(rows, category), currency_code)
                    .to_string(),
            }),
            ChartKind::Pie => Some(DashboardChart {
                id: "report-pie-chart",
                options: pie_chart_options(&build_pie_chart(rows, category), currency_code)
                    .to_string(),
            }),
            ChartKind::Line => build_line_chart(rows, category).map(|chart| DashboardChart {
                id: "report-line-chart",
                options: line_chart_options(&chart, currency_code).to_string(),
            }),
        })
        .collect()
}

fn bar_chart_options(chart: &BarChart, currency_code: &str) -> Chart {
    let labels: Vec<String> = chart
        .segments
        .iter()
        .map(|segment| segment.label.clone())
        .collect();
    let values: Vec<f64> = chart.segments.iter().map(|segment| segment.value).collect();

    Chart::new()
        .title(Title::new().text(chart.title))
        .tooltip(value_tooltip(chart.is_currency, currency_code))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(value_formatter(
                    chart.is_currency,
                    currency_code,
                ))),
        )
        .series(Bar::new().name(chart.title).data(values))
}

fn pie_chart_options(chart: &PieChart, currency_code: &str) -> Chart {
    let data: Vec<(f64, &str)> = chart
        .segments
        .iter()
        .map(|segment| (segment.value, segment.label.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text(chart.title))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(value_formatter(chart.is_currency, currency_code)),
        )
        .legend(Legend::new().top("bottom"))
        .series(Pie::new().name(chart.title).radius("60%").data(data))
}

fn line_chart_options(chart: &LineChart, currency_code: &str) -> Chart {
    let labels: Vec<String> = chart
        .points
        .iter()
        .map(|point| point.label.clone())
        .collect();
    let values: Vec<f64> = chart.points.iter().map(|point| point.value).collect();

    Chart::new()
        .title(Title::new().text(chart.title))
        .tooltip(value_tooltip(chart.is_currency, currency_code))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(value_formatter(
                    chart.is_currency,
                    currency_code,
                ))),
        )
        .series(Line::new().name(chart.title).data(values))
}

fn value_formatter(is_currency: bool, currency_code: &str) -> JsFunction {
    if is_currency {
        JsFunction::new_with_args(
            "number",
            &format!(
                "const formatter = new Intl.NumberFormat('en-US', {{
                    style: 'currency',
                    currency: '{currency_code}'
                }});
                return (number != null) ? formatter.format(number) : \"-\";"
            ),
        )
    } else {
        JsFunction::new_with_args(
            "number",
            "return (number != null) ? Number(number).toLocaleString('en-US') : \"-\";",
        )
    }
}

fn value_tooltip(is_currency: bool, currency_code: &str) -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(value_formatter(is_currency, currency_code))
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

/// Renders the container divs for report charts.
pub fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates the JavaScript that initializes ECharts instances for the given
/// charts, with dark mode support and responsive resizing.
///
/// The script is emitted inline so HTMX executes it when the report partial
/// is swapped in.
pub fn charts_script(charts: &[DashboardChart]) -> Markup {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    html!(script { (PreEscaped(script_content)) })
}
