//! Report HTTP handlers and view rendering.
//!
//! This module contains:
//! - Route handlers for the admin and artisan report pages
//! - The report-generation partial returned to HTMX requests
//! - The PDF export endpoint
//!
//! Report generation follows a simple state machine per view: the page loads
//! idle, a generate request swaps in the loaded partial (or the empty notice
//! or an error alert), and export is a side request that never changes the
//! loaded report.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use axum::{
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use maud::{Markup, PreEscaped, html};
use serde::Deserialize;
use serde_json::{Map, json};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, Error,
    alert::Alert,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        HeadElement, base, loading_spinner,
    },
    navigation::NavBar,
    report::{
        cards::summary_cards_view,
        charts::{build_dashboard_charts, charts_script, charts_view},
        client::{DateRange, PdfService, ReportApi},
        export::{Orientation, PaperSize, PdfExportRequest, PdfOptions, ReportDataPayload},
        row::ReportResponse,
        schema::{ChartConfig, ReportSchema},
        tables::{MAX_TABLE_ROWS, data_table_view},
    },
    theme::{ReportCategory, ReportScope},
};

const ISO_DATE: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// The state needed by the report handlers.
#[derive(Clone)]
pub struct ReportState {
    pub report_api: Arc<dyn ReportApi>,
    pub pdf_service: Arc<dyn PdfService>,
    pub currency_code: String,
    pub report_generation: Arc<AtomicU64>,
}

impl FromRef<AppState> for ReportState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            report_api: state.report_api.clone(),
            pdf_service: state.pdf_service.clone(),
            currency_code: state.currency_code.clone(),
            report_generation: state.report_generation.clone(),
        }
    }
}

/// Form data for generating a report.
#[derive(Debug, Deserialize)]
pub struct GenerateReportForm {
    pub report_type: String,
    pub start_date: String,
    pub end_date: String,
}

/// Form data for exporting a report as a PDF.
#[derive(Debug, Deserialize)]
pub struct ExportReportForm {
    pub report_type: String,
    pub start_date: String,
    pub end_date: String,
    #[serde(default)]
    pub paper_size: PaperSize,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default)]
    pub include_header: bool,
    #[serde(default)]
    pub include_footer: bool,
    #[serde(default)]
    pub include_charts: bool,
    #[serde(default)]
    pub include_data_table: bool,
    /// Rendered chart images as data URIs, collected client-side.
    #[serde(default)]
    pub charts: Vec<String>,
}

/// Display the admin report page.
pub async fn get_reports_page() -> Markup {
    report_page(ReportScope::Admin)
}

/// Display the artisan report page.
pub async fn get_artisan_reports_page() -> Markup {
    report_page(ReportScope::Artisan)
}

/// Fetch report data and return the report partial for HTMX to swap in.
///
/// Returns `204 No Content` when a newer generate request was started while
/// this one was in flight, so a slow response can never overwrite a fresher
/// report.
pub async fn generate_report(
    State(state): State<ReportState>,
    Form(form): Form<GenerateReportForm>,
) -> Response {
    let Some(category) = ReportCategory::parse(&form.report_type) else {
        tracing::warn!("unknown report type {:?}", form.report_type);
        return report_unavailable_partial(&form.report_type).into_response();
    };

    let date_range = match parse_date_range(&form.start_date, &form.end_date) {
        Ok(date_range) => date_range,
        Err(error) => return error.into_alert_response(),
    };

    let generation = state.report_generation.fetch_add(1, Ordering::SeqCst) + 1;

    let report = state.report_api.fetch_report(category, date_range).await;

    if state.report_generation.load(Ordering::SeqCst) != generation {
        tracing::debug!("discarding stale report response (generation {generation})");
        return StatusCode::NO_CONTENT.into_response();
    }

    let report = match report {
        Err(error) => {
            tracing::error!("could not fetch {category} report: {error}");
            return error.into_alert_response();
        }
        Ok(report) => report,
    };

    if report.is_empty() {
        return empty_report_partial(category).into_response();
    }

    report_partial(&report, category, date_range, &state.currency_code).into_response()
}

/// Submit the current report to the PDF service and return an alert with the
/// download link.
///
/// The report data is re-fetched so the exported PDF always matches the
/// selected filters; the rendered chart images come from the client because
/// charts are drawn in the browser.
pub async fn export_report(
    State(state): State<ReportState>,
    Form(form): Form<ExportReportForm>,
) -> Response {
    let Some(category) = ReportCategory::parse(&form.report_type) else {
        tracing::warn!("unknown report type {:?} in export", form.report_type);
        return Alert::ErrorSimple {
            message: "Unknown report type".to_owned(),
        }
        .into_response();
    };

    let date_range = match parse_date_range(&form.start_date, &form.end_date) {
        Ok(date_range) => date_range,
        Err(error) => return error.into_alert_response(),
    };

    let report = match state.report_api.fetch_report(category, date_range).await {
        Err(error) => {
            tracing::error!("could not fetch {category} report for export: {error}");
            return Error::ExportFailed(error.to_string()).into_alert_response();
        }
        Ok(report) => report,
    };

    let request = build_export_request(&state, &report, category, date_range, &form);

    match state.pdf_service.export(&request).await {
        Ok(result) => Alert::Download {
            url: state.pdf_service.download_url(&result.file_name),
            file_name: result.file_name,
        }
        .into_response(),
        Err(error) => {
            tracing::error!("could not export {category} report: {error}");
            error.into_alert_response()
        }
    }
}

fn parse_date_range(start_date: &str, end_date: &str) -> Result<DateRange, Error> {
    let start_date = Date::parse(start_date, ISO_DATE).map_err(|_| Error::InvalidDateRange)?;
    let end_date = Date::parse(end_date, ISO_DATE).map_err(|_| Error::InvalidDateRange)?;

    let date_range = DateRange {
        start_date,
        end_date,
    };
    date_range.validate()?;

    Ok(date_range)
}

fn build_export_request(
    state: &ReportState,
    report: &ReportResponse,
    category: ReportCategory,
    date_range: DateRange,
    form: &ExportReportForm,
) -> PdfExportRequest {
    let config = ChartConfig::derive(category, report.data.len());
    let schema = ReportSchema::for_category(category);
    let charts = build_dashboard_charts(&report.data, category, &config, &state.currency_code);

    let charts_html = charts_view(&charts).into_string();
    let table_html = data_table_view(&report.data, schema, &state.currency_code).into_string();
    let dashboard_html = html!(
        (summary_cards_view(&report.summary, &state.currency_code))
        (PreEscaped(charts_html.clone()))
        (PreEscaped(table_html.clone()))
    )
    .into_string();

    let filters = report.applied_filters.clone().unwrap_or_else(|| {
        let mut filters = Map::new();
        filters.insert("includeGraphs".to_owned(), json!(true));
        filters
    });

    PdfExportRequest {
        report_data: ReportDataPayload {
            response: report.clone(),
            dashboard_html,
            charts_html,
            table_html,
            charts: form.charts.clone(),
        },
        report_type: category.as_str().to_owned(),
        date_range,
        filters,
        pdf_options: PdfOptions {
            paper_size: form.paper_size,
            orientation: form.orientation,
            include_header: form.include_header,
            include_footer: form.include_footer,
            include_charts: form.include_charts,
            include_data_table: form.include_data_table,
            // Same row cap as the rendered table.
            max_table_rows: Some(MAX_TABLE_ROWS as u32),
        },
    }
}

/// Renders the idle report page for a scope: the category and date-range
/// form plus an empty container the report partial is swapped into.
fn report_page(scope: ReportScope) -> Markup {
    let (active_endpoint, title) = match scope {
        ReportScope::Admin => (endpoints::REPORTS_VIEW, "Admin Reports"),
        ReportScope::Artisan => (endpoints::ARTISAN_REPORTS_VIEW, "Artisan Reports"),
    };
    let nav_bar = NavBar::new(active_endpoint).into_html();

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
            max-w-screen-xl text-gray-900 dark:text-white"
        {
            h2 class="text-2xl font-bold mb-4" { (title) }

            form
                hx-post=(endpoints::GENERATE_REPORT)
                hx-target="#report-content"
                hx-target-error="#alert-container"
                hx-swap="innerHTML"
                hx-indicator="#indicator"
                class="w-full bg-gray-50 dark:bg-gray-800 p-4 rounded-lg mb-6
                    grid grid-cols-1 md:grid-cols-4 gap-4 items-end"
            {
                div {
                    label for="report_type" class=(FORM_LABEL_STYLE) { "Report Type" }
                    select
                        name="report_type"
                        id="report_type"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        @for category in scope.categories() {
                            option value=(category.as_str()) { (category.title()) }
                        }
                    }
                }

                div {
                    label for="start_date" class=(FORM_LABEL_STYLE) { "Start Date" }
                    input
                        type="date"
                        name="start_date"
                        id="start_date"
                        class=(FORM_TEXT_INPUT_STYLE)
                        required;
                }

                div {
                    label for="end_date" class=(FORM_LABEL_STYLE) { "End Date" }
                    input
                        type="date"
                        name="end_date"
                        id="end_date"
                        class=(FORM_TEXT_INPUT_STYLE)
                        required;
                }

                button type="submit" id="indicator" class=(BUTTON_PRIMARY_STYLE) {
                    span class="htmx-indicator" { (loading_spinner()) }
                    "Generate Report"
                }
            }

            div id="report-content" class="w-full" {
                p class="text-gray-600 dark:text-gray-400" {
                    "Pick a report type and date range, then generate a report to see
                    charts and data here."
                }
            }
        }
    );

    let scripts = [HeadElement::ScriptLink(
        "/static/echarts.6.0.0.min.js".to_owned(),
    )];

    base(title, &scripts, &content)
}

/// Renders the loaded report: summary cards, charts, the data table, and the
/// PDF export form.
fn report_partial(
    report: &ReportResponse,
    category: ReportCategory,
    date_range: DateRange,
    currency_code: &str,
) -> Markup {
    let config = ChartConfig::derive(category, report.data.len());
    let schema = ReportSchema::for_category(category);
    let charts = build_dashboard_charts(&report.data, category, &config, currency_code);

    html!(
        @if config.show_summary {
            (summary_cards_view(&report.summary, currency_code))
        }

        @if !charts.is_empty() {
            (charts_view(&charts))
            (charts_script(&charts))
        }

        @if config.show_tables {
            (data_table_view(&report.data, schema, currency_code))
        }

        (export_form(category, date_range, &charts.iter().map(|chart| chart.id).collect::<Vec<_>>()))
    )
}

/// Renders the PDF export form for the loaded report.
///
/// A small script collects each rendered chart as a data URI when the form
/// is submitted, since charts only exist in the browser.
fn export_form(category: ReportCategory, date_range: DateRange, chart_ids: &[&str]) -> Markup {
    let chart_ids_json =
        serde_json::to_string(chart_ids).unwrap_or_else(|_| "[]".to_owned());

    html!(
        section id="report-export" class="w-full mx-auto mb-8" {
            h3 class="text-xl font-semibold mb-4" { "Export as PDF" }

            form
                id="export-form"
                hx-post=(endpoints::EXPORT_REPORT)
                hx-target="#alert-container"
                hx-target-error="#alert-container"
                hx-swap="innerHTML"
                class="bg-gray-50 dark:bg-gray-800 p-4 rounded-lg
                    grid grid-cols-1 md:grid-cols-3 gap-4 items-end"
            {
                input type="hidden" name="report_type" value=(category.as_str());
                input type="hidden" name="start_date" value=(date_range.start_date);
                input type="hidden" name="end_date" value=(date_range.end_date);

                div {
                    label for="paper_size" class=(FORM_LABEL_STYLE) { "Paper Size" }
                    select name="paper_size" id="paper_size" class=(FORM_TEXT_INPUT_STYLE) {
                        option value="a4" { "A4" }
                        option value="letter" { "Letter" }
                        option value="legal" { "Legal" }
                    }
                }

                div {
                    label for="orientation" class=(FORM_LABEL_STYLE) { "Orientation" }
                    select name="orientation" id="orientation" class=(FORM_TEXT_INPUT_STYLE) {
                        option value="portrait" { "Portrait" }
                        option value="landscape" { "Landscape" }
                    }
                }

                div class="grid grid-cols-2 gap-2 text-sm" {
                    label class="flex items-center space-x-2" {
                        input type="checkbox" name="include_header" value="true" checked;
                        span { "Header" }
                    }
                    label class="flex items-center space-x-2" {
                        input type="checkbox" name="include_footer" value="true" checked;
                        span { "Footer" }
                    }
                    label class="flex items-center space-x-2" {
                        input type="checkbox" name="include_charts" value="true" checked;
                        span { "Charts" }
                    }
                    label class="flex items-center space-x-2" {
                        input type="checkbox" name="include_data_table" value="true" checked;
                        span { "Data table" }
                    }
                }

                button type="submit" class=(BUTTON_SECONDARY_STYLE) {
                    "Export PDF"
                }
            }

            script {
                (PreEscaped(format!(
                    r#"document.getElementById("export-form").addEventListener("htmx:configRequest", (event) => {{
                        const chartIds = {chart_ids_json};
                        event.detail.parameters["charts"] = chartIds
                            .map((id) => echarts.getInstanceByDom(document.getElementById(id)))
                            .filter((chart) => chart != null)
                            .map((chart) => chart.getDataURL());
                    }});"#
                )))
            }
        }
    )
}

/// Renders the notice for a report whose filters matched no rows. This is
/// informational, not an error.
fn empty_report_partial(category: ReportCategory) -> Markup {
    html!(
        div id="report-empty" class="flex flex-col items-center py-8 text-gray-900 dark:text-white" {
            h3 class="text-xl font-bold mb-2" { "No data for this report" }
            p class="text-gray-600 dark:text-gray-400" {
                "No " (category.title().to_lowercase()) " data matches the selected date range.
                Try widening the range or picking a different report type."
            }
        }
    )
}

/// Renders the degraded view for a report type this frontend does not know.
fn report_unavailable_partial(report_type: &str) -> Markup {
    html!(
        div id="report-unavailable" class="flex flex-col items-center py-8 text-gray-900 dark:text-white" {
            h3 class="text-xl font-bold mb-2" { "No charts available" }
            p class="text-gray-600 dark:text-gray-400" {
                "Reports of type " code { (report_type) } " are not supported."
            }
        }
    )
}
