//! Wire shapes for the PDF export request.
//!
//! Field names follow the PDF service's JSON contract, including the
//! all-caps `HTML` suffixes, so the serde renames here are deliberate.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::report::{client::DateRange, row::ReportResponse};

/// The payload sent to the PDF service's generate endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfExportRequest {
    pub report_data: ReportDataPayload,
    /// The report category identifier, e.g. `"sales"`.
    pub report_type: String,
    pub date_range: DateRange,
    /// Category-specific filters as applied to the generation request.
    pub filters: Map<String, Value>,
    pub pdf_options: PdfOptions,
}

/// The original report response enriched with the rendered HTML sections and
/// chart images.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDataPayload {
    #[serde(flatten)]
    pub response: ReportResponse,
    #[serde(rename = "dashboardHTML")]
    pub dashboard_html: String,
    #[serde(rename = "chartsHTML")]
    pub charts_html: String,
    #[serde(rename = "tableHTML")]
    pub table_html: String,
    /// Rendered chart images as data URIs, in dashboard order.
    pub charts: Vec<String>,
}

/// Layout options for the rendered PDF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfOptions {
    pub paper_size: PaperSize,
    pub orientation: Orientation,
    pub include_header: bool,
    pub include_footer: bool,
    pub include_charts: bool,
    pub include_data_table: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_table_rows: Option<u32>,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            paper_size: PaperSize::A4,
            orientation: Orientation::Portrait,
            include_header: true,
            include_footer: true,
            include_charts: true,
            include_data_table: true,
            max_table_rows: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaperSize {
    #[default]
    A4,
    Letter,
    Legal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

/// The PDF service's response to a generate request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfExportResponse {
    pub success: bool,
    pub file_name: String,
}
