//! HTTP clients for the report backend and the PDF rendering service.
//!
//! Handlers depend on the [ReportApi] and [PdfService] traits rather than on
//! `reqwest` directly, so tests can substitute in-memory stubs. Neither
//! client retries: a failed request surfaces an error alert and the user
//! decides whether to try again.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::Date;

use crate::{
    Error,
    report::{
        export::{PdfExportRequest, PdfExportResponse},
        row::ReportResponse,
    },
    theme::ReportCategory,
};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// An inclusive date range selected in the report form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    #[serde(with = "iso_date")]
    pub start_date: Date,
    #[serde(with = "iso_date")]
    pub end_date: Date,
}

impl DateRange {
    /// Reject ranges where the end precedes the start.
    pub fn validate(&self) -> Result<(), Error> {
        if self.end_date < self.start_date {
            return Err(Error::InvalidDateRange);
        }

        Ok(())
    }
}

/// The backend report-generation API.
#[async_trait]
pub trait ReportApi: Send + Sync {
    /// Fetch the report rows and summary for a category over a date range.
    async fn fetch_report(
        &self,
        category: ReportCategory,
        date_range: DateRange,
    ) -> Result<ReportResponse, Error>;
}

/// The external PDF rendering service.
#[async_trait]
pub trait PdfService: Send + Sync {
    /// Submit a report for PDF rendering. The returned file name is fetched
    /// with a separate request to [PdfService::download_url].
    async fn export(&self, request: &PdfExportRequest) -> Result<PdfExportResponse, Error>;

    /// The URL the browser downloads the rendered file from.
    fn download_url(&self, file_name: &str) -> String;
}

/// [ReportApi] backed by the backend's REST API.
#[derive(Debug, Clone)]
pub struct HttpReportApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpReportApi {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: trim_trailing_slash(base_url.into()),
        }
    }
}

#[async_trait]
impl ReportApi for HttpReportApi {
    async fn fetch_report(
        &self,
        category: ReportCategory,
        date_range: DateRange,
    ) -> Result<ReportResponse, Error> {
        let url = format!("{}/api/reports/generate", self.base_url);
        let body = json!({
            "reportType": category.as_str(),
            "dateRange": date_range,
            "filters": { "includeGraphs": true },
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|error| Error::FetchFailed(error.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::FetchFailed(format!(
                "report API returned {}",
                response.status()
            )));
        }

        let report: ReportResponse = response
            .json()
            .await
            .map_err(|error| Error::FetchFailed(error.to_string()))?;

        if !report.success {
            // The backend reports failures in-band with a message.
            return Err(Error::FetchFailed(
                report
                    .message
                    .unwrap_or_else(|| "report generation failed".to_owned()),
            ));
        }

        Ok(report)
    }
}

/// [PdfService] backed by the PDF rendering service's REST API.
#[derive(Debug, Clone)]
pub struct HttpPdfService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpPdfService {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: trim_trailing_slash(base_url.into()),
        }
    }
}

#[async_trait]
impl PdfService for HttpPdfService {
    async fn export(&self, request: &PdfExportRequest) -> Result<PdfExportResponse, Error> {
        let url = format!("{}/generate-pdf", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|error| Error::ExportFailed(error.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::ExportFailed(format!(
                "PDF service returned {}",
                response.status()
            )));
        }

        let result: PdfExportResponse = response
            .json()
            .await
            .map_err(|error| Error::ExportFailed(error.to_string()))?;

        if !result.success {
            return Err(Error::ExportFailed("PDF generation failed".to_owned()));
        }

        Ok(result)
    }

    fn download_url(&self, file_name: &str) -> String {
        format!("{}/download/{file_name}", self.base_url)
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }

    url
}
