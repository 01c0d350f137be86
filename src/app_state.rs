//! Implements a struct that holds the state of the web server.

use std::sync::{Arc, atomic::AtomicU64};

use crate::report::client::{HttpPdfService, HttpReportApi, PdfService, ReportApi};

/// The state of the web server.
#[derive(Clone)]
pub struct AppState {
    /// The backend API that generates report data.
    pub report_api: Arc<dyn ReportApi>,

    /// The external service that renders reports as PDF files.
    pub pdf_service: Arc<dyn PdfService>,

    /// The ISO 4217 currency code used for money values, e.g. "LKR".
    pub currency_code: String,

    /// Monotonically increasing report-generation counter. Responses for a
    /// stale generation are discarded rather than overwriting fresher state.
    pub report_generation: Arc<AtomicU64>,
}

impl AppState {
    /// Create a new [AppState] with HTTP-backed report and PDF clients.
    pub fn new(backend_url: &str, pdf_service_url: &str, currency_code: &str) -> Self {
        let client = reqwest::Client::new();

        Self {
            report_api: Arc::new(HttpReportApi::new(client.clone(), backend_url)),
            pdf_service: Arc::new(HttpPdfService::new(client, pdf_service_url)),
            currency_code: currency_code.to_owned(),
            report_generation: Arc::new(AtomicU64::new(0)),
        }
    }
}
