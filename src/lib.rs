//! CraftNest Reports is the reporting dashboard for the CraftNest
//! marketplace. It fetches report data from the backend API, renders charts
//! and tables as HTML pages, and hands finished reports to the PDF service
//! for export.
//!
//! This library provides a REST API that directly serves HTML pages.

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod endpoints;
mod formatters;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod report;
mod routing;
mod theme;

pub use app_state::AppState;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

use crate::{alert::Alert, internal_server_error::InternalServerError};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The report API request failed or returned a failure response.
    ///
    /// The message is shown to the user, so callers should pass the
    /// server-provided message when one is available.
    #[error("could not fetch report data: {0}")]
    FetchFailed(String),

    /// The PDF service request failed or returned a failure response.
    #[error("could not export report: {0}")]
    ExportFailed(String),

    /// The selected date range could not be parsed or ends before it starts.
    #[error("the date range is invalid")]
    InvalidDateRange,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        // Full-page error responses are only used for non-HTMX requests;
        // report requests go through [Error::into_alert_response].
        tracing::error!("An unexpected error occurred: {}", self);
        InternalServerError::default().into_response()
    }
}

impl Error {
    /// Render this error as a dismissible alert for HTMX swaps.
    pub(crate) fn into_alert_response(self) -> Response {
        match self {
            Error::FetchFailed(details) => Alert::Error {
                message: "Could not generate report".to_owned(),
                details,
            }
            .into_response(),
            Error::ExportFailed(details) => Alert::Error {
                message: "Could not export report".to_owned(),
                details,
            }
            .into_response(),
            Error::InvalidDateRange => (
                StatusCode::BAD_REQUEST,
                Alert::ErrorSimple {
                    message: "Pick a start date on or before the end date".to_owned(),
                }
                .into_markup(),
            )
                .into_response(),
        }
    }
}
