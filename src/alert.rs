//! Dismissible alert messages swapped into the page's alert container.
//!
//! Error responses are routed to `#alert-container` by the
//! `hx-target-error` attribute on report forms, so error alerts carry a
//! non-2xx status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

use crate::html::LINK_STYLE;

const ALERT_SUCCESS_STYLE: &str = "flex items-start justify-between gap-3 p-4 mb-2 \
    text-sm text-green-800 rounded-lg bg-green-50 shadow-lg \
    dark:bg-gray-800 dark:text-green-400";

const ALERT_ERROR_STYLE: &str = "flex items-start justify-between gap-3 p-4 mb-2 \
    text-sm text-red-800 rounded-lg bg-red-50 shadow-lg \
    dark:bg-gray-800 dark:text-red-400";

/// An alert message shown in the floating alert container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    Success { message: String, details: String },
    /// A success alert whose body is a download link for `file_name`.
    Download { file_name: String, url: String },
    Error { message: String, details: String },
    ErrorSimple { message: String },
}

impl Alert {
    pub fn into_markup(self) -> Markup {
        let (style, message, details) = match self {
            Alert::Success { message, details } => {
                (ALERT_SUCCESS_STYLE, message, html!(@if !details.is_empty() { p { (details) } }))
            }
            Alert::Download { file_name, url } => (
                ALERT_SUCCESS_STYLE,
                "Report PDF ready".to_owned(),
                html!(
                    p {
                        a href=(url) download=(file_name) class=(LINK_STYLE) {
                            "Download " (file_name)
                        }
                    }
                ),
            ),
            Alert::Error { message, details } => {
                (ALERT_ERROR_STYLE, message, html!(@if !details.is_empty() { p { (details) } }))
            }
            Alert::ErrorSimple { message } => (ALERT_ERROR_STYLE, message, html!()),
        };

        html!(
            div class=(style) role="alert" {
                div {
                    p class="font-medium" { (message) }

                    (details)
                }

                button
                    type="button"
                    class="shrink-0 font-bold cursor-pointer"
                    aria-label="Dismiss"
                    onclick="this.parentElement.remove()"
                {
                    "✕"
                }
            }
        )
    }

    fn status_code(&self) -> StatusCode {
        match self {
            Alert::Success { .. } | Alert::Download { .. } => StatusCode::OK,
            Alert::Error { .. } | Alert::ErrorSimple { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        let status_code = self.status_code();
        (status_code, self.into_markup()).into_response()
    }
}
