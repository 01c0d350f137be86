//! The fallback full-page error shown when report rendering fails outside an
//! HTMX request. Alert partials handle the in-page error paths.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

pub struct InternalServerError<'a> {
    pub description: &'a str,
    pub fix: &'a str,
}

impl Default for InternalServerError<'_> {
    fn default() -> Self {
        Self {
            description: "Sorry, something went wrong while preparing your report.",
            fix: "Try generating the report again, or check the server logs if the problem persists.",
        }
    }
}

impl InternalServerError<'_> {
    pub fn into_html(self) -> Html<String> {
        Html(error_view("Internal Server Error", "500", self.description, self.fix).into_string())
    }
}

impl IntoResponse for InternalServerError<'_> {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, self.into_html()).into_response()
    }
}

pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_has_error_status_and_report_guidance() {
        let response = InternalServerError::default().into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn page_renders_the_description_and_fix() {
        let Html(page) = InternalServerError {
            description: "The report backend is unreachable.",
            fix: "Check that the backend API is running.",
        }
        .into_html();

        assert!(page.contains("500"));
        assert!(page.contains("The report backend is unreachable."));
        assert!(page.contains("Check that the backend API is running."));
    }
}
