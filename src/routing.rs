//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState, endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    report::{export_report, generate_report, get_artisan_reports_page, get_reports_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::REPORTS_VIEW, get(get_reports_page))
        .route(endpoints::ARTISAN_REPORTS_VIEW, get(get_artisan_reports_page))
        .route(endpoints::GENERATE_REPORT, post(generate_report))
        .route(endpoints::EXPORT_REPORT, post(export_report))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        )
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the admin reports page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::REPORTS_VIEW)
}
