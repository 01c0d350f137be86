//! The application's route URIs.

/// The root route which redirects to the admin reports page.
pub const ROOT: &str = "/";
/// The admin report dashboard.
pub const REPORTS_VIEW: &str = "/reports";
/// The artisan report dashboard.
pub const ARTISAN_REPORTS_VIEW: &str = "/artisan/reports";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route that fetches report data and returns the report partial.
pub const GENERATE_REPORT: &str = "/api/reports/generate";
/// The route that submits a report to the PDF service.
pub const EXPORT_REPORT: &str = "/api/reports/export";
