//! Report module
//!
//! Turns report API responses into summary cards, charts, and data tables,
//! and packages loaded reports for the external PDF service.

mod aggregation;
mod cards;
mod charts;
pub mod client;
pub mod export;
mod handlers;
pub mod row;
mod schema;
mod tables;

pub use handlers::{
    ReportState, export_report, generate_report, get_artisan_reports_page, get_reports_page,
};
