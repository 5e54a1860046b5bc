//! Payment schedule reports.
//!
//! Projects a persisted schedule into a table of running balances and renders
//! it for download:
//! - CSV (tab-separated, UTF-8)
//! - PDF (HTML template piped through an external converter)

pub mod csv;
pub mod error;
pub mod pdf;
pub mod service;
pub mod types;


pub use error::{RenderError, ReportError};
pub use pdf::{PdfRenderer, render_html};
pub use service::ReportService;
pub use types::*;
