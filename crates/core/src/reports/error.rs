//! Report error types.

use mfo_shared::AppError;
use mfo_shared::types::ProductId;
use thiserror::Error;

/// Errors that can occur while preparing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Product not found.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Requested format is neither pdf nor csv.
    #[error("Unsupported report format: {0}")]
    UnsupportedFormat(String),

    /// Rendering failed.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// Errors raised by the CSV and PDF renderers.
#[derive(Debug, Error)]
pub enum RenderError {
    /// HTML template could not be read.
    #[error("Report template {path} unavailable: {reason}")]
    TemplateMissing {
        /// Configured template path.
        path: String,
        /// Underlying I/O error.
        reason: String,
    },

    /// Converter binary could not be started.
    #[error("PDF converter {program} unavailable: {reason}")]
    ConverterUnavailable {
        /// Configured converter binary.
        program: String,
        /// Underlying I/O error.
        reason: String,
    },

    /// Converter ran but did not produce a document.
    #[error("PDF converter failed ({status}): {stderr}")]
    ConverterFailed {
        /// Exit status description.
        status: String,
        /// Captured standard error.
        stderr: String,
    },

    /// CSV serialization failed.
    #[error("CSV rendering failed: {0}")]
    Csv(String),
}

impl ReportError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::ProductNotFound(_) => 404,
            Self::UnsupportedFormat(_) => 400,
            Self::Render(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::ProductNotFound(_) => "PRODUCT_NOT_FOUND",
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::Render(_) => "RENDER_ERROR",
        }
    }
}

impl From<::csv::Error> for RenderError {
    fn from(err: ::csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        Self::Render(err.to_string())
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::ProductNotFound(_) => Self::NotFound(err.to_string()),
            ReportError::UnsupportedFormat(_) => Self::Validation(err.to_string()),
            ReportError::Render(render) => render.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes_survive_conversion() {
        let cases = [
            ReportError::ProductNotFound(ProductId::new(1)),
            ReportError::UnsupportedFormat("xls".into()),
            ReportError::Render(RenderError::Csv("boom".into())),
        ];
        for err in cases {
            let status = err.status_code();
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }
}
