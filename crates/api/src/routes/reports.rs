//! Payment schedule report downloads.

use axum::{
    Router,
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use mfo_core::reports::csv::render_csv;
use mfo_core::reports::{
    PdfRenderer, RenderError, ReportError, ReportFormat, ScheduleReport, report_filename,
};
use mfo_db::ReportRepository;
use mfo_shared::ReportConfig;
use mfo_shared::types::ProductId;
use tracing::info;

use super::error_response;
use crate::{AppState, middleware::AuthUser};

/// Creates the report routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/products/{product_id}/report/{format}", get(download_report))
}

async fn render(
    report: &ScheduleReport,
    format: ReportFormat,
    config: &ReportConfig,
) -> Result<Vec<u8>, RenderError> {
    match format {
        ReportFormat::Csv => render_csv(report, config),
        ReportFormat::Pdf => PdfRenderer::new(config.clone()).render(report).await,
    }
}

/// GET `/products/{product_id}/report/{format}` - schedule as a PDF or CSV attachment.
async fn download_report(
    State(state): State<AppState>,
    auth: AuthUser,
    Path((product_id, format)): Path<(i32, String)>,
) -> Response {
    let Some(format) = ReportFormat::parse(&format) else {
        return error_response(ReportError::UnsupportedFormat(format).into());
    };
    let product_id = ProductId::new(product_id);

    let report = match ReportRepository::new((*state.db).clone())
        .build(product_id)
        .await
    {
        Ok(report) => report,
        Err(e) => return error_response(e.into()),
    };

    let body = match render(&report, format, &state.reports).await {
        Ok(body) => body,
        Err(e) => return error_response(e.into()),
    };

    let filename = report_filename(product_id, Utc::now().date_naive(), format);
    info!(
        product_id = %product_id,
        %format,
        bytes = body.len(),
        manager_id = %auth.manager_id(),
        "Schedule report downloaded"
    );

    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
        .into_response()
}
