//! 报告导出接口
//!
//! 接收评分结果，返回可下载的 Markdown / 纯文本附件

use axum::{
    extract::rejection::JsonRejection,
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::Local;
use tracing::info;

use crate::api::AppState;
use crate::error::AppResult;
use crate::models::ReportRequest;
use crate::services::report_export::summarize;
use crate::services::{render_report, ReportFormat, ScoringReport};

/// POST /api/export/markdown
pub async fn export_markdown(
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(request) = payload?;
    export_report(request, ReportFormat::Markdown)
}

/// POST /api/export/text
pub async fn export_text(
    payload: Result<Json<ReportRequest>, JsonRejection>,
) -> AppResult<Response> {
    let Json(request) = payload?;
    export_report(request, ReportFormat::PlainText)
}

fn export_report(request: ReportRequest, format: ReportFormat) -> AppResult<Response> {
    let report = ScoringReport::from_request(request, Local::now().date_naive())?;
    let body = render_report(&report, format)?;

    info!("📄 导出 {} 报告: {}", format.label(), summarize(&report));

    let headers = [
        (header::CONTENT_TYPE, format.content_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", format.file_name()),
        ),
    ];

    Ok((headers, body).into_response())
}

pub fn export_routes() -> Router<AppState> {
    Router::new()
        .route("/api/export/markdown", post(export_markdown))
        .route("/api/export/text", post(export_text))
}
