//! 对比评分接口

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;

use crate::api::AppState;
use crate::error::AppResult;
use crate::models::CompareOutcome;

/// POST /api/compare 请求体
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareRequest {
    #[serde(default)]
    pub text_a: Option<String>,
    #[serde(default)]
    pub text_b: Option<String>,
}

/// POST /api/compare
///
/// 返回结构取决于部署配置的 `COMPARE_CONTRACT`。
pub async fn compare_texts(
    State(state): State<AppState>,
    payload: Result<Json<CompareRequest>, JsonRejection>,
) -> AppResult<Json<CompareOutcome>> {
    let Json(request) = payload?;
    let text_a = request.text_a.unwrap_or_default();
    let text_b = request.text_b.unwrap_or_default();
    debug!(
        "收到对比请求: A {} 字符, B {} 字符",
        text_a.chars().count(),
        text_b.chars().count()
    );

    let outcome = state.orchestrator.compare_texts(&text_a, &text_b).await?;
    Ok(Json(outcome))
}

pub fn compare_routes() -> Router<AppState> {
    Router::new().route("/api/compare", post(compare_texts))
}
