//! 单文本评分接口

use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use tracing::debug;

use crate::api::AppState;
use crate::error::AppResult;
use crate::models::SingleScoreResult;
use crate::utils::logging::truncate_text;

/// POST /api/score 请求体
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(default)]
    pub text: Option<String>,
}

/// POST /api/score
///
/// 缺少 `text` 或内容为空白时返回 400，不发起任何 LLM 调用。
pub async fn score_text(
    State(state): State<AppState>,
    payload: Result<Json<ScoreRequest>, JsonRejection>,
) -> AppResult<Json<SingleScoreResult>> {
    let Json(request) = payload?;
    let text = request.text.unwrap_or_default();
    debug!("收到评分请求: {}", truncate_text(&text, 60));

    let result = state.orchestrator.score_text(&text).await?;
    Ok(Json(result))
}

pub fn score_routes() -> Router<AppState> {
    Router::new().route("/api/score", post(score_text))
}
