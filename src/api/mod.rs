//! HTTP 接口层
//!
//! 负责把 JSON 请求交给编排层，再把结果或错误写回响应

pub mod compare;
pub mod export;
pub mod health;
pub mod score;

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::orchestrator::ScoringOrchestrator;

// 重新导出路由
pub use compare::compare_routes;
pub use export::export_routes;
pub use health::health_routes;
pub use score::score_routes;

/// 所有处理器共享的只读状态
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<ScoringOrchestrator>,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(orchestrator: Arc<ScoringOrchestrator>) -> Self {
        Self {
            orchestrator,
            started_at: Utc::now(),
        }
    }
}

/// 构建完整路由
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(score_routes())
        .merge(compare_routes())
        .merge(export_routes())
        .merge(health_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
