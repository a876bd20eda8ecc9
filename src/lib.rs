//! # Rubric Scorer
//!
//! 按评分标准逐类别为写作片段打分的 HTTP 服务
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 持有外部资源（OpenAI 兼容接口），只暴露能力
//! - `CompletionBackend` - 补全能力的抽象，生产环境为 `OpenAiBackend`
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每次只处理一个类别或一份报告
//! - `CategoryScorer` - 单类别评分能力
//! - `ScoreParser` - 从回复中提取分数
//! - `RewriteAdvisor` - 改写建议能力
//! - `report_export` - 报告渲染能力
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/` - 把一次请求拆成按类别的调用并汇总
//! - `ScoringOrchestrator` - 单文本评分、对比评分
//!
//! ### ④ 接口层（API）
//! - `api/` - axum 路由和处理器，`App` 负责启动
//!
//! ## 模块结构

pub mod api;
pub mod app;
pub mod clients;
pub mod config;
pub mod error;
pub mod logger;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use api::{build_router, AppState};
pub use app::App;
pub use clients::{CompletionBackend, CompletionRequest, OpenAiBackend};
pub use config::{CompareContract, Config, ScoreParserKind};
pub use error::{AppError, AppResult};
pub use models::{CompareOutcome, RubricCatalog, RubricCategory, SingleScoreResult};
pub use orchestrator::{OrchestratorOptions, ScoringOrchestrator};
