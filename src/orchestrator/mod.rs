//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责把一次请求拆成按类别的评分调用，再把结果汇总成响应，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `scoring_orchestrator` - 评分编排器
//! - 单文本评分：按目录顺序、有限并发地为每个类别打分
//! - 对比评分：每个类别同时为两个版本打分
//! - 单个类别失败时用占位结果替代
//! - 最低分类别交给改写建议服务
//!
//! ### `ranking` - 汇总与排序
//! - 平均分格式化（两位小数）
//! - 稳定的升序排序，同分按目录顺序
//!
//! ## 层次关系
//!
//! ```text
//! api (HTTP 处理器)
//!     ↓
//! orchestrator::ScoringOrchestrator (处理一次请求)
//!     ↓
//! services (能力层：scorer / advisor / parser)
//!     ↓
//! clients (补全后端：OpenAI 兼容接口)
//! ```
//!
//! ## 设计原则
//!
//! 1. **单一职责**：编排器只做调度和汇总，提示词和解析留在能力层
//! 2. **向下依赖**：编排层 → services → clients
//! 3. **无共享状态**：每次请求独立构建结果

pub mod ranking;
pub mod scoring_orchestrator;

// 重新导出主要类型
pub use ranking::{format_average, lowest_categories, rank_ascending, round2};
pub use scoring_orchestrator::{OrchestratorOptions, ScoringOrchestrator};
