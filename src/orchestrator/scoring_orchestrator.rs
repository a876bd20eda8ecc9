//! 评分编排器 - 编排层
//!
//! ## 职责
//!
//! 1. **单文本评分**：对目录中每个类别调用一次评分器，汇总平均分，取最低分类别请求改写建议
//! 2. **对比评分**：每个类别同时为 A / B 两个版本打分，两者都完成后再进入下一个类别
//! 3. **故障隔离**：单个类别评分失败时用占位结果替代，整批继续
//!
//! ## 设计特点
//!
//! - 目录只读共享，每次请求都重新构建结果，请求之间没有共享可变状态
//! - 请求校验在任何 LLM 调用之前完成

use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{info, warn};

use crate::clients::{CompletionBackend, CompletionSettings};
use crate::config::{CompareContract, Config};
use crate::error::{AppResult, RequestError};
use crate::models::{
    CategoryMap, CompareOutcome, ComparisonResult, ExtendedComparison, PairedScore,
    RubricCatalog, RubricCategory, ScoreResult, SingleScoreResult,
};
use crate::orchestrator::ranking::{format_average, lowest_categories, round2};
use crate::services::{build_score_parser, CategoryScorer, RewriteAdvisor, NO_SUGGESTION};
use crate::utils::logging::log_batch_complete;

/// 编排参数
#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    /// 送入改写建议的最低分类别数量
    pub low_category_count: usize,
    /// 单文本评分时同时进行的类别数量
    pub scoring_concurrency: usize,
    pub compare_contract: CompareContract,
    /// 评分提示词是否包含衡量要点和评分档位
    pub detailed_rubric_prompt: bool,
}

impl OrchestratorOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            low_category_count: config.low_category_count,
            scoring_concurrency: config.scoring_concurrency.max(1),
            compare_contract: config.compare_contract,
            detailed_rubric_prompt: config.detailed_rubric_prompt,
        }
    }
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// 评分编排器
pub struct ScoringOrchestrator {
    catalog: Arc<RubricCatalog>,
    scorer: CategoryScorer,
    advisor: RewriteAdvisor,
    options: OrchestratorOptions,
}

impl ScoringOrchestrator {
    pub fn new(
        catalog: Arc<RubricCatalog>,
        scorer: CategoryScorer,
        advisor: RewriteAdvisor,
        options: OrchestratorOptions,
    ) -> Self {
        Self {
            catalog,
            scorer,
            advisor,
            options,
        }
    }

    /// 用同一个补全后端组装评分器和改写建议器
    pub fn from_config(
        config: &Config,
        catalog: Arc<RubricCatalog>,
        backend: Arc<dyn CompletionBackend>,
    ) -> AppResult<Self> {
        let parser = build_score_parser(config.score_parser)?;
        let scorer = CategoryScorer::new(
            backend.clone(),
            parser,
            CompletionSettings::scoring(config),
        );
        let advisor = RewriteAdvisor::new(backend, CompletionSettings::rewrite(config));

        Ok(Self::new(
            catalog,
            scorer,
            advisor,
            OrchestratorOptions::from_config(config),
        ))
    }

    pub fn catalog(&self) -> &RubricCatalog {
        &self.catalog
    }

    pub fn compare_contract(&self) -> CompareContract {
        self.options.compare_contract
    }

    /// 单文本评分
    pub async fn score_text(&self, text: &str) -> AppResult<SingleScoreResult> {
        if text.trim().is_empty() {
            return Err(RequestError::NoText.into());
        }

        info!(
            "📝 开始单文本评分: {} 个类别, 文本 {} 字符",
            self.catalog.len(),
            text.chars().count()
        );

        let scores = self.score_all_categories(text).await;

        let values: Vec<f64> = scores.values().map(|r| r.score).collect();
        let average = format_average(&values);

        let low_categories = lowest_categories(
            scores.iter().map(|(name, r)| (name, r.score)),
            self.options.low_category_count,
        );
        let rewrite_prompt = self.suggest_or_fallback(&low_categories, text).await;

        let failed = scores.values().filter(|r| r.is_sentinel()).count();
        log_batch_complete("single", scores.len(), failed, &average);

        Ok(SingleScoreResult {
            scores,
            average,
            rewrite_prompt,
        })
    }

    /// 对比评分，返回结构由部署配置决定
    pub async fn compare_texts(&self, text_a: &str, text_b: &str) -> AppResult<CompareOutcome> {
        if text_a.trim().is_empty() || text_b.trim().is_empty() {
            return Err(RequestError::MissingTexts.into());
        }

        info!(
            "🔀 开始对比评分: {} 个类别, 版本A {} 字符, 版本B {} 字符",
            self.catalog.len(),
            text_a.chars().count(),
            text_b.chars().count()
        );

        let mut version_a = CategoryMap::with_capacity(self.catalog.len());
        let mut version_b = CategoryMap::with_capacity(self.catalog.len());

        for category in self.catalog.categories() {
            let (result_a, result_b) = tokio::join!(
                self.score_or_sentinel(category, text_a),
                self.score_or_sentinel(category, text_b),
            );
            version_a.insert(category.name.clone(), result_a);
            version_b.insert(category.name.clone(), result_b);
        }

        let outcome = match self.options.compare_contract {
            CompareContract::Minimal => {
                let deltas = version_b
                    .iter()
                    .map(|(name, b)| {
                        let a = version_a.get(name).map(|r| r.score).unwrap_or_default();
                        (name.to_string(), round2(b.score - a))
                    })
                    .collect();

                CompareOutcome::Minimal(ComparisonResult {
                    version_a,
                    version_b,
                    deltas,
                })
            }
            CompareContract::Extended => {
                CompareOutcome::Extended(self.extend_comparison(&version_a, &version_b, text_a).await)
            }
        };

        info!("✓ [compare] 对比评分完成: {} 个类别", self.catalog.len());

        Ok(outcome)
    }

    /// 扩展结构：每个类别的 A/B 平均分、总平均分，以及基于版本 A 的改写建议
    async fn extend_comparison(
        &self,
        version_a: &CategoryMap<ScoreResult>,
        version_b: &CategoryMap<ScoreResult>,
        text_a: &str,
    ) -> ExtendedComparison {
        let mut raw_averages = Vec::with_capacity(version_a.len());
        let mut scores = CategoryMap::with_capacity(version_a.len());

        for (name, a) in version_a.iter() {
            let b = version_b.get(name).map(|r| r.score).unwrap_or_default();
            let average = (a.score + b) / 2.0;
            raw_averages.push((name, average));
            scores.insert(
                name,
                PairedScore {
                    score_a: a.score,
                    score_b: b,
                    average: round2(average),
                },
            );
        }

        let values: Vec<f64> = raw_averages.iter().map(|(_, avg)| *avg).collect();
        let average = format_average(&values);

        let low_categories =
            lowest_categories(raw_averages.iter().copied(), self.options.low_category_count);
        let rewrite_prompt = self.suggest_or_fallback(&low_categories, text_a).await;

        ExtendedComparison {
            scores,
            average,
            rewrite_prompt,
        }
    }

    /// 按目录顺序为所有类别打分，最多 `scoring_concurrency` 个同时进行
    async fn score_all_categories(&self, text: &str) -> CategoryMap<ScoreResult> {
        let categories = self.catalog.categories();
        stream::iter(0..categories.len())
            .map(|idx| self.score_named(&categories[idx], text))
            .buffered(self.options.scoring_concurrency.max(1))
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .collect()
    }

    async fn score_named(&self, category: &RubricCategory, text: &str) -> (String, ScoreResult) {
        let result = self.score_or_sentinel(category, text).await;
        (category.name.clone(), result)
    }

    /// 为一个类别打分，失败时返回占位结果
    async fn score_or_sentinel(&self, category: &RubricCategory, text: &str) -> ScoreResult {
        let rubric_text = if self.options.detailed_rubric_prompt {
            category.rubric_text()
        } else {
            category.definition.clone()
        };

        match self.scorer.score(&category.name, &rubric_text, text).await {
            Ok(result) => result,
            Err(e) => {
                warn!("⚠️ 类别 [{}] 评分失败，使用占位结果: {}", category.name, e);
                ScoreResult::sentinel()
            }
        }
    }

    /// 请求改写建议，失败时返回固定文案
    async fn suggest_or_fallback(&self, low_categories: &[String], text: &str) -> String {
        let definitions = self.catalog.definitions();
        match self.advisor.suggest(low_categories, &definitions, text).await {
            Ok(suggestion) => suggestion,
            Err(e) => {
                warn!("⚠️ 改写建议生成失败: {}", e);
                NO_SUGGESTION.to_string()
            }
        }
    }
}
