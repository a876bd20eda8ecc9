//! 类别评分服务 - 业务能力层
//!
//! 只负责"给一段文本的一个类别打分"，不关心有多少类别、怎么汇总

use std::sync::Arc;
use tracing::debug;

use crate::clients::{CompletionBackend, CompletionSettings};
use crate::error::AppResult;
use crate::models::ScoreResult;
use crate::services::score_parser::ScoreParser;
use crate::utils::logging::truncate_text;

/// 类别评分服务
///
/// 职责：
/// - 为 (类别, 评分标准, 文本) 构建提示词
/// - 发出一次补全请求
/// - 从回复中解析分数，完整回复作为说明
/// - 不捕获调用错误，由编排层决定如何兜底
pub struct CategoryScorer {
    backend: Arc<dyn CompletionBackend>,
    parser: Arc<dyn ScoreParser>,
    settings: CompletionSettings,
}

impl CategoryScorer {
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        parser: Arc<dyn ScoreParser>,
        settings: CompletionSettings,
    ) -> Self {
        Self {
            backend,
            parser,
            settings,
        }
    }

    /// 对一个类别打分
    pub async fn score(
        &self,
        category: &str,
        rubric_text: &str,
        text: &str,
    ) -> AppResult<ScoreResult> {
        let prompt = build_score_prompt(category, rubric_text, text);
        let reply = self.backend.complete(self.settings.request(prompt)).await?;

        let score = self.parser.parse_score(&reply);
        debug!(
            "类别 [{}] 得分 {} | 回复: {}",
            category,
            score,
            truncate_text(&reply, 80)
        );

        Ok(ScoreResult::new(score, reply))
    }
}

/// 构建评分提示词
pub fn build_score_prompt(category: &str, rubric_text: &str, text: &str) -> String {
    format!(
        "Score the following section for {}. Use this rubric: {}. Return a decimal score (0.0–10.0) and a short justification.\n\nText:\n{}",
        category, rubric_text, text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::llm_client::stub::StubBackend;
    use crate::config::Config;
    use crate::error::AppError;
    use crate::services::score_parser::{FirstDecimalParser, NEUTRAL_SCORE};
    use tokio_test::{assert_err, assert_ok};

    fn scorer_with(backend: Arc<StubBackend>) -> CategoryScorer {
        CategoryScorer::new(
            backend,
            Arc::new(FirstDecimalParser::new().unwrap()),
            CompletionSettings::scoring(&Config::default()),
        )
    }

    #[test]
    fn test_prompt_embeds_all_inputs() {
        let prompt = build_score_prompt("Clarity", "How easily readers understand", "Hello world.");
        assert_eq!(
            prompt,
            "Score the following section for Clarity. Use this rubric: How easily readers understand. Return a decimal score (0.0–10.0) and a short justification.\n\nText:\nHello world."
        );
    }

    #[tokio::test]
    async fn test_score_keeps_full_reply() {
        let reply = "8.5 - The argument is easy to follow.\nMinor jargon in paragraph two.";
        let backend = Arc::new(StubBackend::new(reply));
        let scorer = scorer_with(backend.clone());

        let result = assert_ok!(scorer.score("Clarity", "definition", "text").await);
        assert_eq!(result.score, 8.5);
        assert_eq!(result.explanation, reply);
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_unparseable_reply_gets_neutral_score() {
        let backend = Arc::new(StubBackend::new("Solid work overall."));
        let scorer = scorer_with(backend);

        let result = assert_ok!(scorer.score("Clarity", "definition", "text").await);
        assert_eq!(result.score, NEUTRAL_SCORE);
        assert_eq!(result.explanation, "Solid work overall.");
    }

    #[tokio::test]
    async fn test_uses_scoring_settings() {
        let backend = Arc::new(StubBackend::new("7.0"));
        let scorer = scorer_with(backend.clone());

        assert_ok!(scorer.score("Precision", "Economy of language", "Some text").await);

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "gpt-4");
        assert_eq!(requests[0].temperature, 0.3);
        assert!(requests[0].prompt.contains("for Precision"));
        assert!(requests[0].prompt.ends_with("Text:\nSome text"));
    }

    #[tokio::test]
    async fn test_backend_error_propagates() {
        let backend = Arc::new(StubBackend::new("7.0").fail_when("Clarity"));
        let scorer = scorer_with(backend);

        let err = assert_err!(scorer.score("Clarity", "definition", "text").await);
        assert!(matches!(err, AppError::Llm(_)));
    }
}
