//! 改写建议服务 - 业务能力层
//!
//! 只负责"根据最低分类别给出改写建议"

use std::sync::Arc;
use tracing::debug;

use crate::clients::{CompletionBackend, CompletionSettings};
use crate::error::AppResult;
use crate::models::CategoryMap;

/// 模型没有返回内容时的固定文案
pub const NO_SUGGESTION: &str = "No suggestion generated.";

/// 改写建议服务
pub struct RewriteAdvisor {
    backend: Arc<dyn CompletionBackend>,
    settings: CompletionSettings,
}

impl RewriteAdvisor {
    pub fn new(backend: Arc<dyn CompletionBackend>, settings: CompletionSettings) -> Self {
        Self { backend, settings }
    }

    /// 请求改写建议
    ///
    /// 回复为空时返回 [`NO_SUGGESTION`]；调用失败直接返回错误。
    pub async fn suggest(
        &self,
        low_categories: &[String],
        definitions: &CategoryMap<String>,
        text: &str,
    ) -> AppResult<String> {
        debug!("请求改写建议，低分类别: {:?}", low_categories);

        let prompt = build_rewrite_prompt(low_categories, definitions, text);
        let reply = self.backend.complete(self.settings.request(prompt)).await?;

        if reply.trim().is_empty() {
            return Ok(NO_SUGGESTION.to_string());
        }

        Ok(reply)
    }
}

/// 构建改写建议提示词
pub fn build_rewrite_prompt(
    low_categories: &[String],
    definitions: &CategoryMap<String>,
    text: &str,
) -> String {
    let rubric: Vec<String> = low_categories
        .iter()
        .map(|category| {
            let definition = definitions
                .get(category)
                .map(String::as_str)
                .unwrap_or_default();
            format!("{}: {}", category, definition)
        })
        .collect();

    format!(
        "Based on the following text and these low-scoring categories: {}, provide a brief rewrite suggestion. Use this rubric: {}.\n\nText:\n{}",
        low_categories.join(", "),
        rubric.join(" | "),
        text
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::llm_client::stub::StubBackend;
    use crate::config::Config;
    use tokio_test::assert_ok;

    fn definitions() -> CategoryMap<String> {
        let mut map = CategoryMap::new();
        map.insert("Clarity", "How easily readers understand".to_string());
        map.insert("Precision", "Economy of language".to_string());
        map
    }

    #[test]
    fn test_prompt_lists_categories_and_definitions() {
        let low = vec!["Precision".to_string(), "Clarity".to_string()];
        let prompt = build_rewrite_prompt(&low, &definitions(), "Draft text.");

        assert_eq!(
            prompt,
            "Based on the following text and these low-scoring categories: Precision, Clarity, provide a brief rewrite suggestion. Use this rubric: Precision: Economy of language | Clarity: How easily readers understand.\n\nText:\nDraft text."
        );
    }

    #[tokio::test]
    async fn test_suggest_returns_reply() {
        let backend = Arc::new(StubBackend::new("Cut the second paragraph."));
        let advisor = RewriteAdvisor::new(backend.clone(), CompletionSettings::rewrite(&Config::default()));

        let low = vec!["Precision".to_string()];
        let suggestion = assert_ok!(advisor.suggest(&low, &definitions(), "text").await);
        assert_eq!(suggestion, "Cut the second paragraph.");

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].temperature, 0.4);
    }

    #[tokio::test]
    async fn test_empty_reply_uses_fallback() {
        let backend = Arc::new(StubBackend::new("   "));
        let advisor = RewriteAdvisor::new(backend, CompletionSettings::rewrite(&Config::default()));

        let suggestion = assert_ok!(advisor.suggest(&[], &definitions(), "text").await);
        assert_eq!(suggestion, NO_SUGGESTION);
    }
}
