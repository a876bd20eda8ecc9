//! LLM 补全客户端
//!
//! `CompletionBackend` 是评分器和改写建议器唯一依赖的外部能力，
//! 启动时构建一次并注入，测试中可替换为桩实现。
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 兼容 OpenAI API 的服务均可通过 `LLM_API_BASE_URL` 接入

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequest, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, LlmError};

/// 一次补全请求
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// 某个调用点固定使用的采样参数
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSettings {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl CompletionSettings {
    /// 评分调用：低温度，偏向确定性
    pub fn scoring(config: &Config) -> Self {
        Self {
            model: config.scoring_model.clone(),
            temperature: config.scoring_temperature,
            max_tokens: config.llm_max_tokens,
        }
    }

    /// 改写建议调用：温度略高
    pub fn rewrite(config: &Config) -> Self {
        Self {
            model: config.rewrite_model.clone(),
            temperature: config.rewrite_temperature,
            max_tokens: config.llm_max_tokens,
        }
    }

    pub fn request(&self, prompt: impl Into<String>) -> CompletionRequest {
        CompletionRequest {
            model: self.model.clone(),
            prompt: prompt.into(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

/// LLM 补全能力
///
/// 每次调用恰好发出一个请求，不重试、不缓存。
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// 返回模型回复的原始文本；回复内容缺失时返回空字符串
    async fn complete(&self, request: CompletionRequest) -> AppResult<String>;
}

/// 基于 OpenAI Chat Completions 的实现
pub struct OpenAiBackend {
    client: Client<OpenAIConfig>,
    timeout: Duration,
}

impl OpenAiBackend {
    /// 创建新的 LLM 客户端
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(&config.llm_api_base_url);

        Self {
            client: Client::with_config(openai_config),
            timeout: Duration::from_secs(config.llm_timeout_secs),
        }
    }
}

/// 把补全请求转换为 Chat Completions 请求体
///
/// 令牌上限走 `max_completion_tokens`，新模型不再接受 `max_tokens`。
pub fn build_chat_request(request: &CompletionRequest) -> AppResult<CreateChatCompletionRequest> {
    let user_msg = ChatCompletionRequestUserMessageArgs::default()
        .content(request.prompt.as_str())
        .build()
        .map_err(|e| AppError::llm_invalid_request(&request.model, e))?;

    CreateChatCompletionRequestArgs::default()
        .model(&request.model)
        .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
        .temperature(request.temperature)
        .max_completion_tokens(request.max_tokens)
        .build()
        .map_err(|e| AppError::llm_invalid_request(&request.model, e))
}

#[async_trait]
impl CompletionBackend for OpenAiBackend {
    async fn complete(&self, request: CompletionRequest) -> AppResult<String> {
        debug!(
            "调用 LLM API，模型: {}, 温度: {}",
            request.model, request.temperature
        );
        debug!("提示词长度: {} 字符", request.prompt.len());

        let chat_request = build_chat_request(&request)?;

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(chat_request))
            .await
            .map_err(|_| {
                warn!("LLM API 调用超时 ({}秒)", self.timeout.as_secs());
                LlmError::Timeout {
                    model: request.model.clone(),
                    timeout_secs: self.timeout.as_secs(),
                }
            })?
            .map_err(|e| {
                warn!("LLM API 调用失败: {}", e);
                AppError::llm_api_failed(&request.model, e)
            })?;

        debug!("LLM API 调用成功");

        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::EmptyResponse {
                model: request.model.clone(),
            })?;

        Ok(choice.message.content.unwrap_or_default())
    }
}
