use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// LLM 服务错误
    #[error("LLM错误: {0}")]
    Llm(#[from] LlmError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 评分标准（rubric）加载错误
    #[error("评分标准错误: {0}")]
    Rubric(#[from] RubricError),
    /// 请求校验错误
    #[error("{0}")]
    Request(#[from] RequestError),
    /// 报告导出错误
    #[error("导出错误: {0}")]
    Export(#[from] ExportError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed { model: String, source: BoxError },
    /// 请求构建失败
    #[error("LLM请求构建失败 (模型: {model}): {source}")]
    InvalidRequest { model: String, source: BoxError },
    /// 调用超时
    #[error("LLM调用超时 (模型: {model}, 超时: {timeout_secs}秒)")]
    Timeout { model: String, timeout_secs: u64 },
    /// 返回结果为空
    #[error("LLM返回结果为空 (模型: {model})")]
    EmptyResponse { model: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 环境变量不存在
    #[error("环境变量 {var_name} 不存在")]
    EnvVarNotFound { var_name: String },
}

/// 评分标准加载错误
#[derive(Debug, Error)]
pub enum RubricError {
    /// 读取文件失败
    #[error("读取评分标准文件失败 ({path}): {source}")]
    ReadFailed { path: String, source: BoxError },
    /// 解析文件失败
    #[error("解析评分标准文件失败 ({path}): {source}")]
    ParseFailed { path: String, source: BoxError },
    /// 不支持的文件格式
    #[error("不支持的评分标准文件格式: {path} (仅支持 .toml / .json)")]
    UnsupportedFormat { path: String },
    /// 类别名称重复
    #[error("评分类别重复: {name}")]
    DuplicateCategory { name: String },
    /// 类别定义为空
    #[error("评分类别 {name} 的定义为空")]
    EmptyDefinition { name: String },
}

/// 请求校验错误
///
/// 文案与 HTTP 接口约定保持一致，直接返回给调用方。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    /// 单文本评分缺少 `text`
    #[error("No text provided")]
    NoText,
    /// 对比评分缺少 `textA` 或 `textB`
    #[error("Missing input texts")]
    MissingTexts,
    /// 请求体不是合法 JSON，或字段类型不符
    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

/// 报告导出错误
#[derive(Debug, Error)]
pub enum ExportError {
    /// 分数不是有限数值
    #[error("类别 {category} 的分数不是有效数值")]
    NonFiniteScore { category: String },
    /// 渲染失败
    #[error("{format} 报告渲染失败: {source}")]
    RenderFailed {
        format: String,
        source: std::fmt::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建LLM API调用错误
    pub fn llm_api_failed(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Llm(LlmError::ApiCallFailed {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 创建LLM请求构建错误
    pub fn llm_invalid_request(
        model: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Llm(LlmError::InvalidRequest {
            model: model.into(),
            source: Box::new(source),
        })
    }

    /// 创建评分标准文件读取错误
    pub fn rubric_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Rubric(RubricError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建评分标准文件解析错误
    pub fn rubric_parse_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Rubric(RubricError::ParseFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Request(_) => StatusCode::BAD_REQUEST,
            AppError::Export(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Request(RequestError::InvalidBody(rejection.body_text()))
    }
}

impl From<regex::Error> for AppError {
    fn from(err: regex::Error) -> Self {
        AppError::Other(format!("正则表达式编译失败: {}", err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("请求处理失败: {}", self);
        } else {
            tracing::warn!("请求被拒绝: {}", self);
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_errors_map_to_bad_request() {
        let err = AppError::from(RequestError::NoText);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "No text provided");

        let err = AppError::from(RequestError::MissingTexts);
        assert_eq!(err.to_string(), "Missing input texts");
    }

    #[test]
    fn test_llm_errors_map_to_internal_error() {
        let err = AppError::from(LlmError::Timeout {
            model: "gpt-4".to_string(),
            timeout_secs: 30,
        });
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("gpt-4"));
    }

    #[test]
    fn test_export_errors_map_to_unprocessable() {
        let err = AppError::from(ExportError::NonFiniteScore {
            category: "Clarity".to_string(),
        });
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
