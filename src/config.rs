use std::str::FromStr;

use crate::error::{AppResult, ConfigError};

/// 对比评分的返回结构
///
/// 同一部署只提供其中一种结构。
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CompareContract {
    /// `{versionA, versionB, deltas}`
    #[default]
    Minimal,
    /// 每个类别 `{scoreA, scoreB, average}`，附带总平均分和改写建议
    Extended,
}

impl FromStr for CompareContract {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minimal" => Ok(CompareContract::Minimal),
            "extended" => Ok(CompareContract::Extended),
            _ => Err(()),
        }
    }
}

/// 分数解析策略
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ScoreParserKind {
    /// 取回复中第一个小数
    #[default]
    FirstDecimal,
    /// 优先识别 `Score: x`，否则退回第一个小数
    Labeled,
}

impl FromStr for ScoreParserKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "first-decimal" | "first_decimal" => Ok(ScoreParserKind::FirstDecimal),
            "labeled" => Ok(ScoreParserKind::Labeled),
            _ => Err(()),
        }
    }
}

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// HTTP 监听地址
    pub bind_addr: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 外部评分标准文件（为空时使用内置评分标准）
    pub rubric_file: Option<String>,
    /// 是否把衡量要点和评分档位一并写入评分提示词
    pub detailed_rubric_prompt: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_max_tokens: u32,
    /// 单次 LLM 调用超时（秒）
    pub llm_timeout_secs: u64,
    pub scoring_model: String,
    pub scoring_temperature: f32,
    pub rewrite_model: String,
    pub rewrite_temperature: f32,
    // --- 编排配置 ---
    /// 单文本评分时同时进行的类别数量
    pub scoring_concurrency: usize,
    /// 送入改写建议的最低分类别数量
    pub low_category_count: usize,
    pub compare_contract: CompareContract,
    pub score_parser: ScoreParserKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".to_string(),
            verbose_logging: false,
            rubric_file: None,
            detailed_rubric_prompt: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_max_tokens: 1024,
            llm_timeout_secs: 60,
            scoring_model: "gpt-4".to_string(),
            scoring_temperature: 0.3,
            rewrite_model: "gpt-4".to_string(),
            rewrite_temperature: 0.4,
            scoring_concurrency: 4,
            low_category_count: 2,
            compare_contract: CompareContract::Minimal,
            score_parser: ScoreParserKind::FirstDecimal,
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// API Key 缺失或数值无法解析时直接失败，不静默降级。
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从任意键值来源加载配置
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        let env = EnvReader { lookup: &lookup };

        let llm_api_key = env
            .string("OPENAI_API_KEY")
            .or_else(|| env.string("LLM_API_KEY"))
            .ok_or_else(|| ConfigError::EnvVarNotFound {
                var_name: "OPENAI_API_KEY".to_string(),
            })?;

        let llm_timeout_secs: u64 =
            env.parse("LLM_TIMEOUT_SECS", "u64", default.llm_timeout_secs)?;
        if llm_timeout_secs == 0 {
            return Err(ConfigError::EnvVarParseFailed {
                var_name: "LLM_TIMEOUT_SECS".to_string(),
                value: "0".to_string(),
                expected_type: "正整数秒".to_string(),
            }
            .into());
        }

        Ok(Self {
            bind_addr: env.string("BIND_ADDR").unwrap_or(default.bind_addr),
            verbose_logging: env.parse("VERBOSE_LOGGING", "bool", default.verbose_logging)?,
            rubric_file: env.string("RUBRIC_FILE"),
            detailed_rubric_prompt: env.parse(
                "DETAILED_RUBRIC_PROMPT",
                "bool",
                default.detailed_rubric_prompt,
            )?,
            llm_api_key,
            llm_api_base_url: env
                .string("LLM_API_BASE_URL")
                .unwrap_or(default.llm_api_base_url),
            llm_max_tokens: env.parse("LLM_MAX_TOKENS", "u32", default.llm_max_tokens)?,
            llm_timeout_secs,
            scoring_model: env.string("SCORING_MODEL").unwrap_or(default.scoring_model),
            scoring_temperature: env.parse(
                "SCORING_TEMPERATURE",
                "f32",
                default.scoring_temperature,
            )?,
            rewrite_model: env.string("REWRITE_MODEL").unwrap_or(default.rewrite_model),
            rewrite_temperature: env.parse(
                "REWRITE_TEMPERATURE",
                "f32",
                default.rewrite_temperature,
            )?,
            scoring_concurrency: env
                .parse("SCORING_CONCURRENCY", "usize", default.scoring_concurrency)?
                .max(1),
            low_category_count: env.parse(
                "LOW_CATEGORY_COUNT",
                "usize",
                default.low_category_count,
            )?,
            compare_contract: env.parse(
                "COMPARE_CONTRACT",
                "minimal | extended",
                default.compare_contract,
            )?,
            score_parser: env.parse(
                "SCORE_PARSER",
                "first-decimal | labeled",
                default.score_parser,
            )?,
        })
    }
}

struct EnvReader<'a, F> {
    lookup: &'a F,
}

impl<F> EnvReader<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    /// 读取非空字符串
    fn string(&self, name: &str) -> Option<String> {
        (self.lookup)(name)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn parse<T: FromStr>(
        &self,
        name: &str,
        expected_type: &str,
        default: T,
    ) -> Result<T, ConfigError> {
        match self.string(name) {
            None => Ok(default),
            Some(value) => value
                .parse::<T>()
                .map_err(|_| ConfigError::EnvVarParseFailed {
                    var_name: name.to_string(),
                    value,
                    expected_type: expected_type.to_string(),
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_missing_api_key_fails_fast() {
        let result = Config::from_lookup(lookup_from(&[]));
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::EnvVarNotFound { .. }))
        ));

        let result = Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "   ")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert_eq!(config.llm_api_key, "sk-test");
        assert_eq!(config.scoring_model, "gpt-4");
        assert_eq!(config.scoring_temperature, 0.3);
        assert_eq!(config.rewrite_temperature, 0.4);
        assert_eq!(config.low_category_count, 2);
        assert_eq!(config.llm_timeout_secs, 60);
        assert_eq!(config.compare_contract, CompareContract::Minimal);
        assert_eq!(config.score_parser, ScoreParserKind::FirstDecimal);
        assert!(config.rubric_file.is_none());
    }

    #[test]
    fn test_llm_api_key_alias() {
        let config = Config::from_lookup(lookup_from(&[("LLM_API_KEY", "sk-alias")])).unwrap();
        assert_eq!(config.llm_api_key, "sk-alias");
    }

    #[test]
    fn test_overrides_parsed() {
        let config = Config::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("SCORING_MODEL", "gpt-4o-mini"),
            ("SCORING_TEMPERATURE", "0.1"),
            ("SCORING_CONCURRENCY", "0"),
            ("COMPARE_CONTRACT", "Extended"),
            ("SCORE_PARSER", "labeled"),
            ("RUBRIC_FILE", "rubric.toml"),
        ]))
        .unwrap();

        assert_eq!(config.scoring_model, "gpt-4o-mini");
        assert_eq!(config.scoring_temperature, 0.1);
        assert_eq!(config.scoring_concurrency, 1);
        assert_eq!(config.compare_contract, CompareContract::Extended);
        assert_eq!(config.score_parser, ScoreParserKind::Labeled);
        assert_eq!(config.rubric_file.as_deref(), Some("rubric.toml"));
    }

    #[test]
    fn test_malformed_value_is_error() {
        let result = Config::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("LLM_TIMEOUT_SECS", "soon"),
        ]));

        match result {
            Err(AppError::Config(ConfigError::EnvVarParseFailed { var_name, value, .. })) => {
                assert_eq!(var_name, "LLM_TIMEOUT_SECS");
                assert_eq!(value, "soon");
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let result = Config::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("LLM_TIMEOUT_SECS", "0"),
        ]));

        match result {
            Err(AppError::Config(ConfigError::EnvVarParseFailed { var_name, value, .. })) => {
                assert_eq!(var_name, "LLM_TIMEOUT_SECS");
                assert_eq!(value, "0");
            }
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }

        let config = Config::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("LLM_TIMEOUT_SECS", "5"),
        ]))
        .unwrap();
        assert_eq!(config.llm_timeout_secs, 5);
    }
}
