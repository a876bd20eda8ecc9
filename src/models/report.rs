use serde::{Deserialize, Serialize};

use crate::models::category_map::CategoryMap;
use crate::models::score::ScoreResult;

/// 导出报告的请求体
///
/// 与 `score` 接口的返回结构一致，额外带上 `metadata`。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub scores: CategoryMap<ScoreResult>,
    #[serde(default, deserialize_with = "deserialize_text_or_number")]
    pub average: Option<String>,
    #[serde(default)]
    pub rewrite_prompt: Option<String>,
    #[serde(default)]
    pub metadata: Option<ReportMetadata>,
}

/// 报告元信息
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    #[serde(default, deserialize_with = "deserialize_text_or_number")]
    pub section_id: Option<String>,
    #[serde(default, deserialize_with = "deserialize_text_or_number")]
    pub version: Option<String>,
}

// 字符串或数字都接受，统一转成字符串；null 视为缺失
fn deserialize_text_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct TextVisitor;

    impl<'de> Visitor<'de> for TextVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string, a number or null")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(None)
        }
    }

    deserializer.deserialize_any(TextVisitor)
}
