use serde::Deserialize;
use std::path::Path;
use tokio::fs;

use crate::error::{AppError, AppResult, RubricError};
use crate::models::category_map::CategoryMap;
use crate::models::rubric::{GuidelineBand, RubricCatalog, RubricCategory};

/// 评分标准文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RubricFormat {
    Toml,
    Json,
}

impl RubricFormat {
    /// 根据扩展名判断文件格式
    pub fn from_path(path: &Path) -> Option<Self> {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .as_deref()
        {
            Some("toml") => Some(RubricFormat::Toml),
            Some("json") => Some(RubricFormat::Json),
            _ => None,
        }
    }
}

/// 文件中的类别既可以是一段定义文本，也可以是完整记录
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawCategory {
    Definition(String),
    Record(RawRecord),
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(alias = "Definition")]
    definition: String,
    #[serde(default, alias = "Measures")]
    measures: Vec<String>,
    #[serde(default, alias = "Scoring Guidelines", alias = "scoring_guidelines")]
    guidelines: CategoryMap<String>,
    #[serde(default, alias = "Special Protocol")]
    special_protocol: Option<String>,
}

impl RawCategory {
    fn normalize(self, name: String) -> RubricCategory {
        match self {
            RawCategory::Definition(definition) => RubricCategory::new(name, definition),
            RawCategory::Record(record) => RubricCategory {
                name,
                definition: record.definition,
                measures: record.measures,
                guidelines: record
                    .guidelines
                    .into_iter()
                    .map(|(range, description)| GuidelineBand { range, description })
                    .collect(),
                special_protocol: record.special_protocol,
            },
        }
    }
}

/// 从文本内容解析评分标准，文件中的顺序即类别顺序
pub fn parse_rubric_str(content: &str, format: RubricFormat, path: &str) -> AppResult<RubricCatalog> {
    let raw: CategoryMap<RawCategory> = match format {
        RubricFormat::Toml => toml::from_str(content)
            .map_err(|e| AppError::rubric_parse_failed(path, e))?,
        RubricFormat::Json => serde_json::from_str(content)
            .map_err(|e| AppError::rubric_parse_failed(path, e))?,
    };

    let categories = raw
        .into_iter()
        .map(|(name, category)| category.normalize(name))
        .collect();

    RubricCatalog::from_categories(categories)
}

/// 从 TOML / JSON 文件加载评分标准
pub async fn load_rubric_file(path: &Path) -> AppResult<RubricCatalog> {
    let path_str = path.display().to_string();

    let format = RubricFormat::from_path(path).ok_or_else(|| RubricError::UnsupportedFormat {
        path: path_str.clone(),
    })?;

    let content = fs::read_to_string(path)
        .await
        .map_err(|e| AppError::rubric_read_failed(&path_str, e))?;

    let catalog = parse_rubric_str(&content, format, &path_str)?;
    tracing::info!("已加载评分标准文件 {}: {} 个类别", path_str, catalog.len());

    Ok(catalog)
}
