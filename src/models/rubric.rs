//! 评分标准（rubric）模型

use serde::Serialize;
use std::sync::Arc;

use crate::error::{AppResult, RubricError};
use crate::models::builtin_rubric::BUILTIN_RUBRIC;
use crate::models::category_map::CategoryMap;

/// 评分档位说明，例如 "9.0-10.0" → "Complex ideas expressed with minimal reader effort"
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GuidelineBand {
    pub range: String,
    pub description: String,
}

/// 单个评分类别
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RubricCategory {
    pub name: String,
    pub definition: String,
    /// 衡量要点（有序）
    pub measures: Vec<String>,
    /// 评分档位（有序）
    pub guidelines: Vec<GuidelineBand>,
    /// 特殊约定，仅作说明，不参与计算
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_protocol: Option<String>,
}

impl RubricCategory {
    /// 只有定义的类别
    pub fn new(name: impl Into<String>, definition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definition: definition.into(),
            measures: Vec::new(),
            guidelines: Vec::new(),
            special_protocol: None,
        }
    }

    /// 完整的评分标准文本：定义 + 衡量要点 + 评分档位 + 特殊约定
    pub fn rubric_text(&self) -> String {
        let mut text = self.definition.clone();

        if !self.measures.is_empty() {
            text.push_str(". Measures: ");
            text.push_str(&self.measures.join("; "));
        }

        if !self.guidelines.is_empty() {
            let bands: Vec<String> = self
                .guidelines
                .iter()
                .map(|band| format!("{} = {}", band.range, band.description))
                .collect();
            text.push_str(". Scoring guidelines: ");
            text.push_str(&bands.join("; "));
        }

        if let Some(protocol) = &self.special_protocol {
            text.push_str(". Special protocol: ");
            text.push_str(protocol);
        }

        text
    }
}

/// 评分标准目录
///
/// 启动时加载一次，之后只读，通过 `Arc` 在所有请求间共享。
#[derive(Debug, Clone, PartialEq)]
pub struct RubricCatalog {
    categories: Vec<RubricCategory>,
}

impl RubricCatalog {
    /// 从类别列表构建目录，拒绝重复名称和空定义
    pub fn from_categories(categories: Vec<RubricCategory>) -> AppResult<Self> {
        for (idx, category) in categories.iter().enumerate() {
            if category.definition.trim().is_empty() {
                return Err(RubricError::EmptyDefinition {
                    name: category.name.clone(),
                }
                .into());
            }
            if categories[..idx].iter().any(|c| c.name == category.name) {
                return Err(RubricError::DuplicateCategory {
                    name: category.name.clone(),
                }
                .into());
            }
        }

        Ok(Self { categories })
    }

    /// 内置的十个写作评分类别
    pub fn builtin() -> Self {
        let categories = BUILTIN_RUBRIC
            .entries()
            .map(|(name, category)| RubricCategory {
                name: name.to_string(),
                definition: category.definition.to_string(),
                measures: category.measures.iter().map(|m| m.to_string()).collect(),
                guidelines: category
                    .guidelines
                    .iter()
                    .map(|(range, description)| GuidelineBand {
                        range: range.to_string(),
                        description: description.to_string(),
                    })
                    .collect(),
                special_protocol: category.special_protocol.map(str::to_string),
            })
            .collect();

        Self { categories }
    }

    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 按目录顺序返回所有类别
    pub fn categories(&self) -> &[RubricCategory] {
        &self.categories
    }

    /// 按目录顺序返回 (类别名, 类别)
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RubricCategory)> {
        self.categories.iter().map(|c| (c.name.as_str(), c))
    }

    pub fn get(&self, name: &str) -> Option<&RubricCategory> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    /// 类别名 → 定义
    pub fn definitions(&self) -> CategoryMap<String> {
        self.categories
            .iter()
            .map(|c| (c.name.clone(), c.definition.clone()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_builtin_catalog_order() {
        let catalog = RubricCatalog::builtin();
        assert_eq!(
            catalog.names(),
            vec![
                "Clarity",
                "Structure & Flow",
                "Style & Voice",
                "Originality",
                "Credibility",
                "Emotional Resonance",
                "Relevance",
                "Readability",
                "Precision",
                "Improvement Trajectory",
            ]
        );
    }

    #[test]
    fn test_builtin_categories_are_complete() {
        let catalog = RubricCatalog::builtin();
        for category in catalog.categories() {
            assert!(!category.definition.is_empty(), "{}", category.name);
            assert_eq!(category.measures.len(), 4, "{}", category.name);
            assert_eq!(category.guidelines.len(), 4, "{}", category.name);
            assert_eq!(category.guidelines[0].range, "9.0-10.0");
        }

        let trajectory = catalog.get("Improvement Trajectory").unwrap();
        assert!(trajectory.special_protocol.is_some());
        assert!(catalog.get("Clarity").unwrap().special_protocol.is_none());
    }

    #[test]
    fn test_definitions_map() {
        let catalog = RubricCatalog::builtin();
        let definitions = catalog.definitions();
        assert_eq!(definitions.len(), catalog.len());
        assert_eq!(
            definitions.get("Precision").map(String::as_str),
            Some("Economy of language and elimination of unnecessary words")
        );
    }

    #[test]
    fn test_rejects_duplicates_and_empty_definitions() {
        let result = RubricCatalog::from_categories(vec![
            RubricCategory::new("Clarity", "a"),
            RubricCategory::new("Clarity", "b"),
        ]);
        assert!(matches!(
            result,
            Err(AppError::Rubric(RubricError::DuplicateCategory { .. }))
        ));

        let result = RubricCatalog::from_categories(vec![RubricCategory::new("Clarity", "  ")]);
        assert!(matches!(
            result,
            Err(AppError::Rubric(RubricError::EmptyDefinition { .. }))
        ));
    }

    #[test]
    fn test_rubric_text_includes_details() {
        let catalog = RubricCatalog::builtin();
        let text = catalog.get("Improvement Trajectory").unwrap().rubric_text();
        assert!(text.starts_with("Measurable enhancement compared to previous version"));
        assert!(text.contains("Measures: Score improvements across categories"));
        assert!(text.contains("9.0-10.0 = Significant improvement"));
        assert!(text.contains("Special protocol: Score each version independently"));

        let bare = RubricCategory::new("Clarity", "Plain definition");
        assert_eq!(bare.rubric_text(), "Plain definition");
    }
}
