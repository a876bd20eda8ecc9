//! 评分结果模型
//!
//! 所有结果都是单次请求内临时构建的，不做持久化。

use serde::{Deserialize, Serialize};

use crate::models::category_map::CategoryMap;

/// 类别评分失败时的说明文本
pub const SCORING_FAILED_EXPLANATION: &str = "Scoring failed due to an internal error.";

/// 单个 (类别, 文本) 的评分
///
/// `score` 名义范围为 0.0–10.0，但不做裁剪；`explanation` 是模型的完整回复。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub score: f64,
    #[serde(default)]
    pub explanation: String,
}

impl ScoreResult {
    pub fn new(score: f64, explanation: impl Into<String>) -> Self {
        Self {
            score,
            explanation: explanation.into(),
        }
    }

    /// 类别评分失败时的占位结果
    pub fn sentinel() -> Self {
        Self::new(0.0, SCORING_FAILED_EXPLANATION)
    }

    pub fn is_sentinel(&self) -> bool {
        self.score == 0.0 && self.explanation == SCORING_FAILED_EXPLANATION
    }
}

/// 单文本评分结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleScoreResult {
    pub scores: CategoryMap<ScoreResult>,
    /// 保留两位小数的平均分，例如 "6.00"
    pub average: String,
    pub rewrite_prompt: String,
}

/// 对比评分结果（精简结构）
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    #[serde(rename = "versionA")]
    pub version_a: CategoryMap<ScoreResult>,
    #[serde(rename = "versionB")]
    pub version_b: CategoryMap<ScoreResult>,
    /// scoreB - scoreA，保留两位小数
    pub deltas: CategoryMap<f64>,
}

/// 单个类别在两个版本上的分数
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PairedScore {
    pub score_a: f64,
    pub score_b: f64,
    pub average: f64,
}

/// 对比评分结果（扩展结构）
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtendedComparison {
    pub scores: CategoryMap<PairedScore>,
    pub average: String,
    pub rewrite_prompt: String,
}

/// `compare` 接口的返回
///
/// 具体结构由部署配置决定，同一部署只会出现一种。
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CompareOutcome {
    Minimal(ComparisonResult),
    Extended(ExtendedComparison),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_single_result_wire_shape() {
        let mut scores = CategoryMap::new();
        scores.insert("Clarity", ScoreResult::new(8.0, "8.0 - clear"));

        let result = SingleScoreResult {
            scores,
            average: "8.00".to_string(),
            rewrite_prompt: "Tighten the intro.".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "scores": {"Clarity": {"score": 8.0, "explanation": "8.0 - clear"}},
                "average": "8.00",
                "rewritePrompt": "Tighten the intro."
            })
        );
    }

    #[test]
    fn test_compare_outcome_is_untagged() {
        let mut deltas = CategoryMap::new();
        deltas.insert("Originality", 3.0);
        let outcome = CompareOutcome::Minimal(ComparisonResult {
            version_a: CategoryMap::new(),
            version_b: CategoryMap::new(),
            deltas,
        });

        assert_eq!(
            serde_json::to_value(&outcome).unwrap(),
            json!({"versionA": {}, "versionB": {}, "deltas": {"Originality": 3.0}})
        );
    }

    #[test]
    fn test_sentinel() {
        let sentinel = ScoreResult::sentinel();
        assert_eq!(sentinel.score, 0.0);
        assert_eq!(sentinel.explanation, "Scoring failed due to an internal error.");
        assert!(sentinel.is_sentinel());
        assert!(!ScoreResult::new(0.0, "0.0 - empty text").is_sentinel());
    }
}
