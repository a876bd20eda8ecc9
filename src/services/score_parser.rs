//! 分数解析策略
//!
//! 模型回复是自由文本，从中抽取分数的方式可以替换，编排层不关心具体策略。

use regex::Regex;
use std::sync::Arc;
use tracing::debug;

use crate::config::ScoreParserKind;
use crate::error::AppResult;

/// 回复中找不到分数时使用的中性分
pub const NEUTRAL_SCORE: f64 = 5.0;

/// 原始回复 → 分数
///
/// 解析失败不报错，返回中性分。结果不做范围裁剪。
pub trait ScoreParser: Send + Sync {
    fn parse_score(&self, reply: &str) -> f64;
}

/// 取回复中第一个形如 `7.5` 的小数（必须带小数点）
pub struct FirstDecimalParser {
    pattern: Regex,
}

impl FirstDecimalParser {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            pattern: Regex::new(r"([0-9]+\.[0-9]+)")?,
        })
    }

    fn first_decimal(&self, reply: &str) -> Option<f64> {
        self.pattern
            .captures(reply)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
    }
}

impl ScoreParser for FirstDecimalParser {
    fn parse_score(&self, reply: &str) -> f64 {
        match self.first_decimal(reply) {
            Some(score) => score,
            None => {
                debug!("回复中没有找到小数，使用中性分 {}", NEUTRAL_SCORE);
                NEUTRAL_SCORE
            }
        }
    }
}

/// 优先识别 `Score: 7` / `score = 7.5` 这样的显式标注，没有标注时退回第一个小数
pub struct LabeledScoreParser {
    label: Regex,
    fallback: FirstDecimalParser,
}

impl LabeledScoreParser {
    pub fn new() -> AppResult<Self> {
        Ok(Self {
            label: Regex::new(r"(?i)\bscore\b\s*[:=]\s*\**\s*([0-9]+(?:\.[0-9]+)?)")?,
            fallback: FirstDecimalParser::new()?,
        })
    }
}

impl ScoreParser for LabeledScoreParser {
    fn parse_score(&self, reply: &str) -> f64 {
        self.label
            .captures(reply)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok())
            .unwrap_or_else(|| self.fallback.parse_score(reply))
    }
}

/// 根据配置构建解析器
pub fn build_score_parser(kind: ScoreParserKind) -> AppResult<Arc<dyn ScoreParser>> {
    let parser: Arc<dyn ScoreParser> = match kind {
        ScoreParserKind::FirstDecimal => Arc::new(FirstDecimalParser::new()?),
        ScoreParserKind::Labeled => Arc::new(LabeledScoreParser::new()?),
    };
    Ok(parser)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_decimal_is_used() {
        let parser = FirstDecimalParser::new().unwrap();
        assert_eq!(parser.parse_score("Score: 8.5/10. Clear and concise."), 8.5);
        assert_eq!(parser.parse_score("I'd give it 7.25, maybe 9.0"), 7.25);
    }

    #[test]
    fn test_no_decimal_falls_back_to_neutral() {
        let parser = FirstDecimalParser::new().unwrap();
        assert_eq!(parser.parse_score("Score: 8 out of 10"), NEUTRAL_SCORE);
        assert_eq!(parser.parse_score(""), NEUTRAL_SCORE);
        assert_eq!(parser.parse_score("Not applicable."), NEUTRAL_SCORE);
    }

    #[test]
    fn test_out_of_range_is_not_clamped() {
        let parser = FirstDecimalParser::new().unwrap();
        assert_eq!(parser.parse_score("This deserves 12.5 points"), 12.5);
        // 不识别负号，"-3.5" 取到的是 3.5
        assert_eq!(parser.parse_score("-3.5"), 3.5);
    }

    #[test]
    fn test_version_numbers_are_picked_up_as_is() {
        let parser = FirstDecimalParser::new().unwrap();
        assert_eq!(parser.parse_score("As of v2.1 of the rubric, score 6.0"), 2.1);
    }

    #[test]
    fn test_labeled_parser_prefers_label() {
        let parser = LabeledScoreParser::new().unwrap();
        assert_eq!(parser.parse_score("Rubric v2.1\nScore: 6"), 6.0);
        assert_eq!(parser.parse_score("**Score:** 7.5"), 7.5);
        assert_eq!(parser.parse_score("score = 9.1 overall"), 9.1);
    }

    #[test]
    fn test_labeled_parser_falls_back() {
        let parser = LabeledScoreParser::new().unwrap();
        assert_eq!(parser.parse_score("Roughly 6.5 overall"), 6.5);
        assert_eq!(parser.parse_score("no numbers"), NEUTRAL_SCORE);
    }

    #[test]
    fn test_build_from_kind() {
        let parser = build_score_parser(ScoreParserKind::Labeled).unwrap();
        assert_eq!(parser.parse_score("v1.5 Score: 4"), 4.0);

        let parser = build_score_parser(ScoreParserKind::FirstDecimal).unwrap();
        assert_eq!(parser.parse_score("v1.5 Score: 4"), 1.5);
    }
}
