//! 评分报告导出服务
//!
//! 把单文本评分结果整理成报告，再渲染为 Markdown 或纯文本附件。

use chrono::NaiveDate;
use std::fmt::Write;

use crate::error::{AppResult, ExportError};
use crate::models::ReportRequest;
use crate::utils::logging::truncate_text;

const NOT_AVAILABLE: &str = "N/A";
const NO_EXPLANATION: &str = "No explanation";

/// 报告中的一行
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRow {
    pub category: String,
    pub score: f64,
    pub explanation: String,
}

/// 与输出格式无关的报告内容
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringReport {
    pub title: String,
    pub section_id: String,
    pub version: String,
    pub date: NaiveDate,
    pub average: String,
    pub rows: Vec<ReportRow>,
    pub rewrite_prompt: Option<String>,
}

impl ScoringReport {
    /// 从导出请求构建报告，非有限分数视为导出失败
    pub fn from_request(request: ReportRequest, date: NaiveDate) -> AppResult<Self> {
        let metadata = request.metadata.unwrap_or_default();

        let mut rows = Vec::with_capacity(request.scores.len());
        for (category, result) in request.scores {
            if !result.score.is_finite() {
                return Err(ExportError::NonFiniteScore { category }.into());
            }
            rows.push(ReportRow {
                category,
                score: result.score,
                explanation: result.explanation,
            });
        }

        Ok(Self {
            title: "Scoring Report".to_string(),
            section_id: non_empty_or_na(metadata.section_id),
            version: non_empty_or_na(metadata.version),
            date,
            average: non_empty_or_na(request.average),
            rows,
            rewrite_prompt: request.rewrite_prompt.filter(|p| !p.trim().is_empty()),
        })
    }
}

fn non_empty_or_na(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Markdown,
    PlainText,
}

impl ReportFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            ReportFormat::Markdown => "text/markdown; charset=utf-8",
            ReportFormat::PlainText => "text/plain; charset=utf-8",
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            ReportFormat::Markdown => "scoring-report.md",
            ReportFormat::PlainText => "scoring-report.txt",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportFormat::Markdown => "markdown",
            ReportFormat::PlainText => "text",
        }
    }

    pub fn renderer(self) -> &'static dyn ReportRenderer {
        match self {
            ReportFormat::Markdown => &MarkdownRenderer,
            ReportFormat::PlainText => &PlainTextRenderer,
        }
    }
}

/// 报告渲染器
pub trait ReportRenderer: Send + Sync {
    fn render(&self, report: &ScoringReport) -> Result<String, std::fmt::Error>;
}

/// 渲染报告，失败时包装为导出错误
pub fn render_report(report: &ScoringReport, format: ReportFormat) -> AppResult<String> {
    format
        .renderer()
        .render(report)
        .map_err(|source| {
            ExportError::RenderFailed {
                format: format.label().to_string(),
                source,
            }
            .into()
        })
}

/// Markdown：分数表格 + 改写建议，说明截取 300 字符，建议截取 500 字符，去掉非 ASCII 字符
pub struct MarkdownRenderer;

impl ReportRenderer for MarkdownRenderer {
    fn render(&self, report: &ScoringReport) -> Result<String, std::fmt::Error> {
        let mut out = String::new();

        writeln!(out, "# {}", report.title)?;
        writeln!(out)?;
        writeln!(out, "- Section: {}", report.section_id)?;
        writeln!(out, "- Version: {}", report.version)?;
        writeln!(out, "- Date: {}", report.date.format("%Y-%m-%d"))?;
        writeln!(out)?;
        writeln!(out, "Average Score: **{}**", report.average)?;
        writeln!(out)?;
        writeln!(out, "## Scores by Category")?;
        writeln!(out)?;
        writeln!(out, "| Category | Score | Explanation |")?;
        writeln!(out, "| --- | --- | --- |")?;
        for row in &report.rows {
            let explanation = if row.explanation.is_empty() {
                NO_EXPLANATION.to_string()
            } else {
                escape_table_cell(&strip_non_ascii(&take_chars(&row.explanation, 300)))
            };
            writeln!(
                out,
                "| {} | {} | {} |",
                escape_table_cell(&row.category),
                row.score,
                explanation
            )?;
        }
        writeln!(out)?;
        writeln!(out, "## Rewrite Guidance")?;
        writeln!(out)?;
        let guidance = report
            .rewrite_prompt
            .as_deref()
            .map(|p| strip_non_ascii(&take_chars(p, 500)))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        writeln!(out, "{}", guidance)?;

        Ok(out)
    }
}

/// 纯文本：逐行输出，说明截取 100 字符，建议截取 150 字符，换行替换为空格
pub struct PlainTextRenderer;

impl ReportRenderer for PlainTextRenderer {
    fn render(&self, report: &ScoringReport) -> Result<String, std::fmt::Error> {
        let mut out = String::new();

        writeln!(out, "{}", report.title)?;
        writeln!(out, "Section: {}", report.section_id)?;
        writeln!(out, "Version: {}", report.version)?;
        writeln!(out, "Date: {}", report.date.format("%Y-%m-%d"))?;
        writeln!(out)?;
        writeln!(out, "Average Score: {}", report.average)?;
        writeln!(out)?;
        writeln!(out, "Category Scores:")?;
        for row in &report.rows {
            writeln!(out, "{}: {}", row.category, row.score)?;
            if !row.explanation.is_empty() {
                let excerpt = flatten_lines(&take_chars(&row.explanation, 100));
                writeln!(out, "-> {}", excerpt.replace('→', "->"))?;
            }
        }
        writeln!(out)?;
        writeln!(out, "Rewrite Suggestion:")?;
        let guidance = report
            .rewrite_prompt
            .as_deref()
            .map(|p| flatten_lines(&take_chars(p, 150)))
            .unwrap_or_else(|| NOT_AVAILABLE.to_string());
        writeln!(out, "{}", guidance.replace('→', "->"))?;

        Ok(out)
    }
}

fn take_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn strip_non_ascii(text: &str) -> String {
    text.chars().filter(char::is_ascii).collect()
}

fn flatten_lines(text: &str) -> String {
    text.replace("\r\n", " ").replace('\n', " ")
}

fn escape_table_cell(text: &str) -> String {
    flatten_lines(text).replace('|', "\\|")
}

/// 日志用的报告摘要
pub fn summarize(report: &ScoringReport) -> String {
    format!(
        "{} 个类别, 平均分 {}, 建议: {}",
        report.rows.len(),
        report.average,
        truncate_text(report.rewrite_prompt.as_deref().unwrap_or(NOT_AVAILABLE), 40)
    )
}
