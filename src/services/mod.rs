pub mod category_scorer;
pub mod report_export;
pub mod rewrite_advisor;
pub mod score_parser;

pub use category_scorer::CategoryScorer;
pub use report_export::{render_report, ReportFormat, ScoringReport};
pub use rewrite_advisor::{RewriteAdvisor, NO_SUGGESTION};
pub use score_parser::{build_score_parser, ScoreParser, NEUTRAL_SCORE};
