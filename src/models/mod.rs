pub mod builtin_rubric;
pub mod category_map;
pub mod loaders;
pub mod report;
pub mod rubric;
pub mod score;

pub use category_map::CategoryMap;
pub use loaders::{load_rubric_file, parse_rubric_str, RubricFormat};
pub use report::{ReportMetadata, ReportRequest};
pub use rubric::{GuidelineBand, RubricCatalog, RubricCategory};
pub use score::{
    CompareOutcome, ComparisonResult, ExtendedComparison, PairedScore, ScoreResult,
    SingleScoreResult, SCORING_FAILED_EXPLANATION,
};
