//! 内置评分标准（编译期静态表，保持类别顺序）

use phf::phf_ordered_map;

/// 静态评分类别
pub struct BuiltinCategory {
    pub definition: &'static str,
    pub measures: &'static [&'static str],
    pub guidelines: &'static [(&'static str, &'static str)],
    pub special_protocol: Option<&'static str>,
}

pub static BUILTIN_RUBRIC: phf::OrderedMap<&'static str, BuiltinCategory> = phf_ordered_map! {
    "Clarity" => BuiltinCategory {
        definition: "How easily readers understand the ideas without confusion or re-reading",
        measures: &[
            "Sentence structure accessibility",
            "Word choice precision",
            "Conceptual clarity",
            "Elimination of ambiguity",
        ],
        guidelines: &[
            ("9.0-10.0", "Complex ideas expressed with minimal reader effort"),
            ("8.0-8.9", "Generally clear with occasional dense passages"),
            ("6.0-7.9", "Understandable but requires focus; some unclear sections"),
            ("1.0-5.9", "Frequent confusion; requires multiple readings"),
        ],
        special_protocol: None,
    },
    "Structure & Flow" => BuiltinCategory {
        definition: "Logical sequencing and smooth transitions between ideas",
        measures: &[
            "Information architecture",
            "Paragraph organization",
            "Transition quality",
            "Overall coherence",
        ],
        guidelines: &[
            ("9.0-10.0", "Seamless logical progression; perfect transitions"),
            ("8.0-8.9", "Good structure with minor flow interruptions"),
            ("6.0-7.9", "Adequate organization; some abrupt shifts"),
            ("1.0-5.9", "Poor sequencing; confusing organization"),
        ],
        special_protocol: None,
    },
    "Style & Voice" => BuiltinCategory {
        definition: "Tone appropriateness, personality, and consistency",
        measures: &[
            "Voice distinctiveness",
            "Tone matching audience/purpose",
            "Consistency across document",
            "Avoidance of robotic phrasing",
        ],
        guidelines: &[
            ("9.0-10.0", "Distinctive, engaging voice perfectly matched to purpose"),
            ("8.0-8.9", "Strong voice with minor inconsistencies"),
            ("6.0-7.9", "Adequate tone; some bland or inconsistent sections"),
            ("1.0-5.9", "Robotic, inappropriate, or highly inconsistent voice"),
        ],
        special_protocol: None,
    },
    "Originality" => BuiltinCategory {
        definition: "Freshness of ideas, phrasing, and approach",
        measures: &[
            "Novel perspectives or insights",
            "Unique phrasing and expressions",
            "Avoidance of clichés and AI patterns",
            "Creative analogies or examples",
        ],
        guidelines: &[
            ("9.0-10.0", "Highly original ideas and distinctive expression"),
            ("8.0-8.9", "Generally fresh with some standard phrasing"),
            ("6.0-7.9", "Mix of original and conventional elements"),
            ("1.0-5.9", "Clichéd, generic, or obviously AI-generated"),
        ],
        special_protocol: None,
    },
    "Credibility" => BuiltinCategory {
        definition: "Factual accuracy, logical consistency, and trustworthiness",
        measures: &[
            "Claim supportability",
            "Logical reasoning",
            "Source reliability (when applicable)",
            "Internal consistency",
        ],
        guidelines: &[
            ("9.0-10.0", "Impeccable logic and verifiable claims"),
            ("8.0-8.9", "Generally credible with minor gaps"),
            ("6.0-7.9", "Mostly sound but some questionable elements"),
            ("1.0-5.9", "Poor logic, unsupported claims, or contradictions"),
        ],
        special_protocol: None,
    },
    "Emotional Resonance" => BuiltinCategory {
        definition: "Ability to engage readers emotionally and persuasively",
        measures: &[
            "Reader engagement level",
            "Persuasive power",
            "Emotional appropriateness to purpose",
            "Memorability",
        ],
        guidelines: &[
            ("9.0-10.0", "Compelling, moving, highly persuasive"),
            ("8.0-8.9", "Engaging with good emotional connection"),
            ("6.0-7.9", "Adequate engagement; somewhat compelling"),
            ("1.0-5.9", "Flat, unengaging, or emotionally inappropriate"),
        ],
        special_protocol: None,
    },
    "Relevance" => BuiltinCategory {
        definition: "Alignment with intended purpose, audience, and context",
        measures: &[
            "Purpose fulfillment",
            "Audience appropriateness",
            "Context sensitivity",
            "Goal achievement",
        ],
        guidelines: &[
            ("9.0-10.0", "Perfect alignment with all objectives"),
            ("8.0-8.9", "Strong relevance with minor drift"),
            ("6.0-7.9", "Generally on-target with some tangents"),
            ("1.0-5.9", "Poor alignment or significant irrelevance"),
        ],
        special_protocol: None,
    },
    "Readability" => BuiltinCategory {
        definition: "Scanning efficiency, formatting, and accessibility",
        measures: &[
            "Paragraph length variation",
            "Sentence rhythm and variety",
            "Visual formatting support",
            "Skimmability",
        ],
        guidelines: &[
            ("9.0-10.0", "Perfectly scannable and accessible"),
            ("8.0-8.9", "Easy to read with good formatting"),
            ("6.0-7.9", "Readable but could be more accessible"),
            ("1.0-5.9", "Dense, hard to scan, poor formatting"),
        ],
        special_protocol: None,
    },
    "Precision" => BuiltinCategory {
        definition: "Economy of language and elimination of unnecessary words",
        measures: &[
            "Word efficiency",
            "Elimination of redundancy",
            "Conciseness without losing meaning",
            "Removal of filler language",
        ],
        guidelines: &[
            ("9.0-10.0", "Every word earns its place; perfect economy"),
            ("8.0-8.9", "Generally concise with minor wordiness"),
            ("6.0-7.9", "Some redundancy or unnecessary elaboration"),
            ("1.0-5.9", "Verbose, repetitive, or filled with filler"),
        ],
        special_protocol: None,
    },
    "Improvement Trajectory" => BuiltinCategory {
        definition: "Measurable enhancement compared to previous version",
        measures: &[
            "Score improvements across categories",
            "Specific problem resolution",
            "Overall quality advancement",
            "Regression identification when applicable",
        ],
        guidelines: &[
            ("9.0-10.0", "Significant improvement across multiple categories"),
            ("8.0-8.9", "Clear improvement in several areas"),
            ("6.0-7.9", "Modest improvement or mixed results"),
            ("1.0-5.9", "No improvement, regression, or first draft (N/A)"),
        ],
        special_protocol: Some(
            "Score each version independently, then compare. Require ≥0.3 average improvement across ≥2 categories to claim progress. Allow for regression scoring when quality decreases.",
        ),
    },
};
