//! Keyword pattern tables
//!
//! Declaration order is significant: task types are scanned in the order of
//! [`TASK_KEYWORDS`] when breaking ties, and pattern order within a type is
//! the order used when listing matched keywords in the reasoning text.

use super::task_type::TaskType;
use super::{ClassifierError, ClassifierResult};
use regex::Regex;

/// Keyword label paired with its regex source
pub type PatternSpec = (&'static str, &'static str);

/// Task-type keyword table
pub const TASK_KEYWORDS: &[(TaskType, &[PatternSpec])] = &[
    (
        TaskType::BugFix,
        &[
            ("bug", r"\bbug\b"),
            ("error", r"\berror\b"),
            ("fix", r"\bfix\b"),
            ("crash", r"\bcrash\b"),
            ("issue", r"\bissue\b"),
            ("fail", r"\bfail(s|ing|ed)?\b"),
            ("broken", r"\bbroken\b"),
            ("defect", r"\bdefect\b"),
            ("problem", r"\bproblem\b"),
            ("incorrect", r"\bincorrect\b"),
        ],
    ),
    (
        TaskType::Feature,
        &[
            ("add", r"\badd\b"),
            ("implement", r"\bimplement\b"),
            ("create", r"\bcreate\b"),
            ("new", r"\bnew\b"),
            ("feature", r"\bfeature\b"),
            ("enhance", r"\benhance\b"),
            ("support", r"\bsupport\b"),
            ("introduce", r"\bintroduce\b"),
            ("extend", r"\bextend\b"),
            ("build", r"\bbuild\b"),
        ],
    ),
    (
        TaskType::Refactor,
        &[
            ("refactor", r"\brefactor\b"),
            ("clean", r"\bclean\b"),
            ("optimize", r"\boptimize\b"),
            ("improve", r"\bimprove\b"),
            ("reorganize", r"\breorganize\b"),
            ("restructure", r"\brestructure\b"),
            ("simplify", r"\bsimplify\b"),
            ("modernize", r"\bmodernize\b"),
            ("upgrade", r"\bupgrade\b"),
        ],
    ),
    (
        TaskType::Test,
        &[
            ("test", r"\btest\b"),
            ("unit test", r"\bunit test\b"),
            ("integration test", r"\bintegration test\b"),
            ("coverage", r"\bcoverage\b"),
            ("spec", r"\bspec\b"),
            ("validate", r"\bvalidate\b"),
            ("verify", r"\bverify\b"),
            ("mock", r"\bmock\b"),
            ("assertion", r"\bassertion\b"),
        ],
    ),
    (
        TaskType::Documentation,
        &[
            ("docs", r"\bdoc(s|umentation)?\b"),
            ("readme", r"\breadme\b"),
            ("comment", r"\bcomment\b"),
            ("explain", r"\bexplain\b"),
            ("describe", r"\bdescribe\b"),
            ("guide", r"\bguide\b"),
            ("tutorial", r"\btutorial\b"),
            ("example", r"\bexample\b"),
            ("annotate", r"\bannotate\b"),
        ],
    ),
    (
        TaskType::Deployment,
        &[
            ("deploy", r"\bdeploy\b"),
            ("release", r"\brelease\b"),
            ("ci/cd", r"\bci/cd\b"),
            ("pipeline", r"\bpipeline\b"),
            ("docker", r"\bdocker\b"),
            ("kubernetes", r"\bkubernetes\b"),
            ("helm", r"\bhelm\b"),
            ("container", r"\bcontainer\b"),
            ("infrastructure", r"\binfrastructure\b"),
        ],
    ),
];

/// Indicators that force [`TaskComplexity::Simple`](super::TaskComplexity::Simple)
pub const SIMPLE_INDICATORS: &[PatternSpec] = &[
    ("small", r"\bsmall\b"),
    ("quick", r"\bquick\b"),
    ("minor", r"\bminor\b"),
    ("trivial", r"\btrivial\b"),
    ("typo", r"\btypo\b"),
    ("one line", r"\bone[ -]line\b"),
    ("simple", r"\bsimple\b"),
];

/// Indicators that force [`TaskComplexity::Complex`](super::TaskComplexity::Complex)
pub const COMPLEX_INDICATORS: &[PatternSpec] = &[
    ("complex", r"\bcomplex\b"),
    ("major", r"\bmajor\b"),
    ("architecture", r"\barchitecture\b"),
    ("rewrite", r"\brewrite\b"),
    ("migration", r"\bmigration\b"),
    ("refactor all", r"\brefactor all\b"),
    ("large scale", r"\blarge[ -]scale\b"),
    ("entire", r"\bentire\b"),
    ("system wide", r"\bsystem[ -]wide\b"),
];

/// A compiled, case-insensitive keyword matcher
#[derive(Debug, Clone)]
pub struct KeywordPattern {
    label: &'static str,
    regex: Regex,
}

impl KeywordPattern {
    /// Compile a pattern spec with case-insensitive matching
    pub fn compile((label, source): PatternSpec) -> ClassifierResult<Self> {
        let regex = Regex::new(&format!("(?i){source}")).map_err(|e| {
            ClassifierError::PatternCompile {
                pattern: source.to_string(),
                source: e,
            }
        })?;
        Ok(Self { label, regex })
    }

    /// Human-readable keyword this pattern stands for
    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

/// Compile a list of pattern specs, preserving order
pub fn compile_all(specs: &[PatternSpec]) -> ClassifierResult<Vec<KeywordPattern>> {
    specs.iter().copied().map(KeywordPattern::compile).collect()
}
