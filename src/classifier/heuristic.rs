//! Keyword-based task classifier
//!
//! Scores each task type by how many of its keyword patterns appear in the
//! description, picks the best-scoring type, and estimates complexity from
//! explicit indicator words or, failing that, from the description length.

use super::patterns::{
    compile_all, KeywordPattern, COMPLEX_INDICATORS, SIMPLE_INDICATORS, TASK_KEYWORDS,
};
use super::task_type::{TaskComplexity, TaskType};
use super::{ClassificationResult, Classifier, ClassifierResult};
use tracing::debug;

/// Value reported in `classifier_used`
pub const HEURISTIC_CLASSIFIER_NAME: &str = "heuristic";

/// Confidence reported when no keyword matched at all
pub const FALLBACK_CONFIDENCE: f64 = 0.3;
const FALLBACK_REASONING: &str = "No keyword matches found, defaulting to FEATURE";

const SINGLE_TYPE_BOOST: f64 = 0.2;
const SINGLE_TYPE_CEILING: f64 = 0.95;
const CONTESTED_CEILING: f64 = 0.85;

const SHORT_TASK_WORDS: usize = 20;
const LONG_TASK_WORDS: usize = 100;
const MAX_REASONING_KEYWORDS: usize = 3;

/// Rule-based classifier over fixed, precompiled keyword tables
///
/// Patterns are compiled once in [`HeuristicClassifier::new`]; afterwards the
/// classifier is immutable and can be shared freely across threads.
#[derive(Debug, Clone)]
pub struct HeuristicClassifier {
    task_patterns: Vec<(TaskType, Vec<KeywordPattern>)>,
    simple_patterns: Vec<KeywordPattern>,
    complex_patterns: Vec<KeywordPattern>,
}

impl HeuristicClassifier {
    /// Compile the keyword tables
    pub fn new() -> ClassifierResult<Self> {
        let task_patterns = TASK_KEYWORDS
            .iter()
            .map(|(task_type, specs)| -> ClassifierResult<_> {
                Ok((*task_type, compile_all(specs)?))
            })
            .collect::<ClassifierResult<Vec<_>>>()?;

        Ok(Self {
            task_patterns,
            simple_patterns: compile_all(SIMPLE_INDICATORS)?,
            complex_patterns: compile_all(COMPLEX_INDICATORS)?,
        })
    }

    /// Classify a task description. Total over every input string.
    pub fn classify_text(&self, text: &str) -> ClassificationResult {
        let complexity = self.classify_complexity(text);

        // (type, matched patterns) for every type with at least one match,
        // in table order.
        let matches: Vec<(TaskType, Vec<&KeywordPattern>)> = self
            .task_patterns
            .iter()
            .filter_map(|(task_type, patterns)| {
                let hits: Vec<&KeywordPattern> =
                    patterns.iter().filter(|p| p.is_match(text)).collect();
                (!hits.is_empty()).then_some((*task_type, hits))
            })
            .collect();

        let Some((winner, winner_hits)) = select_winner(&matches) else {
            debug!(complexity = %complexity, "no keyword matches, using fallback");
            return build_result(
                TaskType::Feature,
                complexity,
                FALLBACK_CONFIDENCE,
                FALLBACK_REASONING.to_string(),
            );
        };

        let total: usize = matches.iter().map(|(_, hits)| hits.len()).sum();
        let confidence = confidence_for(winner_hits.len(), total, matches.len());

        let keywords = winner_hits
            .iter()
            .take(MAX_REASONING_KEYWORDS)
            .map(|p| format!("'{}'", p.label()))
            .collect::<Vec<_>>()
            .join(", ");
        let reasoning = format!(
            "Matched {} keywords for {}: {}",
            winner_hits.len(),
            winner,
            keywords
        );

        debug!(
            task_type = %winner,
            matched_types = matches.len(),
            total_matches = total,
            confidence,
            "keyword classification"
        );

        build_result(winner, complexity, confidence, reasoning)
    }

    /// Classify complexity from indicator keywords, then from word count
    pub fn classify_complexity(&self, text: &str) -> TaskComplexity {
        if self.complex_patterns.iter().any(|p| p.is_match(text)) {
            return TaskComplexity::Complex;
        }
        if self.simple_patterns.iter().any(|p| p.is_match(text)) {
            return TaskComplexity::Simple;
        }

        let word_count = text.split_whitespace().count();
        if word_count < SHORT_TASK_WORDS {
            TaskComplexity::Simple
        } else if word_count > LONG_TASK_WORDS {
            TaskComplexity::Complex
        } else {
            TaskComplexity::Medium
        }
    }

    /// Classify each text independently, preserving input order
    pub fn classify_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<ClassificationResult> {
        texts
            .iter()
            .map(|text| self.classify_text(text.as_ref()))
            .collect()
    }
}

impl Classifier for HeuristicClassifier {
    fn name(&self) -> &str {
        HEURISTIC_CLASSIFIER_NAME
    }

    fn classify(&self, text: &str) -> ClassifierResult<ClassificationResult> {
        Ok(self.classify_text(text))
    }

    fn classify_batch(&self, texts: &[&str]) -> ClassifierResult<Vec<ClassificationResult>> {
        Ok(self.classify_all(texts))
    }
}

/// Highest match count wins; ties go to the earliest type in table order
fn select_winner<'a, 'p>(
    matches: &'a [(TaskType, Vec<&'p KeywordPattern>)],
) -> Option<(TaskType, &'a [&'p KeywordPattern])> {
    let mut best: Option<(TaskType, &'a [&'p KeywordPattern])> = None;
    for (task_type, hits) in matches {
        match best {
            Some((_, best_hits)) if best_hits.len() >= hits.len() => {}
            _ => best = Some((*task_type, hits.as_slice())),
        }
    }
    best
}

/// Share of all matches won by the winner, boosted when uncontested
fn confidence_for(winner_matches: usize, total_matches: usize, matched_types: usize) -> f64 {
    if total_matches == 0 {
        return 0.0;
    }
    let base = winner_matches as f64 / total_matches as f64;
    if matched_types == 1 {
        (base + SINGLE_TYPE_BOOST).min(SINGLE_TYPE_CEILING)
    } else {
        base.min(CONTESTED_CEILING)
    }
}

fn build_result(
    task_type: TaskType,
    complexity: TaskComplexity,
    confidence: f64,
    reasoning: String,
) -> ClassificationResult {
    ClassificationResult {
        task_type,
        complexity,
        confidence,
        reasoning,
        suggested_strategy: complexity.strategy(),
        estimated_tokens: complexity.estimated_tokens(),
        classifier_used: HEURISTIC_CLASSIFIER_NAME.to_string(),
    }
}
