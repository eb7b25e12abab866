//! Task classification
//!
//! A [`Classifier`] turns a free-text task description into a
//! [`ClassificationResult`]. The only implementation today is the keyword
//! driven [`HeuristicClassifier`]; the HTTP layer depends on the trait so
//! other classifiers can be slotted in behind the same endpoints.

pub mod heuristic;
pub mod patterns;
pub mod task_type;

pub use heuristic::{HeuristicClassifier, HEURISTIC_CLASSIFIER_NAME};
pub use task_type::{ExecutionStrategy, TaskComplexity, TaskType};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of classifying one task description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub task_type: TaskType,
    pub complexity: TaskComplexity,
    /// Strength of the evidence for `task_type`, always within `0.0..=1.0`
    pub confidence: f64,
    pub reasoning: String,
    pub suggested_strategy: ExecutionStrategy,
    /// Always positive
    pub estimated_tokens: u32,
    pub classifier_used: String,
}

/// Errors raised while building or running a classifier
#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("Failed to compile pattern '{pattern}': {source}")]
    PatternCompile {
        pattern: String,
        source: regex::Error,
    },

    #[error("Classifier internal error: {message}")]
    Internal { message: String },
}

impl ClassifierError {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

pub type ClassifierResult<T> = Result<T, ClassifierError>;

/// Anything that can classify task descriptions
///
/// Implementations must be safe to share across request handlers without
/// locking.
pub trait Classifier: Send + Sync {
    /// Tag reported in [`ClassificationResult::classifier_used`]
    fn name(&self) -> &str;

    fn classify(&self, text: &str) -> ClassifierResult<ClassificationResult>;

    /// Classify each text independently, preserving input order
    fn classify_batch(&self, texts: &[&str]) -> ClassifierResult<Vec<ClassificationResult>> {
        texts.iter().map(|text| self.classify(text)).collect()
    }
}
