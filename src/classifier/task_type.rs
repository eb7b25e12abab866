//! Task type, complexity and strategy enums
//!
//! These are the closed vocabularies every classification result is expressed
//! in. Serialized names are part of the HTTP contract and must not change.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Functional category of a coding task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    BugFix,
    Feature,
    Refactor,
    Documentation,
    Test,
    Deployment,
}

impl TaskType {
    /// Every task type, in enum declaration order
    pub const ALL: [TaskType; 6] = [
        TaskType::BugFix,
        TaskType::Feature,
        TaskType::Refactor,
        TaskType::Documentation,
        TaskType::Test,
        TaskType::Deployment,
    ];

    /// Wire name of this task type
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::BugFix => "bug_fix",
            TaskType::Feature => "feature",
            TaskType::Refactor => "refactor",
            TaskType::Documentation => "documentation",
            TaskType::Test => "test",
            TaskType::Deployment => "deployment",
        }
    }
}

impl fmt::Display for TaskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse estimate of task scope, ordered from smallest to largest
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskComplexity {
    /// Roughly under 50 changed lines
    Simple,
    /// Roughly 50 to 200 changed lines
    Medium,
    /// More than 200 changed lines
    Complex,
}

impl TaskComplexity {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskComplexity::Simple => "simple",
            TaskComplexity::Medium => "medium",
            TaskComplexity::Complex => "complex",
        }
    }

    /// Execution strategy recommended for this complexity tier
    pub fn strategy(&self) -> ExecutionStrategy {
        match self {
            TaskComplexity::Simple => ExecutionStrategy::SingleShot,
            TaskComplexity::Medium => ExecutionStrategy::Iterative,
            TaskComplexity::Complex => ExecutionStrategy::MultiAgent,
        }
    }

    /// Token budget estimate for executing a task of this complexity
    pub fn estimated_tokens(&self) -> u32 {
        match self {
            TaskComplexity::Simple => 2_000,
            TaskComplexity::Medium => 6_000,
            TaskComplexity::Complex => 20_000,
        }
    }
}

impl fmt::Display for TaskComplexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Execution mode label consumed by the downstream execution system
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExecutionStrategy {
    SingleShot,
    Iterative,
    MultiAgent,
}

impl ExecutionStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionStrategy::SingleShot => "SingleShot",
            ExecutionStrategy::Iterative => "Iterative",
            ExecutionStrategy::MultiAgent => "MultiAgent",
        }
    }
}

impl fmt::Display for ExecutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
