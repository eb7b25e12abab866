//! Task Classifier
//!
//! Classifies free-text descriptions of coding tasks into a task type,
//! complexity tier and recommended execution strategy, and serves those
//! classifications over HTTP.
//!
//! # Overview
//!
//! - Keyword-driven heuristic classifier with precompiled pattern tables
//! - warp HTTP API with single and batch classification endpoints
//! - TOML configuration, structured logging and metrics
//!
//! # Quick Start
//!
//! ```rust
//! use task_classifier::classifier::{HeuristicClassifier, TaskType};
//!
//! let classifier = HeuristicClassifier::new().unwrap();
//! let result = classifier.classify_text("Fix the login bug where users can't authenticate");
//!
//! assert_eq!(result.task_type, TaskType::BugFix);
//! assert!(result.confidence > 0.5);
//! assert_eq!(result.classifier_used, "heuristic");
//! ```

pub mod api;
pub mod classifier;
pub mod config;
pub mod error;
pub mod observability;

pub use classifier::{
    ClassificationResult, Classifier, ClassifierError, ExecutionStrategy, HeuristicClassifier,
    TaskComplexity, TaskType,
};
pub use config::{ConfigError, ServiceConfig};
pub use error::{ServiceError, ServiceResult};
