//! Behavior tests for the heuristic classifier
//!
//! Each test describes an observable classification outcome for a realistic
//! task description.

use once_cell::sync::Lazy;
use proptest::prelude::*;
use task_classifier::classifier::{
    Classifier, ExecutionStrategy, HeuristicClassifier, TaskComplexity, TaskType,
};

static CLASSIFIER: Lazy<HeuristicClassifier> = Lazy::new(|| HeuristicClassifier::new().unwrap());

fn classifier() -> &'static HeuristicClassifier {
    &CLASSIFIER
}

#[test]
fn test_classify_bug_fix() {
    let result = classifier().classify_text("Fix the login bug where users can't authenticate");

    assert_eq!(result.task_type, TaskType::BugFix);
    assert!(result.confidence > 0.5);
    assert_eq!(result.classifier_used, "heuristic");
    let reasoning = result.reasoning.to_lowercase();
    assert!(reasoning.contains("bug") || reasoning.contains("fix"));
}

#[test]
fn test_classify_feature() {
    let result =
        classifier().classify_text("Implement a new user registration feature with email verification");

    assert_eq!(result.task_type, TaskType::Feature);
    assert!(result.confidence > 0.5);
}

#[test]
fn test_classify_refactor() {
    let result = classifier().classify_text("Refactor the authentication module to improve code quality");

    assert_eq!(result.task_type, TaskType::Refactor);
    assert!(result.confidence > 0.5);
}

#[test]
fn test_classify_test() {
    let result = classifier().classify_text("Write unit tests for the user service with 90% coverage");

    assert_eq!(result.task_type, TaskType::Test);
    assert!(result.confidence > 0.5);
}

#[test]
fn test_classify_documentation() {
    let result =
        classifier().classify_text("Update the README with installation instructions and examples");

    assert_eq!(result.task_type, TaskType::Documentation);
    assert!(result.confidence > 0.5);
}

#[test]
fn test_classify_deployment() {
    let result = classifier().classify_text("Deploy the application to Kubernetes cluster with Helm charts");

    assert_eq!(result.task_type, TaskType::Deployment);
    assert!(result.confidence > 0.5);
}

#[test]
fn test_only_bug_fix_keywords_gives_high_confidence() {
    let result = classifier().classify_text("The checkout crash is a defect");

    assert_eq!(result.task_type, TaskType::BugFix);
    assert_eq!(result.confidence, 0.95);
}

#[test]
fn test_simple_indicator() {
    let result = classifier().classify_text("Fix a small typo in the login form");

    assert_eq!(result.complexity, TaskComplexity::Simple);
    assert_eq!(result.suggested_strategy, ExecutionStrategy::SingleShot);
    assert_eq!(result.estimated_tokens, 2000);
}

#[test]
fn test_complex_indicator_ignores_word_count() {
    let result = classifier().classify_text("Plan the database migration");

    assert_eq!(result.complexity, TaskComplexity::Complex);
    assert_eq!(result.suggested_strategy, ExecutionStrategy::MultiAgent);
    assert_eq!(result.estimated_tokens, 20000);
}

#[test]
fn test_long_complex_description() {
    let description = "Implement a complex microservices architecture with API gateway, \
        multiple backend services, message queues, caching layer, \
        database sharding, and comprehensive monitoring. \
        This is a major refactor that will touch the entire system.";
    let result = classifier().classify_text(description);

    assert_eq!(result.complexity, TaskComplexity::Complex);
    assert_eq!(result.suggested_strategy, ExecutionStrategy::MultiAgent);
    assert_eq!(result.estimated_tokens, 20000);
}

#[test]
fn test_medium_length_without_indicators() {
    let description = "Implement user authentication with JWT tokens, password hashing, \
        session management, refresh token rotation, account lockout after repeated \
        attempts, and audit logging for every login";
    let result = classifier().classify_text(description);

    assert_eq!(result.complexity, TaskComplexity::Medium);
    assert_eq!(result.suggested_strategy, ExecutionStrategy::Iterative);
    assert_eq!(result.estimated_tokens, 6000);
}

#[test]
fn test_no_matches_falls_back_to_feature() {
    let result = classifier().classify_text("Do something unspecified");

    assert_eq!(result.task_type, TaskType::Feature);
    assert_eq!(result.confidence, 0.3);
    assert_eq!(result.classifier_used, "heuristic");
    assert_eq!(
        result.reasoning,
        "No keyword matches found, defaulting to FEATURE"
    );
}

#[test]
fn test_keyword_inside_word_does_not_match() {
    // "prefix" contains "fix", "newsletter" contains "new"
    let result = classifier().classify_text("Rename the prefix of the newsletter");

    assert_eq!(result.task_type, TaskType::Feature);
    assert_eq!(result.confidence, 0.3);
}

#[test]
fn test_multiple_categories_cap_confidence() {
    let result = classifier().classify_text("Fix the bug in the new feature implementation");

    assert_eq!(result.task_type, TaskType::BugFix);
    assert!(result.confidence <= 0.85);
    assert!(result.confidence > 0.0);
}

#[test]
fn test_unicode_and_punctuation_input() {
    let result = classifier().classify_text("¡¡¡ 修复 — ??? !!! ... émoji 🚀 fix!!!");

    assert_eq!(result.task_type, TaskType::BugFix);
    assert!((0.0..=1.0).contains(&result.confidence));
}

#[test]
fn test_confidence_score_range() {
    let c = classifier();
    let descriptions = [
        "Fix the login bug",
        "Add new feature",
        "Refactor code",
        "Write tests",
        "Update documentation",
        "Deploy to production",
    ];

    for description in descriptions {
        let result = c.classify_text(description);
        assert!(
            (0.0..=1.0).contains(&result.confidence),
            "confidence out of range for {description:?}"
        );
        assert!(result.estimated_tokens > 0);
    }
}

#[test]
fn test_batch_preserves_order_and_matches_single() {
    let c = classifier();
    let texts = [
        "Fix the login bug",
        "Add user profile feature",
        "Write unit tests for auth module",
    ];

    let batch = c.classify_batch(&texts).unwrap();

    assert_eq!(batch.len(), 3);
    for (text, result) in texts.iter().zip(&batch) {
        assert_eq!(result, &c.classify_text(text));
    }
    assert_eq!(batch[0].task_type, TaskType::BugFix);
    assert_eq!(batch[1].task_type, TaskType::Feature);
}

#[test]
fn test_classifier_is_shareable_across_threads() {
    let c = std::sync::Arc::new(classifier().clone());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let c = c.clone();
            std::thread::spawn(move || c.classify_text("Deploy the release pipeline"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap().task_type, TaskType::Deployment);
    }
}

proptest! {
    #[test]
    fn prop_results_stay_in_range(text in ".{1,300}") {
        let result = classifier().classify_text(&text);
        prop_assert!(result.confidence >= 0.0 && result.confidence <= 1.0);
        prop_assert!(result.estimated_tokens > 0);
        prop_assert_eq!(result.estimated_tokens, result.complexity.estimated_tokens());
    }

    #[test]
    fn prop_classification_is_deterministic(text in ".{1,200}") {
        let c = classifier();
        prop_assert_eq!(c.classify_text(&text), c.classify_text(&text));
    }

    #[test]
    fn prop_batch_equals_individual(texts in proptest::collection::vec("[a-z ]{1,40}", 0..8)) {
        let c = classifier();
        let refs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let batch = c.classify_batch(&refs).unwrap();
        prop_assert_eq!(batch.len(), texts.len());
        for (text, result) in texts.iter().zip(batch) {
            prop_assert_eq!(result, c.classify_text(text));
        }
    }
}
