use neuro_lib::assistant::intent::Intent;
use neuro_lib::{Assistant, AssistantConfig, Dispatch};
use tempfile::TempDir;

fn decisions(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_learning_decision_runs_in_core() {
    let dir = TempDir::new().unwrap();
    let assistant = Assistant::new(AssistantConfig::with_data_dir(dir.path()));

    let result = assistant
        .dispatch(&decisions(&["general hello", "LearningRecommender python"]), "python syntax")
        .await
        .unwrap();

    match result {
        Dispatch::Handled(outcome) => {
            assert_eq!(outcome.payload.query.as_deref(), Some("python syntax"));
        }
        other => panic!("expected in-core handling, got {:?}", other),
    }
    let metrics = assistant.metrics().snapshot();
    assert_eq!(metrics.commands_total, 1);
    assert_eq!(metrics.recommendations_served, 1);
}

#[tokio::test]
async fn test_other_intents_are_delegated() {
    let dir = TempDir::new().unwrap();
    let assistant = Assistant::new(AssistantConfig::with_data_dir(dir.path()));

    let result = assistant
        .dispatch(&decisions(&["general what time is it", "iot lamp off"]), "turn the lamp off")
        .await
        .unwrap();

    assert_eq!(result, Dispatch::Delegate(Intent::Iot("lamp off".into())));
    assert_eq!(assistant.metrics().snapshot().delegated_total, 1);
    assert!(!dir.path().join("user_profile.json").exists());
}

#[tokio::test]
async fn test_unroutable_decisions() {
    let dir = TempDir::new().unwrap();
    let assistant = Assistant::new(AssistantConfig::with_data_dir(dir.path()));
    let result = assistant.dispatch(&decisions(&["hum"]), "hum").await.unwrap();
    assert_eq!(result, Dispatch::Unhandled);
}

#[tokio::test]
async fn test_only_written_updates_count_as_profile_updates() {
    let dir = TempDir::new().unwrap();
    let assistant = Assistant::new(AssistantConfig::with_data_dir(dir.path()));

    let rejected = assistant.run("set level wizard").await.unwrap();
    assert!(!rejected.profile_updated);
    let empty = assistant.run("add goals: , ").await.unwrap();
    assert!(!empty.profile_updated);

    let metrics = assistant.metrics().snapshot();
    assert_eq!(metrics.commands_total, 2);
    assert_eq!(metrics.profile_updates, 0);
    assert!(!dir.path().join("user_profile.json").exists());

    let accepted = assistant.run("set level advanced").await.unwrap();
    assert!(accepted.profile_updated);
    assert_eq!(assistant.metrics().snapshot().profile_updates, 1);
}
