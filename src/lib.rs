pub mod assistant;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod profile;
pub mod recommender;
pub mod storage;

pub use assistant::{Assistant, Dispatch};
pub use commands::{CommandOutcome, Payload};
pub use config::settings::AssistantConfig;
pub use error::NeuroError;

/// Run a single learner instruction against the stores described by `config`.
/// Returns the reply text and its structured payload.
pub async fn run(config: AssistantConfig, raw_instruction: &str) -> Result<(String, Payload), NeuroError> {
    let assistant = Assistant::new(config);
    let outcome = assistant.run(raw_instruction).await?;
    Ok((outcome.text, outcome.payload))
}
