use std::path::PathBuf;
use clap::Parser;
use neuro_lib::{logging, Assistant, AssistantConfig, Dispatch};

/// Learning recommender front end for the Neuro assistant.
#[derive(Debug, Parser)]
#[command(name = "neuro", version, about)]
struct Cli {
    /// Directory holding neuro.toml, the profile and the catalog
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Number of recommendations to return
    #[arg(long)]
    top_k: Option<usize>,

    /// Weekly study budget in hours
    #[arg(long)]
    hours: Option<u32>,

    /// Print the structured payload as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Classifier decisions to route (e.g. "LearningRecommender python");
    /// without any, the instruction goes straight to the learning core
    #[arg(long = "decision")]
    decisions: Vec<String>,

    /// Instruction, e.g. `set level intermediate` or `recommend resources for python`
    #[arg(required = true, trailing_var_arg = true)]
    instruction: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.data_dir {
        Some(dir) => AssistantConfig::load_from(dir),
        None => AssistantConfig::load(),
    };
    if let Some(k) = cli.top_k {
        config.top_k = k;
    }
    if let Some(hours) = cli.hours {
        config.hours_per_week = hours;
    }

    logging::init_logging(&config.log_level);
    tracing::info!(data_dir = ?config.data_dir, "neuro starting");

    let assistant = Assistant::new(config);
    let instruction = cli.instruction.join(" ");
    let name = assistant.config().assistant_name.clone();
    println!("{} : {}", assistant.config().username, instruction);

    let outcome = if cli.decisions.is_empty() {
        assistant.run(&instruction).await.map(Dispatch::Handled)
    } else {
        assistant.dispatch(&cli.decisions, &instruction).await
    };

    match outcome {
        Ok(Dispatch::Handled(outcome)) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&outcome.payload)?);
            } else {
                println!("{}: {}", name, outcome.text);
            }
        }
        Ok(Dispatch::Delegate(intent)) => {
            println!("{}: {:?} is handled by another service.", name, intent);
        }
        Ok(Dispatch::Unhandled) => {
            println!("{}: Sorry, I did not understand that.", name);
        }
        Err(e) => {
            tracing::error!(error = %e, "Request failed");
            println!("{}: Something went wrong.", name);
            return Err(e.into());
        }
    }

    Ok(())
}
