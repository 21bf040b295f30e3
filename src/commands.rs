use serde::Serialize;
use crate::catalog::{Level, LearningResource};
use crate::catalog::store::CatalogStore;
use crate::error::NeuroError;
use crate::profile::{ProfileUpdate, UserProfile};
use crate::profile::store::ProfileStore;
use crate::recommender::{self, plan::WeekPlan, RecommendationResult};

const SET_LEVEL: &str = "set level ";
const ADD_GOALS: &str = "add goals:";
const ADD_INTERESTS: &str = "add interests:";

/// A parsed learner instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetLevel(String),
    AddGoals(Vec<String>),
    AddInterests(Vec<String>),
    Recommend(String),
}

impl Command {
    /// Recognise the imperative forms (case-insensitive prefixes);
    /// anything else is a recommendation query.
    pub fn parse(raw: &str) -> Command {
        let input = raw.trim().to_lowercase();

        if let Some(rest) = input.strip_prefix(SET_LEVEL) {
            return Command::SetLevel(rest.trim().to_string());
        }
        if let Some(rest) = input.strip_prefix(ADD_GOALS) {
            return Command::AddGoals(split_items(rest));
        }
        if let Some(rest) = input.strip_prefix(ADD_INTERESTS) {
            return Command::AddInterests(split_items(rest));
        }
        Command::Recommend(raw.trim().to_string())
    }
}

fn split_items(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Settings the interpreter passes to the recommender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecommendOptions {
    pub top_k: usize,
    pub hours_per_week: u32,
}

impl Default for RecommendOptions {
    fn default() -> Self {
        RecommendOptions { top_k: 8, hours_per_week: 6 }
    }
}

/// Structured result handed to UI panels and exporters.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Payload {
    pub profile: UserProfile,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendations: Option<Vec<LearningResource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekly_plan: Option<Vec<WeekPlan>>,
}

impl Payload {
    fn profile_only(profile: UserProfile) -> Self {
        Payload { profile, query: None, recommendations: None, weekly_plan: None }
    }
}

impl From<RecommendationResult> for Payload {
    fn from(result: RecommendationResult) -> Self {
        Payload {
            profile: result.profile,
            query: Some(result.query),
            recommendations: Some(result.recommendations),
            weekly_plan: Some(result.weekly_plan),
        }
    }
}

/// Human-readable reply plus its structured payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandOutcome {
    pub text: String,
    pub payload: Payload,
    /// Set when a level, goal or interest change was written to the profile
    #[serde(skip)]
    pub profile_updated: bool,
}

/// Interpret one instruction: mutate the profile or produce recommendations.
pub async fn run(
    profiles: &ProfileStore,
    catalog: &CatalogStore,
    raw: &str,
    options: RecommendOptions,
) -> Result<CommandOutcome, NeuroError> {
    let command = Command::parse(raw);
    tracing::debug!(command = ?command, "Parsed learning command");

    match command {
        Command::SetLevel(value) => {
            let level = match value.parse::<Level>() {
                Ok(level) => level,
                Err(e) => {
                    tracing::info!(error = %e, "Rejected level update");
                    let valid: Vec<_> = Level::ALL.iter().map(|l| l.as_str()).collect();
                    return Ok(CommandOutcome {
                        text: format!("Unknown level '{}'. Choose one of: {}.", value, valid.join(", ")),
                        payload: Payload::profile_only(profiles.load().await),
                        profile_updated: false,
                    });
                }
            };
            let profile = profiles.update(&ProfileUpdate::level(level)).await?;
            Ok(CommandOutcome {
                text: format!("Level updated to '{}'.", level),
                payload: Payload::profile_only(profile),
                profile_updated: true,
            })
        }
        Command::AddGoals(items) => {
            add_items(profiles, "goals", ProfileUpdate::goals(items.clone()), &items).await
        }
        Command::AddInterests(items) => {
            add_items(profiles, "interests", ProfileUpdate::interests(items.clone()), &items).await
        }
        Command::Recommend(query) => {
            let result = recommender::recommend(
                profiles,
                catalog,
                &query,
                options.top_k,
                options.hours_per_week,
            )
            .await?;
            Ok(CommandOutcome {
                text: format_recommendations(&result),
                payload: result.into(),
                profile_updated: false,
            })
        }
    }
}

async fn add_items(
    profiles: &ProfileStore,
    what: &str,
    update: ProfileUpdate,
    items: &[String],
) -> Result<CommandOutcome, NeuroError> {
    if update.is_empty() {
        return Ok(CommandOutcome {
            text: format!("Nothing to add to {}.", what),
            payload: Payload::profile_only(profiles.load().await),
            profile_updated: false,
        });
    }
    let profile = profiles.update(&update).await?;
    Ok(CommandOutcome {
        text: format!("Added {}: {}.", what, items.join(", ")),
        payload: Payload::profile_only(profile),
        profile_updated: true,
    })
}

/// Numbered recommendations followed by a week-by-week plan
pub fn format_recommendations(result: &RecommendationResult) -> String {
    let mut lines = vec!["Here are personalized recommendations:\n".to_string()];
    for (i, r) in result.recommendations.iter().enumerate() {
        lines.push(format!(
            "{}. {}  [{} • {} • ~{} min]",
            i + 1,
            r.title,
            r.kind,
            r.level,
            r.duration_min
        ));
    }

    lines.push("\nWeekly plan:".to_string());
    for week in &result.weekly_plan {
        let bullets: Vec<String> = week.items
            .iter()
            .map(|it| format!("{} ({}, ~{} min)", it.title, it.kind, it.duration_min))
            .collect();
        lines.push(format!("  Week {}:\n   - {}", week.week, bullets.join("\n   - ")));
    }
    lines.join("\n")
}
