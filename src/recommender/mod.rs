pub mod filter;
pub mod plan;
pub mod ranker;
pub mod stopwords;

use serde::Serialize;
use crate::catalog::LearningResource;
use crate::catalog::store::CatalogStore;
use crate::error::NeuroError;
use crate::profile::{HistoryEntry, UserProfile};
use crate::profile::store::ProfileStore;
use self::plan::WeekPlan;

/// Outcome of one recommendation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecommendationResult {
    /// Profile as persisted at the end of the request
    pub profile: UserProfile,
    pub query: String,
    /// Highest relevance first
    pub recommendations: Vec<LearningResource>,
    pub weekly_plan: Vec<WeekPlan>,
}

/// Query text enriched with the learner's goals, interests and level
pub fn compose_query(query: &str, profile: &UserProfile) -> String {
    format!("{}. {}", query.trim(), profile.context())
}

/// Filter, rank and plan without touching storage.
pub fn rank_for_profile(
    query: &str,
    profile: &UserProfile,
    catalog: &[LearningResource],
    k: usize,
) -> Vec<LearningResource> {
    let candidates = filter::filter_by_level(catalog, profile.level);
    let composite = compose_query(query, profile);
    ranker::rank(&composite, &candidates)
        .into_iter()
        .take(k)
        .map(|r| r.resource)
        .collect()
}

/// Recommend up to `k` resources for `query` and pack them into weekly blocks
/// of `hours_per_week`. The request is appended to the profile history and the
/// profile is persisted before returning.
pub async fn recommend(
    profiles: &ProfileStore,
    catalog: &CatalogStore,
    query: &str,
    k: usize,
    hours_per_week: u32,
) -> Result<RecommendationResult, NeuroError> {
    let mut profile = profiles.load().await;
    let resources = catalog.load().await;

    let top = rank_for_profile(query, &profile, &resources, k);
    let weekly_plan = plan::build_weekly_plan(&top, hours_per_week);

    profile.record(HistoryEntry::now(
        query,
        top.iter().map(|r| r.id.clone()).collect(),
    ));
    profiles.save(&profile).await?;

    tracing::info!(
        user = %profile.user_id,
        level = %profile.level,
        candidates = resources.len(),
        returned = top.len(),
        weeks = weekly_plan.len(),
        "Recommendations prepared"
    );

    Ok(RecommendationResult {
        profile,
        query: query.to_string(),
        recommendations: top,
        weekly_plan,
    })
}
