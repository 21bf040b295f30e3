pub mod store;

use std::collections::BTreeSet;
use serde::{Serialize, Deserialize};
use crate::catalog::Level;

/// One recommendation request remembered on the profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// RFC 3339, UTC
    pub timestamp: String,
    pub input: String,
    /// Ids of the resources returned, in rank order
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl HistoryEntry {
    pub fn now<S: Into<String>>(input: S, recommendations: Vec<String>) -> Self {
        HistoryEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            input: input.into(),
            recommendations,
        }
    }
}

/// Learner state. Goals and interests are sets; history only grows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default = "default_user_id")]
    pub user_id: String,
    #[serde(default)]
    pub goals: BTreeSet<String>,
    #[serde(default)]
    pub level: Level,
    #[serde(default)]
    pub interests: BTreeSet<String>,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

fn default_user_id() -> String {
    "default".to_string()
}

impl Default for UserProfile {
    fn default() -> Self {
        UserProfile {
            user_id: default_user_id(),
            goals: BTreeSet::new(),
            level: Level::Beginner,
            interests: BTreeSet::new(),
            history: Vec::new(),
        }
    }
}

impl UserProfile {
    /// Context appended to a free-text query before ranking:
    /// `goals: a, b interests: c level: beginner`
    pub fn context(&self) -> String {
        let mut bits = Vec::new();
        if !self.goals.is_empty() {
            bits.push(format!("goals: {}", join(&self.goals)));
        }
        if !self.interests.is_empty() {
            bits.push(format!("interests: {}", join(&self.interests)));
        }
        bits.push(format!("level: {}", self.level));
        bits.join(" ")
    }

    /// Apply an update in place. Level replaces; goals and interests are unioned.
    pub fn apply(&mut self, update: &ProfileUpdate) {
        if let Some(level) = update.level {
            self.level = level;
        }
        self.goals.extend(clean(&update.goals));
        self.interests.extend(clean(&update.interests));
    }

    pub fn record(&mut self, entry: HistoryEntry) {
        self.history.push(entry);
    }
}

/// Fields to change on a profile; `None`/empty means leave untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub level: Option<Level>,
    pub goals: Vec<String>,
    pub interests: Vec<String>,
}

impl ProfileUpdate {
    pub fn level(level: Level) -> Self {
        ProfileUpdate { level: Some(level), ..Default::default() }
    }

    pub fn goals<I: IntoIterator<Item = S>, S: Into<String>>(items: I) -> Self {
        ProfileUpdate { goals: items.into_iter().map(Into::into).collect(), ..Default::default() }
    }

    pub fn interests<I: IntoIterator<Item = S>, S: Into<String>>(items: I) -> Self {
        ProfileUpdate { interests: items.into_iter().map(Into::into).collect(), ..Default::default() }
    }

    pub fn is_empty(&self) -> bool {
        self.level.is_none() && clean(&self.goals).next().is_none() && clean(&self.interests).next().is_none()
    }
}

fn clean(items: &[String]) -> impl Iterator<Item = String> + '_ {
    items.iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn join(set: &BTreeSet<String>) -> String {
    set.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}
