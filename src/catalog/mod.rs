pub mod store;

use std::fmt;
use std::str::FromStr;
use serde::{Serialize, Deserialize, Deserializer};
use crate::error::LevelParseError;

/// Proficiency level of a learner or a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Beginner, Level::Intermediate, Level::Advanced];

    /// Ordinal position: beginner=0, intermediate=1, advanced=2
    pub fn rank(self) -> u8 {
        match self {
            Level::Beginner => 0,
            Level::Intermediate => 1,
            Level::Advanced => 2,
        }
    }

    pub fn distance(self, other: Level) -> u8 {
        self.rank().abs_diff(other.rank())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Level::Beginner => "beginner",
            Level::Intermediate => "intermediate",
            Level::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Level::Beginner),
            "intermediate" => Ok(Level::Intermediate),
            "advanced" => Ok(Level::Advanced),
            _ => Err(LevelParseError(s.trim().to_string())),
        }
    }
}

// Persisted documents may carry missing or unknown levels; those read as beginner.
impl<'de> Deserialize<'de> for Level {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|s| s.parse().ok()).unwrap_or_default())
    }
}

/// Kind of learning material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Video,
    #[default]
    Article,
    Course,
    Exercise,
}

impl ResourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Video => "video",
            ResourceType::Article => "article",
            ResourceType::Course => "course",
            ResourceType::Exercise => "exercise",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResourceType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(match raw.as_deref().map(|s| s.trim().to_lowercase()).as_deref() {
            Some("video") => ResourceType::Video,
            Some("course") => ResourceType::Course,
            Some("exercise") => ResourceType::Exercise,
            _ => ResourceType::Article,
        })
    }
}

/// One catalog entry. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningResource {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub level: Level,
    #[serde(default, rename = "type")]
    pub kind: ResourceType,
    #[serde(default = "default_duration", deserialize_with = "positive_duration")]
    pub duration_min: u32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub url: String,
}

fn default_duration() -> u32 {
    60
}

// A zero or null duration counts as missing
fn positive_duration<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<u32>::deserialize(deserializer)?;
    Ok(raw.filter(|m| *m > 0).unwrap_or_else(default_duration))
}

impl LearningResource {
    /// Text the ranker indexes: title, tags, topic and level, lower-cased.
    pub fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.title,
            self.tags.join(" "),
            self.topic,
            self.level
        )
        .to_lowercase()
    }
}

#[allow(clippy::too_many_arguments)]
fn resource(
    id: &str,
    title: &str,
    topic: &str,
    level: Level,
    kind: ResourceType,
    duration_min: u32,
    tags: &[&str],
    url: &str,
) -> LearningResource {
    LearningResource {
        id: id.to_string(),
        title: title.to_string(),
        topic: topic.to_string(),
        level,
        kind,
        duration_min,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        url: url.to_string(),
    }
}

/// Starter catalog written on first use.
pub fn seed_catalog() -> Vec<LearningResource> {
    vec![
        resource(
            "py-basic-1", "Python Basics – FreeCodeCamp", "python",
            Level::Beginner, ResourceType::Video, 240,
            &["syntax", "variables", "loops", "functions"],
            "https://www.youtube.com/watch?v=rfscVS0vtbw",
        ),
        resource(
            "py-int-1", "Intermediate Python", "python",
            Level::Intermediate, ResourceType::Article, 60,
            &["oop", "iterators", "generators"],
            "https://realpython.com/",
        ),
        resource(
            "ml-basic-1", "Intro to Machine Learning (KNN/Linear)", "ml",
            Level::Beginner, ResourceType::Course, 180,
            &["supervised", "features"],
            "https://www.kaggle.com/learn/intro-to-machine-learning",
        ),
        resource(
            "bioinfo-basic-1", "Bioinformatics for Beginners", "bioinformatics",
            Level::Beginner, ResourceType::Course, 180,
            &["sequence", "alignment", "genes"],
            "https://www.edx.org/",
        ),
        resource(
            "scanpy-1", "Scanpy Tutorial", "single-cell",
            Level::Intermediate, ResourceType::Article, 90,
            &["scanpy", "anndata", "umap"],
            "https://scanpy.readthedocs.io/",
        ),
    ]
}
