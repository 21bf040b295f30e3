/// One decision produced by the upstream intent classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    General(String),
    Realtime(String),
    /// OS automation: open/close/play/system/content/google search/youtube search
    Automation { action: String, target: String },
    Iot(String),
    GenerateImage(String),
    LearningRecommender(String),
    Exit,
    Unknown(String),
}

const AUTOMATION: &[&str] = &[
    "google search",
    "youtube search",
    "open",
    "close",
    "play",
    "system",
    "content",
];

impl Intent {
    /// Parse a classifier decision such as `"general what is rust"` or `"iot lights on"`.
    pub fn parse(decision: &str) -> Intent {
        let trimmed = decision.trim();
        let lowered = trimmed.to_lowercase();

        if lowered.starts_with("learningrecommender") {
            return Intent::LearningRecommender(rest(trimmed, "learningrecommender".len()));
        }
        if lowered.starts_with("generate image") {
            return Intent::GenerateImage(rest(trimmed, "generate image".len()));
        }
        if lowered.starts_with("iot") {
            return Intent::Iot(rest(trimmed, "iot".len()));
        }
        if let Some(action) = AUTOMATION.iter().find(|a| lowered.starts_with(**a)) {
            return Intent::Automation {
                action: action.to_string(),
                target: rest(trimmed, action.len()),
            };
        }
        if lowered.starts_with("realtime") {
            return Intent::Realtime(rest(trimmed, "realtime".len()));
        }
        if lowered.starts_with("general") {
            return Intent::General(rest(trimmed, "general".len()));
        }
        if lowered.starts_with("exit") {
            return Intent::Exit;
        }
        Intent::Unknown(trimmed.to_string())
    }

    /// Lower value routes first
    pub fn priority(&self) -> u8 {
        match self {
            Intent::LearningRecommender(_) => 0,
            Intent::GenerateImage(_) => 1,
            Intent::Iot(_) => 2,
            Intent::Automation { .. } => 3,
            Intent::Realtime(_) => 4,
            Intent::General(_) => 5,
            Intent::Exit => 6,
            Intent::Unknown(_) => u8::MAX,
        }
    }
}

// Prefixes are ASCII, so byte offsets line up between the original and lowered text.
fn rest(text: &str, prefix_len: usize) -> String {
    text.get(prefix_len..).unwrap_or("").trim().to_string()
}

/// The decision that should handle the request, if any.
pub fn select(decisions: &[String]) -> Option<Intent> {
    decisions
        .iter()
        .map(|d| Intent::parse(d))
        .filter(|i| !matches!(i, Intent::Unknown(_)))
        .min_by_key(Intent::priority)
}
