use std::path::{Path, PathBuf};
use crate::profile::{ProfileUpdate, UserProfile};
use crate::error::NeuroError;
use crate::storage;

/// Durable single-user profile document.
/// Each call does its own load/modify/save; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        ProfileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the persisted profile, or the default profile when it is absent or malformed
    pub async fn load(&self) -> UserProfile {
        match storage::read_json::<UserProfile>(&self.path).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                tracing::debug!(path = ?self.path, "No profile on disk, using defaults");
                UserProfile::default()
            }
            Err(e) => {
                tracing::warn!(
                    path = ?self.path,
                    error = %e,
                    "Failed to load profile, using defaults"
                );
                UserProfile::default()
            }
        }
    }

    /// Replace the persisted profile as a whole
    pub async fn save(&self, profile: &UserProfile) -> Result<(), NeuroError> {
        storage::write_json_atomic(&self.path, profile).await
    }

    /// Load, apply the provided fields, persist and return the result
    pub async fn update(&self, update: &ProfileUpdate) -> Result<UserProfile, NeuroError> {
        let mut profile = self.load().await;
        profile.apply(update);
        self.save(&profile).await?;
        tracing::info!(
            user = %profile.user_id,
            level = %profile.level,
            goals = profile.goals.len(),
            interests = profile.interests.len(),
            "Profile updated"
        );
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Level;
    use crate::profile::HistoryEntry;

    fn store_in(dir: &tempfile::TempDir) -> ProfileStore {
        ProfileStore::new(dir.path().join("user_profile.json"))
    }

    #[tokio::test]
    async fn test_missing_profile_loads_default() {
        let dir = tempfile::TempDir::new().unwrap();
        assert_eq!(store_in(&dir).load().await, UserProfile::default());
    }

    #[tokio::test]
    async fn test_malformed_profile_loads_default() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{\"goals\": 7").unwrap();
        assert_eq!(store.load().await, UserProfile::default());
    }

    #[tokio::test]
    async fn test_reads_are_idempotent() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = store_in(&dir);
        store.update(&ProfileUpdate::goals(["statistics"])).await.unwrap();
        assert_eq!(store.load().await, store.load().await);
    }

    #[tokio::test]
    async fn test_update_unions_goals() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = store_in(&dir);
        store.update(&ProfileUpdate::goals(["a", "b"])).await.unwrap();
        let updated = store.update(&ProfileUpdate::goals(["b", "c"])).await.unwrap();

        let goals: Vec<_> = updated.goals.iter().map(String::as_str).collect();
        assert_eq!(goals, vec!["a", "b", "c"]);
        assert_eq!(store.load().await, updated);
    }

    #[tokio::test]
    async fn test_update_keeps_history() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut profile = UserProfile::default();
        profile.record(HistoryEntry::now("python", vec!["py-basic-1".into()]));
        store.save(&profile).await.unwrap();

        let updated = store.update(&ProfileUpdate::level(Level::Intermediate)).await.unwrap();
        assert_eq!(updated.level, Level::Intermediate);
        assert_eq!(updated.history, profile.history);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_saves_all_succeed() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = store_in(&dir);

        let saves: Vec<_> = (0..32)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    let mut profile = UserProfile::default();
                    profile.goals.insert(format!("goal-{}", i));
                    store.save(&profile).await
                })
            })
            .collect();

        for save in saves {
            save.await.unwrap().unwrap();
        }
        assert_eq!(store.load().await.goals.len(), 1);
    }
}
