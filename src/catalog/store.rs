use std::collections::HashSet;
use std::path::{Path, PathBuf};
use crate::catalog::{seed_catalog, LearningResource};
use crate::storage;

/// Durable, read-only catalog of learning resources.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    path: PathBuf,
}

impl CatalogStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        CatalogStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the catalog. A missing catalog is seeded and written so later
    /// loads return the same entries. An unreadable catalog is left on disk
    /// untouched and the seed set is served instead.
    pub async fn load(&self) -> Vec<LearningResource> {
        match storage::read_json::<Vec<LearningResource>>(&self.path).await {
            Ok(Some(resources)) => {
                let resources = dedupe_ids(resources);
                tracing::debug!(
                    path = ?self.path,
                    count = resources.len(),
                    "Loaded learning resources"
                );
                resources
            }
            Ok(None) => {
                let seed = seed_catalog();
                if let Err(e) = storage::write_json_atomic(&self.path, &seed).await {
                    tracing::warn!(
                        path = ?self.path,
                        error = %e,
                        "Failed to persist seed catalog"
                    );
                } else {
                    tracing::info!(
                        path = ?self.path,
                        count = seed.len(),
                        "Seeded learning resource catalog"
                    );
                }
                seed
            }
            Err(e) => {
                tracing::warn!(
                    path = ?self.path,
                    error = %e,
                    "Failed to load catalog, serving seed set"
                );
                seed_catalog()
            }
        }
    }
}

/// Keep the first entry for each id; later duplicates are dropped.
fn dedupe_ids(resources: Vec<LearningResource>) -> Vec<LearningResource> {
    let mut seen = HashSet::new();
    resources
        .into_iter()
        .filter(|r| {
            let first = seen.insert(r.id.clone());
            if !first {
                tracing::warn!(id = %r.id, "Duplicate resource id in catalog, keeping the first entry");
            }
            first
        })
        .collect()
}
