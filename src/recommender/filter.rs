use crate::catalog::{Level, LearningResource};

/// Keep resources at most one level away from `level`, preserving catalog order.
pub fn filter_by_level(resources: &[LearningResource], level: Level) -> Vec<LearningResource> {
    let filtered: Vec<LearningResource> = resources
        .iter()
        .filter(|r| r.level.distance(level) <= 1)
        .cloned()
        .collect();

    if filtered.len() != resources.len() {
        tracing::debug!(
            level = %level,
            filtered_count = filtered.len(),
            total_count = resources.len(),
            "Filtered resources by level"
        );
    }

    filtered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{seed_catalog, ResourceType};

    fn at(id: &str, level: Level) -> LearningResource {
        LearningResource {
            id: id.to_string(),
            title: id.to_string(),
            topic: String::new(),
            level,
            kind: ResourceType::Article,
            duration_min: 30,
            tags: vec![],
            url: String::new(),
        }
    }

    fn ids(resources: &[LearningResource]) -> Vec<&str> {
        resources.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_beginner_excludes_advanced() {
        let all = vec![at("b", Level::Beginner), at("i", Level::Intermediate), at("a", Level::Advanced)];
        assert_eq!(ids(&filter_by_level(&all, Level::Beginner)), vec!["b", "i"]);
        assert_eq!(ids(&filter_by_level(&all, Level::Advanced)), vec!["i", "a"]);
    }

    #[test]
    fn test_intermediate_admits_everything() {
        let all = vec![at("a", Level::Advanced), at("b", Level::Beginner), at("i", Level::Intermediate)];
        assert_eq!(ids(&filter_by_level(&all, Level::Intermediate)), vec!["a", "b", "i"]);
    }

    #[test]
    fn test_seed_catalog_for_beginner_keeps_all_five() {
        assert_eq!(filter_by_level(&seed_catalog(), Level::Beginner).len(), 5);
    }

    #[test]
    fn test_empty_input() {
        assert!(filter_by_level(&[], Level::Beginner).is_empty());
    }
}
