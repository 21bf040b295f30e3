use serde::{Serialize, Deserialize};
use crate::catalog::LearningResource;

/// Default weekly budget: five hours.
pub const DEFAULT_HOURS_PER_WEEK: u32 = 5;

/// Resources assigned to one study week. `week` starts at 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekPlan {
    pub week: u32,
    pub items: Vec<LearningResource>,
}

impl WeekPlan {
    pub fn total_minutes(&self) -> u32 {
        self.items.iter().map(|r| r.duration_min).sum()
    }
}

/// Greedily pack resources, in order, into weeks of at most `budget_min` minutes.
///
/// A resource that does not fit closes the current week and opens the next one.
/// A resource longer than the whole budget gets a week to itself. No empty week
/// is emitted.
pub fn build_plan(resources: &[LearningResource], budget_min: u32) -> Vec<WeekPlan> {
    let mut plan = Vec::new();
    let mut current: Vec<LearningResource> = Vec::new();
    let mut used: u32 = 0;

    for resource in resources {
        let duration = resource.duration_min;
        if !current.is_empty() && used.saturating_add(duration) > budget_min {
            plan.push(WeekPlan {
                week: plan.len() as u32 + 1,
                items: std::mem::take(&mut current),
            });
            used = 0;
        }
        current.push(resource.clone());
        used = used.saturating_add(duration);
    }

    if !current.is_empty() {
        plan.push(WeekPlan {
            week: plan.len() as u32 + 1,
            items: current,
        });
    }

    plan
}

/// `build_plan` with the budget given in hours per week
pub fn build_weekly_plan(resources: &[LearningResource], hours_per_week: u32) -> Vec<WeekPlan> {
    build_plan(resources, hours_per_week.saturating_mul(60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Level, ResourceType};
    use proptest::prelude::*;

    fn lasting(id: usize, duration_min: u32) -> LearningResource {
        LearningResource {
            id: format!("r-{}", id),
            title: format!("Resource {}", id),
            topic: "testing".to_string(),
            level: Level::Beginner,
            kind: ResourceType::Exercise,
            duration_min,
            tags: vec![],
            url: String::new(),
        }
    }

    fn durations(plan: &[WeekPlan]) -> Vec<Vec<u32>> {
        plan.iter()
            .map(|w| w.items.iter().map(|r| r.duration_min).collect())
            .collect()
    }

    #[test]
    fn test_greedy_bucketing() {
        let resources = vec![lasting(0, 240), lasting(1, 90), lasting(2, 60)];
        let plan = build_plan(&resources, 300);
        assert_eq!(durations(&plan), vec![vec![240], vec![90, 60]]);
        assert_eq!(plan[0].week, 1);
        assert_eq!(plan[1].week, 2);
    }

    #[test]
    fn test_oversize_resource_gets_its_own_week() {
        let resources = vec![lasting(0, 30), lasting(1, 500), lasting(2, 30)];
        let plan = build_plan(&resources, 300);
        assert_eq!(durations(&plan), vec![vec![30], vec![500], vec![30]]);
    }

    #[test]
    fn test_oversize_first_resource_emits_no_empty_week() {
        let plan = build_plan(&[lasting(0, 400)], 300);
        assert_eq!(durations(&plan), vec![vec![400]]);
    }

    #[test]
    fn test_exact_fit_stays_in_week() {
        let plan = build_weekly_plan(&[lasting(0, 180), lasting(1, 120)], 5);
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].total_minutes(), 300);
    }

    #[test]
    fn test_empty_input_yields_empty_plan() {
        assert!(build_plan(&[], 300).is_empty());
    }

    #[test]
    fn test_zero_budget_puts_each_resource_alone() {
        let plan = build_plan(&[lasting(0, 10), lasting(1, 10)], 0);
        assert_eq!(plan.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_weeks_respect_budget(
            mins in prop::collection::vec(1u32..600, 0..40),
            budget in 1u32..720,
        ) {
            let resources: Vec<_> = mins.iter().enumerate().map(|(i, m)| lasting(i, *m)).collect();
            for week in build_plan(&resources, budget) {
                prop_assert!(!week.items.is_empty());
                prop_assert!(week.total_minutes() <= budget || week.items.len() == 1);
            }
        }

        #[test]
        fn prop_plan_preserves_every_resource_in_order(
            mins in prop::collection::vec(1u32..600, 0..40),
            budget in 1u32..720,
        ) {
            let resources: Vec<_> = mins.iter().enumerate().map(|(i, m)| lasting(i, *m)).collect();
            let plan = build_plan(&resources, budget);
            let flattened: Vec<_> = plan.iter().flat_map(|w| w.items.iter().cloned()).collect();
            prop_assert_eq!(flattened, resources);
            for (i, week) in plan.iter().enumerate() {
                prop_assert_eq!(week.week as usize, i + 1);
            }
        }
    }
}
