//! Cascading-relaxation search over rule stores.
//!
//! One generic primitive serves every domain: try the most specific key
//! combination first, progressively drop key fields, and take the first
//! store row (in source order) that satisfies the earliest step. Each
//! domain supplies its own step list; the orders intentionally differ and
//! must not be unified.

pub mod growth;
pub mod insurance;
pub mod pension;

use crate::domain::profile::RuleKey;
use crate::rules::{Rule, RuleStore};

/// One step of the fallback ladder: which key fields must still match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Relaxation {
    Exact,
    AgeAndFamily,
    AgeOnly,
    FamilyOnly,
}

impl Relaxation {
    fn accepts(self, rule_key: &RuleKey, query: &RuleKey) -> bool {
        match self {
            Self::Exact => rule_key == query,
            Self::AgeAndFamily => {
                rule_key.age_group == query.age_group && rule_key.family_type == query.family_type
            }
            Self::AgeOnly => rule_key.age_group == query.age_group,
            Self::FamilyOnly => rule_key.family_type == query.family_type,
        }
    }
}

/// First store row matching the earliest satisfiable relaxation step, or
/// `None` when every step comes up empty. Ties within a step resolve to
/// the first row in source order.
pub fn relaxed_find<'a, P>(
    store: &'a RuleStore<P>,
    query: &RuleKey,
    steps: &[Relaxation],
) -> Option<&'a Rule<P>> {
    relaxed_find_excluding(store, query, steps, None)
}

/// Same cascade, skipping every row whose full key triple equals
/// `excluded`. Used to pick a distinct secondary recommendation.
pub fn relaxed_find_excluding<'a, P>(
    store: &'a RuleStore<P>,
    query: &RuleKey,
    steps: &[Relaxation],
    excluded: Option<&RuleKey>,
) -> Option<&'a Rule<P>> {
    for step in steps {
        let hit = store.all().find(|rule| {
            excluded.map_or(true, |skip| rule.key != *skip) && step.accepts(&rule.key, query)
        });

        if let Some(rule) = hit {
            if *step != Relaxation::Exact {
                tracing::debug!(
                    domain = %store.meta().domain,
                    step = ?step,
                    query = %query,
                    matched = %rule.key,
                    "query resolved below the exact step"
                );
            }
            return Some(rule);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::{relaxed_find, relaxed_find_excluding, Relaxation};
    use crate::domain::buckets::{AgeGroup, FamilyType, IncomeBand};
    use crate::domain::growth::GrowthStrategy;
    use crate::domain::profile::RuleKey;
    use crate::rules::RuleStore;

    const ALL_STEPS: &[Relaxation] = &[
        Relaxation::Exact,
        Relaxation::AgeAndFamily,
        Relaxation::AgeOnly,
        Relaxation::FamilyOnly,
    ];

    fn store() -> RuleStore<GrowthStrategy> {
        RuleStore::<GrowthStrategy>::from_toml(
            r#"
[meta]
domain = "asset-growth"
version = "test"
effective = "2025-03-01"

[[rules]]
age = "30s"
family = "couple"
income = "300~500"
strategy = "first"
success_story = "s"
source = "x"

[[rules]]
age = "30s"
family = "couple"
income = "500~800"
strategy = "second"
success_story = "s"
source = "x"

[[rules]]
age = "40s"
family = "single"
income = "300~500"
strategy = "third"
success_story = "s"
source = "x"
"#,
        )
        .expect("test table")
    }

    fn key(age: AgeGroup, family: FamilyType, band: IncomeBand) -> RuleKey {
        RuleKey::new(age, family, band)
    }

    #[test]
    fn exact_match_wins_over_any_relaxation() {
        let store = store();
        let query = key(AgeGroup::Thirties, FamilyType::Couple, IncomeBand::new(500, 800));

        let rule = relaxed_find(&store, &query, ALL_STEPS).expect("match");
        assert_eq!(rule.payload.strategy, "second");
    }

    #[test]
    fn age_and_family_step_takes_the_first_row_in_source_order() {
        let store = store();
        let query = key(AgeGroup::Thirties, FamilyType::Couple, IncomeBand::new(200, 300));

        let rule = relaxed_find(&store, &query, ALL_STEPS).expect("match");
        assert_eq!(rule.payload.strategy, "first");
    }

    #[test]
    fn family_only_step_ignores_age() {
        let store = store();
        let query = key(AgeGroup::Twenties, FamilyType::Single, IncomeBand::new(200, 300));

        let rule = relaxed_find(&store, &query, ALL_STEPS).expect("match");
        assert_eq!(rule.payload.strategy, "third");
    }

    #[test]
    fn without_family_only_the_same_query_finds_nothing() {
        let store = store();
        let query = key(AgeGroup::Twenties, FamilyType::Single, IncomeBand::new(200, 300));
        let steps = &[Relaxation::Exact, Relaxation::AgeAndFamily, Relaxation::AgeOnly];

        assert!(relaxed_find(&store, &query, steps).is_none());
    }

    #[test]
    fn exclusion_skips_every_row_sharing_the_excluded_triple() {
        let store = store();
        let query = key(AgeGroup::Thirties, FamilyType::Couple, IncomeBand::new(300, 500));
        let primary = relaxed_find(&store, &query, ALL_STEPS).expect("primary");
        assert_eq!(primary.payload.strategy, "first");

        let secondary = relaxed_find_excluding(&store, &query, ALL_STEPS, Some(&primary.key))
            .expect("secondary");
        assert_eq!(secondary.payload.strategy, "second");
    }

    #[test]
    fn exclusion_can_exhaust_the_store() {
        let store = RuleStore::<GrowthStrategy>::from_toml(
            r#"
[meta]
domain = "asset-growth"
version = "test"
effective = "2025-03-01"

[[rules]]
age = "30s"
family = "couple"
income = "300~500"
strategy = "only"
success_story = "s"
source = "x"
"#,
        )
        .expect("single-row table");

        let query = key(AgeGroup::Thirties, FamilyType::Couple, IncomeBand::new(300, 500));
        let primary = relaxed_find(&store, &query, ALL_STEPS).expect("primary");

        assert!(relaxed_find_excluding(&store, &query, ALL_STEPS, Some(&primary.key)).is_none());
    }
}
