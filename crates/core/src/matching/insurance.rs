//! Single-best insurance matching.

use crate::domain::insurance::InsurancePlan;
use crate::domain::profile::{ApplicantProfile, RuleKey};
use crate::normalize::{self, INSURANCE_BUCKETS};
use crate::rules::{Rule, RuleStore};

use super::{relaxed_find, Relaxation};

/// Insurance keeps the family-only probe before the absolute fallback;
/// this order is part of the product behavior, not an implementation
/// detail.
pub const INSURANCE_CASCADE: &[Relaxation] = &[
    Relaxation::Exact,
    Relaxation::AgeAndFamily,
    Relaxation::AgeOnly,
    Relaxation::FamilyOnly,
];

/// Best coverage rule for a raw profile. Total for any input: the cascade
/// terminates in the first record of the table.
pub fn best_plan<'a>(
    store: &'a RuleStore<InsurancePlan>,
    profile: &ApplicantProfile,
) -> &'a Rule<InsurancePlan> {
    plan_for_key(store, &normalize::normalize_key(&INSURANCE_BUCKETS, profile))
}

pub fn plan_for_key<'a>(
    store: &'a RuleStore<InsurancePlan>,
    key: &RuleKey,
) -> &'a Rule<InsurancePlan> {
    relaxed_find(store, key, INSURANCE_CASCADE).unwrap_or_else(|| store.first())
}
