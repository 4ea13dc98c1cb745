//! Single-best pension product matching. Shares the insurance-shaped
//! cascade, including the family-only probe.

use crate::domain::pension::PensionProduct;
use crate::domain::profile::{ApplicantProfile, RuleKey};
use crate::normalize::{self, PENSION_BUCKETS};
use crate::rules::{Rule, RuleStore};

use super::{relaxed_find, Relaxation};

pub const PENSION_CASCADE: &[Relaxation] = &[
    Relaxation::Exact,
    Relaxation::AgeAndFamily,
    Relaxation::AgeOnly,
    Relaxation::FamilyOnly,
];

pub fn best_product<'a>(
    store: &'a RuleStore<PensionProduct>,
    profile: &ApplicantProfile,
) -> &'a Rule<PensionProduct> {
    product_for_key(store, &normalize::normalize_key(&PENSION_BUCKETS, profile))
}

pub fn product_for_key<'a>(
    store: &'a RuleStore<PensionProduct>,
    key: &RuleKey,
) -> &'a Rule<PensionProduct> {
    relaxed_find(store, key, PENSION_CASCADE).unwrap_or_else(|| store.first())
}
