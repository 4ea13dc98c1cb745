use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::buckets::{AgeGroup, FamilyType, IncomeBand};

/// Raw demographic and financial query input, before any bucketing.
///
/// `family_type_raw` is whatever the caller collected: free text that may
/// carry a people-count suffix, whitespace, or child-count markers.
/// `monthly_income` is in won.
#[derive(Clone, Debug, PartialEq)]
pub struct ApplicantProfile {
    pub age: u32,
    pub family_type_raw: String,
    pub monthly_income: Decimal,
}

impl ApplicantProfile {
    pub fn new(age: u32, family_type_raw: impl Into<String>, monthly_income: Decimal) -> Self {
        Self { age, family_type_raw: family_type_raw.into(), monthly_income }
    }
}

/// The canonical triple every rule is stored under and every query is
/// normalized into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleKey {
    pub age_group: AgeGroup,
    pub family_type: FamilyType,
    pub income_band: IncomeBand,
}

impl RuleKey {
    pub fn new(age_group: AgeGroup, family_type: FamilyType, income_band: IncomeBand) -> Self {
        Self { age_group, family_type, income_band }
    }
}

impl std::fmt::Display for RuleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {} / {}", self.age_group, self.family_type, self.income_band)
    }
}
