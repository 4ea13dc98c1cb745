//! Raw query input → canonical bucket normalization.
//!
//! Every function here is a pure, total function: out-of-range numeric
//! input clamps to the nearest defined bucket and unrecognizable family
//! text degrades to `Single`. Query paths never error.

use rust_decimal::Decimal;

use crate::domain::buckets::{AgeGroup, FamilyType, IncomeBand};
use crate::domain::profile::{ApplicantProfile, RuleKey};

/// Won per table unit: raw income is divided by this before bucketing.
const INCOME_UNIT_WON: u32 = 10_000;

/// One domain's bucket universe.
///
/// `age_ceilings` are exclusive upper bounds in ascending order; ages past
/// the last ceiling take `age_catch_all`. `income_ladder` is ascending and
/// ends with an open band.
#[derive(Clone, Copy, Debug)]
pub struct DomainBuckets {
    pub age_ceilings: &'static [(u32, AgeGroup)],
    pub age_catch_all: AgeGroup,
    pub income_ladder: &'static [IncomeBand],
}

/// Insurance defines the full five-bucket age universe and an income
/// ladder starting at `100~200`, with a wide `600~800` band and an open
/// `800~` top.
pub const INSURANCE_BUCKETS: DomainBuckets = DomainBuckets {
    age_ceilings: &[
        (30, AgeGroup::Twenties),
        (40, AgeGroup::Thirties),
        (50, AgeGroup::Forties),
        (60, AgeGroup::Fifties),
    ],
    age_catch_all: AgeGroup::SixtiesPlus,
    income_ladder: &[
        IncomeBand::new(100, 200),
        IncomeBand::new(200, 300),
        IncomeBand::new(300, 400),
        IncomeBand::new(400, 500),
        IncomeBand::new(500, 600),
        IncomeBand::new(600, 800),
        IncomeBand::open(800),
    ],
};

/// Asset growth defines four age buckets with `50s` as the catch-all and a
/// coarser income ladder starting at `200~300`.
pub const GROWTH_BUCKETS: DomainBuckets = DomainBuckets {
    age_ceilings: &[
        (30, AgeGroup::Twenties),
        (40, AgeGroup::Thirties),
        (50, AgeGroup::Forties),
    ],
    age_catch_all: AgeGroup::Fifties,
    income_ladder: &[
        IncomeBand::new(200, 300),
        IncomeBand::new(300, 500),
        IncomeBand::new(500, 800),
        IncomeBand::open(800),
    ],
};

/// Pension products share the insurance-shaped universe.
pub const PENSION_BUCKETS: DomainBuckets = INSURANCE_BUCKETS;

/// First ceiling strictly greater than `age` wins; anything past the last
/// ceiling takes the domain's catch-all bucket.
pub fn normalize_age(buckets: &DomainBuckets, age: u32) -> AgeGroup {
    for (ceiling, group) in buckets.age_ceilings {
        if age < *ceiling {
            return *group;
        }
    }
    buckets.age_catch_all
}

/// Ordered marker chain over cleaned family text.
///
/// Whitespace and the trailing people-count suffix are stripped, a verbatim
/// canonical label is accepted as-is, then the markers are tested most
/// specific first: child counts before the generic couple marker, so
/// `부부+자녀2명` lands on the two-children bucket and not on `couple`.
pub fn normalize_family(raw: &str) -> FamilyType {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    let cleaned = cleaned.trim_end_matches('명');

    if let Ok(family) = cleaned.parse::<FamilyType>() {
        return family;
    }

    if cleaned.contains("자녀3") {
        FamilyType::CoupleThreePlusChildren
    } else if cleaned.contains("자녀2") {
        FamilyType::CoupleTwoChildren
    } else if cleaned.contains("자녀1") {
        FamilyType::CoupleOneChild
    } else if cleaned.contains("미혼") {
        FamilyType::UnmarriedCouple
    } else if cleaned.contains("부양") {
        FamilyType::CoupleDependents
    } else if cleaned.contains("부부") {
        FamilyType::Couple
    } else {
        FamilyType::Single
    }
}

/// Raw won scaled to table units, then the first ladder band whose upper
/// bound strictly exceeds the scaled value wins (half-open, upper
/// exclusive). Values below the ladder floor clamp into the first band;
/// the terminal open band absorbs everything above the last threshold.
pub fn normalize_income(buckets: &DomainBuckets, monthly_income: Decimal) -> IncomeBand {
    let scaled = monthly_income / Decimal::from(INCOME_UNIT_WON);

    buckets
        .income_ladder
        .iter()
        .copied()
        .find(|band| band.upper.map_or(true, |upper| scaled < Decimal::from(upper)))
        .unwrap_or(IncomeBand::open(0))
}

/// Full profile → canonical key for one domain's bucket universe.
pub fn normalize_key(buckets: &DomainBuckets, profile: &ApplicantProfile) -> RuleKey {
    RuleKey {
        age_group: normalize_age(buckets, profile.age),
        family_type: normalize_family(&profile.family_type_raw),
        income_band: normalize_income(buckets, profile.monthly_income),
    }
}
