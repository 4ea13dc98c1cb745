//! Three-tier asset-growth matching.
//!
//! Primary is the cascade result. Secondary re-runs the cascade with the
//! primary's exact triple excluded so the caller never sees the same
//! suggestion twice. Tertiary is a universal safe default that is never
//! looked up, only templated with the caller's echoed key.

use serde::Serialize;

use crate::domain::growth::GrowthStrategy;
use crate::domain::profile::{ApplicantProfile, RuleKey};
use crate::normalize::{self, GROWTH_BUCKETS};
use crate::rules::{Rule, RuleStore};

use super::{relaxed_find, relaxed_find_excluding, Relaxation};

/// Asset growth stops at the age-only step; it never probes family-only.
/// The divergence from the insurance order is deliberate product behavior.
pub const GROWTH_CASCADE: &[Relaxation] =
    &[Relaxation::Exact, Relaxation::AgeAndFamily, Relaxation::AgeOnly];

/// The three-tier advice bundle returned for every asset-growth query.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GrowthAdvice {
    pub primary: Rule<GrowthStrategy>,
    pub secondary: Rule<GrowthStrategy>,
    pub tertiary: Rule<GrowthStrategy>,
}

pub fn advise(store: &RuleStore<GrowthStrategy>, profile: &ApplicantProfile) -> GrowthAdvice {
    advise_for_key(store, &normalize::normalize_key(&GROWTH_BUCKETS, profile))
}

pub fn advise_for_key(store: &RuleStore<GrowthStrategy>, key: &RuleKey) -> GrowthAdvice {
    let primary =
        relaxed_find(store, key, GROWTH_CASCADE).unwrap_or_else(|| store.first()).clone();

    let secondary = relaxed_find_excluding(store, key, GROWTH_CASCADE, Some(&primary.key))
        .or_else(|| store.all().find(|rule| rule.key != primary.key))
        .cloned()
        .unwrap_or_else(|| exhausted_store_default(key));

    GrowthAdvice { primary, secondary, tertiary: universal_default(key) }
}

/// Literal stand-in surfaced when every store row shares the primary's
/// triple and a distinct secondary cannot exist.
fn exhausted_store_default(key: &RuleKey) -> Rule<GrowthStrategy> {
    Rule {
        key: *key,
        payload: GrowthStrategy {
            strategy: "월 적립식 인덱스 펀드".to_owned(),
            success_story: "시장 평균 수익률을 장기 복리로 쌓는 표준 전략으로, 별도 종목 선택 없이 운용한 사례."
                .to_owned(),
            source: "금융투자협회 장기 수익률 통계".to_owned(),
        },
    }
}

/// Always-present third tier. The key fields echo the caller's normalized
/// query; the recommendation itself never varies.
fn universal_default(key: &RuleKey) -> Rule<GrowthStrategy> {
    Rule {
        key: *key,
        payload: GrowthStrategy {
            strategy: "ETF 적립식 투자".to_owned(),
            success_story: format!(
                "{} {} 가구도 소액으로 시작할 수 있는 기본 분산 투자 전략.",
                key.age_group, key.family_type
            ),
            source: "한국거래소 ETF 시장 동향 보고서".to_owned(),
        },
    }
}
