//! Facade owning the three per-domain rule stores.

use std::path::Path;

use rust_decimal::Decimal;

use crate::domain::growth::GrowthStrategy;
use crate::domain::insurance::InsurancePlan;
use crate::domain::pension::PensionProduct;
use crate::domain::profile::ApplicantProfile;
use crate::errors::RuleSetError;
use crate::matching::{growth, insurance, pension};
use crate::rules::{Rule, RuleStore};

pub use crate::matching::growth::GrowthAdvice;

/// The recommendation engine: three immutable rule stores behind total
/// query methods. Construction asserts every table is non-empty, so no
/// query path can fail.
#[derive(Clone, Debug)]
pub struct RecommendationEngine {
    insurance: RuleStore<InsurancePlan>,
    growth: RuleStore<GrowthStrategy>,
    pension: RuleStore<PensionProduct>,
}

impl RecommendationEngine {
    /// Engine over the rule tables embedded in the crate.
    pub fn from_embedded() -> Result<Self, RuleSetError> {
        Ok(Self {
            insurance: RuleStore::<InsurancePlan>::embedded()?,
            growth: RuleStore::<GrowthStrategy>::embedded()?,
            pension: RuleStore::<PensionProduct>::embedded()?,
        })
    }

    /// Engine over `insurance.toml`, `growth.toml`, and `pension.toml`
    /// inside `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, RuleSetError> {
        Ok(Self {
            insurance: RuleStore::<InsurancePlan>::from_path(&dir.join("insurance.toml"))?,
            growth: RuleStore::<GrowthStrategy>::from_path(&dir.join("growth.toml"))?,
            pension: RuleStore::<PensionProduct>::from_path(&dir.join("pension.toml"))?,
        })
    }

    pub fn insurance(
        &self,
        age: u32,
        family_type_raw: &str,
        monthly_income: Decimal,
    ) -> Rule<InsurancePlan> {
        let profile = ApplicantProfile::new(age, family_type_raw, monthly_income);
        insurance::best_plan(&self.insurance, &profile).clone()
    }

    pub fn asset_growth(
        &self,
        age: u32,
        family_type_raw: &str,
        monthly_income: Decimal,
    ) -> GrowthAdvice {
        let profile = ApplicantProfile::new(age, family_type_raw, monthly_income);
        growth::advise(&self.growth, &profile)
    }

    pub fn pension(
        &self,
        age: u32,
        family_type_raw: &str,
        monthly_income: Decimal,
    ) -> Rule<PensionProduct> {
        let profile = ApplicantProfile::new(age, family_type_raw, monthly_income);
        pension::best_product(&self.pension, &profile).clone()
    }

    pub fn insurance_store(&self) -> &RuleStore<InsurancePlan> {
        &self.insurance
    }

    pub fn growth_store(&self) -> &RuleStore<GrowthStrategy> {
        &self.growth
    }

    pub fn pension_store(&self) -> &RuleStore<PensionProduct> {
        &self.pension
    }
}
