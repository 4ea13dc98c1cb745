pub mod config;
pub mod domain;
pub mod engine;
pub mod errors;
pub mod matching;
pub mod normalize;
pub mod rules;

pub use domain::buckets::{AgeGroup, FamilyType, IncomeBand, ParseLabelError};
pub use domain::growth::GrowthStrategy;
pub use domain::insurance::InsurancePlan;
pub use domain::pension::PensionProduct;
pub use domain::profile::{ApplicantProfile, RuleKey};
pub use engine::{GrowthAdvice, RecommendationEngine};
pub use errors::RuleSetError;
pub use matching::Relaxation;
pub use rules::{Rule, RuleSetMeta, RuleStore};
