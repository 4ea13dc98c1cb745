//! Immutable, versioned rule tables.
//!
//! Each domain ships a TOML table (`[meta]` plus ordered `[[rules]]`)
//! embedded in the crate, optionally overridden by an on-disk data
//! directory. Tables are parsed once at startup; insertion order of the
//! source document is preserved exactly, so first-encountered rows win
//! wherever the raw data carries duplicate key triples.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::buckets::ParseLabelError;
use crate::domain::growth::GrowthStrategy;
use crate::domain::insurance::InsurancePlan;
use crate::domain::pension::PensionProduct;
use crate::domain::profile::RuleKey;
use crate::errors::RuleSetError;

pub const INSURANCE_DOMAIN: &str = "insurance";
pub const GROWTH_DOMAIN: &str = "asset-growth";
pub const PENSION_DOMAIN: &str = "pension";

const EMBEDDED_INSURANCE: &str = include_str!("../data/insurance.toml");
const EMBEDDED_GROWTH: &str = include_str!("../data/growth.toml");
const EMBEDDED_PENSION: &str = include_str!("../data/pension.toml");

/// Version header carried by every rule table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSetMeta {
    pub domain: String,
    pub version: String,
    pub effective: NaiveDate,
}

/// One recommendation rule: the key triple plus a domain payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Rule<P> {
    pub key: RuleKey,
    pub payload: P,
}

/// Ordered, immutable rule table for one domain.
///
/// Construction rejects empty tables, so `first()` (the absolute-fallback
/// record) is total. Iteration via `all()` replays the source order on
/// every call.
#[derive(Clone, Debug)]
pub struct RuleStore<P> {
    meta: RuleSetMeta,
    rules: Vec<Rule<P>>,
}

impl<P> RuleStore<P> {
    fn from_parts(meta: RuleSetMeta, rules: Vec<Rule<P>>) -> Result<Self, RuleSetError> {
        if rules.is_empty() {
            return Err(RuleSetError::EmptyTable { domain: meta.domain });
        }
        Ok(Self { meta, rules })
    }

    pub fn meta(&self) -> &RuleSetMeta {
        &self.meta
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn all(&self) -> impl Iterator<Item = &Rule<P>> + '_ {
        self.rules.iter()
    }

    /// First record in source order, the terminal fallback of every
    /// cascade. Safe by the non-empty construction invariant.
    pub fn first(&self) -> &Rule<P> {
        &self.rules[0]
    }
}

impl RuleStore<InsurancePlan> {
    pub fn embedded() -> Result<Self, RuleSetError> {
        parse_table::<InsuranceRow>(INSURANCE_DOMAIN, EMBEDDED_INSURANCE)
    }

    pub fn from_path(path: &Path) -> Result<Self, RuleSetError> {
        parse_table::<InsuranceRow>(INSURANCE_DOMAIN, &read_table(path)?)
    }

    pub fn from_toml(text: &str) -> Result<Self, RuleSetError> {
        parse_table::<InsuranceRow>(INSURANCE_DOMAIN, text)
    }
}

impl RuleStore<GrowthStrategy> {
    pub fn embedded() -> Result<Self, RuleSetError> {
        parse_table::<GrowthRow>(GROWTH_DOMAIN, EMBEDDED_GROWTH)
    }

    pub fn from_path(path: &Path) -> Result<Self, RuleSetError> {
        parse_table::<GrowthRow>(GROWTH_DOMAIN, &read_table(path)?)
    }

    pub fn from_toml(text: &str) -> Result<Self, RuleSetError> {
        parse_table::<GrowthRow>(GROWTH_DOMAIN, text)
    }
}

impl RuleStore<PensionProduct> {
    pub fn embedded() -> Result<Self, RuleSetError> {
        parse_table::<PensionRow>(PENSION_DOMAIN, EMBEDDED_PENSION)
    }

    pub fn from_path(path: &Path) -> Result<Self, RuleSetError> {
        parse_table::<PensionRow>(PENSION_DOMAIN, &read_table(path)?)
    }

    pub fn from_toml(text: &str) -> Result<Self, RuleSetError> {
        parse_table::<PensionRow>(PENSION_DOMAIN, text)
    }
}

#[derive(Debug, Deserialize)]
struct RawTable<R> {
    meta: RuleSetMeta,
    rules: Vec<R>,
}

trait TableRow: DeserializeOwned {
    type Payload;

    fn into_rule(self, domain: &str, row: usize) -> Result<Rule<Self::Payload>, RuleSetError>;
}

#[derive(Debug, Deserialize)]
struct InsuranceRow {
    age: String,
    family: String,
    income: String,
    required: Vec<String>,
    recommended: Vec<String>,
    not_recommended: Vec<String>,
    review_trigger: String,
}

impl TableRow for InsuranceRow {
    type Payload = InsurancePlan;

    fn into_rule(self, domain: &str, row: usize) -> Result<Rule<InsurancePlan>, RuleSetError> {
        Ok(Rule {
            key: parse_key(domain, row, &self.age, &self.family, &self.income)?,
            payload: InsurancePlan {
                required: self.required,
                recommended: self.recommended,
                not_recommended: self.not_recommended,
                review_trigger: self.review_trigger,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
struct GrowthRow {
    age: String,
    family: String,
    income: String,
    strategy: String,
    success_story: String,
    source: String,
}

impl TableRow for GrowthRow {
    type Payload = GrowthStrategy;

    fn into_rule(self, domain: &str, row: usize) -> Result<Rule<GrowthStrategy>, RuleSetError> {
        Ok(Rule {
            key: parse_key(domain, row, &self.age, &self.family, &self.income)?,
            payload: GrowthStrategy {
                strategy: self.strategy,
                success_story: self.success_story,
                source: self.source,
            },
        })
    }
}

#[derive(Debug, Deserialize)]
struct PensionRow {
    age: String,
    family: String,
    income: String,
    institution: String,
    product: String,
    annual_yield_pct: rust_decimal::Decimal,
    fee_pct: rust_decimal::Decimal,
}

impl TableRow for PensionRow {
    type Payload = PensionProduct;

    fn into_rule(self, domain: &str, row: usize) -> Result<Rule<PensionProduct>, RuleSetError> {
        Ok(Rule {
            key: parse_key(domain, row, &self.age, &self.family, &self.income)?,
            payload: PensionProduct {
                institution: self.institution,
                product: self.product,
                annual_yield_pct: self.annual_yield_pct,
                fee_pct: self.fee_pct,
            },
        })
    }
}

fn read_table(path: &Path) -> Result<String, RuleSetError> {
    fs::read_to_string(path)
        .map_err(|source| RuleSetError::ReadFile { path: path.to_path_buf(), source })
}

fn parse_table<R: TableRow>(
    domain: &'static str,
    text: &str,
) -> Result<RuleStore<R::Payload>, RuleSetError> {
    let raw: RawTable<R> =
        toml::from_str(text).map_err(|source| RuleSetError::Parse { domain, source })?;

    if raw.meta.domain != domain {
        return Err(RuleSetError::DomainMismatch { expected: domain, found: raw.meta.domain });
    }

    let mut rules = Vec::with_capacity(raw.rules.len());
    for (index, row) in raw.rules.into_iter().enumerate() {
        rules.push(row.into_rule(domain, index)?);
    }

    let store = RuleStore::from_parts(raw.meta, rules)?;
    tracing::info!(
        domain,
        version = %store.meta.version,
        effective = %store.meta.effective,
        rows = store.len(),
        "rule table loaded"
    );
    Ok(store)
}

fn parse_key(
    domain: &str,
    row: usize,
    age: &str,
    family: &str,
    income: &str,
) -> Result<RuleKey, RuleSetError> {
    Ok(RuleKey {
        age_group: parse_label(domain, row, "age", age)?,
        family_type: parse_label(domain, row, "family", family)?,
        income_band: parse_label(domain, row, "income", income)?,
    })
}

fn parse_label<T>(
    domain: &str,
    row: usize,
    field: &'static str,
    label: &str,
) -> Result<T, RuleSetError>
where
    T: FromStr<Err = ParseLabelError>,
{
    label.parse().map_err(|_| RuleSetError::InvalidBucketLabel {
        domain: domain.to_owned(),
        row,
        field,
        label: label.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::{RuleStore, GROWTH_DOMAIN};
    use crate::domain::buckets::{AgeGroup, FamilyType, IncomeBand};
    use crate::domain::growth::GrowthStrategy;
    use crate::domain::insurance::InsurancePlan;
    use crate::domain::pension::PensionProduct;
    use crate::errors::RuleSetError;

    #[test]
    fn embedded_tables_load_for_all_three_domains() {
        let insurance = RuleStore::<InsurancePlan>::embedded().expect("insurance table");
        let growth = RuleStore::<GrowthStrategy>::embedded().expect("growth table");
        let pension = RuleStore::<PensionProduct>::embedded().expect("pension table");

        assert!(insurance.len() >= 20, "insurance table is the densest");
        assert!(growth.len() >= 10);
        assert!(pension.len() >= 10);
        assert_eq!(insurance.meta().domain, "insurance");
        assert_eq!(growth.meta().domain, "asset-growth");
        assert_eq!(pension.meta().domain, "pension");
    }

    #[test]
    fn iteration_replays_source_order_on_every_call() {
        let store = RuleStore::<InsurancePlan>::embedded().expect("insurance table");

        let first_pass: Vec<_> = store.all().map(|rule| rule.key).collect();
        let second_pass: Vec<_> = store.all().map(|rule| rule.key).collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(first_pass[0], store.first().key);
    }

    #[test]
    fn duplicate_triples_survive_loading_in_source_order() {
        let store = RuleStore::<InsurancePlan>::embedded().expect("insurance table");

        let duplicated: Vec<_> = store
            .all()
            .filter(|rule| {
                rule.key.age_group == AgeGroup::Thirties
                    && rule.key.family_type == FamilyType::Single
                    && rule.key.income_band == IncomeBand::new(300, 400)
            })
            .collect();

        assert_eq!(duplicated.len(), 2, "the raw data carries a duplicate triple");
        assert_ne!(duplicated[0].payload, duplicated[1].payload);
    }

    #[test]
    fn empty_table_is_a_load_error() {
        let text = r#"
rules = []

[meta]
domain = "asset-growth"
version = "2025.1"
effective = "2025-03-01"
"#;
        let error = RuleStore::<GrowthStrategy>::from_toml(text).expect_err("empty table");
        assert!(matches!(error, RuleSetError::EmptyTable { ref domain } if domain == GROWTH_DOMAIN));
    }

    #[test]
    fn bad_bucket_label_reports_domain_row_and_field() {
        let text = r#"
[meta]
domain = "asset-growth"
version = "2025.1"
effective = "2025-03-01"

[[rules]]
age = "20s"
family = "single"
income = "200-300"
strategy = "s"
success_story = "t"
source = "u"
"#;
        let error = RuleStore::<GrowthStrategy>::from_toml(text).expect_err("bad income label");
        match error {
            RuleSetError::InvalidBucketLabel { domain, row, field, label } => {
                assert_eq!(domain, "asset-growth");
                assert_eq!(row, 0);
                assert_eq!(field, "income");
                assert_eq!(label, "200-300");
            }
            other => panic!("expected InvalidBucketLabel, got {other:?}"),
        }
    }

    #[test]
    fn mismatched_domain_header_is_rejected() {
        let text = r#"
[meta]
domain = "insurance"
version = "2025.1"
effective = "2025-03-01"

[[rules]]
age = "20s"
family = "single"
income = "200~300"
strategy = "s"
success_story = "t"
source = "u"
"#;
        let error = RuleStore::<GrowthStrategy>::from_toml(text).expect_err("wrong domain");
        assert!(matches!(error, RuleSetError::DomainMismatch { expected: "asset-growth", .. }));
    }

    #[test]
    fn tables_load_from_an_on_disk_data_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("growth.toml");
        std::fs::write(
            &path,
            r#"
[meta]
domain = "asset-growth"
version = "test"
effective = "2025-03-01"

[[rules]]
age = "20s"
family = "single"
income = "300~500"
strategy = "적립식 인덱스 펀드"
success_story = "사회 초년생이 월 50만원 적립으로 5년 만에 첫 전세 보증금을 마련한 사례."
source = "금융투자협회 사례집"
"#,
        )
        .expect("write table");

        let store = RuleStore::<GrowthStrategy>::from_path(&path).expect("load from disk");
        assert_eq!(store.len(), 1);
        assert_eq!(store.meta().version, "test");
    }

    #[test]
    fn unreadable_path_reports_the_file() {
        let error = RuleStore::<GrowthStrategy>::from_path(std::path::Path::new(
            "/nonexistent/growth.toml",
        ))
        .expect_err("missing file");
        assert!(matches!(error, RuleSetError::ReadFile { .. }));
    }
}
