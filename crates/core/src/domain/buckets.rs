use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// A bucket label that matched none of the defined buckets.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("unrecognized bucket label `{label}` (expected {expected})")]
pub struct ParseLabelError {
    pub label: String,
    pub expected: &'static str,
}

impl ParseLabelError {
    fn new(label: &str, expected: &'static str) -> Self {
        Self { label: label.to_owned(), expected }
    }
}

/// Ordered discrete age bucket. Domains differ in how many buckets they
/// actually populate; the enum carries the full universe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AgeGroup {
    #[serde(rename = "20s")]
    Twenties,
    #[serde(rename = "30s")]
    Thirties,
    #[serde(rename = "40s")]
    Forties,
    #[serde(rename = "50s")]
    Fifties,
    #[serde(rename = "60s+")]
    SixtiesPlus,
}

impl AgeGroup {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Twenties => "20s",
            Self::Thirties => "30s",
            Self::Forties => "40s",
            Self::Fifties => "50s",
            Self::SixtiesPlus => "60s+",
        }
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AgeGroup {
    type Err = ParseLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "20s" => Ok(Self::Twenties),
            "30s" => Ok(Self::Thirties),
            "40s" => Ok(Self::Forties),
            "50s" => Ok(Self::Fifties),
            "60s+" => Ok(Self::SixtiesPlus),
            other => Err(ParseLabelError::new(other, "20s|30s|40s|50s|60s+")),
        }
    }
}

/// Canonical family-composition bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FamilyType {
    #[serde(rename = "single")]
    Single,
    #[serde(rename = "unmarried-couple")]
    UnmarriedCouple,
    #[serde(rename = "couple")]
    Couple,
    #[serde(rename = "couple+1-child")]
    CoupleOneChild,
    #[serde(rename = "couple+2-children")]
    CoupleTwoChildren,
    #[serde(rename = "couple+3-or-more-children")]
    CoupleThreePlusChildren,
    #[serde(rename = "couple+dependents")]
    CoupleDependents,
}

impl FamilyType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::UnmarriedCouple => "unmarried-couple",
            Self::Couple => "couple",
            Self::CoupleOneChild => "couple+1-child",
            Self::CoupleTwoChildren => "couple+2-children",
            Self::CoupleThreePlusChildren => "couple+3-or-more-children",
            Self::CoupleDependents => "couple+dependents",
        }
    }
}

impl fmt::Display for FamilyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FamilyType {
    type Err = ParseLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "single" => Ok(Self::Single),
            "unmarried-couple" => Ok(Self::UnmarriedCouple),
            "couple" => Ok(Self::Couple),
            "couple+1-child" => Ok(Self::CoupleOneChild),
            "couple+2-children" => Ok(Self::CoupleTwoChildren),
            "couple+3-or-more-children" => Ok(Self::CoupleThreePlusChildren),
            "couple+dependents" => Ok(Self::CoupleDependents),
            other => Err(ParseLabelError::new(
                other,
                "single|unmarried-couple|couple|couple+1-child|couple+2-children|couple+3-or-more-children|couple+dependents",
            )),
        }
    }
}

/// Half-open monthly income band `[lower, upper)` in 10,000-won units.
///
/// `upper = None` is the open-ended top band. Bands inside a rule table may
/// be irregular or unioned (`200~400`, `600~800`), so equality is on the
/// exact bounds, never on an assumed uniform width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct IncomeBand {
    pub lower: u32,
    pub upper: Option<u32>,
}

impl IncomeBand {
    pub const fn new(lower: u32, upper: u32) -> Self {
        Self { lower, upper: Some(upper) }
    }

    pub const fn open(lower: u32) -> Self {
        Self { lower, upper: None }
    }
}

impl fmt::Display for IncomeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper {
            Some(upper) => write!(f, "{}~{}", self.lower, upper),
            None => write!(f, "{}~", self.lower),
        }
    }
}

impl FromStr for IncomeBand {
    type Err = ParseLabelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        const EXPECTED: &str = "an income band label such as `300~400` or `800~`";

        let trimmed = value.trim();
        let (lower, upper) = trimmed
            .split_once('~')
            .ok_or_else(|| ParseLabelError::new(trimmed, EXPECTED))?;
        let lower: u32 =
            lower.parse().map_err(|_| ParseLabelError::new(trimmed, EXPECTED))?;

        if upper.is_empty() {
            return Ok(Self::open(lower));
        }

        let upper: u32 = upper.parse().map_err(|_| ParseLabelError::new(trimmed, EXPECTED))?;
        if upper <= lower {
            return Err(ParseLabelError::new(trimmed, EXPECTED));
        }

        Ok(Self::new(lower, upper))
    }
}

impl Serialize for IncomeBand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IncomeBand {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(D::Error::custom)
    }
}
