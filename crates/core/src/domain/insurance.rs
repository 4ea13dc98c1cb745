use serde::{Deserialize, Serialize};

/// Coverage guidance for one demographic/income cell of the insurance
/// rule table. Item lists carry the product-category vocabulary of the
/// source data verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsurancePlan {
    pub required: Vec<String>,
    pub recommended: Vec<String>,
    pub not_recommended: Vec<String>,
    /// Life event that should prompt a fresh coverage review.
    pub review_trigger: String,
}
