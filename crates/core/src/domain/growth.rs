use serde::{Deserialize, Serialize};

/// One asset-growth strategy entry: the strategy itself, a success-story
/// summary backing it, and where that story was published.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthStrategy {
    pub strategy: String,
    pub success_story: String,
    pub source: String,
}
