use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A financial-institution pension/retirement product row.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PensionProduct {
    pub institution: String,
    pub product: String,
    pub annual_yield_pct: Decimal,
    pub fee_pct: Decimal,
}
