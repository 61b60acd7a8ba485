use serde::Deserialize;

/// Absolute post-event position, not a delta.
#[derive(Debug, Deserialize, Default)]
pub struct Trove_Updated_Type {
    pub borrower: String,
    pub collateral: String,
    pub debt: String,
}
