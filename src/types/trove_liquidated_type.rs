use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct Trove_Liquidated_Type {
    pub borrower: String,
    #[serde(alias = "liquidated-collateral")]
    pub liquidated_collateral: String,
    #[serde(alias = "liquidated-debt")]
    pub liquidated_debt: String,
}
