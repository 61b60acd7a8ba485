use serde::Deserialize;

/// Fee revenue paid out to a staker: collateral-denominated redemption fees
/// plus stablecoin-denominated borrowing fees.
#[derive(Debug, Deserialize, Default)]
pub struct ST_Gains_Type {
    pub staker: String,
    #[serde(alias = "collateral-gain")]
    pub collateral_gain: String,
    #[serde(alias = "stable-gain")]
    pub stable_gain: String,
}
