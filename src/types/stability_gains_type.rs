use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct SP_Gains_Type {
    pub depositor: String,
    #[serde(alias = "collateral-gain")]
    pub collateral_gain: String,
}
