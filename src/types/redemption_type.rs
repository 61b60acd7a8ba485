use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct Redemption_Type {
    pub redeemer: String,
    #[serde(alias = "attempted-amount")]
    pub attempted_amount: String,
    /// USDFC actually redeemed. The upstream event labels this "actual
    /// amount"; it is a stablecoin amount, not collateral received.
    #[serde(alias = "actual-amount")]
    pub actual_amount: String,
    #[serde(alias = "collateral-sent")]
    pub collateral_sent: String,
    pub fee: String,
}
