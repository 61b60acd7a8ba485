use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct DEX_Trade_Type {
    pub trader: String,
    pub pool: Option<String>,
    #[serde(alias = "amount-in")]
    pub amount_in: String,
    #[serde(alias = "amount-out")]
    pub amount_out: String,
    /// "in" when USDFC flows from the DEX to the trader, "out" otherwise.
    pub direction: String,
}
