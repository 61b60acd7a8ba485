use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct Bridge_Operation_Type {
    pub account: String,
    pub amount: String,
    /// "deposit" when USDFC leaves the chain, "withdrawal" when it returns.
    pub direction: String,
}
