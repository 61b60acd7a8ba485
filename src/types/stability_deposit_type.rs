use serde::Deserialize;

/// Absolute post-event deposit balance.
#[derive(Debug, Deserialize, Default)]
pub struct SP_Deposit_Type {
    pub depositor: String,
    #[serde(alias = "new-deposit")]
    pub new_deposit: String,
}
