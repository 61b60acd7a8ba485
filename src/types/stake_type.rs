use serde::Deserialize;

/// Absolute post-event stake balance.
#[derive(Debug, Deserialize, Default)]
pub struct ST_Stake_Type {
    pub staker: String,
    #[serde(alias = "new-stake")]
    pub new_stake: String,
}
