use std::{fmt, str::FromStr};

use serde::Deserialize;
use serde_json::Value;

use crate::error::Error;

/// One canonical contract event as delivered by the indexing substrate.
///
/// Numeric fields arrive as strings and are parsed at the handler boundary.
#[derive(Debug, Deserialize)]
pub struct EventEnvelope {
    pub r#type: String,
    pub height: String,
    pub at: String,
    pub tx_hash: String,
    pub log_index: String,
    pub contract: String,
    #[serde(default)]
    pub attributes: Value,
}

impl EventEnvelope {
    /// Composite key as spelled on the wire, for diagnostics. The replay
    /// guard uses the parsed, canonical form on `EventMeta`.
    pub fn ledger_key(&self) -> String {
        format!("{}:{}", self.tx_hash, self.log_index)
    }
}

#[derive(Debug)]
pub enum EventsType {
    Transfer,
    Trove_Updated,
    Trove_Liquidated,
    Redemption,
    SP_Deposit_Updated,
    SP_Gains_Withdrawn,
    ST_Stake_Changed,
    ST_Gains_Withdrawn,
    Price_Updated,
    DEX_Trade,
    Bridge_Operation,
}

impl fmt::Display for EventsType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EventsType::Transfer => write!(f, "transfer"),
            EventsType::Trove_Updated => write!(f, "trove-updated"),
            EventsType::Trove_Liquidated => write!(f, "trove-liquidated"),
            EventsType::Redemption => write!(f, "redemption"),
            EventsType::SP_Deposit_Updated => {
                write!(f, "stability-deposit-updated")
            },
            EventsType::SP_Gains_Withdrawn => {
                write!(f, "stability-gains-withdrawn")
            },
            EventsType::ST_Stake_Changed => write!(f, "stake-changed"),
            EventsType::ST_Gains_Withdrawn => {
                write!(f, "staking-gains-withdrawn")
            },
            EventsType::Price_Updated => write!(f, "price-updated"),
            EventsType::DEX_Trade => write!(f, "dex-trade"),
            EventsType::Bridge_Operation => write!(f, "bridge-operation"),
        }
    }
}

impl FromStr for EventsType {
    type Err = Error;

    fn from_str(value: &str) -> Result<EventsType, Self::Err> {
        match value {
            "transfer" => Ok(EventsType::Transfer),
            "trove-updated" => Ok(EventsType::Trove_Updated),
            "trove-liquidated" => Ok(EventsType::Trove_Liquidated),
            "redemption" => Ok(EventsType::Redemption),
            "stability-deposit-updated" => Ok(EventsType::SP_Deposit_Updated),
            "stability-gains-withdrawn" => Ok(EventsType::SP_Gains_Withdrawn),
            "stake-changed" => Ok(EventsType::ST_Stake_Changed),
            "staking-gains-withdrawn" => Ok(EventsType::ST_Gains_Withdrawn),
            "price-updated" => Ok(EventsType::Price_Updated),
            "dex-trade" => Ok(EventsType::DEX_Trade),
            "bridge-operation" => Ok(EventsType::Bridge_Operation),
            _ => Err(Error::ParseMessage(format!(
                "Event type not supported: {}",
                value
            ))),
        }
    }
}
