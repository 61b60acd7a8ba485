use std::str::FromStr;

use bigdecimal::{BigDecimal, ToPrimitive};
use serde_json::Value;

use crate::configuration::{AppState, State};
use crate::dao::Database;
use crate::error::Error;
use crate::helpers::{day_id, hour_of_day};
use crate::model::TX_Transaction;
use crate::score;
use crate::types::{
    EcosystemType, Price_Feed_Type, TransactionCategory, TransferType,
};

use super::{stats, EventMeta};

pub fn parse_and_apply(
    app_state: &AppState<State>,
    meta: &EventMeta,
    attributes: &Value,
    db: &mut Database,
) -> Result<(), Error> {
    let item: Price_Feed_Type = serde_json::from_value(attributes.clone())
        .map_err(|e| Error::ParseMessage(format!("price-updated: {}", e)))?;
    let price = BigDecimal::from_str(&item.price)?
        .to_f64()
        .unwrap_or(0.0);
    if price <= 0.0 {
        return Err(Error::ValidationError(format!(
            "non-positive price: {}",
            item.price
        )));
    }

    let config = &app_state.config;

    let protocol_stats = db.protocol_stats.current(meta.at);
    protocol_stats.PS_last_price = price;
    stats::recompute_system_health(protocol_stats);
    protocol_stats.PS_updated_at = meta.at;

    if config.enable_market_conditions {
        let day = day_id(&meta.at);
        let previous_close = db
            .market_condition
            .by_day(day - 1)
            .map(|candle| candle.MP_close);
        let candle = db.market_condition.get_or_open(
            day,
            price,
            previous_close,
            meta.at,
        );
        if price > candle.MP_high {
            candle.MP_high = price;
        }
        if price < candle.MP_low {
            candle.MP_low = price;
        }
        candle.MP_close = price;
        candle.MP_update_count += 1;
        candle.MP_updated_at = meta.at;
    }

    // Price updates carry no token flow; the ledger row exists only so a
    // replayed feed cannot bump the candle's update count twice.
    db.transaction.insert_once(
        meta.ledger_key(),
        TX_Transaction {
            Tx_Hash: meta.tx_hash.to_owned(),
            TX_log_index: meta.log_index,
            TX_height: meta.height,
            TX_timestamp: meta.at,
            TX_from: meta.contract.to_lowercase(),
            TX_to: meta.contract.to_lowercase(),
            TX_value: BigDecimal::from(0),
            TX_category: TransactionCategory::PriceUpdate,
            TX_ecosystem: EcosystemType::ProtocolNative,
            TX_transfer_type: TransferType::ProtocolOperation,
            TX_amount_tier: score::amount_tier(0.0),
            TX_risk_score: score::event_risk(
                0.0,
                TransactionCategory::PriceUpdate,
                hour_of_day(&meta.at),
                config.off_hours_start,
                config.off_hours_end,
            ),
            TX_success: true,
        },
    );

    Ok(())
}
