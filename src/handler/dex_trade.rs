use serde_json::Value;

use crate::classify::Classification;
use crate::configuration::{AppState, State};
use crate::dao::Database;
use crate::error::Error;
use crate::helpers::{hour_of_day, parse_amount, to_whole};
use crate::model::{DX_Trade, TX_Transaction};
use crate::score;
use crate::types::{
    DEX_Trade_Type, EcosystemType, TransactionCategory, TransferType,
};

use super::{account, stats, EventMeta};

pub fn parse_and_apply(
    app_state: &AppState<State>,
    meta: &EventMeta,
    attributes: &Value,
    db: &mut Database,
) -> Result<(), Error> {
    let item: DEX_Trade_Type = serde_json::from_value(attributes.clone())
        .map_err(|e| Error::ParseMessage(format!("dex-trade: {}", e)))?;
    let amount_in = parse_amount("amount-in", &item.amount_in)?;
    let amount_out = parse_amount("amount-out", &item.amount_out)?;

    // "in": the trader buys the stablecoin, so the stablecoin leg is the
    // output amount; "out": the trader sells it, the leg is the input.
    let (category, stable_leg, is_sender) = match item.direction.as_str() {
        "in" => (TransactionCategory::DexSwapIn, amount_out.clone(), false),
        "out" => (TransactionCategory::DexSwapOut, amount_in.clone(), true),
        other => {
            return Err(Error::ValidationError(format!(
                "unknown trade direction: {}",
                other
            )))
        },
    };

    let config = &app_state.config;

    let profile = db.dex_profile.get_or_create(&item.trader, meta.at);
    profile.DX_volume += &stable_leg;
    profile.DX_trade_count += 1;
    profile.DX_last_active_at = meta.at;

    if let Some(pool) = &item.pool {
        let metrics = db.pool_metrics.get_or_create(pool, meta.at);
        metrics.DX_volume += &stable_leg;
        metrics.DX_trade_count += 1;
        metrics.DX_updated_at = meta.at;
    }

    let protocol_stats = db.protocol_stats.current(meta.at);
    protocol_stats.PS_total_volume += &stable_leg;
    protocol_stats.PS_updated_at = meta.at;

    stats::bump_daily(
        db,
        meta.at,
        category,
        EcosystemType::Dex,
        &stable_leg,
    )?;

    let classification = Classification {
        category,
        ecosystem: EcosystemType::Dex,
        transfer_type: TransferType::DexSwap,
    };
    let trader =
        db.account.get_or_create(&item.trader, meta.height, meta.at);
    account::apply_event(
        trader,
        &classification,
        &stable_leg,
        is_sender,
        meta,
        config,
    );

    db.dex_trade.append(
        meta.ledger_key(),
        DX_Trade {
            Tx_Hash: meta.tx_hash.to_owned(),
            DX_log_index: meta.log_index,
            DX_trader: item.trader.to_lowercase(),
            DX_dex: meta.contract.to_lowercase(),
            DX_pool: item.pool.as_ref().map(|pool| pool.to_lowercase()),
            DX_amount_in: amount_in,
            DX_amount_out: amount_out,
            DX_category: category,
            DX_height: meta.height,
            DX_timestamp: meta.at,
        },
    );

    let whole = to_whole(&stable_leg, config.token_decimals);
    db.transaction.insert_once(
        meta.ledger_key(),
        TX_Transaction {
            Tx_Hash: meta.tx_hash.to_owned(),
            TX_log_index: meta.log_index,
            TX_height: meta.height,
            TX_timestamp: meta.at,
            TX_from: item.trader.to_lowercase(),
            TX_to: meta.contract.to_lowercase(),
            TX_value: stable_leg,
            TX_category: classification.category,
            TX_ecosystem: classification.ecosystem,
            TX_transfer_type: classification.transfer_type,
            TX_amount_tier: score::amount_tier(whole),
            TX_risk_score: score::event_risk(
                whole,
                classification.category,
                hour_of_day(&meta.at),
                config.off_hours_start,
                config.off_hours_end,
            ),
            TX_success: true,
        },
    );

    Ok(())
}
