use serde_json::Value;

use crate::classify::Classification;
use crate::configuration::{AppState, State};
use crate::dao::Database;
use crate::error::Error;
use crate::helpers::{hour_of_day, parse_amount, to_whole};
use crate::model::TX_Transaction;
use crate::score;
use crate::types::{
    EcosystemType, Redemption_Type, TransactionCategory, TransferType,
};

use super::{account, stats, EventMeta};

/// Redemptions only move the protocol-wide redemption totals; the per-trove
/// debt and collateral adjustments arrive as separate trove-updated events
/// for each trove the redemption touched.
pub fn parse_and_apply(
    app_state: &AppState<State>,
    meta: &EventMeta,
    attributes: &Value,
    db: &mut Database,
) -> Result<(), Error> {
    let item: Redemption_Type = serde_json::from_value(attributes.clone())
        .map_err(|e| Error::ParseMessage(format!("redemption: {}", e)))?;
    let attempted = parse_amount("attempted-amount", &item.attempted_amount)?;
    let actual = parse_amount("actual-amount", &item.actual_amount)?;
    let collateral_sent =
        parse_amount("collateral-sent", &item.collateral_sent)?;
    parse_amount("fee", &item.fee)?;

    if actual > attempted {
        return Err(Error::ValidationError(format!(
            "redemption exceeds attempted amount: {} > {}",
            actual, attempted
        )));
    }

    let config = &app_state.config;

    let protocol_stats = db.protocol_stats.current(meta.at);
    protocol_stats.PS_redemption_count += 1;
    protocol_stats.PS_total_redeemed += &actual;
    protocol_stats.PS_total_collateral_redeemed += &collateral_sent;
    protocol_stats.PS_total_volume += &actual;
    protocol_stats.PS_updated_at = meta.at;

    stats::bump_daily(
        db,
        meta.at,
        TransactionCategory::Redemption,
        EcosystemType::ProtocolNative,
        &actual,
    )?;

    let classification = Classification {
        category: TransactionCategory::Redemption,
        ecosystem: EcosystemType::ProtocolNative,
        transfer_type: TransferType::ProtocolOperation,
    };
    let redeemer =
        db.account.get_or_create(&item.redeemer, meta.height, meta.at);
    account::apply_event(
        redeemer,
        &classification,
        &actual,
        true,
        meta,
        config,
    );

    let whole = to_whole(&actual, config.token_decimals);
    db.transaction.insert_once(
        meta.ledger_key(),
        TX_Transaction {
            Tx_Hash: meta.tx_hash.to_owned(),
            TX_log_index: meta.log_index,
            TX_height: meta.height,
            TX_timestamp: meta.at,
            TX_from: item.redeemer.to_lowercase(),
            TX_to: meta.contract.to_lowercase(),
            TX_value: actual,
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
