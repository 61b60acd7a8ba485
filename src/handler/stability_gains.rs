use bigdecimal::{BigDecimal, Zero};
use serde_json::Value;
use tracing::warn;

use crate::classify::Classification;
use crate::configuration::{AppState, State};
use crate::dao::Database;
use crate::error::Error;
use crate::helpers::{hour_of_day, parse_amount, to_whole};
use crate::model::{SP_Operation, TX_Transaction};
use crate::score;
use crate::types::{
    EcosystemType, SP_Gains_Type, StabilityOperation, TransactionCategory,
    TransferType,
};

use super::{account, stats, EventMeta};

/// Weight of the newest yield observation in the smoothed rate.
const YIELD_ALPHA: f64 = 0.2;

pub fn parse_and_apply(
    app_state: &AppState<State>,
    meta: &EventMeta,
    attributes: &Value,
    db: &mut Database,
) -> Result<(), Error> {
    let item: SP_Gains_Type = serde_json::from_value(attributes.clone())
        .map_err(|e| {
            Error::ParseMessage(format!("stability-gains-withdrawn: {}", e))
        })?;
    let gain = parse_amount("collateral-gain", &item.collateral_gain)?;

    let config = &app_state.config;
    let zero = BigDecimal::zero();

    // A claim for an unknown depositor is logged and skipped for the
    // position, but the event itself still lands in the ledger.
    let balance = match db.stability_deposit.by_owner_mut(&item.depositor) {
        Some(deposit) => {
            let first_gain = deposit.SP_total_gains == zero;

            deposit.SP_total_gains += &gain;
            deposit.SP_operation_count += 1;
            deposit.SP_last_updated_at = meta.at;

            let observed = score::annualized_yield(
                to_whole(&gain, config.token_decimals),
                deposit.SP_avg_balance,
            );
            deposit.SP_yield_rate = if first_gain {
                observed
            } else {
                score::smooth(deposit.SP_yield_rate, observed, YIELD_ALPHA)
            };

            let days_active = (meta.at - deposit.SP_first_deposit_at)
                .num_seconds() as f64
                / 86_400.0;
            deposit.SP_performance_score = score::position_performance(
                days_active,
                deposit.SP_avg_balance,
            );

            Some(deposit.SP_balance.clone())
        },
        None => {
            warn!(
                depositor = %item.depositor,
                "gains claim for unknown stability deposit",
            );
            None
        },
    };

    if let Some(balance) = balance {
        db.stability_operation.append(
            meta.ledger_key(),
            SP_Operation {
                Tx_Hash: meta.tx_hash.to_owned(),
                SP_log_index: meta.log_index,
                SP_owner: item.depositor.to_lowercase(),
                SP_operation: StabilityOperation::ClaimGains,
                SP_amount: BigDecimal::zero(),
                SP_gains: gain.clone(),
                SP_balance_before: balance.clone(),
                SP_balance_after: balance,
                SP_height: meta.height,
                SP_timestamp: meta.at,
            },
        );
    }

    // Gains are collateral-denominated: they never touch stablecoin volume
    // or the protocol supply totals.
    stats::bump_daily(
        db,
        meta.at,
        TransactionCategory::LiquidationReward,
        EcosystemType::ProtocolNative,
        &zero,
    )?;

    let classification = Classification {
        category: TransactionCategory::LiquidationReward,
        ecosystem: EcosystemType::ProtocolNative,
        transfer_type: TransferType::ProtocolOperation,
    };
    let depositor =
        db.account.get_or_create(&item.depositor, meta.height, meta.at);
    account::apply_event(
        depositor,
        &classification,
        &zero,
        false,
        meta,
        config,
    );

    let whole = to_whole(&gain, config.token_decimals);
    db.transaction.insert_once(
        meta.ledger_key(),
        TX_Transaction {
            Tx_Hash: meta.tx_hash.to_owned(),
            TX_log_index: meta.log_index,
            TX_height: meta.height,
            TX_timestamp: meta.at,
            TX_from: meta.contract.to_lowercase(),
            TX_to: item.depositor.to_lowercase(),
            TX_value: gain,
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
