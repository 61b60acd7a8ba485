use bigdecimal::{BigDecimal, Zero};
use serde_json::Value;
use tracing::warn;

use crate::classify::Classification;
use crate::configuration::{AppState, State};
use crate::dao::Database;
use crate::error::Error;
use crate::helpers::{hour_of_day, parse_amount, to_whole};
use crate::model::{ST_Operation, TX_Transaction};
use crate::score;
use crate::types::{
    EcosystemType, ST_Gains_Type, StakeOperation, TransactionCategory,
    TransferType,
};

use super::{account, stats, EventMeta};

const YIELD_ALPHA: f64 = 0.2;

pub fn parse_and_apply(
    app_state: &AppState<State>,
    meta: &EventMeta,
    attributes: &Value,
    db: &mut Database,
) -> Result<(), Error> {
    let item: ST_Gains_Type = serde_json::from_value(attributes.clone())
        .map_err(|e| {
            Error::ParseMessage(format!("staking-gains-withdrawn: {}", e))
        })?;
    let collateral_gain =
        parse_amount("collateral-gain", &item.collateral_gain)?;
    let stable_gain = parse_amount("stable-gain", &item.stable_gain)?;
    let total_gain = &collateral_gain + &stable_gain;

    let config = &app_state.config;
    let zero = BigDecimal::zero();

    // A claim for an unknown staker is logged and skipped for the
    // position, but the event itself still lands in the ledger.
    let balance = match db.stake.by_owner_mut(&item.staker) {
        Some(stake) => {
            let first_gain = stake.ST_total_gains == zero;

            stake.ST_total_gains += &total_gain;
            stake.ST_operation_count += 1;
            stake.ST_last_updated_at = meta.at;

            let observed = score::annualized_yield(
                to_whole(&total_gain, config.token_decimals),
                stake.ST_avg_balance,
            );
            stake.ST_yield_rate = if first_gain {
                observed
            } else {
                score::smooth(stake.ST_yield_rate, observed, YIELD_ALPHA)
            };

            let days_active = (meta.at - stake.ST_first_stake_at)
                .num_seconds() as f64
                / 86_400.0;
            stake.ST_performance_score = score::position_performance(
                days_active,
                stake.ST_avg_balance,
            );
            stake.ST_strategy = score::staking_strategy(
                stake.ST_avg_balance,
                days_active,
                stake.ST_yield_rate,
                stake.ST_operation_count,
            );

            Some(stake.ST_balance.clone())
        },
        None => {
            warn!(
                staker = %item.staker,
                "gains claim for unknown stake",
            );
            None
        },
    };

    if let Some(balance) = balance {
        db.stake_operation.append(
            meta.ledger_key(),
            ST_Operation {
                Tx_Hash: meta.tx_hash.to_owned(),
                ST_log_index: meta.log_index,
                ST_owner: item.staker.to_lowercase(),
                ST_operation: StakeOperation::ClaimGains,
                ST_amount: BigDecimal::zero(),
                ST_gains: total_gain.clone(),
                ST_balance_before: balance.clone(),
                ST_balance_after: balance,
                ST_height: meta.height,
                ST_timestamp: meta.at,
            },
        );
    }

    // Only the stablecoin half of the payout counts as stablecoin flow.
    stats::bump_daily(
        db,
        meta.at,
        TransactionCategory::StakingOperation,
        EcosystemType::ProtocolNative,
        &stable_gain,
    )?;

    let classification = Classification {
        category: TransactionCategory::StakingOperation,
        ecosystem: EcosystemType::ProtocolNative,
        transfer_type: TransferType::ProtocolOperation,
    };
    let staker =
        db.account.get_or_create(&item.staker, meta.height, meta.at);
    account::apply_event(
        staker,
        &classification,
        &stable_gain,
        false,
        meta,
        config,
    );

    let whole = to_whole(&total_gain, config.token_decimals);
    db.transaction.insert_once(
        meta.ledger_key(),
        TX_Transaction {
            Tx_Hash: meta.tx_hash.to_owned(),
            TX_log_index: meta.log_index,
            TX_height: meta.height,
            TX_timestamp: meta.at,
            TX_from: meta.contract.to_lowercase(),
            TX_to: item.staker.to_lowercase(),
            TX_value: total_gain,
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
