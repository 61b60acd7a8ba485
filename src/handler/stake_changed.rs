use bigdecimal::{BigDecimal, Zero};
use serde_json::Value;

use crate::classify::Classification;
use crate::configuration::{AppState, State};
use crate::dao::Database;
use crate::error::Error;
use crate::helpers::{hour_of_day, parse_amount, to_whole};
use crate::model::{ST_Operation, TX_Transaction};
use crate::score;
use crate::types::{
    EcosystemType, ST_Stake_Type, StakeOperation, TransactionCategory,
    TransferType,
};

use super::{account, stats, EventMeta};

const AVG_BALANCE_ALPHA: f64 = 0.1;

pub fn parse_and_apply(
    app_state: &AppState<State>,
    meta: &EventMeta,
    attributes: &Value,
    db: &mut Database,
) -> Result<(), Error> {
    let item: ST_Stake_Type = serde_json::from_value(attributes.clone())
        .map_err(|e| Error::ParseMessage(format!("stake-changed: {}", e)))?;
    // Absolute post-event stake, validated before any mutation.
    let new_balance = parse_amount("new-stake", &item.new_stake)?;

    let config = &app_state.config;
    let zero = BigDecimal::zero();

    let stake =
        db.stake.get_or_create(&item.staker, meta.height, meta.at);
    let balance_before = stake.ST_balance.clone();
    let delta = &new_balance - &balance_before;

    let operation = if delta >= zero {
        StakeOperation::Stake
    } else {
        StakeOperation::Unstake
    };

    if delta > zero {
        stake.ST_total_staked += delta.abs();
    } else {
        stake.ST_total_unstaked += delta.abs();
    }
    stake.ST_balance = new_balance.clone();
    stake.ST_operation_count += 1;
    stake.ST_last_updated_at = meta.at;

    let balance_whole = to_whole(&new_balance, config.token_decimals);
    stake.ST_avg_balance = if stake.ST_operation_count == 1 {
        balance_whole
    } else {
        score::smooth(stake.ST_avg_balance, balance_whole,
            AVG_BALANCE_ALPHA)
    };

    let days_active = (meta.at - stake.ST_first_stake_at).num_seconds()
        as f64
        / 86_400.0;
    stake.ST_performance_score =
        score::position_performance(days_active, stake.ST_avg_balance);
    stake.ST_strategy = score::staking_strategy(
        stake.ST_avg_balance,
        days_active,
        stake.ST_yield_rate,
        stake.ST_operation_count,
    );

    let protocol_stats = db.protocol_stats.current(meta.at);
    protocol_stats.PS_total_staked += &delta;
    protocol_stats.PS_updated_at = meta.at;

    // Stakes are governance-token amounts, kept out of stablecoin volume.
    stats::bump_daily(
        db,
        meta.at,
        TransactionCategory::StakingOperation,
        EcosystemType::ProtocolNative,
        &zero,
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
        &delta.abs(),
        operation == StakeOperation::Stake,
        meta,
        config,
    );

    db.stake_operation.append(
        meta.ledger_key(),
        ST_Operation {
            Tx_Hash: meta.tx_hash.to_owned(),
            ST_log_index: meta.log_index,
            ST_owner: item.staker.to_lowercase(),
            ST_operation: operation,
            ST_amount: delta.abs(),
            ST_gains: BigDecimal::zero(),
            ST_balance_before: balance_before,
            ST_balance_after: new_balance,
            ST_height: meta.height,
            ST_timestamp: meta.at,
        },
    );

    let whole = to_whole(&delta.abs(), config.token_decimals);
    db.transaction.insert_once(
        meta.ledger_key(),
        TX_Transaction {
            Tx_Hash: meta.tx_hash.to_owned(),
            TX_log_index: meta.log_index,
            TX_height: meta.height,
            TX_timestamp: meta.at,
            TX_from: item.staker.to_lowercase(),
            TX_to: meta.contract.to_lowercase(),
            TX_value: delta.abs(),
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
