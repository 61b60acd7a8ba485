use bigdecimal::{BigDecimal, Zero};
use serde_json::Value;

use crate::classify::Classification;
use crate::configuration::{AppState, State};
use crate::dao::Database;
use crate::error::Error;
use crate::helpers::{hour_of_day, parse_amount, to_whole};
use crate::model::{SP_Operation, TX_Transaction};
use crate::score;
use crate::types::{
    EcosystemType, SP_Deposit_Type, StabilityOperation, TransactionCategory,
    TransferType,
};

use super::{account, stats, EventMeta};

/// Weight of the newest balance observation in the running average.
const AVG_BALANCE_ALPHA: f64 = 0.1;

pub fn parse_and_apply(
    app_state: &AppState<State>,
    meta: &EventMeta,
    attributes: &Value,
    db: &mut Database,
) -> Result<(), Error> {
    let item: SP_Deposit_Type = serde_json::from_value(attributes.clone())
        .map_err(|e| {
            Error::ParseMessage(format!("stability-deposit-updated: {}", e))
        })?;
    // Absolute post-event balance, validated before any mutation.
    let new_balance = parse_amount("new-deposit", &item.new_deposit)?;

    let config = &app_state.config;
    let zero = BigDecimal::zero();

    let deposit = db.stability_deposit.get_or_create(
        &item.depositor,
        meta.height,
        meta.at,
    );
    let balance_before = deposit.SP_balance.clone();
    let delta = &new_balance - &balance_before;

    let operation = if delta >= zero {
        StabilityOperation::Deposit
    } else {
        StabilityOperation::Withdraw
    };

    if delta > zero {
        deposit.SP_total_deposited += delta.abs();
    } else {
        deposit.SP_total_withdrawn += delta.abs();
    }
    deposit.SP_balance = new_balance.clone();
    deposit.SP_operation_count += 1;
    deposit.SP_last_updated_at = meta.at;

    let balance_whole = to_whole(&new_balance, config.token_decimals);
    deposit.SP_avg_balance = if deposit.SP_operation_count == 1 {
        balance_whole
    } else {
        score::smooth(deposit.SP_avg_balance, balance_whole,
            AVG_BALANCE_ALPHA)
    };

    let days_active = (meta.at - deposit.SP_first_deposit_at).num_seconds()
        as f64
        / 86_400.0;
    deposit.SP_performance_score =
        score::position_performance(days_active, deposit.SP_avg_balance);

    let protocol_stats = db.protocol_stats.current(meta.at);
    protocol_stats.PS_total_stability_deposits += &delta;
    protocol_stats.PS_updated_at = meta.at;

    let category = match operation {
        StabilityOperation::Deposit => TransactionCategory::Deposit,
        _ => TransactionCategory::Withdrawal,
    };
    stats::bump_daily(
        db,
        meta.at,
        category,
        EcosystemType::ProtocolNative,
        &delta.abs(),
    )?;

    let classification = Classification {
        category,
        ecosystem: EcosystemType::ProtocolNative,
        transfer_type: TransferType::ProtocolOperation,
    };
    let depositor =
        db.account.get_or_create(&item.depositor, meta.height, meta.at);
    account::apply_event(
        depositor,
        &classification,
        &delta.abs(),
        operation == StabilityOperation::Deposit,
        meta,
        config,
    );

    db.stability_operation.append(
        meta.ledger_key(),
        SP_Operation {
            Tx_Hash: meta.tx_hash.to_owned(),
            SP_log_index: meta.log_index,
            SP_owner: item.depositor.to_lowercase(),
            SP_operation: operation,
            SP_amount: delta.abs(),
            SP_gains: BigDecimal::zero(),
            SP_balance_before: balance_before,
            SP_balance_after: new_balance,
            SP_height: meta.height,
            SP_timestamp: meta.at,
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
            TX_from: item.depositor.to_lowercase(),
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
