use bigdecimal::{BigDecimal, Zero};
use serde_json::Value;

use crate::classify::Classification;
use crate::configuration::{AppState, State};
use crate::dao::Database;
use crate::error::Error;
use crate::helpers::{hour_of_day, parse_amount, to_whole};
use crate::model::{TV_Operation, TX_Transaction};
use crate::score;
use crate::types::{
    EcosystemType, TransactionCategory, TransferType, TroveOperation,
    TroveStatus, Trove_Updated_Type,
};

use super::{account, stats, EventMeta};

/// A risk event is recorded whenever an active trove lands at or below the
/// HIGH collateral-ratio band.
const RISK_EVENT_CR: f64 = 125.0;

pub fn parse_and_apply(
    app_state: &AppState<State>,
    meta: &EventMeta,
    attributes: &Value,
    db: &mut Database,
) -> Result<(), Error> {
    let item: Trove_Updated_Type = serde_json::from_value(
        attributes.clone(),
    )
    .map_err(|e| Error::ParseMessage(format!("trove-updated: {}", e)))?;
    // Absolute post-event position, validated before any mutation.
    let collateral = parse_amount("collateral", &item.collateral)?;
    let debt = parse_amount("debt", &item.debt)?;

    let config = &app_state.config;
    let zero = BigDecimal::zero();
    let last_price = db
        .protocol_stats
        .snapshot()
        .map(|stats| stats.PS_last_price)
        .unwrap_or(0.0);

    let trove = db.trove.get_or_create(&item.borrower, meta.height, meta.at);

    let prev_collateral = trove.TV_collateral.clone();
    let prev_debt = trove.TV_debt.clone();
    let was_active = trove.TV_status.is_active();

    let collateral_delta = &collateral - &prev_collateral;
    let debt_delta = &debt - &prev_debt;
    let now_active = debt > zero;

    let operation = if now_active && !was_active {
        TroveOperation::Open
    } else if !now_active && was_active {
        TroveOperation::Close
    } else if debt_delta > zero && collateral_delta == zero {
        TroveOperation::Borrow
    } else if debt_delta < zero && collateral_delta == zero {
        TroveOperation::Repay
    } else if collateral_delta > zero && debt_delta == zero {
        TroveOperation::AddCollateral
    } else if collateral_delta < zero && debt_delta == zero {
        TroveOperation::WithdrawCollateral
    } else {
        TroveOperation::Adjust
    };

    if operation == TroveOperation::Open {
        // A reopened trove reuses the record: status and age reset,
        // lifetime history keeps accumulating.
        trove.TV_opened_height = meta.height;
        trove.TV_opened_at = meta.at;
    }

    if debt_delta > zero {
        trove.TV_total_borrowed += debt_delta.abs();
    } else {
        trove.TV_total_repaid += debt_delta.abs();
    }
    if collateral_delta > zero {
        trove.TV_total_collateral_added += collateral_delta.abs();
    } else {
        trove.TV_total_collateral_withdrawn += collateral_delta.abs();
    }

    trove.TV_collateral = collateral.clone();
    trove.TV_debt = debt.clone();
    trove.TV_status = if now_active {
        TroveStatus::Active
    } else if was_active {
        TroveStatus::ClosedByOwner
    } else {
        trove.TV_status
    };
    trove.TV_operation_count += 1;
    trove.TV_last_updated_height = meta.height;
    trove.TV_last_updated_at = meta.at;

    // Derived metrics are recomputed from the new absolute state; only the
    // lifetime counters above are additive.
    let cr = score::collateral_ratio(
        to_whole(&collateral, config.token_decimals),
        to_whole(&debt, config.token_decimals),
    );
    trove.TV_collateral_ratio = cr;

    let n = trove.TV_operation_count as f64;
    trove.TV_avg_collateral_ratio =
        (trove.TV_avg_collateral_ratio * (n - 1.0) + cr) / n;

    if now_active {
        if cr < trove.TV_lowest_collateral_ratio {
            trove.TV_lowest_collateral_ratio = cr;
        }
        if cr <= RISK_EVENT_CR {
            trove.TV_risk_events += 1;
        }
    }

    let days_open = (meta.at - trove.TV_opened_at).num_seconds() as f64
        / 86_400.0;
    trove.TV_health_score = score::health_score(cr);
    trove.TV_risk_level = score::risk_level(cr);
    trove.TV_liquidation_price = score::liquidation_price(
        to_whole(&collateral, config.token_decimals),
        to_whole(&debt, config.token_decimals),
    );
    trove.TV_safety_margin =
        score::safety_margin(last_price, trove.TV_liquidation_price);
    trove.TV_performance_score = score::performance_score(
        trove.TV_health_score,
        score::stability_from_lowest(trove.TV_lowest_collateral_ratio),
        score::risk_penalty(trove.TV_risk_events),
        score::age_bonus(days_open),
    );
    trove.TV_liquidation_risk = if config.enable_ml_risk {
        score::liquidation_risk(
            cr,
            trove.TV_risk_events,
            trove.TV_operation_count,
            days_open,
        )
    } else {
        0.0
    };

    let protocol_stats = db.protocol_stats.current(meta.at);
    protocol_stats.PS_total_collateral += &collateral_delta;
    protocol_stats.PS_total_debt += &debt_delta;
    // The active count moves on genuine status transitions only, never on
    // a same-status update.
    if now_active && !was_active {
        protocol_stats.PS_active_trove_count += 1;
    } else if !now_active && was_active {
        protocol_stats.PS_active_trove_count -= 1;
    }
    stats::recompute_system_health(protocol_stats);
    protocol_stats.PS_updated_at = meta.at;

    stats::bump_daily(
        db,
        meta.at,
        TransactionCategory::TroveOperation,
        EcosystemType::ProtocolNative,
        &zero,
    )?;

    let primary = if debt_delta.abs() > zero {
        debt_delta.abs()
    } else {
        collateral_delta.abs()
    };
    let classification = Classification {
        category: TransactionCategory::TroveOperation,
        ecosystem: EcosystemType::ProtocolNative,
        transfer_type: TransferType::ProtocolOperation,
    };
    let is_sender = matches!(
        operation,
        TroveOperation::Repay
            | TroveOperation::AddCollateral
            | TroveOperation::Close
    );
    let borrower =
        db.account.get_or_create(&item.borrower, meta.height, meta.at);
    account::apply_event(
        borrower,
        &classification,
        &primary,
        is_sender,
        meta,
        config,
    );

    db.trove_operation.append(
        meta.ledger_key(),
        TV_Operation {
            Tx_Hash: meta.tx_hash.to_owned(),
            TV_log_index: meta.log_index,
            TV_owner: item.borrower.to_lowercase(),
            TV_operation: operation,
            TV_collateral_delta: collateral_delta,
            TV_debt_delta: debt_delta,
            TV_collateral_after: collateral,
            TV_debt_after: debt,
            TV_height: meta.height,
            TV_timestamp: meta.at,
        },
    );

    let whole = to_whole(&primary, config.token_decimals);
    db.transaction.insert_once(
        meta.ledger_key(),
        TX_Transaction {
            Tx_Hash: meta.tx_hash.to_owned(),
            TX_log_index: meta.log_index,
            TX_height: meta.height,
            TX_timestamp: meta.at,
            TX_from: item.borrower.to_lowercase(),
            TX_to: meta.contract.to_lowercase(),
            TX_value: primary,
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
