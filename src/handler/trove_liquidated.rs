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
    TroveStatus, Trove_Liquidated_Type,
};

use super::{account, stats, EventMeta};

pub fn parse_and_apply(
    app_state: &AppState<State>,
    meta: &EventMeta,
    attributes: &Value,
    db: &mut Database,
) -> Result<(), Error> {
    let item: Trove_Liquidated_Type = serde_json::from_value(
        attributes.clone(),
    )
    .map_err(|e| Error::ParseMessage(format!("trove-liquidated: {}", e)))?;
    let liquidated_collateral =
        parse_amount("liquidated-collateral", &item.liquidated_collateral)?;
    let liquidated_debt =
        parse_amount("liquidated-debt", &item.liquidated_debt)?;

    let config = &app_state.config;
    let zero = BigDecimal::zero();

    let trove = db.trove.get_or_create(&item.borrower, meta.height, meta.at);
    let was_active = trove.TV_status.is_active();
    let collateral_seized = trove.TV_collateral.clone();
    let debt_cleared = trove.TV_debt.clone();

    // The position is wiped regardless of what the event reports; the
    // reported amounts feed the protocol totals below.
    trove.TV_collateral = BigDecimal::zero();
    trove.TV_debt = BigDecimal::zero();
    trove.TV_status = TroveStatus::ClosedByLiquidation;
    trove.TV_operation_count += 1;
    trove.TV_risk_events += 1;
    trove.TV_last_updated_height = meta.height;
    trove.TV_last_updated_at = meta.at;

    // The liquidation itself is a CR observation, taken from the reported
    // amounts, and enters the running average like any other operation.
    let cr = score::collateral_ratio(
        to_whole(&liquidated_collateral, config.token_decimals),
        to_whole(&liquidated_debt, config.token_decimals),
    );
    trove.TV_collateral_ratio = cr;
    let n = trove.TV_operation_count as f64;
    trove.TV_avg_collateral_ratio =
        (trove.TV_avg_collateral_ratio * (n - 1.0) + cr) / n;
    if cr < trove.TV_lowest_collateral_ratio {
        trove.TV_lowest_collateral_ratio = cr;
    }
    let days_open =
        (meta.at - trove.TV_opened_at).num_seconds() as f64 / 86_400.0;
    trove.TV_health_score = score::health_score(cr);
    trove.TV_risk_level = score::risk_level(cr);
    trove.TV_liquidation_price = 0.0;
    trove.TV_safety_margin = 0.0;
    trove.TV_performance_score = score::performance_score(
        trove.TV_health_score,
        score::stability_from_lowest(trove.TV_lowest_collateral_ratio),
        score::risk_penalty(trove.TV_risk_events),
        score::age_bonus(days_open),
    );
    trove.TV_liquidation_risk = if config.enable_ml_risk {
        100.0
    } else {
        0.0
    };

    let protocol_stats = db.protocol_stats.current(meta.at);
    protocol_stats.PS_liquidation_count += 1;
    protocol_stats.PS_total_collateral -= &liquidated_collateral;
    protocol_stats.PS_total_debt -= &liquidated_debt;
    if was_active {
        protocol_stats.PS_active_trove_count -= 1;
    }
    stats::recompute_system_health(protocol_stats);
    protocol_stats.PS_updated_at = meta.at;

    stats::bump_daily(
        db,
        meta.at,
        TransactionCategory::Liquidation,
        EcosystemType::ProtocolNative,
        &zero,
    )?;

    let classification = Classification {
        category: TransactionCategory::Liquidation,
        ecosystem: EcosystemType::ProtocolNative,
        transfer_type: TransferType::ProtocolOperation,
    };
    let borrower =
        db.account.get_or_create(&item.borrower, meta.height, meta.at);
    account::apply_event(
        borrower,
        &classification,
        &liquidated_debt,
        true,
        meta,
        config,
    );

    db.trove_operation.append(
        meta.ledger_key(),
        TV_Operation {
            Tx_Hash: meta.tx_hash.to_owned(),
            TV_log_index: meta.log_index,
            TV_owner: item.borrower.to_lowercase(),
            TV_operation: TroveOperation::Liquidate,
            TV_collateral_delta: -collateral_seized,
            TV_debt_delta: -debt_cleared,
            TV_collateral_after: BigDecimal::zero(),
            TV_debt_after: BigDecimal::zero(),
            TV_height: meta.height,
            TV_timestamp: meta.at,
        },
    );

    let whole = to_whole(&liquidated_debt, config.token_decimals);
    db.transaction.insert_once(
        meta.ledger_key(),
        TX_Transaction {
            Tx_Hash: meta.tx_hash.to_owned(),
            TX_log_index: meta.log_index,
            TX_height: meta.height,
            TX_timestamp: meta.at,
            TX_from: item.borrower.to_lowercase(),
            TX_to: meta.contract.to_lowercase(),
            TX_value: liquidated_debt,
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
