use serde_json::Value;

use crate::classify::Classification;
use crate::configuration::{AppState, State};
use crate::dao::Database;
use crate::error::Error;
use crate::helpers::{hour_of_day, parse_amount, to_whole};
use crate::model::{BR_Operation, TX_Transaction};
use crate::score;
use crate::types::{
    Bridge_Operation_Type, EcosystemType, TransactionCategory, TransferType,
};

use super::{account, stats, EventMeta};

pub fn parse_and_apply(
    app_state: &AppState<State>,
    meta: &EventMeta,
    attributes: &Value,
    db: &mut Database,
) -> Result<(), Error> {
    let item: Bridge_Operation_Type =
        serde_json::from_value(attributes.clone()).map_err(|e| {
            Error::ParseMessage(format!("bridge-operation: {}", e))
        })?;
    let amount = parse_amount("amount", &item.amount)?;

    // "deposit": tokens leave the chain through the bridge (outbound for
    // the account); "withdrawal": they come back in.
    let (category, is_sender) = match item.direction.as_str() {
        "deposit" => (TransactionCategory::BridgeDeposit, true),
        "withdrawal" => (TransactionCategory::BridgeWithdrawal, false),
        other => {
            return Err(Error::ValidationError(format!(
                "unknown bridge direction: {}",
                other
            )))
        },
    };

    let config = &app_state.config;

    let profile = db.bridge_profile.get_or_create(&meta.contract, meta.at);
    if is_sender {
        profile.BR_outbound_volume += &amount;
    } else {
        profile.BR_inbound_volume += &amount;
    }
    profile.BR_op_count += 1;
    profile.BR_last_active_at = meta.at;

    let protocol_stats = db.protocol_stats.current(meta.at);
    protocol_stats.PS_total_volume += &amount;
    protocol_stats.PS_updated_at = meta.at;

    stats::bump_daily(
        db,
        meta.at,
        category,
        EcosystemType::Bridge,
        &amount,
    )?;

    let classification = Classification {
        category,
        ecosystem: EcosystemType::Bridge,
        transfer_type: TransferType::BridgeTransfer,
    };
    let holder =
        db.account.get_or_create(&item.account, meta.height, meta.at);
    account::apply_event(
        holder,
        &classification,
        &amount,
        is_sender,
        meta,
        config,
    );

    db.bridge_operation.append(
        meta.ledger_key(),
        BR_Operation {
            Tx_Hash: meta.tx_hash.to_owned(),
            BR_log_index: meta.log_index,
            BR_account: item.account.to_lowercase(),
            BR_bridge: meta.contract.to_lowercase(),
            BR_amount: amount.clone(),
            BR_category: category,
            BR_height: meta.height,
            BR_timestamp: meta.at,
        },
    );

    let whole = to_whole(&amount, config.token_decimals);
    let (tx_from, tx_to) = if is_sender {
        (item.account.to_lowercase(), meta.contract.to_lowercase())
    } else {
        (meta.contract.to_lowercase(), item.account.to_lowercase())
    };
    db.transaction.insert_once(
        meta.ledger_key(),
        TX_Transaction {
            Tx_Hash: meta.tx_hash.to_owned(),
            TX_log_index: meta.log_index,
            TX_height: meta.height,
            TX_timestamp: meta.at,
            TX_from: tx_from,
            TX_to: tx_to,
            TX_value: amount,
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
