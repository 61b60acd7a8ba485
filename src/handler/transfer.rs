use serde_json::Value;

use crate::classify::{classify, ZERO_ADDRESS};
use crate::configuration::{AppState, State};
use crate::dao::Database;
use crate::error::Error;
use crate::helpers::{hour_of_day, parse_amount, to_whole};
use crate::model::TX_Transaction;
use crate::score;
use crate::types::{TransactionCategory, Transfer_Type};

use super::{account, stats, EventMeta};

pub fn parse_and_apply(
    app_state: &AppState<State>,
    meta: &EventMeta,
    attributes: &Value,
    db: &mut Database,
) -> Result<(), Error> {
    let item: Transfer_Type = serde_json::from_value(attributes.clone())
        .map_err(|e| Error::ParseMessage(format!("transfer: {}", e)))?;
    let value = parse_amount("value", &item.value)?;

    let config = &app_state.config;
    let classification = classify(
        &app_state.book,
        &item.from,
        &item.to,
        &value,
        &config.institutional_threshold,
    );

    let from_is_zero = item.from.eq_ignore_ascii_case(ZERO_ADDRESS);
    let to_is_zero = item.to.eq_ignore_ascii_case(ZERO_ADDRESS);

    // Balances move value between the two parties; a mint or burn only
    // touches the non-zero side. Each side is credited exactly once.
    if !from_is_zero {
        let sender =
            db.account.get_or_create(&item.from, meta.height, meta.at);
        sender.AC_balance -= &value;
        account::apply_event(
            sender,
            &classification,
            &value,
            true,
            meta,
            config,
        );
    }

    if !to_is_zero {
        let receiver =
            db.account.get_or_create(&item.to, meta.height, meta.at);
        receiver.AC_balance += &value;
        account::apply_event(
            receiver,
            &classification,
            &value,
            false,
            meta,
            config,
        );
    }

    let protocol_stats = db.protocol_stats.current(meta.at);
    protocol_stats.PS_total_volume += &value;
    match classification.category {
        TransactionCategory::Mint => {
            protocol_stats.PS_lifetime_mint_count += 1;
            protocol_stats.PS_total_supply += &value;
        },
        TransactionCategory::Burn => {
            protocol_stats.PS_lifetime_burn_count += 1;
            protocol_stats.PS_total_supply -= &value;
        },
        _ => protocol_stats.PS_lifetime_transfer_count += 1,
    }
    protocol_stats.PS_updated_at = meta.at;

    stats::bump_daily(
        db,
        meta.at,
        classification.category,
        classification.ecosystem,
        &value,
    )?;

    let whole = to_whole(&value, config.token_decimals);
    let transaction = TX_Transaction {
        Tx_Hash: meta.tx_hash.to_owned(),
        TX_log_index: meta.log_index,
        TX_height: meta.height,
        TX_timestamp: meta.at,
        TX_from: item.from.to_lowercase(),
        TX_to: item.to.to_lowercase(),
        TX_value: value,
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
    };
    db.transaction.insert_once(meta.ledger_key(), transaction);

    Ok(())
}
