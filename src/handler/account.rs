//! Account aggregator.
//!
//! Applies one side (sender or receiver) of one event to an account's
//! running counters and recomputes the derived classification and scores.
//! Must be called exactly once per side per event; the ledger-key check in
//! the dispatcher guarantees an event is never replayed into here.

use bigdecimal::BigDecimal;

use crate::classify::Classification;
use crate::configuration::Config;
use crate::helpers::{hour_of_day, to_whole};
use crate::model::AC_Account;
use crate::score;
use crate::types::EcosystemType;

use super::EventMeta;

pub fn apply_event(
    account: &mut AC_Account,
    classification: &Classification,
    value: &BigDecimal,
    is_sender: bool,
    meta: &EventMeta,
    config: &Config,
) {
    account.AC_tx_count += 1;
    account.AC_last_active_height = meta.height;
    account.AC_last_active_at = meta.at;

    if is_sender {
        account.AC_volume_out += value;
    } else {
        account.AC_volume_in += value;
    }
    account.AC_volume_net =
        &account.AC_volume_in - &account.AC_volume_out;

    match classification.ecosystem {
        EcosystemType::ProtocolNative => {
            account.AC_protocol_tx_count += 1;
            account.AC_protocol_volume += value;
        },
        EcosystemType::Dex => {
            account.AC_dex_tx_count += 1;
            account.AC_dex_volume += value;
        },
        EcosystemType::Bridge => {
            account.AC_bridge_tx_count += 1;
            account.AC_bridge_volume += value;
        },
        EcosystemType::P2p => {
            account.AC_p2p_tx_count += 1;
            account.AC_p2p_volume += value;
        },
        EcosystemType::DefiIntegration => {
            account.AC_defi_tx_count += 1;
            account.AC_defi_volume += value;
        },
    }

    account.AC_user_type = score::user_type(
        account.AC_dex_tx_count,
        account.AC_bridge_tx_count,
        account.AC_defi_tx_count,
        account.AC_protocol_tx_count,
        account.AC_tx_count,
    );

    let ecosystems_touched = [
        account.AC_protocol_tx_count,
        account.AC_dex_tx_count,
        account.AC_bridge_tx_count,
        account.AC_p2p_tx_count,
        account.AC_defi_tx_count,
    ]
    .iter()
    .filter(|count| **count > 0)
    .count();
    account.AC_composability_score =
        score::composability_score(ecosystems_touched);

    let lifetime_volume =
        &account.AC_volume_in + &account.AC_volume_out;
    account.AC_influence_score = score::influence_score(
        to_whole(&lifetime_volume, config.token_decimals),
        account.AC_tx_count,
    );

    let event_risk = score::event_risk(
        to_whole(value, config.token_decimals),
        classification.category,
        hour_of_day(&meta.at),
        config.off_hours_start,
        config.off_hours_end,
    );
    account.AC_risk_score = if account.AC_tx_count == 1 {
        event_risk
    } else {
        score::smooth(account.AC_risk_score, event_risk, 0.3)
    }
    .clamp(0.0, 100.0);
}
