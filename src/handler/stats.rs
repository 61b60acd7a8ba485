//! Global and daily stats aggregator.
//!
//! Everything here is an additive delta against the protocol singleton or
//! the day's record; no field is ever recomputed by rescanning entities.
//! Status-derived counters (the active-trove count) are adjusted by the
//! position handlers on genuine status transitions only.

use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::{DateTime, Utc};

use crate::dao::Database;
use crate::error::Error;
use crate::helpers::{day_id, day_start};
use crate::model::PS_State;
use crate::score;
use crate::types::{EcosystemType, TransactionCategory};

/// Counts the event into the calendar-day rollup. `value` is the event's
/// primary token amount; position updates pass zero so that daily volume
/// only reflects actual token movement.
pub fn bump_daily(
    db: &mut Database,
    at: DateTime<Utc>,
    category: TransactionCategory,
    ecosystem: EcosystemType,
    value: &BigDecimal,
) -> Result<(), Error> {
    let day = day_id(&at);
    let start = day_start(day)?;
    let daily = db.daily_stats.for_day(day, start);

    daily.ES_tx_count += 1;
    daily.ES_total_volume += value;

    match category {
        TransactionCategory::Mint => daily.ES_mint_count += 1,
        TransactionCategory::Burn => daily.ES_burn_count += 1,
        TransactionCategory::Liquidation => daily.ES_liquidation_count += 1,
        TransactionCategory::Redemption => daily.ES_redemption_count += 1,
        TransactionCategory::DexSwapIn
        | TransactionCategory::DexSwapOut => daily.ES_dex_trade_count += 1,
        TransactionCategory::BridgeDeposit
        | TransactionCategory::BridgeWithdrawal => {
            daily.ES_bridge_op_count += 1
        },
        TransactionCategory::P2pTransfer
        | TransactionCategory::InstitutionalOperation => {
            daily.ES_transfer_count += 1
        },
        // Position, claim and price events are day-counted via ES_tx_count
        // only; they are not token transfers.
        _ => {},
    }

    match ecosystem {
        EcosystemType::ProtocolNative => daily.ES_protocol_volume += value,
        EcosystemType::Dex => daily.ES_dex_volume += value,
        EcosystemType::Bridge => daily.ES_bridge_volume += value,
        EcosystemType::P2p => daily.ES_p2p_volume += value,
        EcosystemType::DefiIntegration => daily.ES_defi_volume += value,
    }

    Ok(())
}

/// Recomputes the price-driven system health from the maintained running
/// totals. The base-unit scale cancels in the ratio, so raw magnitudes are
/// used directly.
pub fn recompute_system_health(stats: &mut PS_State) {
    let collateral = stats.PS_total_collateral.to_f64().unwrap_or(0.0);
    let debt = stats.PS_total_debt.to_f64().unwrap_or(0.0);

    let cr = if debt <= 0.0 {
        score::RATIO_SENTINEL
    } else {
        collateral * stats.PS_last_price / debt * 100.0
    };

    stats.PS_system_collateral_ratio = cr;
    stats.PS_health_score = score::health_score(cr);
    stats.PS_liquidation_risk = score::risk_level(cr);
}
