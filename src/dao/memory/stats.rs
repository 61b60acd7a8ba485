use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};

use super::{Table, PROTOCOL_STATS_ID};
use crate::model::{ES_Daily_State, PS_State};
use crate::score::RATIO_SENTINEL;
use crate::types::RiskLevel;

impl Table<PS_State> {
    /// The protocol-wide singleton, created on first touch.
    pub fn current(&mut self, at: DateTime<Utc>) -> &mut PS_State {
        self.entry_or_insert_with(PROTOCOL_STATS_ID, || PS_State {
            PS_total_supply: BigDecimal::zero(),
            PS_lifetime_mint_count: 0,
            PS_lifetime_burn_count: 0,
            PS_lifetime_transfer_count: 0,
            PS_liquidation_count: 0,
            PS_redemption_count: 0,
            PS_total_volume: BigDecimal::zero(),
            PS_active_trove_count: 0,
            PS_total_collateral: BigDecimal::zero(),
            PS_total_debt: BigDecimal::zero(),
            PS_total_stability_deposits: BigDecimal::zero(),
            PS_total_staked: BigDecimal::zero(),
            PS_total_redeemed: BigDecimal::zero(),
            PS_total_collateral_redeemed: BigDecimal::zero(),
            PS_last_price: 0.0,
            PS_system_collateral_ratio: RATIO_SENTINEL,
            PS_health_score: 100.0,
            PS_liquidation_risk: RiskLevel::VeryLow,
            PS_updated_at: at,
        })
    }

    pub fn snapshot(&self) -> Option<&PS_State> {
        self.get(PROTOCOL_STATS_ID)
    }
}

impl Table<ES_Daily_State> {
    /// Daily records are keyed by calendar day and created lazily with
    /// all-zero counters.
    pub fn for_day(
        &mut self,
        day: i64,
        day_start: DateTime<Utc>,
    ) -> &mut ES_Daily_State {
        self.entry_or_insert_with(&day.to_string(), || ES_Daily_State {
            ES_day: day,
            ES_date: day_start,
            ES_total_volume: BigDecimal::zero(),
            ES_tx_count: 0,
            ES_mint_count: 0,
            ES_burn_count: 0,
            ES_transfer_count: 0,
            ES_liquidation_count: 0,
            ES_redemption_count: 0,
            ES_protocol_volume: BigDecimal::zero(),
            ES_dex_volume: BigDecimal::zero(),
            ES_bridge_volume: BigDecimal::zero(),
            ES_p2p_volume: BigDecimal::zero(),
            ES_defi_volume: BigDecimal::zero(),
            ES_dex_trade_count: 0,
            ES_bridge_op_count: 0,
        })
    }

    pub fn by_day(&self, day: i64) -> Option<&ES_Daily_State> {
        self.get(&day.to_string())
    }
}
