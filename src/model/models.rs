//! Consolidated entity models
//!
//! All derived records exposed to the query layer, organized by domain
//! sections. Keyed per the storage discipline: ledger-like records by
//! `txhash:logindex`, positions and accounts by owner address, protocol
//! stats by a fixed singleton id, daily records by day id.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    AmountTier, EcosystemType, RiskLevel, StabilityOperation, StakeOperation,
    StakingStrategy, TransactionCategory, TransferType, TroveOperation,
    TroveStatus, UserType,
};

// =============================================================================
// ACCOUNT DOMAIN
// =============================================================================

/// Per-address rollup, created lazily on first reference and never deleted.
/// All counters are monotone except `AC_volume_net`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AC_Account {
    pub AC_address: String,
    pub AC_balance: BigDecimal,
    pub AC_tx_count: i64,
    pub AC_volume_in: BigDecimal,
    pub AC_volume_out: BigDecimal,
    pub AC_volume_net: BigDecimal,
    pub AC_first_seen_height: i64,
    pub AC_first_seen_at: DateTime<Utc>,
    pub AC_last_active_height: i64,
    pub AC_last_active_at: DateTime<Utc>,
    pub AC_protocol_tx_count: i64,
    pub AC_dex_tx_count: i64,
    pub AC_bridge_tx_count: i64,
    pub AC_p2p_tx_count: i64,
    pub AC_defi_tx_count: i64,
    pub AC_protocol_volume: BigDecimal,
    pub AC_dex_volume: BigDecimal,
    pub AC_bridge_volume: BigDecimal,
    pub AC_p2p_volume: BigDecimal,
    pub AC_defi_volume: BigDecimal,
    pub AC_user_type: UserType,
    pub AC_risk_score: f64,
    pub AC_composability_score: f64,
    pub AC_influence_score: f64,
}

// =============================================================================
// TRANSACTION LEDGER
// =============================================================================

/// One immutable ledger entry per (tx hash, log index). Existence of the
/// composite key is the idempotency guard for every downstream delta.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TX_Transaction {
    pub Tx_Hash: String,
    pub TX_log_index: i64,
    pub TX_height: i64,
    pub TX_timestamp: DateTime<Utc>,
    pub TX_from: String,
    pub TX_to: String,
    pub TX_value: BigDecimal,
    pub TX_category: TransactionCategory,
    pub TX_ecosystem: EcosystemType,
    pub TX_transfer_type: TransferType,
    pub TX_amount_tier: AmountTier,
    pub TX_risk_score: f64,
    pub TX_success: bool,
}

// =============================================================================
// TROVE DOMAIN
// =============================================================================

/// One per borrower; a closed trove is reopened in place, monetary history
/// keeps accumulating across reopenings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TV_Trove {
    pub TV_owner: String,
    pub TV_collateral: BigDecimal,
    pub TV_debt: BigDecimal,
    pub TV_collateral_ratio: f64,
    pub TV_status: TroveStatus,
    pub TV_opened_height: i64,
    pub TV_opened_at: DateTime<Utc>,
    pub TV_last_updated_height: i64,
    pub TV_last_updated_at: DateTime<Utc>,
    pub TV_total_borrowed: BigDecimal,
    pub TV_total_repaid: BigDecimal,
    pub TV_total_collateral_added: BigDecimal,
    pub TV_total_collateral_withdrawn: BigDecimal,
    pub TV_operation_count: i64,
    pub TV_risk_events: i64,
    pub TV_avg_collateral_ratio: f64,
    pub TV_lowest_collateral_ratio: f64,
    pub TV_health_score: f64,
    pub TV_risk_level: RiskLevel,
    pub TV_liquidation_price: f64,
    pub TV_safety_margin: f64,
    pub TV_performance_score: f64,
    pub TV_liquidation_risk: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TV_Operation {
    pub Tx_Hash: String,
    pub TV_log_index: i64,
    pub TV_owner: String,
    pub TV_operation: TroveOperation,
    pub TV_collateral_delta: BigDecimal,
    pub TV_debt_delta: BigDecimal,
    pub TV_collateral_after: BigDecimal,
    pub TV_debt_after: BigDecimal,
    pub TV_height: i64,
    pub TV_timestamp: DateTime<Utc>,
}

// =============================================================================
// STABILITY POOL DOMAIN
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SP_Deposit {
    pub SP_owner: String,
    pub SP_balance: BigDecimal,
    pub SP_total_deposited: BigDecimal,
    pub SP_total_withdrawn: BigDecimal,
    pub SP_total_gains: BigDecimal,
    pub SP_avg_balance: f64,
    pub SP_yield_rate: f64,
    pub SP_performance_score: f64,
    pub SP_operation_count: i64,
    pub SP_first_deposit_height: i64,
    pub SP_first_deposit_at: DateTime<Utc>,
    pub SP_last_updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SP_Operation {
    pub Tx_Hash: String,
    pub SP_log_index: i64,
    pub SP_owner: String,
    pub SP_operation: StabilityOperation,
    pub SP_amount: BigDecimal,
    pub SP_gains: BigDecimal,
    pub SP_balance_before: BigDecimal,
    pub SP_balance_after: BigDecimal,
    pub SP_height: i64,
    pub SP_timestamp: DateTime<Utc>,
}

// =============================================================================
// STAKING DOMAIN
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ST_Stake {
    pub ST_owner: String,
    pub ST_balance: BigDecimal,
    pub ST_total_staked: BigDecimal,
    pub ST_total_unstaked: BigDecimal,
    pub ST_total_gains: BigDecimal,
    pub ST_avg_balance: f64,
    pub ST_yield_rate: f64,
    pub ST_performance_score: f64,
    pub ST_strategy: StakingStrategy,
    pub ST_operation_count: i64,
    pub ST_first_stake_height: i64,
    pub ST_first_stake_at: DateTime<Utc>,
    pub ST_last_updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ST_Operation {
    pub Tx_Hash: String,
    pub ST_log_index: i64,
    pub ST_owner: String,
    pub ST_operation: StakeOperation,
    pub ST_amount: BigDecimal,
    pub ST_gains: BigDecimal,
    pub ST_balance_before: BigDecimal,
    pub ST_balance_after: BigDecimal,
    pub ST_height: i64,
    pub ST_timestamp: DateTime<Utc>,
}

// =============================================================================
// PROTOCOL / ECOSYSTEM STATS
// =============================================================================

/// Protocol-wide singleton. Every field is maintained by additive deltas;
/// the system collateral ratio and health band are recomputed from the
/// running totals and the last price, never from a rescan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PS_State {
    pub PS_total_supply: BigDecimal,
    pub PS_lifetime_mint_count: i64,
    pub PS_lifetime_burn_count: i64,
    pub PS_lifetime_transfer_count: i64,
    pub PS_liquidation_count: i64,
    pub PS_redemption_count: i64,
    pub PS_total_volume: BigDecimal,
    pub PS_active_trove_count: i64,
    pub PS_total_collateral: BigDecimal,
    pub PS_total_debt: BigDecimal,
    pub PS_total_stability_deposits: BigDecimal,
    pub PS_total_staked: BigDecimal,
    pub PS_total_redeemed: BigDecimal,
    pub PS_total_collateral_redeemed: BigDecimal,
    pub PS_last_price: f64,
    pub PS_system_collateral_ratio: f64,
    pub PS_health_score: f64,
    pub PS_liquidation_risk: RiskLevel,
    pub PS_updated_at: DateTime<Utc>,
}

/// One per calendar day, created lazily with all-zero counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ES_Daily_State {
    pub ES_day: i64,
    pub ES_date: DateTime<Utc>,
    pub ES_total_volume: BigDecimal,
    pub ES_tx_count: i64,
    pub ES_mint_count: i64,
    pub ES_burn_count: i64,
    pub ES_transfer_count: i64,
    pub ES_liquidation_count: i64,
    pub ES_redemption_count: i64,
    pub ES_protocol_volume: BigDecimal,
    pub ES_dex_volume: BigDecimal,
    pub ES_bridge_volume: BigDecimal,
    pub ES_p2p_volume: BigDecimal,
    pub ES_defi_volume: BigDecimal,
    pub ES_dex_trade_count: i64,
    pub ES_bridge_op_count: i64,
}

/// Per-day market OHLC. Carries the previous close explicitly so no
/// process-global "previous price" state exists anywhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MP_Condition {
    pub MP_day: i64,
    pub MP_open: f64,
    pub MP_high: f64,
    pub MP_low: f64,
    pub MP_close: f64,
    pub MP_previous_close: Option<f64>,
    pub MP_update_count: i64,
    pub MP_updated_at: DateTime<Utc>,
}

// =============================================================================
// DEX / BRIDGE SATELLITES
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DX_Trade {
    pub Tx_Hash: String,
    pub DX_log_index: i64,
    pub DX_trader: String,
    pub DX_dex: String,
    pub DX_pool: Option<String>,
    pub DX_amount_in: BigDecimal,
    pub DX_amount_out: BigDecimal,
    pub DX_category: TransactionCategory,
    pub DX_height: i64,
    pub DX_timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DX_Profile {
    pub DX_address: String,
    pub DX_volume: BigDecimal,
    pub DX_trade_count: i64,
    pub DX_last_active_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DX_Pool_Metrics {
    pub DX_pool: String,
    pub DX_volume: BigDecimal,
    pub DX_trade_count: i64,
    pub DX_updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BR_Operation {
    pub Tx_Hash: String,
    pub BR_log_index: i64,
    pub BR_account: String,
    pub BR_bridge: String,
    pub BR_amount: BigDecimal,
    pub BR_category: TransactionCategory,
    pub BR_height: i64,
    pub BR_timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BR_Profile {
    pub BR_address: String,
    pub BR_inbound_volume: BigDecimal,
    pub BR_outbound_volume: BigDecimal,
    pub BR_op_count: i64,
    pub BR_last_active_at: DateTime<Utc>,
}
