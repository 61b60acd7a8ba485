//! Pure scoring functions.
//!
//! Every function here is deterministic, side-effect free and total: ratio
//! computations substitute sentinels instead of dividing by zero, and all
//! scores clamp to [0, 100]. Ratios are percentages (100 = 100%).

use crate::types::{
    AmountTier, RiskLevel, StakingStrategy, TransactionCategory, UserType,
};

/// Collateral ratio reported for a debt-free trove ("no liquidation risk").
pub const RATIO_SENTINEL: f64 = 99999.0;

/// Tier boundaries in whole tokens; a value equal to a boundary falls into
/// the next tier up (strict less-than at each boundary).
pub const TIER_BOUNDARIES: [f64; 6] =
    [1.0, 10.0, 100.0, 10_000.0, 100_000.0, 1_000_000.0];

/// Additive risk weight per amount tier, DUST..INSTITUTIONAL.
pub const TIER_RISK_WEIGHTS: [f64; 7] =
    [0.0, 2.0, 5.0, 15.0, 25.0, 40.0, 60.0];

const PERFORMANCE_WEIGHT_HEALTH: f64 = 0.4;
const PERFORMANCE_WEIGHT_STABILITY: f64 = 0.3;
const PERFORMANCE_WEIGHT_RISK: f64 = 0.2;
const PERFORMANCE_WEIGHT_AGE: f64 = 0.1;

pub fn collateral_ratio(collateral: f64, debt: f64) -> f64 {
    if debt <= 0.0 {
        return RATIO_SENTINEL;
    }
    collateral / debt * 100.0
}

/// Step bands at 110/125/150/200, inclusive at the upper edge so that a
/// trove sitting exactly on a band boundary keeps the lower score.
pub fn health_score(cr: f64) -> f64 {
    if cr <= 110.0 {
        0.0
    } else if cr <= 125.0 {
        25.0
    } else if cr <= 150.0 {
        50.0
    } else if cr <= 200.0 {
        75.0
    } else {
        100.0
    }
}

pub fn risk_level(cr: f64) -> RiskLevel {
    if cr <= 105.0 {
        RiskLevel::Critical
    } else if cr <= 110.0 {
        RiskLevel::VeryHigh
    } else if cr <= 125.0 {
        RiskLevel::High
    } else if cr <= 150.0 {
        RiskLevel::Medium
    } else if cr <= 200.0 {
        RiskLevel::Low
    } else {
        RiskLevel::VeryLow
    }
}

pub fn risk_penalty(risk_events: i64) -> f64 {
    (100.0 - risk_events as f64 * 10.0).max(0.0)
}

pub fn age_bonus(days_open: f64) -> f64 {
    (days_open / 30.0 * 100.0).min(100.0)
}

pub fn stability_from_lowest(lowest_cr: f64) -> f64 {
    (lowest_cr - 100.0).clamp(0.0, 100.0)
}

/// Weighted composite, normalized by the weight sum so a drifted weight
/// table cannot push the score outside its components' range.
pub fn performance_score(
    health: f64,
    stability: f64,
    risk_penalty: f64,
    age_bonus: f64,
) -> f64 {
    let total_weight = PERFORMANCE_WEIGHT_HEALTH
        + PERFORMANCE_WEIGHT_STABILITY
        + PERFORMANCE_WEIGHT_RISK
        + PERFORMANCE_WEIGHT_AGE;
    let weighted = health * PERFORMANCE_WEIGHT_HEALTH
        + stability * PERFORMANCE_WEIGHT_STABILITY
        + risk_penalty * PERFORMANCE_WEIGHT_RISK
        + age_bonus * PERFORMANCE_WEIGHT_AGE;
    weighted / total_weight
}

/// Unweighted average of three clamped sub-scores: CR pressure, historical
/// risk events, operation-frequency volatility.
pub fn liquidation_risk(
    cr: f64,
    risk_events: i64,
    operation_count: i64,
    days_open: f64,
) -> f64 {
    let cr_risk = (110.0 / (cr + 1.0) * 100.0).clamp(0.0, 100.0);
    let event_risk = (risk_events as f64 * 15.0).clamp(0.0, 100.0);
    let volatility = (operation_count as f64 / (days_open + 1.0) * 10.0)
        .clamp(0.0, 100.0);
    (cr_risk + event_risk + volatility) / 3.0
}

/// Price at which the trove hits the 110% liquidation threshold.
pub fn liquidation_price(collateral: f64, debt: f64) -> f64 {
    if collateral <= 0.0 {
        return 0.0;
    }
    debt * 1.1 / collateral
}

pub fn safety_margin(current_price: f64, liquidation_price: f64) -> f64 {
    if current_price <= 0.0 {
        return 0.0;
    }
    ((current_price - liquidation_price) / current_price * 100.0).max(0.0)
}

pub fn amount_tier(whole: f64) -> AmountTier {
    if whole < TIER_BOUNDARIES[0] {
        AmountTier::Dust
    } else if whole < TIER_BOUNDARIES[1] {
        AmountTier::Micro
    } else if whole < TIER_BOUNDARIES[2] {
        AmountTier::Small
    } else if whole < TIER_BOUNDARIES[3] {
        AmountTier::Medium
    } else if whole < TIER_BOUNDARIES[4] {
        AmountTier::Large
    } else if whole < TIER_BOUNDARIES[5] {
        AmountTier::Whale
    } else {
        AmountTier::Institutional
    }
}

pub fn tier_risk_weight(tier: AmountTier) -> f64 {
    TIER_RISK_WEIGHTS[tier as usize]
}

/// 1.2 inside the half-open off-hours window, applied once after all
/// additive risk components. A window with start > end wraps midnight
/// ([start, 24) ∪ [0, end)); otherwise it is the plain [start, end).
pub fn off_hours_multiplier(hour: u32, start: u32, end: u32) -> f64 {
    let off_hours = if start <= end {
        hour >= start && hour < end
    } else {
        hour >= start || hour < end
    };
    if off_hours {
        1.2
    } else {
        1.0
    }
}

/// Additive risk contribution of the transaction category itself.
pub fn category_risk_weight(category: TransactionCategory) -> f64 {
    match category {
        TransactionCategory::InstitutionalOperation => 20.0,
        TransactionCategory::BridgeDeposit
        | TransactionCategory::BridgeWithdrawal => 15.0,
        TransactionCategory::LiquidationReward
        | TransactionCategory::Liquidation => 10.0,
        TransactionCategory::DexSwapIn | TransactionCategory::DexSwapOut => {
            5.0
        },
        _ => 0.0,
    }
}

/// Per-event risk score: additive tier and category components, then the
/// off-hours multiplier once, clamped to [0, 100].
pub fn event_risk(
    whole_amount: f64,
    category: TransactionCategory,
    hour: u32,
    off_hours_start: u32,
    off_hours_end: u32,
) -> f64 {
    let additive = tier_risk_weight(amount_tier(whole_amount))
        + category_risk_weight(category);
    let multiplier =
        off_hours_multiplier(hour, off_hours_start, off_hours_end);
    (additive * multiplier).clamp(0.0, 100.0)
}

pub fn composability_score(ecosystems_touched: usize) -> f64 {
    (ecosystems_touched as f64 * 20.0).min(100.0)
}

/// Exponential smoothing; `alpha` is the weight of the new observation.
pub fn smooth(prev: f64, new: f64, alpha: f64) -> f64 {
    alpha * new + (1.0 - alpha) * prev
}

pub fn annualized_yield(gain_whole: f64, avg_balance_whole: f64) -> f64 {
    if avg_balance_whole <= 0.0 {
        return 0.0;
    }
    gain_whole / avg_balance_whole * 365.0 * 100.0
}

pub fn influence_score(volume_whole: f64, tx_count: i64) -> f64 {
    let volume_component = (volume_whole / 1_000_000.0 * 50.0).min(50.0);
    let activity_component = (tx_count as f64 / 1_000.0 * 50.0).min(50.0);
    (volume_component + activity_component).clamp(0.0, 100.0)
}

/// 50% consistency-by-duration, 50% size, capped at 100 each.
pub fn position_performance(days_active: f64, avg_balance_whole: f64) -> f64 {
    let duration = (days_active / 365.0 * 100.0).min(100.0);
    let size = (avg_balance_whole / 10_000.0 * 100.0).min(100.0);
    duration * 0.5 + size * 0.5
}

pub fn staking_strategy(
    avg_balance_whole: f64,
    days_active: f64,
    yield_rate: f64,
    operation_count: i64,
) -> StakingStrategy {
    if avg_balance_whole >= 100_000.0 {
        StakingStrategy::WhaleStaker
    } else if days_active >= 180.0 {
        StakingStrategy::LongTermHolder
    } else if yield_rate > 20.0 {
        StakingStrategy::YieldFarmer
    } else if operation_count as f64 / (days_active + 1.0) > 0.15 {
        StakingStrategy::ActiveManager
    } else {
        StakingStrategy::CasualStaker
    }
}

/// Fixed priority order, first match wins.
pub fn user_type(
    dex_count: i64,
    bridge_count: i64,
    defi_count: i64,
    protocol_count: i64,
    total_count: i64,
) -> UserType {
    if total_count <= 0 {
        return UserType::RetailUser;
    }
    let total = total_count as f64;
    if dex_count as f64 / total > 0.6 {
        UserType::DexTrader
    } else if bridge_count > 5 {
        UserType::BridgeUser
    } else if defi_count > 10 {
        UserType::DefiUser
    } else if protocol_count as f64 / total > 0.8 {
        UserType::ProtocolNative
    } else if total_count > 100 {
        UserType::PowerUser
    } else {
        UserType::RetailUser
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratio_sentinel_on_zero_debt() {
        let cr = collateral_ratio(1000.0, 0.0);
        assert_eq!(cr, RATIO_SENTINEL);
        assert!(cr.is_finite());
    }

    #[test]
    fn ratio_plain_division() {
        assert!((collateral_ratio(2000.0, 1000.0) - 200.0).abs() < 1e-9);
        assert!((collateral_ratio(1100.0, 1000.0) - 110.0).abs() < 1e-9);
    }

    #[test]
    fn health_bands_inclusive_at_upper_edge() {
        assert_eq!(health_score(100.0), 0.0);
        assert_eq!(health_score(110.0), 0.0);
        assert_eq!(health_score(120.0), 25.0);
        assert_eq!(health_score(130.0), 50.0);
        assert_eq!(health_score(200.0), 75.0);
        assert_eq!(health_score(201.0), 100.0);
        assert_eq!(health_score(RATIO_SENTINEL), 100.0);
    }

    #[test]
    fn risk_level_bands() {
        assert_eq!(risk_level(100.0), RiskLevel::Critical);
        assert_eq!(risk_level(108.0), RiskLevel::VeryHigh);
        assert_eq!(risk_level(120.0), RiskLevel::High);
        assert_eq!(risk_level(140.0), RiskLevel::Medium);
        assert_eq!(risk_level(200.0), RiskLevel::Low);
        assert_eq!(risk_level(250.0), RiskLevel::VeryLow);
    }

    #[test]
    fn performance_weights_sum_to_one() {
        let score = performance_score(100.0, 100.0, 100.0, 100.0);
        assert!((score - 100.0).abs() < 1e-9);
    }

    #[test]
    fn performance_weighting() {
        // Only health at 100: 0.4 * 100 / 1.0.
        let score = performance_score(100.0, 0.0, 0.0, 0.0);
        assert!((score - 40.0).abs() < 1e-9);
    }

    #[test]
    fn tier_boundary_falls_into_higher_tier() {
        assert_eq!(amount_tier(100.0), AmountTier::Medium);
        assert_eq!(amount_tier(99.999), AmountTier::Small);
        assert_eq!(amount_tier(0.5), AmountTier::Dust);
        assert_eq!(amount_tier(1.0), AmountTier::Micro);
        assert_eq!(amount_tier(1_000_000.0), AmountTier::Institutional);
        assert_eq!(amount_tier(999_999.0), AmountTier::Whale);
    }

    #[test]
    fn tier_weights_lookup() {
        assert_eq!(tier_risk_weight(AmountTier::Dust), 0.0);
        assert_eq!(tier_risk_weight(AmountTier::Institutional), 60.0);
    }

    #[test]
    fn off_hours_window_edges() {
        assert_eq!(off_hours_multiplier(21, 22, 6), 1.0);
        assert_eq!(off_hours_multiplier(22, 22, 6), 1.2);
        assert_eq!(off_hours_multiplier(0, 22, 6), 1.2);
        assert_eq!(off_hours_multiplier(5, 22, 6), 1.2);
        assert_eq!(off_hours_multiplier(6, 22, 6), 1.0);
        assert_eq!(off_hours_multiplier(12, 22, 6), 1.0);
    }

    #[test]
    fn off_hours_window_without_midnight_wrap() {
        assert_eq!(off_hours_multiplier(0, 1, 5), 1.0);
        assert_eq!(off_hours_multiplier(1, 1, 5), 1.2);
        assert_eq!(off_hours_multiplier(4, 1, 5), 1.2);
        assert_eq!(off_hours_multiplier(5, 1, 5), 1.0);
        assert_eq!(off_hours_multiplier(12, 1, 5), 1.0);
    }

    #[test]
    fn composability_capped() {
        assert_eq!(composability_score(0), 0.0);
        assert_eq!(composability_score(3), 60.0);
        assert_eq!(composability_score(5), 100.0);
        assert_eq!(composability_score(7), 100.0);
    }

    #[test]
    fn liquidation_risk_clamps_sub_scores() {
        // Sentinel CR drives the CR component to ~0; 10 risk events clamp
        // the event component at 100.
        let risk = liquidation_risk(RATIO_SENTINEL, 10, 0, 100.0);
        assert!(risk < 34.0);
        assert!(risk > 33.0);
    }

    #[test]
    fn yield_rate_math() {
        // 1 token gained on a 365-token average balance: 100% annualized.
        let y = annualized_yield(1.0, 365.0);
        assert!((y - 100.0).abs() < 1e-9);
        assert_eq!(annualized_yield(1.0, 0.0), 0.0);
    }

    #[test]
    fn smoothing_weights() {
        assert!((smooth(100.0, 0.0, 0.2) - 80.0).abs() < 1e-9);
        assert!((smooth(0.0, 100.0, 0.1) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn user_type_priority_order() {
        // DEX ratio wins even when bridge count also qualifies.
        assert_eq!(user_type(70, 10, 0, 0, 100), UserType::DexTrader);
        assert_eq!(user_type(0, 6, 0, 0, 10), UserType::BridgeUser);
        assert_eq!(user_type(0, 0, 11, 0, 20), UserType::DefiUser);
        assert_eq!(user_type(0, 0, 0, 9, 10), UserType::ProtocolNative);
        assert_eq!(user_type(10, 0, 0, 10, 101), UserType::PowerUser);
        assert_eq!(user_type(1, 0, 0, 1, 10), UserType::RetailUser);
    }

    #[test]
    fn event_risk_applies_multiplier_after_additive_components() {
        // WHALE tier (40) + bridge category (15) = 55; off-hours * 1.2.
        let day = event_risk(
            200_000.0,
            TransactionCategory::BridgeDeposit,
            12,
            22,
            6,
        );
        assert!((day - 55.0).abs() < 1e-9);

        let night = event_risk(
            200_000.0,
            TransactionCategory::BridgeDeposit,
            23,
            22,
            6,
        );
        assert!((night - 66.0).abs() < 1e-9);
    }

    #[test]
    fn safety_margin_never_negative() {
        assert_eq!(safety_margin(4.0, 2.0), 50.0);
        assert_eq!(safety_margin(2.0, 4.0), 0.0);
        assert_eq!(safety_margin(0.0, 1.0), 0.0);
    }
}
