//! Event dispatch.
//!
//! One envelope in, one atomic batch of aggregate updates out. Validation
//! happens before any table is touched, so a rejected event leaves the
//! store exactly as it was. The transaction ledger's composite key is
//! checked first; a key that already exists means the event was aggregated
//! in a previous run and the envelope is dropped.

pub mod account;
pub mod bridge_operation;
pub mod dex_trade;
pub mod price_feed;
pub mod redemption;
pub mod stability_deposit;
pub mod stability_gains;
pub mod stake_changed;
pub mod staking_gains;
pub mod stats;
pub mod transfer;
pub mod trove_liquidated;
pub mod trove_updated;

use std::str::FromStr;

use chrono::{DateTime, Utc};
use tracing::warn;

use crate::configuration::{AppState, State};
use crate::dao::Database;
use crate::error::Error;
use crate::helpers::parse_timestamp;
use crate::types::{EventEnvelope, EventsType};

/// Envelope metadata with the string-typed wire fields already parsed.
#[derive(Debug)]
pub struct EventMeta {
    pub tx_hash: String,
    pub log_index: i64,
    pub height: i64,
    pub at: DateTime<Utc>,
    pub contract: String,
}

impl EventMeta {
    fn from_envelope(envelope: &EventEnvelope) -> Result<EventMeta, Error> {
        Ok(EventMeta {
            tx_hash: envelope.tx_hash.clone(),
            log_index: envelope.log_index.parse()?,
            height: envelope.height.parse()?,
            at: parse_timestamp(&envelope.at)?,
            contract: envelope.contract.clone(),
        })
    }

    pub fn ledger_key(&self) -> String {
        format!("{}:{}", self.tx_hash, self.log_index)
    }
}

/// Applies one event. Returns `Ok(true)` when the event was aggregated,
/// `Ok(false)` when it was skipped (duplicate or malformed); only errors
/// that indicate a broken run (I/O, configuration) propagate.
pub fn handle_event(
    app_state: &AppState<State>,
    envelope: &EventEnvelope,
    db: &mut Database,
) -> Result<bool, Error> {
    match apply(app_state, envelope, db) {
        Ok(applied) => Ok(applied),
        Err(error) if error.is_skippable() => {
            warn!(
                key = %envelope.ledger_key(),
                event = %envelope.r#type,
                %error,
                "event skipped",
            );
            Ok(false)
        },
        Err(error) => Err(error),
    }
}

fn apply(
    app_state: &AppState<State>,
    envelope: &EventEnvelope,
    db: &mut Database,
) -> Result<bool, Error> {
    let event_type = EventsType::from_str(&envelope.r#type)?;
    let meta = EventMeta::from_envelope(envelope)?;

    // The existence check must use the same canonical key the handlers
    // store under; the raw wire string may spell the index differently.
    if db.transaction.exists(&meta.ledger_key()) {
        warn!(
            key = %meta.ledger_key(),
            "duplicate event dropped",
        );
        return Ok(false);
    }

    let attributes = &envelope.attributes;

    match event_type {
        EventsType::Transfer => {
            transfer::parse_and_apply(app_state, &meta, attributes, db)?
        },
        EventsType::Trove_Updated => {
            trove_updated::parse_and_apply(app_state, &meta, attributes, db)?
        },
        EventsType::Trove_Liquidated => trove_liquidated::parse_and_apply(
            app_state, &meta, attributes, db,
        )?,
        EventsType::Redemption => {
            redemption::parse_and_apply(app_state, &meta, attributes, db)?
        },
        EventsType::SP_Deposit_Updated => stability_deposit::parse_and_apply(
            app_state, &meta, attributes, db,
        )?,
        EventsType::SP_Gains_Withdrawn => stability_gains::parse_and_apply(
            app_state, &meta, attributes, db,
        )?,
        EventsType::ST_Stake_Changed => {
            stake_changed::parse_and_apply(app_state, &meta, attributes, db)?
        },
        EventsType::ST_Gains_Withdrawn => staking_gains::parse_and_apply(
            app_state, &meta, attributes, db,
        )?,
        EventsType::Price_Updated => {
            price_feed::parse_and_apply(app_state, &meta, attributes, db)?
        },
        EventsType::DEX_Trade => {
            dex_trade::parse_and_apply(app_state, &meta, attributes, db)?
        },
        EventsType::Bridge_Operation => bridge_operation::parse_and_apply(
            app_state, &meta, attributes, db,
        )?,
    }

    Ok(true)
}

#[cfg(test)]
mod tests {
    use bigdecimal::BigDecimal;
    use serde_json::{json, Value};
    use std::str::FromStr;

    use super::*;
    use crate::classify::ZERO_ADDRESS;
    use crate::configuration::Config;
    use crate::types::{RiskLevel, TransactionCategory, TroveStatus};

    const ALICE: &str = "0x00000000000000000000000000000000000000aa";
    const BOB: &str = "0x00000000000000000000000000000000000000bb";
    const CAROL: &str = "0x00000000000000000000000000000000000000cc";
    // Midday UTC, outside the off-hours window.
    const NOON: i64 = 1_755_000_000 - 1_755_000_000 % 86_400 + 43_200;

    fn state() -> AppState<State> {
        AppState::new(State::new(Config::for_tests()).unwrap())
    }

    fn units(whole: u64) -> String {
        format!("{}{}", whole, "0".repeat(18))
    }

    fn envelope(
        event: &str,
        tx: &str,
        log_index: i64,
        at: i64,
        contract: &str,
        attributes: Value,
    ) -> EventEnvelope {
        EventEnvelope {
            r#type: event.to_owned(),
            height: "100".to_owned(),
            at: at.to_string(),
            tx_hash: tx.to_owned(),
            log_index: log_index.to_string(),
            contract: contract.to_owned(),
            attributes,
        }
    }

    fn transfer(
        tx: &str,
        at: i64,
        from: &str,
        to: &str,
        value: String,
    ) -> EventEnvelope {
        envelope(
            "transfer",
            tx,
            0,
            at,
            "0x00000000000000000000000000000000000000f0",
            json!({ "from": from, "to": to, "value": value }),
        )
    }

    #[test]
    fn mint_transfer_and_trove_scenario() {
        let app_state = state();
        let mut db = Database::new();

        let mint = transfer("0xa1", NOON, ZERO_ADDRESS, ALICE, units(1000));
        assert!(handle_event(&app_state, &mint, &mut db).unwrap());

        let alice = db.account.by_address(ALICE).unwrap();
        assert_eq!(
            alice.AC_balance,
            BigDecimal::from_str(&units(1000)).unwrap()
        );
        let stats = db.protocol_stats.snapshot().unwrap();
        assert_eq!(stats.PS_lifetime_mint_count, 1);
        assert_eq!(
            stats.PS_total_supply,
            BigDecimal::from_str(&units(1000)).unwrap()
        );
        let row = db.transaction.get("0xa1:0").unwrap();
        assert_eq!(row.TX_category, TransactionCategory::Mint);

        let pay = transfer("0xa2", NOON + 60, ALICE, BOB, units(400));
        assert!(handle_event(&app_state, &pay, &mut db).unwrap());

        let alice = db.account.by_address(ALICE).unwrap();
        let bob = db.account.by_address(BOB).unwrap();
        assert_eq!(
            alice.AC_balance,
            BigDecimal::from_str(&units(600)).unwrap()
        );
        assert_eq!(
            bob.AC_balance,
            BigDecimal::from_str(&units(400)).unwrap()
        );
        let row = db.transaction.get("0xa2:0").unwrap();
        assert_eq!(row.TX_category, TransactionCategory::P2pTransfer);

        let open = envelope(
            "trove-updated",
            "0xa3",
            0,
            NOON + 120,
            &app_state.config.borrower_operations_contract,
            json!({
                "borrower": ALICE,
                "collateral": units(2000),
                "debt": units(1000),
            }),
        );
        assert!(handle_event(&app_state, &open, &mut db).unwrap());

        let trove = db.trove.by_owner(ALICE).unwrap();
        assert_eq!(trove.TV_status, TroveStatus::Active);
        assert!((trove.TV_collateral_ratio - 200.0).abs() < 1e-9);
        assert!((trove.TV_health_score - 75.0).abs() < 1e-9);
        assert_eq!(trove.TV_risk_level, RiskLevel::Low);

        let stats = db.protocol_stats.snapshot().unwrap();
        assert_eq!(stats.PS_active_trove_count, 1);
    }

    #[test]
    fn replayed_event_is_dropped() {
        let app_state = state();
        let mut db = Database::new();

        let mint = transfer("0xb1", NOON, ZERO_ADDRESS, ALICE, units(10));
        assert!(handle_event(&app_state, &mint, &mut db).unwrap());
        assert!(!handle_event(&app_state, &mint, &mut db).unwrap());

        let alice = db.account.by_address(ALICE).unwrap();
        assert_eq!(
            alice.AC_balance,
            BigDecimal::from_str(&units(10)).unwrap()
        );
        assert_eq!(alice.AC_tx_count, 1);
        assert_eq!(
            db.protocol_stats.snapshot().unwrap().PS_lifetime_mint_count,
            1
        );
    }

    #[test]
    fn replay_with_noncanonical_log_index_is_dropped() {
        let app_state = state();
        let mut db = Database::new();

        // "00" parses to the same index the ledger row is stored under;
        // the guard must compare canonical keys, not wire spellings.
        let mut mint = transfer("0xb2", NOON, ZERO_ADDRESS, ALICE, units(10));
        mint.log_index = "00".to_owned();

        assert!(handle_event(&app_state, &mint, &mut db).unwrap());
        assert!(!handle_event(&app_state, &mint, &mut db).unwrap());

        let alice = db.account.by_address(ALICE).unwrap();
        assert_eq!(
            alice.AC_balance,
            BigDecimal::from_str(&units(10)).unwrap()
        );
        assert_eq!(
            db.protocol_stats.snapshot().unwrap().PS_lifetime_mint_count,
            1
        );
        assert_eq!(db.transaction.len(), 1);
    }

    #[test]
    fn transfers_conserve_total_balance() {
        let app_state = state();
        let mut db = Database::new();

        let events = [
            transfer("0xc1", NOON, ZERO_ADDRESS, ALICE, units(1000)),
            transfer("0xc2", NOON + 10, ALICE, BOB, units(300)),
            transfer("0xc3", NOON + 20, BOB, CAROL, units(150)),
        ];
        for event in &events {
            assert!(handle_event(&app_state, event, &mut db).unwrap());
        }

        let total = db
            .account
            .values()
            .fold(BigDecimal::from(0), |acc, account| {
                acc + &account.AC_balance
            });
        assert_eq!(total, BigDecimal::from_str(&units(1000)).unwrap());
    }

    #[test]
    fn active_trove_count_moves_on_status_transitions_only() {
        let app_state = state();
        let mut db = Database::new();
        let contract =
            app_state.config.borrower_operations_contract.clone();

        let update = |tx: &str, at: i64, collateral: u64, debt: u64| {
            envelope(
                "trove-updated",
                tx,
                0,
                at,
                &contract,
                json!({
                    "borrower": BOB,
                    "collateral": units(collateral),
                    "debt": units(debt),
                }),
            )
        };

        handle_event(&app_state, &update("0xd1", NOON, 300, 100), &mut db)
            .unwrap();
        assert_eq!(
            db.protocol_stats.snapshot().unwrap().PS_active_trove_count,
            1
        );

        // Two adjustments while already active.
        handle_event(
            &app_state,
            &update("0xd2", NOON + 10, 350, 100),
            &mut db,
        )
        .unwrap();
        handle_event(
            &app_state,
            &update("0xd3", NOON + 20, 350, 150),
            &mut db,
        )
        .unwrap();
        assert_eq!(
            db.protocol_stats.snapshot().unwrap().PS_active_trove_count,
            1
        );

        handle_event(&app_state, &update("0xd4", NOON + 30, 0, 0), &mut db)
            .unwrap();
        let stats = db.protocol_stats.snapshot().unwrap();
        assert_eq!(stats.PS_active_trove_count, 0);
        assert_eq!(
            db.trove.by_owner(BOB).unwrap().TV_status,
            TroveStatus::ClosedByOwner
        );

        // Reopening flips the same record back to active.
        handle_event(
            &app_state,
            &update("0xd5", NOON + 40, 200, 100),
            &mut db,
        )
        .unwrap();
        let trove = db.trove.by_owner(BOB).unwrap();
        assert_eq!(trove.TV_status, TroveStatus::Active);
        assert_eq!(
            db.protocol_stats.snapshot().unwrap().PS_active_trove_count,
            1
        );
    }

    #[test]
    fn liquidation_closes_trove_and_counts() {
        let app_state = state();
        let mut db = Database::new();

        let open = envelope(
            "trove-updated",
            "0xe1",
            0,
            NOON,
            &app_state.config.borrower_operations_contract,
            json!({
                "borrower": BOB,
                "collateral": units(150),
                "debt": units(100),
            }),
        );
        handle_event(&app_state, &open, &mut db).unwrap();

        let liquidate = envelope(
            "trove-liquidated",
            "0xe2",
            0,
            NOON + 60,
            &app_state.config.trove_manager_contract,
            json!({
                "borrower": BOB,
                "liquidated-collateral": units(150),
                "liquidated-debt": units(100),
            }),
        );
        assert!(handle_event(&app_state, &liquidate, &mut db).unwrap());

        let trove = db.trove.by_owner(BOB).unwrap();
        assert_eq!(trove.TV_status, TroveStatus::ClosedByLiquidation);
        assert_eq!(trove.TV_debt, BigDecimal::from(0));
        assert_eq!(trove.TV_risk_events, 1);

        // The liquidation enters the CR history as an observation of the
        // reported amounts: 150/100 at both operations keeps the average
        // at 150, and the derived scores follow that ratio.
        assert_eq!(trove.TV_operation_count, 2);
        assert!((trove.TV_collateral_ratio - 150.0).abs() < 1e-9);
        assert!((trove.TV_avg_collateral_ratio - 150.0).abs() < 1e-9);
        assert!((trove.TV_lowest_collateral_ratio - 150.0).abs() < 1e-9);
        assert!((trove.TV_health_score - 50.0).abs() < 1e-9);
        assert_eq!(trove.TV_risk_level, RiskLevel::Medium);

        let stats = db.protocol_stats.snapshot().unwrap();
        assert_eq!(stats.PS_liquidation_count, 1);
        assert_eq!(stats.PS_active_trove_count, 0);
        assert_eq!(stats.PS_total_debt, BigDecimal::from(0));

        let day = crate::helpers::day_id(&crate::helpers::parse_timestamp(
            &(NOON + 60).to_string(),
        )
        .unwrap());
        assert_eq!(db.daily_stats.by_day(day).unwrap().ES_liquidation_count, 1);
    }

    #[test]
    fn stability_deposit_lifecycle() {
        let app_state = state();
        let mut db = Database::new();
        let pool = app_state.config.stability_pool_contract.clone();

        let deposit = envelope(
            "stability-deposit-updated",
            "0xf1",
            0,
            NOON,
            &pool,
            json!({ "depositor": CAROL, "new-deposit": units(500) }),
        );
        handle_event(&app_state, &deposit, &mut db).unwrap();

        let record = db.stability_deposit.by_owner(CAROL).unwrap();
        assert_eq!(
            record.SP_balance,
            BigDecimal::from_str(&units(500)).unwrap()
        );
        assert!((record.SP_avg_balance - 500.0).abs() < 1e-9);
        assert_eq!(
            db.protocol_stats
                .snapshot()
                .unwrap()
                .PS_total_stability_deposits,
            BigDecimal::from_str(&units(500)).unwrap()
        );

        let withdraw = envelope(
            "stability-deposit-updated",
            "0xf2",
            0,
            NOON + 60,
            &pool,
            json!({ "depositor": CAROL, "new-deposit": units(200) }),
        );
        handle_event(&app_state, &withdraw, &mut db).unwrap();

        let record = db.stability_deposit.by_owner(CAROL).unwrap();
        assert_eq!(
            record.SP_balance,
            BigDecimal::from_str(&units(200)).unwrap()
        );
        assert_eq!(
            record.SP_total_withdrawn,
            BigDecimal::from_str(&units(300)).unwrap()
        );
        assert_eq!(record.SP_operation_count, 2);
        assert_eq!(
            db.protocol_stats
                .snapshot()
                .unwrap()
                .PS_total_stability_deposits,
            BigDecimal::from_str(&units(200)).unwrap()
        );
    }

    #[test]
    fn price_update_drives_system_health_and_candle() {
        let app_state = state();
        let mut db = Database::new();

        let open = envelope(
            "trove-updated",
            "0x91",
            0,
            NOON,
            &app_state.config.borrower_operations_contract,
            json!({
                "borrower": ALICE,
                "collateral": units(2000),
                "debt": units(1000),
            }),
        );
        handle_event(&app_state, &open, &mut db).unwrap();

        let price = envelope(
            "price-updated",
            "0x92",
            0,
            NOON + 60,
            "0x00000000000000000000000000000000000000e0",
            json!({ "price": "2.0" }),
        );
        assert!(handle_event(&app_state, &price, &mut db).unwrap());

        let stats = db.protocol_stats.snapshot().unwrap();
        assert!((stats.PS_last_price - 2.0).abs() < 1e-9);
        // 2000 collateral * 2.0 / 1000 debt * 100 = 400%.
        assert!((stats.PS_system_collateral_ratio - 400.0).abs() < 1e-6);

        let day = crate::helpers::day_id(
            &crate::helpers::parse_timestamp(&(NOON + 60).to_string())
                .unwrap(),
        );
        let candle = db.market_condition.by_day(day).unwrap();
        assert!((candle.MP_open - 2.0).abs() < 1e-9);
        assert!((candle.MP_close - 2.0).abs() < 1e-9);
        assert_eq!(candle.MP_update_count, 1);
    }

    #[test]
    fn daily_rollup_is_additive() {
        let app_state = state();
        let mut db = Database::new();

        handle_event(
            &app_state,
            &transfer("0x71", NOON, ZERO_ADDRESS, ALICE, units(100)),
            &mut db,
        )
        .unwrap();
        handle_event(
            &app_state,
            &transfer("0x72", NOON + 10, ALICE, BOB, units(40)),
            &mut db,
        )
        .unwrap();
        handle_event(
            &app_state,
            &transfer("0x73", NOON + 20, ALICE, CAROL, units(10)),
            &mut db,
        )
        .unwrap();

        let day = crate::helpers::day_id(
            &crate::helpers::parse_timestamp(&NOON.to_string()).unwrap(),
        );
        let daily = db.daily_stats.by_day(day).unwrap();
        assert_eq!(daily.ES_tx_count, 3);
        assert_eq!(daily.ES_mint_count, 1);
        assert_eq!(daily.ES_transfer_count, 2);
        assert_eq!(
            daily.ES_total_volume,
            BigDecimal::from_str(&units(150)).unwrap()
        );

        // A same-day position update counts into the day's tx total but is
        // not a token transfer.
        let open = envelope(
            "trove-updated",
            "0x74",
            0,
            NOON + 30,
            &app_state.config.borrower_operations_contract,
            json!({
                "borrower": ALICE,
                "collateral": units(300),
                "debt": units(100),
            }),
        );
        handle_event(&app_state, &open, &mut db).unwrap();

        let daily = db.daily_stats.by_day(day).unwrap();
        assert_eq!(daily.ES_tx_count, 4);
        assert_eq!(daily.ES_transfer_count, 2);
        assert_eq!(
            daily.ES_total_volume,
            BigDecimal::from_str(&units(150)).unwrap()
        );
    }

    #[test]
    fn dex_trade_updates_satellite_and_account() {
        let app_state = state();
        let mut db = Database::new();
        let dex = app_state.config.dex_addresses[0].clone();

        let trade = envelope(
            "dex-trade",
            "0x61",
            0,
            NOON,
            &dex,
            json!({
                "trader": ALICE,
                "pool": "0x00000000000000000000000000000000000000d1",
                "amount-in": units(100),
                "amount-out": units(99),
                "direction": "out",
            }),
        );
        assert!(handle_event(&app_state, &trade, &mut db).unwrap());

        let profile = db.dex_profile.get(ALICE).unwrap();
        assert_eq!(profile.DX_trade_count, 1);
        assert_eq!(
            profile.DX_volume,
            BigDecimal::from_str(&units(100)).unwrap()
        );
        let account = db.account.by_address(ALICE).unwrap();
        assert_eq!(account.AC_dex_tx_count, 1);
        let row = db.transaction.get("0x61:0").unwrap();
        assert_eq!(row.TX_category, TransactionCategory::DexSwapOut);
    }

    #[test]
    fn staking_gains_set_yield_and_strategy() {
        let app_state = state();
        let mut db = Database::new();
        let staking = app_state.config.staking_contract.clone();

        let stake = envelope(
            "stake-changed",
            "0x21",
            0,
            NOON,
            &staking,
            json!({ "staker": BOB, "new-stake": units(1000) }),
        );
        handle_event(&app_state, &stake, &mut db).unwrap();

        let record = db.stake.by_owner(BOB).unwrap();
        assert!((record.ST_avg_balance - 1000.0).abs() < 1e-9);
        assert_eq!(
            db.protocol_stats.snapshot().unwrap().PS_total_staked,
            BigDecimal::from_str(&units(1000)).unwrap()
        );

        let claim = envelope(
            "staking-gains-withdrawn",
            "0x22",
            0,
            NOON + 60,
            &staking,
            json!({
                "staker": BOB,
                "collateral-gain": "0",
                "stable-gain": units(10),
            }),
        );
        handle_event(&app_state, &claim, &mut db).unwrap();

        let record = db.stake.by_owner(BOB).unwrap();
        // First observation sets the rate directly: 10/1000 * 365 * 100.
        assert!((record.ST_yield_rate - 365.0).abs() < 1e-6);
        assert_eq!(
            record.ST_strategy,
            crate::types::StakingStrategy::YieldFarmer
        );
        assert_eq!(
            record.ST_total_gains,
            BigDecimal::from_str(&units(10)).unwrap()
        );
    }

    #[test]
    fn gains_claim_without_position_still_lands_in_ledger() {
        let app_state = state();
        let mut db = Database::new();
        let pool = app_state.config.stability_pool_contract.clone();

        let claim = envelope(
            "stability-gains-withdrawn",
            "0x31",
            0,
            NOON,
            &pool,
            json!({ "depositor": CAROL, "collateral-gain": units(5) }),
        );
        assert!(handle_event(&app_state, &claim, &mut db).unwrap());
        assert!(db.stability_deposit.by_owner(CAROL).is_none());
        assert!(db.transaction.exists("0x31:0"));
    }

    #[test]
    fn malformed_payload_is_skipped_without_side_effects() {
        let app_state = state();
        let mut db = Database::new();

        let bad = envelope(
            "transfer",
            "0x51",
            0,
            NOON,
            "0x00000000000000000000000000000000000000f0",
            json!({ "from": ALICE, "to": BOB, "value": "-5" }),
        );
        assert!(!handle_event(&app_state, &bad, &mut db).unwrap());
        assert!(db.transaction.is_empty());
        assert!(db.account.by_address(ALICE).is_none());
    }

    #[test]
    fn redemption_moves_protocol_totals_only() {
        let app_state = state();
        let mut db = Database::new();
        let manager = app_state.config.trove_manager_contract.clone();

        let redeem = envelope(
            "redemption",
            "0x81",
            0,
            NOON,
            &manager,
            json!({
                "redeemer": ALICE,
                "attempted-amount": units(120),
                "actual-amount": units(100),
                "collateral-sent": units(50),
                "fee": units(1),
            }),
        );
        assert!(handle_event(&app_state, &redeem, &mut db).unwrap());

        let stats = db.protocol_stats.snapshot().unwrap();
        assert_eq!(stats.PS_redemption_count, 1);
        assert_eq!(
            stats.PS_total_redeemed,
            BigDecimal::from_str(&units(100)).unwrap()
        );
        assert_eq!(
            stats.PS_total_collateral_redeemed,
            BigDecimal::from_str(&units(50)).unwrap()
        );

        // Redeeming more than attempted is rejected before any mutation.
        let bad = envelope(
            "redemption",
            "0x82",
            0,
            NOON + 10,
            &manager,
            json!({
                "redeemer": ALICE,
                "attempted-amount": units(10),
                "actual-amount": units(20),
                "collateral-sent": units(5),
                "fee": units(1),
            }),
        );
        assert!(!handle_event(&app_state, &bad, &mut db).unwrap());
        assert_eq!(
            db.protocol_stats.snapshot().unwrap().PS_redemption_count,
            1
        );
    }

    #[test]
    fn bridge_deposit_counts_as_outbound() {
        let app_state = state();
        let mut db = Database::new();
        let bridge = app_state.config.bridge_addresses[0].clone();

        let op = envelope(
            "bridge-operation",
            "0x85",
            0,
            NOON,
            &bridge,
            json!({
                "account": CAROL,
                "amount": units(100),
                "direction": "deposit",
            }),
        );
        assert!(handle_event(&app_state, &op, &mut db).unwrap());

        let profile = db.bridge_profile.get(&bridge).unwrap();
        assert_eq!(
            profile.BR_outbound_volume,
            BigDecimal::from_str(&units(100)).unwrap()
        );
        assert_eq!(profile.BR_op_count, 1);
        let account = db.account.by_address(CAROL).unwrap();
        assert_eq!(account.AC_bridge_tx_count, 1);
        let row = db.transaction.get("0x85:0").unwrap();
        assert_eq!(row.TX_category, TransactionCategory::BridgeDeposit);
    }

    #[test]
    fn unknown_event_type_is_skipped() {
        let app_state = state();
        let mut db = Database::new();

        let event = envelope(
            "unheard-of",
            "0x41",
            0,
            NOON,
            "0x00000000000000000000000000000000000000f0",
            json!({}),
        );
        assert!(!handle_event(&app_state, &event, &mut db).unwrap());
        assert!(db.transaction.is_empty());
    }
}
