//! In-memory keyed store.
//!
//! Stands in for the external storage/query layer: upsert-by-key tables,
//! one per entity type. Events are applied strictly one at a time, so no
//! interior locking is needed; handlers receive the store as `&mut`, the
//! same way they would receive an open database transaction.

mod account;
mod bridge;
mod dex;
mod market;
mod stability;
mod staking;
mod stats;
mod transaction;
mod trove;

use std::collections::HashMap;

use crate::model::{
    AC_Account, BR_Operation, BR_Profile, DX_Pool_Metrics, DX_Profile,
    DX_Trade, ES_Daily_State, MP_Condition, PS_State, SP_Deposit,
    SP_Operation, ST_Operation, ST_Stake, TV_Operation, TV_Trove,
    TX_Transaction,
};

/// Key of the protocol-wide stats singleton.
pub const PROTOCOL_STATS_ID: &str = "protocol";

#[derive(Debug)]
pub struct Table<T> {
    rows: HashMap<String, T>,
}

// Derived `Default` would demand `T: Default` from every entity struct;
// an empty table needs no such bound.
impl<T> Default for Table<T> {
    fn default() -> Table<T> {
        Table::new()
    }
}

impl<T> Table<T> {
    pub fn new() -> Table<T> {
        Table {
            rows: HashMap::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.rows.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut T> {
        self.rows.get_mut(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    pub fn insert(&mut self, key: String, row: T) {
        self.rows.insert(key, row);
    }

    pub fn entry_or_insert_with(
        &mut self,
        key: &str,
        default: impl FnOnce() -> T,
    ) -> &mut T {
        self.rows.entry(key.to_owned()).or_insert_with(default)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }
}

#[derive(Debug, Default)]
pub struct Database {
    pub account: Table<AC_Account>,
    pub transaction: Table<TX_Transaction>,
    pub trove: Table<TV_Trove>,
    pub trove_operation: Table<TV_Operation>,
    pub stability_deposit: Table<SP_Deposit>,
    pub stability_operation: Table<SP_Operation>,
    pub stake: Table<ST_Stake>,
    pub stake_operation: Table<ST_Operation>,
    pub protocol_stats: Table<PS_State>,
    pub daily_stats: Table<ES_Daily_State>,
    pub market_condition: Table<MP_Condition>,
    pub dex_trade: Table<DX_Trade>,
    pub dex_profile: Table<DX_Profile>,
    pub pool_metrics: Table<DX_Pool_Metrics>,
    pub bridge_operation: Table<BR_Operation>,
    pub bridge_profile: Table<BR_Profile>,
}

impl Database {
    pub fn new() -> Database {
        Database::default()
    }
}
