use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};

use super::Table;
use crate::model::{ST_Operation, ST_Stake};
use crate::types::StakingStrategy;

impl Table<ST_Stake> {
    pub fn by_owner(&self, owner: &str) -> Option<&ST_Stake> {
        self.get(&owner.to_lowercase())
    }

    pub fn by_owner_mut(&mut self, owner: &str) -> Option<&mut ST_Stake> {
        self.get_mut(&owner.to_lowercase())
    }

    pub fn get_or_create(
        &mut self,
        owner: &str,
        height: i64,
        at: DateTime<Utc>,
    ) -> &mut ST_Stake {
        self.entry_or_insert_with(&owner.to_lowercase(), || ST_Stake {
            ST_owner: owner.to_lowercase(),
            ST_balance: BigDecimal::zero(),
            ST_total_staked: BigDecimal::zero(),
            ST_total_unstaked: BigDecimal::zero(),
            ST_total_gains: BigDecimal::zero(),
            ST_avg_balance: 0.0,
            ST_yield_rate: 0.0,
            ST_performance_score: 0.0,
            ST_strategy: StakingStrategy::CasualStaker,
            ST_operation_count: 0,
            ST_first_stake_height: height,
            ST_first_stake_at: at,
            ST_last_updated_at: at,
        })
    }
}

impl Table<ST_Operation> {
    pub fn append(&mut self, ledger_key: String, row: ST_Operation) {
        self.insert(ledger_key, row);
    }
}
