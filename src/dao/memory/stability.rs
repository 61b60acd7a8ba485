use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};

use super::Table;
use crate::model::{SP_Deposit, SP_Operation};

impl Table<SP_Deposit> {
    pub fn by_owner(&self, owner: &str) -> Option<&SP_Deposit> {
        self.get(&owner.to_lowercase())
    }

    pub fn by_owner_mut(&mut self, owner: &str) -> Option<&mut SP_Deposit> {
        self.get_mut(&owner.to_lowercase())
    }

    pub fn get_or_create(
        &mut self,
        owner: &str,
        height: i64,
        at: DateTime<Utc>,
    ) -> &mut SP_Deposit {
        self.entry_or_insert_with(&owner.to_lowercase(), || SP_Deposit {
            SP_owner: owner.to_lowercase(),
            SP_balance: BigDecimal::zero(),
            SP_total_deposited: BigDecimal::zero(),
            SP_total_withdrawn: BigDecimal::zero(),
            SP_total_gains: BigDecimal::zero(),
            SP_avg_balance: 0.0,
            SP_yield_rate: 0.0,
            SP_performance_score: 0.0,
            SP_operation_count: 0,
            SP_first_deposit_height: height,
            SP_first_deposit_at: at,
            SP_last_updated_at: at,
        })
    }
}

impl Table<SP_Operation> {
    pub fn append(&mut self, ledger_key: String, row: SP_Operation) {
        self.insert(ledger_key, row);
    }
}
