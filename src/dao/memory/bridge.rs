use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};

use super::Table;
use crate::model::{BR_Operation, BR_Profile};

impl Table<BR_Operation> {
    pub fn append(&mut self, ledger_key: String, row: BR_Operation) {
        self.insert(ledger_key, row);
    }
}

impl Table<BR_Profile> {
    pub fn get_or_create(
        &mut self,
        address: &str,
        at: DateTime<Utc>,
    ) -> &mut BR_Profile {
        self.entry_or_insert_with(&address.to_lowercase(), || BR_Profile {
            BR_address: address.to_lowercase(),
            BR_inbound_volume: BigDecimal::zero(),
            BR_outbound_volume: BigDecimal::zero(),
            BR_op_count: 0,
            BR_last_active_at: at,
        })
    }
}
