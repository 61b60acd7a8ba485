use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};

use super::Table;
use crate::model::{DX_Pool_Metrics, DX_Profile, DX_Trade};

impl Table<DX_Trade> {
    pub fn append(&mut self, ledger_key: String, row: DX_Trade) {
        self.insert(ledger_key, row);
    }
}

impl Table<DX_Profile> {
    pub fn get_or_create(
        &mut self,
        address: &str,
        at: DateTime<Utc>,
    ) -> &mut DX_Profile {
        self.entry_or_insert_with(&address.to_lowercase(), || DX_Profile {
            DX_address: address.to_lowercase(),
            DX_volume: BigDecimal::zero(),
            DX_trade_count: 0,
            DX_last_active_at: at,
        })
    }
}

impl Table<DX_Pool_Metrics> {
    pub fn get_or_create(
        &mut self,
        pool: &str,
        at: DateTime<Utc>,
    ) -> &mut DX_Pool_Metrics {
        self.entry_or_insert_with(&pool.to_lowercase(), || DX_Pool_Metrics {
            DX_pool: pool.to_lowercase(),
            DX_volume: BigDecimal::zero(),
            DX_trade_count: 0,
            DX_updated_at: at,
        })
    }
}
