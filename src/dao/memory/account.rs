use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};

use super::Table;
use crate::model::AC_Account;
use crate::types::UserType;

impl Table<AC_Account> {
    /// Accounts are created lazily on first reference and never deleted.
    pub fn get_or_create(
        &mut self,
        address: &str,
        height: i64,
        at: DateTime<Utc>,
    ) -> &mut AC_Account {
        self.entry_or_insert_with(&address.to_lowercase(), || AC_Account {
            AC_address: address.to_lowercase(),
            AC_balance: BigDecimal::zero(),
            AC_tx_count: 0,
            AC_volume_in: BigDecimal::zero(),
            AC_volume_out: BigDecimal::zero(),
            AC_volume_net: BigDecimal::zero(),
            AC_first_seen_height: height,
            AC_first_seen_at: at,
            AC_last_active_height: height,
            AC_last_active_at: at,
            AC_protocol_tx_count: 0,
            AC_dex_tx_count: 0,
            AC_bridge_tx_count: 0,
            AC_p2p_tx_count: 0,
            AC_defi_tx_count: 0,
            AC_protocol_volume: BigDecimal::zero(),
            AC_dex_volume: BigDecimal::zero(),
            AC_bridge_volume: BigDecimal::zero(),
            AC_p2p_volume: BigDecimal::zero(),
            AC_defi_volume: BigDecimal::zero(),
            AC_user_type: UserType::RetailUser,
            AC_risk_score: 0.0,
            AC_composability_score: 0.0,
            AC_influence_score: 0.0,
        })
    }

    pub fn by_address(&self, address: &str) -> Option<&AC_Account> {
        self.get(&address.to_lowercase())
    }
}
