use bigdecimal::{BigDecimal, Zero};
use chrono::{DateTime, Utc};

use super::Table;
use crate::model::{TV_Operation, TV_Trove};
use crate::score::RATIO_SENTINEL;
use crate::types::{RiskLevel, TroveStatus};

impl Table<TV_Trove> {
    pub fn by_owner(&self, owner: &str) -> Option<&TV_Trove> {
        self.get(&owner.to_lowercase())
    }

    pub fn by_owner_mut(&mut self, owner: &str) -> Option<&mut TV_Trove> {
        self.get_mut(&owner.to_lowercase())
    }

    /// One record per borrower; a reopened trove reuses the record.
    pub fn get_or_create(
        &mut self,
        owner: &str,
        height: i64,
        at: DateTime<Utc>,
    ) -> &mut TV_Trove {
        self.entry_or_insert_with(&owner.to_lowercase(), || TV_Trove {
            TV_owner: owner.to_lowercase(),
            TV_collateral: BigDecimal::zero(),
            TV_debt: BigDecimal::zero(),
            TV_collateral_ratio: RATIO_SENTINEL,
            TV_status: TroveStatus::ClosedByOwner,
            TV_opened_height: height,
            TV_opened_at: at,
            TV_last_updated_height: height,
            TV_last_updated_at: at,
            TV_total_borrowed: BigDecimal::zero(),
            TV_total_repaid: BigDecimal::zero(),
            TV_total_collateral_added: BigDecimal::zero(),
            TV_total_collateral_withdrawn: BigDecimal::zero(),
            TV_operation_count: 0,
            TV_risk_events: 0,
            TV_avg_collateral_ratio: 0.0,
            TV_lowest_collateral_ratio: RATIO_SENTINEL,
            TV_health_score: 100.0,
            TV_risk_level: RiskLevel::VeryLow,
            TV_liquidation_price: 0.0,
            TV_safety_margin: 0.0,
            TV_performance_score: 0.0,
            TV_liquidation_risk: 0.0,
        })
    }
}

impl Table<TV_Operation> {
    pub fn append(&mut self, ledger_key: String, row: TV_Operation) {
        self.insert(ledger_key, row);
    }
}
