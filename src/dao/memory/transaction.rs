use super::Table;
use crate::model::TX_Transaction;

impl Table<TX_Transaction> {
    /// The composite (tx hash, log index) key is the idempotency guard:
    /// an existing row means the event was already aggregated.
    pub fn exists(&self, ledger_key: &str) -> bool {
        self.contains(ledger_key)
    }

    /// Ledger rows are immutable; a duplicate key never overwrites.
    pub fn insert_once(&mut self, ledger_key: String, row: TX_Transaction) {
        if !self.contains(&ledger_key) {
            self.insert(ledger_key, row);
        }
    }
}
