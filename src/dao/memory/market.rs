use chrono::{DateTime, Utc};

use super::Table;
use crate::model::MP_Condition;

impl Table<MP_Condition> {
    pub fn by_day(&self, day: i64) -> Option<&MP_Condition> {
        self.get(&day.to_string())
    }

    /// Opens the day's candle on first touch; the previous close is carried
    /// on the record itself so no process-global price state exists.
    pub fn get_or_open(
        &mut self,
        day: i64,
        price: f64,
        previous_close: Option<f64>,
        at: DateTime<Utc>,
    ) -> &mut MP_Condition {
        self.entry_or_insert_with(&day.to_string(), || MP_Condition {
            MP_day: day,
            MP_open: price,
            MP_high: price,
            MP_low: price,
            MP_close: price,
            MP_previous_close: previous_close,
            MP_update_count: 0,
            MP_updated_at: at,
        })
    }
}
