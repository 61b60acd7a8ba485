//! NDJSON event feed.
//!
//! One envelope per line, applied strictly in file order. The indexing
//! substrate already emits events sorted by (height, log index); the feed
//! preserves that order, which the aggregates rely on.

use tokio::fs::File;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::configuration::{AppState, State};
use crate::dao::Database;
use crate::error::Error;
use crate::handler::handle_event;
use crate::types::EventEnvelope;

#[derive(Debug, Default, Clone, Copy)]
pub struct FeedSummary {
    pub applied: u64,
    pub skipped: u64,
}

pub struct EventFeed {
    app_state: AppState<State>,
}

impl EventFeed {
    pub fn new(app_state: AppState<State>) -> EventFeed {
        EventFeed { app_state }
    }

    /// Drains the configured event file into the store. An undecodable
    /// line or a rejected event is counted and skipped; I/O failures
    /// abort the run.
    pub async fn run(&self, db: &mut Database) -> Result<FeedSummary, Error> {
        let file = File::open(&self.app_state.config.events_file).await?;
        let mut lines = BufReader::new(file).lines();

        let mut summary = FeedSummary::default();
        let mut line_no: u64 = 0;

        while let Some(line) = lines.next_line().await? {
            line_no += 1;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let envelope: EventEnvelope = match serde_json::from_str(line) {
                Ok(envelope) => envelope,
                Err(error) => {
                    warn!(line = line_no, %error, "undecodable event line");
                    summary.skipped += 1;
                    continue;
                },
            };

            if handle_event(&self.app_state, &envelope, db)? {
                summary.applied += 1;
            } else {
                summary.skipped += 1;
            }
        }

        info!(
            applied = summary.applied,
            skipped = summary.skipped,
            "event feed drained",
        );

        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use std::{env, fs, process};

    use super::*;
    use crate::configuration::Config;

    #[tokio::test]
    async fn feed_applies_lines_in_order_and_skips_garbage() {
        let path = env::temp_dir()
            .join(format!("usdfc-etl-feed-{}.ndjson", process::id()));
        let contents = concat!(
            r#"{"type":"transfer","height":"1","at":"1755000000","tx_hash":"0x01","log_index":"0","contract":"0xf0","attributes":{"from":"0x0000000000000000000000000000000000000000","to":"0xaa","value":"100"}}"#,
            "\n",
            "not json\n",
            "\n",
            r#"{"type":"transfer","height":"2","at":"1755000010","tx_hash":"0x02","log_index":"0","contract":"0xf0","attributes":{"from":"0xaa","to":"0xbb","value":"40"}}"#,
            "\n",
        );
        fs::write(&path, contents).unwrap();

        let mut config = Config::for_tests();
        config.events_file = path.to_string_lossy().into_owned();
        let app_state = AppState::new(State::new(config).unwrap());

        let mut db = Database::new();
        let feed = EventFeed::new(app_state);
        let summary = feed.run(&mut db).await.unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(summary.applied, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(db.transaction.len(), 2);
        assert_eq!(
            db.account.by_address("0xaa").unwrap().AC_balance,
            bigdecimal::BigDecimal::from(60)
        );
    }
}
