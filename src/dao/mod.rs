mod memory;

pub use memory::{Database, Table, PROTOCOL_STATS_ID};
