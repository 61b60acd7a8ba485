mod feed;

pub use feed::{EventFeed, FeedSummary};
