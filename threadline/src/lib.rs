pub mod cli;
pub mod config;
pub mod load;
pub mod models;
pub mod moderation;
pub mod slice;
pub mod telemetry;
pub mod threading;
pub mod timeline;

pub use models::{FeedItem, FeedResponse, Post, ThreadNode, ThreadResponse};
pub use slice::{Chained, Slice};
pub use threading::{build_thread_page, linearize, LinearizedThread, ThreadPage, ThreadSlice};
pub use timeline::{assemble, assemble_filtered, TimelinePage, TimelineSlice};
