//! Forum search: per-forum SerpApi queries and their fan-out/fan-in aggregation.

pub mod adapter;
pub mod aggregate;
pub mod sources;

pub use aggregate::{AggregatedResult, ForumSearch};
