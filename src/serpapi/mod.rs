//! SerpApi client: typed request/response and error classification.

pub mod client;
pub mod types;

pub use client::{SearchClient, SerpApiClient, SerpApiError};
