//! Read-through query cache for grocer.
//!
//! Memoizes slow-changing query responses for a fixed freshness window.
//! Expiry is checked on read; nothing is evicted in the background.

mod cache;
mod key;

pub use cache::{CacheStats, QueryCache};
pub use key::CacheKey;
