//! Cross-cutting helpers: configuration and the expiring fetch cache.

pub mod config;
pub mod ttl_cache;

pub use ttl_cache::TtlCache;
