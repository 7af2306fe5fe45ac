//! Infrastructure adapters. Implement outbound ports.
//!
//! Public data APIs, LLM backends, analysis storage, terminal UI. Map errors to DomainError.

pub mod ai;
pub mod persistence;
pub mod sources;
pub mod ui;
