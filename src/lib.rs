//! policy-tracker: U.S. legislation, executive orders and Supreme Court cases with
//! memoized LLM analysis, in Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
