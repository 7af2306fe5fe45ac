//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;

pub use entities::{
    AnalysisKey, AnalysisMode, AnalysisResult, Item, ItemDetails, ItemQuery, ItemSource,
    PANEL_COURT_CASES, PANEL_EXECUTIVE_ORDERS, PANEL_LEGISLATION, RiskScore,
};
pub use errors::DomainError;
