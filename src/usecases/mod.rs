//! Application use cases. Orchestrate domain logic via ports.

pub mod analysis_cache;
pub mod analysis_service;
pub mod dashboard_service;
pub mod interpreter;
pub mod prompt;
pub mod selection;

#[cfg(test)]
pub(crate) mod test_support;

pub use analysis_cache::AnalysisCache;
pub use analysis_service::AnalysisService;
pub use dashboard_service::DashboardService;
pub use selection::SelectionCoordinator;
