//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use policy_tracker::adapters::ai::{MockLlmAdapter, OpenAiAdapter};
use policy_tracker::adapters::persistence::{JsonStore, MemoryStore};
use policy_tracker::adapters::sources::{
    CongressAdapter, CourtListenerAdapter, FederalRegisterAdapter,
};
use policy_tracker::adapters::ui::tui::TuiInputPort;
use policy_tracker::ports::{AnalysisStorePort, DashboardPort, InputPort, LlmPort};
use policy_tracker::shared::config::AppConfig;
use policy_tracker::usecases::{AnalysisCache, AnalysisService, DashboardService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    policy_tracker::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed, using defaults");
        AppConfig::default()
    });

    // --- LLM backend ---
    let llm: Arc<dyn LlmPort> = if cfg.is_ai_configured() {
        info!(
            model = %cfg.ai_model_or_default(),
            url = %cfg.ai_api_url_or_default(),
            "AI analysis enabled with OpenAI-compatible adapter"
        );
        Arc::new(OpenAiAdapter::new(
            cfg.ai_api_url_or_default(),
            cfg.ai_api_key().unwrap_or_default(),
            cfg.ai_model_or_default(),
        ))
    } else {
        warn!("POLICY_TRACKER_AI_API_KEY / GEMINI_API_KEY not set, using mock LLM adapter");
        Arc::new(MockLlmAdapter::new())
    };

    // --- Analysis store: JSON file when configured, otherwise session memory ---
    let store: Arc<dyn AnalysisStorePort> = match &cfg.analysis_store_path {
        Some(path) => {
            let json_store = JsonStore::new(path);
            json_store
                .load()
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?;
            info!(path = %path, "analysis store: JSON file");
            Arc::new(json_store)
        }
        None => Arc::new(MemoryStore::new()),
    };

    let analysis_service = AnalysisService::new(llm, AnalysisCache::new(store));

    // --- Data sources ---
    if cfg.congress_api_key().is_none() {
        warn!("CONGRESS_API_KEY not set, using rate-limited DEMO_KEY");
    }
    let congress = Arc::new(CongressAdapter::new(
        cfg.congress_base_url_or_default(),
        cfg.congress_api_key_or_demo(),
        cfg.congress_session_or_default(),
        cfg.bills_limit_or_default(),
    ));
    let federal_register = Arc::new(FederalRegisterAdapter::new(
        cfg.federal_register_base_url_or_default(),
        cfg.orders_limit_or_default(),
    ));
    let court_listener = Arc::new(CourtListenerAdapter::new(
        cfg.court_listener_base_url_or_default(),
        cfg.court_listener_token(),
        cfg.cases_limit_or_default(),
    ));

    let legislation_ttl = cfg.legislation_ttl_secs_or_default();
    let slow_ttl = cfg.slow_source_ttl_secs_or_default();
    info!(legislation_ttl, slow_ttl, "fetch cache lifetimes (secs)");

    let dashboard: Arc<dyn DashboardPort> = Arc::new(
        DashboardService::new(analysis_service)
            .with_source(congress, legislation_ttl)
            .with_source(federal_register, slow_ttl)
            .with_source(court_listener, slow_ttl),
    );

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(dashboard));

    // --- Run (main menu -> panels / AI Deep Dive / Search) ---
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
