//! Application configuration. API credentials, endpoints, cache lifetimes.

use serde::Deserialize;

/// Congress.gov public key with low rate limits. Used when no key is configured.
pub const CONGRESS_DEMO_KEY: &str = "DEMO_KEY";

/// Legislative data changes often: 10 minutes.
pub const DEFAULT_LEGISLATION_TTL_SECS: i64 = 600;

/// Executive orders and court cases change slowly: 60 minutes.
pub const DEFAULT_SLOW_SOURCE_TTL_SECS: i64 = 3600;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Congress.gov API key. Read from POLICY_TRACKER_CONGRESS_API_KEY or CONGRESS_API_KEY.
    #[serde(default)]
    pub congress_api_key: Option<String>,

    /// Congress number to list bills for (default "119").
    #[serde(default)]
    pub congress_session: Option<String>,

    #[serde(default)]
    pub congress_base_url: Option<String>,

    #[serde(default)]
    pub federal_register_base_url: Option<String>,

    #[serde(default)]
    pub court_listener_base_url: Option<String>,

    /// Optional CourtListener token; anonymous access works with lower limits.
    #[serde(default)]
    pub court_listener_token: Option<String>,

    #[serde(default)]
    pub bills_limit: Option<usize>,

    #[serde(default)]
    pub orders_limit: Option<usize>,

    #[serde(default)]
    pub cases_limit: Option<usize>,

    /// Fetch-cache lifetime for bills, in seconds.
    #[serde(default)]
    pub legislation_ttl_secs: Option<i64>,

    /// Fetch-cache lifetime for executive orders and court cases, in seconds.
    #[serde(default)]
    pub slow_source_ttl_secs: Option<i64>,

    // ─────────────────────────────────────────────────────────────────────────
    // AI Analysis Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// LLM API key. Read from POLICY_TRACKER_AI_API_KEY or GEMINI_API_KEY.
    #[serde(default)]
    pub ai_api_key: Option<String>,

    /// OpenAI-compatible chat completions URL. Read from POLICY_TRACKER_AI_API_URL.
    #[serde(default)]
    pub ai_api_url: Option<String>,

    /// Model name. Defaults to "gemini-1.5-flash". Read from POLICY_TRACKER_AI_MODEL.
    #[serde(default)]
    pub ai_model: Option<String>,

    /// When set, analyses are persisted to this JSON file and survive restarts.
    #[serde(default)]
    pub analysis_store_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("POLICY_TRACKER"));
        if let Ok(path) = std::env::var("POLICY_TRACKER_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the Congress.gov key, falling back to CONGRESS_API_KEY env.
    pub fn congress_api_key(&self) -> Option<String> {
        self.congress_api_key
            .clone()
            .or_else(|| std::env::var("CONGRESS_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }

    /// Returns the Congress.gov key or the public demo key.
    pub fn congress_api_key_or_demo(&self) -> String {
        self.congress_api_key()
            .unwrap_or_else(|| CONGRESS_DEMO_KEY.to_string())
    }

    pub fn congress_session_or_default(&self) -> String {
        self.congress_session
            .clone()
            .unwrap_or_else(|| "119".to_string())
    }

    pub fn congress_base_url_or_default(&self) -> String {
        self.congress_base_url
            .clone()
            .unwrap_or_else(|| "https://api.congress.gov/v3".to_string())
    }

    pub fn federal_register_base_url_or_default(&self) -> String {
        self.federal_register_base_url
            .clone()
            .unwrap_or_else(|| "https://www.federalregister.gov/api/v1".to_string())
    }

    pub fn court_listener_base_url_or_default(&self) -> String {
        self.court_listener_base_url
            .clone()
            .unwrap_or_else(|| "https://www.courtlistener.com/api/rest/v4".to_string())
    }

    pub fn court_listener_token(&self) -> Option<String> {
        self.court_listener_token
            .clone()
            .or_else(|| std::env::var("COURTLISTENER_TOKEN").ok())
    }

    /// Bills per fetch. Defaults to 30.
    pub fn bills_limit_or_default(&self) -> usize {
        self.bills_limit.unwrap_or(30)
    }

    /// Executive orders per fetch. Defaults to 10.
    pub fn orders_limit_or_default(&self) -> usize {
        self.orders_limit.unwrap_or(10)
    }

    /// Court cases per fetch. Defaults to 10.
    pub fn cases_limit_or_default(&self) -> usize {
        self.cases_limit.unwrap_or(10)
    }

    pub fn legislation_ttl_secs_or_default(&self) -> i64 {
        self.legislation_ttl_secs
            .unwrap_or(DEFAULT_LEGISLATION_TTL_SECS)
    }

    pub fn slow_source_ttl_secs_or_default(&self) -> i64 {
        self.slow_source_ttl_secs
            .unwrap_or(DEFAULT_SLOW_SOURCE_TTL_SECS)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // AI Configuration Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the LLM API key if configured. Reads from config or GEMINI_API_KEY env.
    pub fn ai_api_key(&self) -> Option<String> {
        self.ai_api_key
            .clone()
            .or_else(|| std::env::var("GEMINI_API_KEY").ok())
            .filter(|k| !k.trim().is_empty())
    }

    /// Returns the chat completions URL. Defaults to Gemini's OpenAI-compatible endpoint.
    pub fn ai_api_url_or_default(&self) -> String {
        self.ai_api_url.clone().unwrap_or_else(|| {
            "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions"
                .to_string()
        })
    }

    /// Returns the model name. Defaults to "gemini-1.5-flash".
    pub fn ai_model_or_default(&self) -> String {
        self.ai_model
            .clone()
            .unwrap_or_else(|| "gemini-1.5-flash".to_string())
    }

    /// Returns true if AI is configured (API key present).
    pub fn is_ai_configured(&self) -> bool {
        self.ai_api_key().is_some()
    }
}
