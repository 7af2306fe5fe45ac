//! Result interpreter. Separates an optional risk score from the model's free text.
//!
//! Grammar for the constitution mode:
//!
//! ```text
//! score    := MARKER ws* emphasis* ws* TOKEN
//! MARKER   := "Risk Score:"          first occurrence, literal
//! emphasis := '*' | '_'              markdown bold/italics around the marker
//! TOKEN    := next whitespace-delimited run, trailing ASCII punctuation stripped,
//!             ',' thousands separators removed, parsed as i64
//! ```
//!
//! Any failure yields `RiskScore::Unscored`. The body is always the whole raw text.

use crate::domain::{AnalysisMode, AnalysisResult, RiskScore};
use crate::usecases::prompt::RISK_SCORE_MARKER;
use thiserror::Error;
use tracing::debug;

/// Why a risk score could not be extracted. Logged, never surfaced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoreParseError {
    #[error("risk score marker not found")]
    MarkerMissing,

    #[error("no token after risk score marker")]
    TokenMissing,

    #[error("risk score token is not an integer: {0:?}")]
    NotNumeric(String),
}

/// Interpret raw model output for `mode`.
pub fn interpret(mode: AnalysisMode, raw: &str) -> AnalysisResult {
    let score = match mode {
        AnalysisMode::Constitution => match parse_risk_score(raw) {
            Ok(v) => RiskScore::Extracted(v),
            Err(e) => {
                debug!(error = %e, "risk score fallback");
                RiskScore::Unscored
            }
        },
        AnalysisMode::Impact | AnalysisMode::Sentiment => RiskScore::Unscored,
    };
    AnalysisResult {
        score,
        body: raw.to_string(),
    }
}

/// Extract the integer following the first `Risk Score:` marker.
///
/// Values are not range-checked: `Risk Score: 12` yields 12.
pub fn parse_risk_score(raw: &str) -> Result<i64, ScoreParseError> {
    let start = raw
        .find(RISK_SCORE_MARKER)
        .ok_or(ScoreParseError::MarkerMissing)?;
    let rest = &raw[start + RISK_SCORE_MARKER.len()..];
    let rest = rest
        .trim_start()
        .trim_start_matches(['*', '_'])
        .trim_start();

    let token = rest
        .split_whitespace()
        .next()
        .ok_or(ScoreParseError::TokenMissing)?;

    let cleaned: String = token
        .trim_end_matches(|c: char| c.is_ascii_punctuation())
        .chars()
        .filter(|c| *c != ',')
        .collect();
    if cleaned.is_empty() {
        return Err(ScoreParseError::TokenMissing);
    }

    cleaned
        .parse::<i64>()
        .map_err(|_| ScoreParseError::NotNumeric(token.to_string()))
}
