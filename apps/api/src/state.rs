use chrono::{DateTime, Utc};

use crate::analysis::orchestrator::ResumeAnalyzer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only after startup; no request mutates it.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: ResumeAnalyzer,
    pub config: Config,
    pub started_at: DateTime<Utc>,
}
