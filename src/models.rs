use rocket::serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

/// Union of all cities' automation state plus the global event logs,
/// as reported by `GET {api_base}/system/autonomy-status`.
///
/// Every field defaults to empty: the backend contract is not enforced by
/// any schema, so a payload that omits a collection must still decode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutonomySnapshot {
    #[serde(default)]
    pub city_snapshots: HashMap<String, Value>,
    #[serde(default)]
    pub recent_autonomy_events: Vec<Value>,
    #[serde(default)]
    pub recent_rollbacks: Vec<Value>,
    #[serde(default)]
    pub stale_cities: Vec<String>,
}

impl AutonomySnapshot {
    /// Substitute served when the autonomy feed is unavailable.
    pub fn fallback() -> Self {
        AutonomySnapshot {
            city_snapshots: HashMap::new(),
            recent_autonomy_events: Vec::new(),
            recent_rollbacks: Vec::new(),
            stale_cities: vec!["NYC".into(), "LA".into(), "SF".into()],
        }
    }
}

/// SLO report from `GET {api_base}/system/slo`. The `Default` value (no
/// metrics) doubles as the feed fallback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SloReport {
    #[serde(default)]
    pub metrics: Vec<SloMetric>,
}

/// One backend-computed SLO row. `status` is displayed verbatim, never
/// interpreted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SloMetric {
    #[serde(default)]
    pub metric_name: String,
    #[serde(default)]
    pub metric_value: f64,
    #[serde(default)]
    pub target_value: f64,
    #[serde(default)]
    pub status: String,
}

/// Aggregates handed to the template and the JSON API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub generated_at: String,
    pub active_city_count: usize,
    pub stale_city_count: usize,
    pub rollback_count: usize,
    pub supabase_connected: bool,
    pub metrics: Vec<MetricRow>,
}

/// One rendered SLO card, percentages preformatted to two decimals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricRow {
    pub name: String,
    pub value_pct: String,
    pub target_pct: String,
    pub status: String,
}
