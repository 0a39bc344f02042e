use chrono::{DateTime, Utc};
use reqwest::Client;
use rocket::tokio::join;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::Settings;
use crate::feeds::{self, Feed, fetch_feed};
use crate::models::{AutonomySnapshot, DashboardView, MetricRow, SloReport};

/// Joined result of one render's feed fetches. Each side is either live
/// backend data or that feed's fixed fallback, never anything partial.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub autonomy: Feed<AutonomySnapshot>,
    pub slo: Feed<SloReport>,
}

/// Starts both feed fetches without awaiting either and suspends until
/// both have settled. The feeds share no state; a failure in one never
/// affects the other.
pub async fn load_dashboard(client: &Client, settings: &Settings) -> Dashboard {
    let api_base = settings.resolve_api_base();
    let autonomy_url = feeds::autonomy_url(&api_base);
    let slo_url = feeds::slo_url(&api_base);
    let (autonomy, slo) = join!(
        fetch_feed(
            client,
            &autonomy_url,
            "autonomy",
            settings.request_timeout,
            AutonomySnapshot::fallback(),
        ),
        fetch_feed(
            client,
            &slo_url,
            "slo",
            settings.request_timeout,
            SloReport::default(),
        ),
    );

    Dashboard { autonomy, slo }
}

impl Dashboard {
    /// Derives the display aggregates. Counting and formatting only; an
    /// empty metrics sequence reaches the renderer as-is, whether the feed
    /// fell back or genuinely reported nothing.
    pub fn into_view(self, settings: &Settings) -> DashboardView {
        let autonomy = self.autonomy.data;
        let metrics = self
            .slo
            .data
            .metrics
            .into_iter()
            .map(|metric| MetricRow {
                name: metric.metric_name,
                value_pct: format_pct(metric.metric_value),
                target_pct: format_pct(metric.target_value),
                status: metric.status,
            })
            .collect();

        DashboardView {
            generated_at: iso_timestamp(current_timestamp()),
            active_city_count: autonomy.city_snapshots.len(),
            stale_city_count: autonomy.stale_cities.len(),
            rollback_count: autonomy.recent_rollbacks.len(),
            supabase_connected: settings.supabase_configured(),
            metrics,
        }
    }
}

fn format_pct(value: f64) -> String {
    format!("{value:.2}%")
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

fn iso_timestamp(ts: u64) -> String {
    DateTime::<Utc>::from_timestamp(ts as i64, 0)
        .unwrap_or_else(Utc::now)
        .to_rfc3339()
}
