use std::env;
use std::time::Duration;

const DEFAULT_API_BASE: &str = "http://localhost:8000/api/v1";
const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Environment snapshot captured once at launch and managed as Rocket
/// state. Resolution happens per render against this value, never against
/// the live process environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base_url: Option<String>,
    pub deploy_host: Option<String>,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    pub request_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Self {
        Settings {
            api_base_url: env::var("API_BASE_URL").ok(),
            deploy_host: env::var("DEPLOY_HOST").ok(),
            supabase_url: env::var("SUPABASE_URL").ok(),
            supabase_anon_key: env::var("SUPABASE_ANON_KEY").ok(),
            request_timeout: load_request_timeout(),
        }
    }

    /// Backend API base URL. First match wins: explicit override,
    /// deployment host, local default.
    pub fn resolve_api_base(&self) -> String {
        match &self.api_base_url {
            Some(base) if !base.is_empty() => return base.clone(),
            _ => {}
        }
        match &self.deploy_host {
            Some(host) if !host.is_empty() => format!("https://{host}/api/v1"),
            _ => DEFAULT_API_BASE.to_string(),
        }
    }

    /// Presence-only signal behind the "Connected"/"Not Set" card; the
    /// values are never parsed or dialed.
    pub fn supabase_configured(&self) -> bool {
        matches!(
            (&self.supabase_url, &self.supabase_anon_key),
            (Some(url), Some(key)) if !url.is_empty() && !key.is_empty()
        )
    }
}

fn load_request_timeout() -> Duration {
    let timeout_ms = env::var("REQUEST_TIMEOUT_MS")
        .ok()
        .and_then(|raw| raw.parse::<u64>().ok())
        .unwrap_or(DEFAULT_TIMEOUT_MS);
    Duration::from_millis(timeout_ms.max(500))
}
