use reqwest::Client;
use reqwest::header::{CACHE_CONTROL, HeaderMap, HeaderValue, PRAGMA};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::warn;

/// Where a feed's data came from. Rendering ignores this; logging and
/// tests do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSource {
    Live,
    Fallback,
}

/// Outcome of a single feed fetch. Always well-formed: on any failure
/// `data` holds the feed's fixed fallback.
#[derive(Debug, Clone)]
pub struct Feed<T> {
    pub data: T,
    pub source: FeedSource,
}

pub fn autonomy_url(api_base: &str) -> String {
    format!("{}/system/autonomy-status", api_base.trim_end_matches('/'))
}

pub fn slo_url(api_base: &str) -> String {
    format!("{}/system/slo", api_base.trim_end_matches('/'))
}

/// Issues exactly one GET for `url` and returns the decoded body, or
/// `fallback` on any failure (non-success status, transport error, timeout
/// expiry, undecodable body). There is no retry; the next page load is the
/// retry.
///
/// Caching is disabled on the request: the page must reflect current
/// backend state, never a stale intermediary copy.
pub async fn fetch_feed<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    feed: &str,
    timeout: Duration,
    fallback: T,
) -> Feed<T> {
    let request = client.get(url).headers(no_cache_headers()).timeout(timeout);

    match request.send().await {
        Ok(response) if response.status().is_success() => match response.json::<T>().await {
            Ok(data) => Feed {
                data,
                source: FeedSource::Live,
            },
            Err(err) => {
                warn!("Undecodable body from {feed} feed: {err}");
                Feed {
                    data: fallback,
                    source: FeedSource::Fallback,
                }
            }
        },
        Ok(response) => {
            warn!("Unexpected status {} from {feed} feed", response.status());
            Feed {
                data: fallback,
                source: FeedSource::Fallback,
            }
        }
        Err(err) => {
            warn!("Request failure for {feed} feed: {err}");
            Feed {
                data: fallback,
                source: FeedSource::Fallback,
            }
        }
    }
}

fn no_cache_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));
    headers
}
