//! Single bounded HTTP GET per feed source.
//!
//! One shared client per run carries the configured user agent and follows
//! redirects (reqwest's default policy). Timeouts apply per request so one
//! slow feed cancels only its own transfer. No retries — a failure here is
//! terminal for that feed for this run.

use std::time::Duration;

use reqwest::Client;
use reqwest::header::ACCEPT;

use crate::config::RunDefaults;
use crate::error::FeedError;

/// Media types we are willing to receive, feed formats first.
const ACCEPT_FEED_TYPES: &str =
    "application/rss+xml, application/atom+xml, application/xml;q=0.9, text/xml;q=0.9, text/html;q=0.8";

/// Build the run-wide HTTP client.
pub fn build_client(defaults: &RunDefaults) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(defaults.user_agent.clone())
        .build()
}

/// Fetch one feed body as text.
///
/// The timeout covers the whole request, connect through body; an expired
/// timeout maps to [`FeedError::Timeout`], any non-2xx status to
/// [`FeedError::Status`], other transport failures to [`FeedError::Http`].
pub async fn fetch_feed_body(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<String, FeedError> {
    let response = client
        .get(url)
        .header(ACCEPT, ACCEPT_FEED_TYPES)
        .timeout(timeout)
        .send()
        .await
        .map_err(classify_transport_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FeedError::Status {
            status: status.as_u16(),
            reason: status
                .canonical_reason()
                .unwrap_or("unknown status")
                .to_string(),
        });
    }

    response.text().await.map_err(classify_transport_error)
}

fn classify_transport_error(error: reqwest::Error) -> FeedError {
    if error.is_timeout() {
        FeedError::Timeout
    } else {
        FeedError::Http(error)
    }
}
