use ae_core::{Config, Error, Result};
use reqwest::Client;
use tracing::debug;
use url::Url;

const MAX_REDIRECTS: usize = 10;

/// Parse and re-serialize a user supplied URL.
///
/// Surrounding whitespace is dropped and spaces or unicode in the path are
/// percent-encoded. Only http and https are accepted.
pub fn normalize_url(input: &str) -> Result<String> {
    let input = input.trim();
    let url = Url::parse(input).map_err(|e| Error::InvalidUrl(format!("{}: {}", input, e)))?;

    match url.scheme() {
        "http" | "https" => Ok(url.to_string()),
        scheme => Err(Error::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            input, scheme
        ))),
    }
}

/// GET `url` once and return the body as text.
///
/// Timeouts, DNS and connection failures and non-2xx statuses all come back
/// as `Error::Network`. There are no retries.
pub async fn fetch_html(url: &str, config: &Config) -> Result<String> {
    let client = Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
        .build()?;

    debug!("GET {} (timeout {:?})", url, config.timeout);
    let response = client.get(url).send().await?.error_for_status()?;
    debug!("{} answered {}", url, response.status());

    Ok(response.text().await?)
}
