use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::html;

/// One way of turning a URL into plain text.
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    fn name(&self) -> &'static str;

    /// Returns the extracted text, possibly empty. Errors cover transport
    /// failures and non-success responses.
    async fn extract(&self, url: &Url) -> Result<String>;
}

async fn download(client: &reqwest::Client, url: &Url) -> Result<String> {
    let response = client
        .get(url.clone())
        .send()
        .await
        .context("HTTP request failed")?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("HTTP {} for {}", status, url);
    }

    response.text().await.context("Failed to read response body")
}

/// Full-page download followed by boilerplate-stripping content extraction.
pub struct ReadableContentStrategy {
    client: reqwest::Client,
}

impl ReadableContentStrategy {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("entity-tagger/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl ExtractionStrategy for ReadableContentStrategy {
    fn name(&self) -> &'static str {
        "readable"
    }

    async fn extract(&self, url: &Url) -> Result<String> {
        let page = download(&self.client, url).await?;
        let text = html::readable_text(&page)?;
        debug!(url = %url, chars = text.chars().count(), "Extracted readable content");
        Ok(text)
    }
}

/// Lowest-common-denominator fallback: browser-like GET, strip markup
/// furniture, collapse whitespace, cap the length.
pub struct BrowserTextStrategy {
    client: reqwest::Client,
    max_chars: usize,
}

impl BrowserTextStrategy {
    pub fn new(user_agent: &str, timeout: Duration, max_chars: usize) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, max_chars })
    }
}

#[async_trait]
impl ExtractionStrategy for BrowserTextStrategy {
    fn name(&self) -> &'static str {
        "browser"
    }

    async fn extract(&self, url: &Url) -> Result<String> {
        let page = download(&self.client, url).await?;
        Ok(html::plain_text(&page, html::FALLBACK_STRIP_TAGS, self.max_chars))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn page_url(server: &MockServer, p: &str) -> Url {
        Url::parse(&server.uri()).unwrap().join(p).unwrap()
    }

    #[tokio::test]
    async fn test_browser_strategy_sends_user_agent_and_strips_markup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/article"))
            .and(header("user-agent", "test-agent/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<html><body><nav>Menu</nav><p>Tramadol   and\n pain</p><footer>Legal</footer></body></html>",
            ))
            .mount(&server)
            .await;

        let strategy =
            BrowserTextStrategy::new("test-agent/1.0", Duration::from_secs(5), 10_000).unwrap();
        let text = strategy.extract(&page_url(&server, "/article")).await.unwrap();

        assert_eq!(text, "Tramadol and pain");
    }

    #[tokio::test]
    async fn test_browser_strategy_caps_length() {
        let server = MockServer::start().await;
        let body = format!("<html><body><p>{}</p></body></html>", "word ".repeat(100));
        Mock::given(method("GET"))
            .and(path("/long"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;

        let strategy = BrowserTextStrategy::new("ua", Duration::from_secs(5), 42).unwrap();
        let text = strategy.extract(&page_url(&server, "/long")).await.unwrap();

        assert_eq!(text.chars().count(), 42);
    }

    #[tokio::test]
    async fn test_error_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/forbidden"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;

        let strategy = ReadableContentStrategy::new(Duration::from_secs(5)).unwrap();
        let err = strategy
            .extract(&page_url(&server, "/forbidden"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("403"));
    }
}
