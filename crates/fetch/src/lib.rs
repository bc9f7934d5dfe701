pub mod blocklist;
pub mod config;
pub mod html;
pub mod strategy;

pub use blocklist::BlockList;
pub use config::FetchConfig;
pub use strategy::{BrowserTextStrategy, ExtractionStrategy, ReadableContentStrategy};

use anyhow::Result;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Best-effort URL to text, trying readable-content extraction first and a
/// browser-style plain-text fetch second.
///
/// Never fails: every error is logged and reported as `None`.
pub struct ContentFetcher {
    primary: Box<dyn ExtractionStrategy>,
    fallback: Box<dyn ExtractionStrategy>,
    blocklist: BlockList,
    min_primary_chars: usize,
}

impl ContentFetcher {
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let primary = ReadableContentStrategy::new(Duration::from_secs(config.primary_timeout_secs))?;
        let fallback = BrowserTextStrategy::new(
            &config.user_agent,
            Duration::from_secs(config.fallback_timeout_secs),
            config.max_fallback_chars,
        )?;

        Ok(Self::with_strategies(
            Box::new(primary),
            Box::new(fallback),
            BlockList::new(&config.blocked_domains),
            config.min_primary_chars,
        ))
    }

    pub fn with_strategies(
        primary: Box<dyn ExtractionStrategy>,
        fallback: Box<dyn ExtractionStrategy>,
        blocklist: BlockList,
        min_primary_chars: usize,
    ) -> Self {
        Self {
            primary,
            fallback,
            blocklist,
            min_primary_chars,
        }
    }

    pub async fn fetch(&self, url: &str) -> Option<String> {
        let parsed = match Url::parse(url) {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(url = %url, error = %e, "Invalid URL");
                return None;
            }
        };
        let Some(host) = parsed.host_str() else {
            warn!(url = %url, "URL has no host");
            return None;
        };

        if self.blocklist.is_blocked(host) {
            info!(url = %url, host = %host, "Host is block-listed, using fallback");
        } else {
            match self.primary.extract(&parsed).await {
                Ok(text) if text.trim().chars().count() > self.min_primary_chars => {
                    debug!(url = %url, strategy = self.primary.name(), "Primary extraction succeeded");
                    return Some(text);
                }
                Ok(_) => {
                    info!(url = %url, strategy = self.primary.name(), "Primary extraction too short, using fallback");
                }
                Err(e) => {
                    warn!(url = %url, strategy = self.primary.name(), error = %e, "Primary extraction failed, using fallback");
                }
            }
        }

        match self.fallback.extract(&parsed).await {
            Ok(text) if !text.trim().is_empty() => Some(text),
            Ok(_) => {
                warn!(url = %url, strategy = self.fallback.name(), "Fallback returned no content");
                None
            }
            Err(e) => {
                warn!(url = %url, strategy = self.fallback.name(), error = %e, "Fallback extraction failed");
                None
            }
        }
    }
}
