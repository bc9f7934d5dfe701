use serde::{Deserialize, Serialize};

pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Domains (and their subdomains) that go straight to the fallback.
    pub blocked_domains: Vec<String>,
    /// Readable content must be longer than this, after trimming, to be used.
    pub min_primary_chars: usize,
    pub primary_timeout_secs: u64,
    pub fallback_timeout_secs: u64,
    pub max_fallback_chars: usize,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            blocked_domains: vec![
                "nature.com".to_string(),
                "sciencedirect.com".to_string(),
                "ncbi.nlm.nih.gov".to_string(),
            ],
            min_primary_chars: 200,
            primary_timeout_secs: 30,
            fallback_timeout_secs: 20,
            max_fallback_chars: 10_000,
            user_agent: BROWSER_USER_AGENT.to_string(),
        }
    }
}
