/// Hosts for which readable-content extraction is skipped.
///
/// A host is blocked when it equals a listed domain or is a subdomain of it
/// (`www.nature.com` matches `nature.com`; `notnature.com` does not).
#[derive(Debug, Clone, Default)]
pub struct BlockList {
    domains: Vec<String>,
}

impl BlockList {
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = domains
            .into_iter()
            .map(|d| normalize_host(d.as_ref()))
            .filter(|d| !d.is_empty())
            .collect();
        Self { domains }
    }

    pub fn is_blocked(&self, host: &str) -> bool {
        let host = normalize_host(host);
        self.domains.iter().any(|domain| {
            host == *domain
                || host
                    .strip_suffix(domain.as_str())
                    .is_some_and(|prefix| prefix.ends_with('.'))
        })
    }

    pub fn domains(&self) -> &[String] {
        &self.domains
    }
}

fn normalize_host(host: &str) -> String {
    host.trim().trim_matches('.').to_lowercase()
}
