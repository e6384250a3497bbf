use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Federated index servers shipped with the generator, registered unless
/// suppressed from the command line.
pub const DEFAULT_INDEX_URLS: &[&str] = &[
    "https://referencesource.microsoft.com/",
    "https://source.dot.net/",
];

/// Registered external cross-reference servers.
///
/// Only the configuration surface lives here: URLs are recorded in
/// registration order and later injected into the shipped scripts. An
/// offline entry additionally carries the path of a local assembly-listing
/// file. No symbol resolution or network traffic happens at generation time.
#[derive(Debug, Default, Clone)]
pub struct Federation {
    servers: Vec<String>,
    seen: HashSet<String>,
    offline: HashMap<String, PathBuf>,
}

impl Federation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a server URL. Case-insensitive duplicates are ignored.
    pub fn add(&mut self, url: &str) {
        let url = url.trim();
        if url.is_empty() {
            return;
        }
        if self.seen.insert(url.to_lowercase()) {
            self.servers.push(url.to_string());
        }
    }

    /// Registers a server whose index comes from a local assembly listing.
    pub fn add_offline(&mut self, url: &str, listing: impl Into<PathBuf>) {
        self.add(url);
        self.offline.insert(url.trim().to_lowercase(), listing.into());
    }

    pub fn add_many<I, S>(&mut self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for url in urls {
            self.add(url.as_ref());
        }
    }

    pub fn add_defaults(&mut self) {
        self.add_many(DEFAULT_INDEX_URLS.iter().copied());
    }

    /// Registered server URLs, in registration order.
    pub fn servers(&self) -> &[String] {
        &self.servers
    }

    pub fn offline_listing(&self, url: &str) -> Option<&Path> {
        self.offline.get(&url.trim().to_lowercase()).map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::Federation;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    #[test]
    fn preserves_registration_order_and_dedups() {
        let mut federation = Federation::new();
        federation.add("https://b.example/");
        federation.add("https://a.example/");
        federation.add("HTTPS://B.EXAMPLE/");

        assert_eq!(
            federation.servers(),
            &["https://b.example/".to_string(), "https://a.example/".to_string()]
        );
    }

    #[test]
    fn offline_entry_registers_server_and_listing() {
        let mut federation = Federation::new();
        federation.add_offline("https://mirror.example/", "assemblies.txt");

        assert_eq!(federation.servers().len(), 1);
        assert_eq!(
            federation.offline_listing("https://mirror.example/"),
            Some(Path::new("assemblies.txt"))
        );
        assert_eq!(federation.offline_listing("https://other.example/"), None);
    }

    #[test]
    fn defaults_are_suppressible_by_not_calling() {
        let mut federation = Federation::new();
        assert!(federation.is_empty());
        federation.add_defaults();
        assert!(!federation.is_empty());
    }
}
