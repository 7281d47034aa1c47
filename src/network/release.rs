// src/network/release.rs
use crate::utils::error::SwitcherError;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Tag {
    name: String,
}

/// Returns the newest tag name of a tags feed (first entry)
pub fn parse_latest_tag(body: &str) -> Result<Option<String>, SwitcherError> {
    let tags: Vec<Tag> = serde_json::from_str(body)?;
    Ok(tags.into_iter().next().map(|t| t.name))
}

fn version_parts(version: &str) -> Option<Vec<u64>> {
    version
        .trim()
        .trim_start_matches(['v', 'V'])
        .split('.')
        .map(|part| part.parse::<u64>().ok())
        .collect()
}

/// Whether `latest` names a newer release than `current`
///
/// Dotted numeric versions (with or without a `v` prefix) are compared
/// numerically; anything else counts as newer when it differs.
pub fn is_newer(latest: &str, current: &str) -> bool {
    match (version_parts(latest), version_parts(current)) {
        (Some(latest), Some(current)) => latest > current,
        _ => latest.trim_start_matches('v') != current.trim_start_matches('v'),
    }
}

/// Client for the release tags feed
pub struct ReleaseClient {
    client: Client,
    url: String,
}

impl ReleaseClient {
    /// Creates a client for the given feed URL
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        ReleaseClient {
            client,
            url: url.into(),
        }
    }

    /// Fetches the newest release tag, if the feed has any
    pub async fn latest_tag(&self) -> Result<Option<String>, SwitcherError> {
        let body = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        parse_latest_tag(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_tag_is_first() {
        let body = r#"[{ "name": "v0.2.0", "zipball_url": "x" }, { "name": "v0.1.0" }]"#;
        assert_eq!(parse_latest_tag(body).unwrap(), Some("v0.2.0".into()));
        assert_eq!(parse_latest_tag("[]").unwrap(), None);
    }

    #[test]
    fn test_version_comparison() {
        assert!(is_newer("v0.2.0", "0.1.0"));
        assert!(is_newer("v0.10.0", "0.9.3"));
        assert!(!is_newer("v0.1.0", "0.1.0"));
        assert!(!is_newer("0.0.4", "0.1.0"));
        assert!(is_newer("nightly", "0.1.0"));
    }
}
