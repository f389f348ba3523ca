use std::time::Duration;

use anyhow::{Context, ensure};
use board_client::display::BoardOrientation;
use serde::{Deserialize, Serialize};
use url::Url;


pub const DEFAULT_COMMIT_TIMEOUT: Duration = Duration::from_secs(10);

fn default_commit_timeout() -> Duration { DEFAULT_COMMIT_TIMEOUT }

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    // Websocket the authority pushes boards to, e.g. "ws://localhost:3512".
    pub push_url: String,
    // Base URL for move commits, e.g. "http://localhost:5000".
    pub authority_url: String,
    // A commit that takes longer than this is reported as failed and the board becomes
    // clickable again.
    #[serde(with = "humantime_serde", default = "default_commit_timeout")]
    pub commit_timeout: Duration,
    #[serde(default)]
    pub orientation: BoardOrientation,
}

impl ClientConfig {
    pub fn from_yaml(contents: &str) -> anyhow::Result<Self> {
        let config: ClientConfig = serde_yaml::from_str(contents).context("Parsing config file")?;
        config.validate()?;
        Ok(config)
    }

    pub fn read_file(filename: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(filename)
            .with_context(|| format!("Reading config file '{filename}'"))?;
        Self::from_yaml(&contents)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let push_url = Url::parse(&self.push_url).with_context(|| format!("Bad push URL '{}'", self.push_url))?;
        ensure!(
            matches!(push_url.scheme(), "ws" | "wss"),
            "Push URL must be a websocket URL, got '{}'",
            self.push_url
        );
        let authority_url = Url::parse(&self.authority_url)
            .with_context(|| format!("Bad authority URL '{}'", self.authority_url))?;
        ensure!(
            matches!(authority_url.scheme(), "http" | "https"),
            "Authority URL must be an HTTP URL, got '{}'",
            self.authority_url
        );
        ensure!(!self.commit_timeout.is_zero(), "Commit timeout must be positive");
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parse_yaml() {
        let config = ClientConfig::from_yaml(
            "push_url: ws://localhost:3512\n\
             authority_url: http://localhost:5000\n\
             commit_timeout: 3s\n\
             orientation: Rotated\n",
        )
        .unwrap();
        assert_eq!(config, ClientConfig {
            push_url: "ws://localhost:3512".to_owned(),
            authority_url: "http://localhost:5000".to_owned(),
            commit_timeout: Duration::from_secs(3),
            orientation: BoardOrientation::Rotated,
        });
    }

    #[test]
    fn defaults_and_validation() {
        let config =
            ClientConfig::from_yaml("push_url: ws://a:1\nauthority_url: http://a:2\n").unwrap();
        assert_eq!(config.commit_timeout, DEFAULT_COMMIT_TIMEOUT);
        assert_eq!(config.orientation, BoardOrientation::Normal);

        assert!(ClientConfig::from_yaml("push_url: http://a:1\nauthority_url: http://a:2\n").is_err());
        assert!(ClientConfig::from_yaml("push_url: ws://a:1\n").is_err());
    }
}
