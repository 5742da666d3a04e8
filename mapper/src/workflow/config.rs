use anyhow::Context;
use quakecore::presenter::AccessToken;
use quakecore::SceneConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use crate::source::http::USGS_DAY_FEED;

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: USGS_DAY_FEED.to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub bind: SocketAddr,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 9000)),
        }
    }
}

/// Everything the driver needs, loadable from YAML.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperConfig {
    pub feed: FeedConfig,
    pub scene: SceneConfig,
    pub bridge: BridgeConfig,
}

/// Command-line values that take precedence over the file.
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub feed_url: Option<String>,
    pub access_token: Option<String>,
    pub radius_scale: Option<f64>,
    pub bind: Option<SocketAddr>,
}

impl MapperConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading mapper config {}", path_ref.display()))?;
        let config: MapperConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing mapper config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(url) = overrides.feed_url {
            self.feed.url = url;
        }
        if let Some(token) = overrides.access_token {
            self.scene.tiles.access_token = AccessToken::new(token);
        }
        if let Some(scale) = overrides.radius_scale {
            self.scene.radius_scale = scale;
        }
        if let Some(bind) = overrides.bind {
            self.bridge.bind = bind;
        }
        self
    }
}
