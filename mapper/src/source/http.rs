use anyhow::Context;
use log::info;
use quakecore::feed::parse_feed;
use quakecore::prelude::{EventSource, SourceError, SourceResult};
use quakecore::EventRecord;
use reqwest::blocking::Client;

/// Public USGS summary feed: magnitude 1.0+ over the past day.
pub const USGS_DAY_FEED: &str =
    "https://earthquake.usgs.gov/earthquakes/feed/v1.0/summary/1.0_day.geojson";

/// Single blocking GET per fetch; no retry and no timeout beyond the client's.
pub struct HttpFeedSource {
    client: Client,
    url: String,
}

impl HttpFeedSource {
    pub fn new(url: impl Into<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .build()
            .context("building HTTP client for the feed")?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

impl EventSource for HttpFeedSource {
    fn fetch_events(&self) -> SourceResult<Vec<EventRecord>> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .map_err(|e| SourceError::Unreachable(format!("GET {} failed: {}", self.url, e)))?;

        if !resp.status().is_success() {
            return Err(SourceError::Unreachable(format!(
                "GET {} returned status {}",
                self.url,
                resp.status()
            )));
        }

        let body = resp
            .bytes()
            .map_err(|e| SourceError::Unreachable(format!("reading body of {}: {}", self.url, e)))?;
        info!("Fetched {} bytes from {}", body.len(), self.url);

        parse_feed(&body)
    }

    fn describe(&self) -> String {
        format!("http feed {}", self.url)
    }
}
