use anyhow::{bail, Context, Result};
use reqwest::Client;
use scraper::Html;
use url::Url;

use crate::config::FetchConfig;

/// A parsed rendered page plus the host it came from. The host drives
/// platform detection; the tree drives extraction and rendering.
pub struct Page {
    html: Html,
    host: String,
    source: Option<Url>,
}

impl Page {
    pub fn parse(raw_html: &str, source: Option<Url>) -> Self {
        let host = source
            .as_ref()
            .and_then(|u| u.host_str())
            .unwrap_or_default()
            .to_string();
        Self {
            html: Html::parse_document(raw_html),
            host,
            source,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn source(&self) -> Option<&Url> {
        self.source.as_ref()
    }

    pub fn document(&self) -> &Html {
        &self.html
    }
}

pub struct PageFetcher {
    client: Client,
    config: FetchConfig,
}

impl PageFetcher {
    pub fn new(client: Client, config: FetchConfig) -> Self {
        Self { client, config }
    }

    pub async fn fetch(&self, raw_url: &str) -> Result<Page> {
        let url = Url::parse(raw_url).with_context(|| format!("invalid URL {raw_url}"))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("unsupported URL scheme {}", url.scheme());
        }

        let response = self
            .client
            .get(url.clone())
            .timeout(self.config.timeout)
            .send()
            .await
            .with_context(|| format!("failed to fetch {url}"))?;

        let status = response.status();
        if !status.is_success() {
            bail!("fetching {url} returned HTTP {status}");
        }

        let body = response
            .text()
            .await
            .with_context(|| format!("failed to read body of {url}"))?;
        if body.len() > self.config.max_body_bytes {
            bail!(
                "body of {url} is {} bytes, over the {} byte limit",
                body.len(),
                self.config.max_body_bytes
            );
        }

        Ok(Page::parse(&body, Some(url)))
    }
}
