use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use roster_model::PeoplePage;
use tracing::{debug, info};
use url::Url;

use super::routes;
use super::source::PageSource;
use crate::error::{FetchError, Result};

/// HTTP client for the `people` collection.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
    timeout: Option<Duration>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ApiClient {
    /// Create a client rooted at `base_url` (for example
    /// `https://swapi.dev/api`). With `timeout` unset a request waits until
    /// the transport gives up.
    pub fn new(base_url: impl AsRef<str>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = normalize_base(base_url.as_ref())?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::Client)?;

        info!(base_url = %base_url, ?timeout, "[ApiClient] created");

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/people/?page=<page>`
    pub fn people_url(&self, page: u32) -> Result<Url> {
        let mut url = self.base_url.join(routes::PEOPLE)?;
        url.query_pairs_mut()
            .append_pair(routes::PAGE_QUERY, &page.to_string());
        Ok(url)
    }

    pub async fn get_people_page(&self, page: u32) -> Result<PeoplePage> {
        let url = self.people_url(page)?;
        debug!(page, url = %url, "[ApiClient] GET people page");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let page_body: PeoplePage =
            serde_json::from_slice(&bytes).map_err(|source| FetchError::Decode {
                url: url.to_string(),
                source,
            })?;

        debug!(page, records = page_body.len(), "[ApiClient] people page decoded");
        Ok(page_body)
    }
}

#[async_trait]
impl PageSource for ApiClient {
    async fn fetch_people(&self, page: u32) -> Result<PeoplePage> {
        self.get_people_page(page).await
    }
}

/// Parse the base URL and make sure its path ends in `/` so relative joins
/// append instead of replacing the last segment.
fn normalize_base(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim())?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    Ok(url)
}
