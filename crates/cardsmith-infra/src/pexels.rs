//! PexelsClient -- [`ImageSearch`] implementation for the Pexels photo API.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and only exposed when
//! building the `Authorization` header.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use cardsmith_core::imagery::ImageSearch;
use cardsmith_types::blueprint::BackgroundPhoto;
use cardsmith_types::error::ImageSearchError;

const PEXELS_BASE_URL: &str = "https://api.pexels.com";

/// Card backgrounds are requested in landscape.
const ORIENTATION: &str = "landscape";

/// Pexels photo search client.
///
/// Does not derive Debug so the key cannot end up in logs.
pub struct PexelsClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl PexelsClient {
    /// Request timeout for a search call.
    const TIMEOUT: Duration = Duration::from_secs(15);

    pub fn new(api_key: SecretString) -> Result<Self, ImageSearchError> {
        let client = reqwest::Client::builder()
            .timeout(Self::TIMEOUT)
            .build()
            .map_err(|e| ImageSearchError::Request(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: PEXELS_BASE_URL.to_string(),
        })
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    id: u64,
    url: String,
    #[serde(default)]
    photographer: String,
    #[serde(default)]
    photographer_url: String,
    #[serde(default)]
    avg_color: Option<String>,
    #[serde(default)]
    src: PhotoSources,
}

#[derive(Debug, Default, Deserialize)]
struct PhotoSources {
    large2x: Option<String>,
    original: Option<String>,
}

impl From<PexelsPhoto> for BackgroundPhoto {
    fn from(photo: PexelsPhoto) -> Self {
        let image_url = [photo.src.large2x, photo.src.original]
            .into_iter()
            .flatten()
            .find(|candidate| !candidate.is_empty())
            .unwrap_or_else(|| photo.url.clone());
        BackgroundPhoto {
            id: photo.id,
            url: photo.url,
            photographer: photo.photographer,
            photographer_url: photo.photographer_url,
            image_url,
            avg_color: photo.avg_color,
        }
    }
}

impl ImageSearch for PexelsClient {
    fn name(&self) -> &str {
        "pexels"
    }

    async fn search(
        &self,
        query: &str,
        per_page: u32,
    ) -> Result<Vec<BackgroundPhoto>, ImageSearchError> {
        let url = format!("{}/v1/search", self.base_url);
        let per_page = per_page.to_string();

        let response = self
            .client
            .get(&url)
            .header("Authorization", self.api_key.expose_secret())
            .query(&[
                ("query", query),
                ("per_page", per_page.as_str()),
                ("orientation", ORIENTATION),
            ])
            .send()
            .await
            .map_err(|e| ImageSearchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => ImageSearchError::AuthenticationFailed,
                code => ImageSearchError::Status { status: code, body },
            });
        }

        let payload: SearchResponse = response
            .json()
            .await
            .map_err(|e| ImageSearchError::Deserialization(e.to_string()))?;

        Ok(payload.photos.into_iter().map(BackgroundPhoto::from).collect())
    }
}
