// NFT marketplace "popular collections" listing

use crate::error::UpstreamError;
use crate::models::NftCollection;
use tracing::instrument;

pub struct MarketplaceRepo {
    http: reqwest::Client,
    url: String,
}

impl MarketplaceRepo {
    pub fn new(http: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// Collections in the order the marketplace returns them.
    #[instrument(skip(self), fields(repo = "marketplace", url = %self.url))]
    pub async fn popular_collections(&self) -> Result<Vec<NftCollection>, UpstreamError> {
        let response = self.http.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Unavailable(format!("HTTP {}", status)));
        }
        let body = response.bytes().await?;
        serde_json::from_slice(&body)
            .map_err(|e| UpstreamError::Malformed(format!("collections: {}", e)))
    }
}
