use std::sync::Arc;

use url::Url;

use crate::decode::decode_html;
use crate::{ExtractedContent, Extractor, FailureKind, FetchError, Fetcher};

/// Fetches an arbitrary page and reduces it to readable chunks and links.
pub struct PageFetcher {
    fetcher: Arc<dyn Fetcher>,
    extractor: Arc<dyn Extractor>,
}

impl PageFetcher {
    pub fn new(fetcher: Arc<dyn Fetcher>, extractor: Arc<dyn Extractor>) -> Self {
        Self { fetcher, extractor }
    }

    pub async fn fetch(&self, url: &str) -> Result<ExtractedContent, FetchError> {
        let parsed =
            Url::parse(url).map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(FetchError::new(FailureKind::InvalidUrl, "not a web address"));
        }

        let output = self.fetcher.fetch(url).await?;
        let decoded = decode_html(&output.bytes, output.metadata.content_type.as_deref());
        if decoded.had_errors {
            gateway_logging::gateway_debug!(
                "Replaced malformed {} bytes in {}",
                decoded.encoding_label,
                output.metadata.final_url
            );
        }
        if output.metadata.redirect_count > 0 {
            gateway_logging::gateway_info!(
                "Followed {} redirect(s) to {}",
                output.metadata.redirect_count,
                output.metadata.final_url
            );
        }

        Ok(self
            .extractor
            .extract(&decoded.html, &output.metadata.final_url))
    }
}
