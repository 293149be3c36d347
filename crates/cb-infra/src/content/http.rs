use std::collections::BTreeMap;

use async_trait::async_trait;
use tracing::{debug, info_span, Instrument};

use cb_core::ports::{ContentError, ContentProviderPort};
use cb_core::{FormatTag, PayloadContent};

/// Fetches each format's content from `<base_url>/<file>`.
pub struct HttpContentProvider {
    client: reqwest::Client,
    base_url: String,
    routes: BTreeMap<FormatTag, String>,
}

impl HttpContentProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        let routes = [
            (FormatTag::plain_text(), "copy.txt"),
            (FormatTag::rich_text(), "copy.html"),
            (FormatTag::image(), "copy.png"),
            (FormatTag::custom(), "copy.json"),
        ]
        .into_iter()
        .map(|(tag, file)| (tag, file.to_string()))
        .collect();

        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            routes,
        }
    }

    pub fn with_route(mut self, tag: FormatTag, file: impl Into<String>) -> Self {
        self.routes.insert(tag, file.into());
        self
    }

    fn url_for(&self, format: &FormatTag) -> Option<String> {
        self.routes.get(format).map(|file| {
            format!(
                "{}/{}",
                self.base_url.trim_end_matches('/'),
                file.trim_start_matches('/')
            )
        })
    }

    async fn fetch(&self, format: &FormatTag, url: &str) -> Result<PayloadContent, ContentError> {
        let network = |reason: String| ContentError::Network {
            format: format.clone(),
            reason,
        };
        let parse = |reason: String| ContentError::Parse {
            format: format.clone(),
            reason,
        };

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(network(format!("GET {url} returned {status}")));
        }

        if format.is_binary() {
            let bytes = response.bytes().await.map_err(|e| network(e.to_string()))?;
            debug!(bytes = bytes.len(), "Fetched binary content");
            return Ok(PayloadContent::Binary(bytes));
        }

        let text = response.text().await.map_err(|e| parse(e.to_string()))?;
        if format.as_str() == FormatTag::CUSTOM {
            serde_json::from_str::<serde_json::Value>(&text)
                .map_err(|e| parse(format!("custom format is not JSON: {e}")))?;
        }
        debug!(bytes = text.len(), "Fetched text content");
        Ok(PayloadContent::Text(text))
    }
}

#[async_trait]
impl ContentProviderPort for HttpContentProvider {
    async fn resolve(&self, format: &FormatTag) -> Result<PayloadContent, ContentError> {
        let url = self.url_for(format).ok_or_else(|| ContentError::Network {
            format: format.clone(),
            reason: "no route configured for format".into(),
        })?;

        let span = info_span!("infra.content.http.resolve", format = %format, url = %url);
        self.fetch(format, &url).instrument(span).await
    }
}
