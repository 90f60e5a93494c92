use crate::core::Storage;
use crate::utils::error::{AnalyzerError, Result};
use reqwest::Client;

/// Fetches the data source over HTTP(S). Any non-2xx status is an error.
#[derive(Debug, Clone, Default)]
pub struct HttpStorage {
    client: Client,
}

impl HttpStorage {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Storage for HttpStorage {
    async fn read_file(&self, url: &str) -> Result<Vec<u8>> {
        tracing::debug!("Making request to: {}", url);
        let response = self.client.get(url).send().await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);
        if !status.is_success() {
            return Err(AnalyzerError::HttpStatusError {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_fetches_body() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/manuscripts.csv");
            then.status(200)
                .header("Content-Type", "text/csv")
                .body("header\n1,2,3");
        });

        let storage = HttpStorage::new();
        let data = storage.read_file(&server.url("/manuscripts.csv")).await.unwrap();

        api_mock.assert();
        assert_eq!(data, b"header\n1,2,3");
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/missing.csv");
            then.status(404);
        });

        let storage = HttpStorage::new();
        let err = storage.read_file(&server.url("/missing.csv")).await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, AnalyzerError::HttpStatusError { status: 404, .. }));
    }
}
