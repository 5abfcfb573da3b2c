use std::time::Duration;

use async_trait::async_trait;
use energy_dashboard::{Fetcher, LoaderError};

/// GETs resources under the configured API base.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFetcher {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        let client = match reqwest::Client::builder().timeout(timeout).build() {
            Ok(client) => client,
            Err(error) => {
                tracing::warn!(%error, ?timeout, "HTTP client setup failed, requests will not time out");
                reqwest::Client::default()
            }
        };

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[async_trait(?Send)]
impl Fetcher for HttpFetcher {
    async fn fetch_text(&self, path: &str) -> Result<String, LoaderError> {
        let url = self.url(path);
        tracing::debug!(%url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LoaderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoaderError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| LoaderError::Network(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_and_path() {
        let fetcher = HttpFetcher::new("http://localhost:5000/api/", Duration::from_secs(1));
        assert_eq!(
            fetcher.url("/city-comparison"),
            "http://localhost:5000/api/city-comparison"
        );
    }

    #[tokio::test]
    async fn unreachable_host_is_a_network_error() {
        let fetcher = HttpFetcher::new("http://127.0.0.1:9", Duration::from_millis(500));
        let result = fetcher.fetch_text("/regions").await;
        assert!(matches!(result, Err(LoaderError::Network(_))));
    }

    #[tokio::test]
    async fn silent_server_hits_the_timeout() -> Result<(), Box<dyn std::error::Error>> {
        // Accepts connections but never answers.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let address = listener.local_addr()?;
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let fetcher = HttpFetcher::new(&format!("http://{address}"), Duration::from_millis(200));
        let result = tokio::time::timeout(Duration::from_secs(10), fetcher.fetch_text("/regions")).await?;
        assert!(matches!(result, Err(LoaderError::Network(_))));

        server.abort();
        Ok(())
    }
}
