// src/services/fetcher.rs

//! Station page fetching.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::FetcherConfig;
use crate::utils::http::create_async_client;

/// Source of raw station page markup.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the page body. Any non-success outcome is an error.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Fetches station pages over HTTP(S).
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    timeout_secs: u64,
}

impl HttpFetcher {
    /// Create a fetcher with a client built from the given configuration.
    pub fn new(config: &FetcherConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
            timeout_secs: config.timeout_secs,
        })
    }

    fn transport_error(&self, url: &str, error: reqwest::Error) -> AppError {
        if error.is_timeout() {
            AppError::Timeout {
                url: url.to_string(),
                secs: self.timeout_secs,
            }
        } else {
            AppError::Http(error)
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|e| self.transport_error(url, e))
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    use super::*;

    /// Serve one canned HTTP response on a local port.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{addr}/pantstation/odense/")
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let url = serve_once("200 OK", "<p>Åben. Alt fungerer</p>").await;
        let fetcher = HttpFetcher::new(&FetcherConfig::default()).unwrap();

        let body = fetcher.fetch(&url).await.unwrap();
        assert_eq!(body, "<p>Åben. Alt fungerer</p>");
    }

    #[tokio::test]
    async fn test_fetch_rejects_error_status() {
        let url = serve_once("503 Service Unavailable", "nede").await;
        let fetcher = HttpFetcher::new(&FetcherConfig::default()).unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, AppError::HttpStatus { status: 503, .. }));
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_fetch_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(10)).await;
        });

        let config = FetcherConfig {
            timeout_secs: 1,
            ..FetcherConfig::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();

        let err = fetcher
            .fetch(&format!("http://{addr}/pantstation/odense/"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Timeout { secs: 1, .. }));
    }
}
