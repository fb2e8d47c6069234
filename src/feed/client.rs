//! HTTP feed client
//!
//! Fetches the pipeline documents from the site that hosts them.

use crate::consts::cli_consts::http::USER_AGENT;
use crate::feed::error::FeedError;
use crate::feed::{FeedSource, Resource};
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpFeedClient {
    client: Client,
    base_url: String,
}

impl HttpFeedClient {
    pub fn new(
        base_url: &str,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, FeedError> {
        let client = ClientBuilder::new()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    fn build_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn handle_response_status(response: Response) -> Result<Response, FeedError> {
        if !response.status().is_success() {
            return Err(FeedError::from_response(response).await);
        }
        Ok(response)
    }
}

#[async_trait::async_trait]
impl FeedSource for HttpFeedClient {
    fn location(&self) -> String {
        self.base_url.clone()
    }

    async fn fetch(&self, resource: Resource) -> Result<Vec<u8>, FeedError> {
        let url = self.build_url(resource.path());
        let response = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .send()
            .await?;

        let response = Self::handle_response_status(response).await?;
        let response_bytes = response.bytes().await?;
        Ok(response_bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn client(base_url: &str) -> HttpFeedClient {
        HttpFeedClient::new(base_url, Duration::from_secs(2), Duration::from_secs(5)).unwrap()
    }

    /// Serve a single canned HTTP response on an ephemeral port.
    async fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 2048];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            let _ = socket.write_all(response.as_bytes()).await;
            let _ = socket.shutdown().await;
        });
        format!("http://{}", addr)
    }

    #[test]
    fn test_build_url_joins_without_double_slash() {
        let c = client("https://intel.example.com/");
        assert_eq!(
            c.build_url(Resource::Alerts.path()),
            "https://intel.example.com/data/alerts.json"
        );
        let c = client("http://localhost:3000");
        assert_eq!(
            c.build_url(Resource::Events.path()),
            "http://localhost:3000/data/events_sources.json"
        );
    }

    #[tokio::test]
    async fn test_fetch_returns_body_on_success() {
        let base = serve_once("HTTP/1.1 200 OK", "[1,2]").await;
        let body = client(&base).fetch(Resource::Events).await.unwrap();
        assert_eq!(body, b"[1,2]");
    }

    #[tokio::test]
    async fn test_fetch_maps_non_success_status() {
        let base = serve_once("HTTP/1.1 404 Not Found", "missing").await;
        match client(&base).fetch(Resource::Wallets).await {
            Err(FeedError::Http { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message, "missing");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_replaces_html_error_page_with_reason() {
        let base = serve_once(
            "HTTP/1.1 503 Service Unavailable",
            "<html>\n<body><h1>503</h1><p>upstream gone</p></body>\n</html>",
        )
        .await;
        match client(&base).fetch(Resource::Alerts).await {
            Err(FeedError::Http { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_unreachable_host_is_transport_error() {
        // Bind then drop to get a port nobody listens on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let result = client(&format!("http://{}", addr))
            .fetch(Resource::Alerts)
            .await;
        assert!(matches!(result, Err(FeedError::Reqwest(_))));
    }
}
