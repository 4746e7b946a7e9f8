use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use shelf_config::{Config, Session};
use shelf_models::{ExternalItem, MediaType, TrackedRecord};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::decode::{decode_discovery, decode_user_media};
use crate::error::SourceError;
use crate::traits::ShelfSource;

/// Client for the backend REST API
#[derive(Clone)]
pub struct ApiClient {
    client: Arc<Client>,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Result<Self, SourceError> {
        let base_url = config.api_base().to_string();
        let client = Client::builder()
            .user_agent(config.api.user_agent.as_str())
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()
            .map_err(|source| SourceError::Http {
                url: base_url.clone(),
                source,
            })?;

        Ok(Self {
            client: Arc::new(client),
            base_url,
            session: None,
        })
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn discover_url(&self, media_type: MediaType) -> String {
        format!("{}/discover/{}", self.base_url, media_type)
    }

    pub fn user_media_url(&self, user_id: &str, media_type: MediaType) -> String {
        format!(
            "{}/users/{}/media?type={}",
            self.base_url,
            urlencoding::encode(user_id),
            media_type
        )
    }

    async fn get_json(&self, url: &str, token: Option<&str>) -> Result<Value, SourceError> {
        debug!("GET {}", url);
        let mut request = self.client.get(url);
        if let Some(token) = token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|source| SourceError::Http {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|source| SourceError::Http {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|source| SourceError::Decode {
            origin: url.to_string(),
            source,
        })
    }
}

#[async_trait]
impl ShelfSource for ApiClient {
    fn source_name(&self) -> &str {
        "api"
    }

    fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    async fn discover(&self, media_type: MediaType) -> Result<Vec<ExternalItem>, SourceError> {
        let url = self.discover_url(media_type);
        let token = self.session.as_ref().map(|s| s.token.as_str());
        let value = self.get_json(&url, token).await?;
        Ok(decode_discovery(value, media_type, &url))
    }

    async fn tracked(&self, media_type: MediaType) -> Result<Vec<TrackedRecord>, SourceError> {
        let session = self.session.as_ref().ok_or(SourceError::NotAuthenticated)?;
        let url = self.user_media_url(&session.user_id, media_type);
        let value = self.get_json(&url, Some(&session.token)).await?;
        Ok(decode_user_media(value, media_type, &url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_config::ApiConfig;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    fn config(base_url: &str) -> Config {
        Config {
            api: ApiConfig {
                base_url: base_url.to_string(),
                timeout_secs: 2,
                ..ApiConfig::default()
            },
            ..Config::default()
        }
    }

    fn session() -> Session {
        Session {
            user_id: "user 1".to_string(),
            token: "tok".to_string(),
        }
    }

    /// Serve one canned response; yields the raw request text
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "{}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8_lossy(&request).to_string()
        });
        (format!("http://{}", addr), handle)
    }

    #[test]
    fn test_urls() {
        let client = ApiClient::new(&config("https://shelf.example/api/")).unwrap();
        assert_eq!(client.discover_url(MediaType::Tv), "https://shelf.example/api/discover/tv");
        assert_eq!(
            client.user_media_url("user 1", MediaType::Books),
            "https://shelf.example/api/users/user%201/media?type=books"
        );
    }

    #[tokio::test]
    async fn test_tracked_requires_session() {
        let client = ApiClient::new(&config("http://127.0.0.1:9")).unwrap();
        assert!(!client.is_authenticated());
        let err = client.tracked(MediaType::Movie).await.unwrap_err();
        assert!(matches!(err, SourceError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_discover_fails_closed_when_unreachable() {
        let client = ApiClient::new(&config("http://127.0.0.1:9")).unwrap();
        assert!(client.discover(MediaType::Movie).await.is_err());
        assert!(client.discover_or_empty(MediaType::Movie).await.is_empty());
    }

    #[tokio::test]
    async fn test_tracked_sends_bearer_token() {
        let (base, server) = serve_once(
            "HTTP/1.1 200 OK",
            r#"[{"id": 5, "status": "COMPLETED", "media": {"mediaId": "7", "title": "Dune", "type": "movie"}}]"#,
        )
        .await;
        let client = ApiClient::new(&config(&base)).unwrap().with_session(session());

        let tracked = client.tracked(MediaType::Movie).await.unwrap();
        assert_eq!(tracked.len(), 1);
        assert_eq!(tracked[0].media_id.as_deref(), Some("7"));

        let request = server.await.unwrap();
        assert!(request.starts_with("GET /users/user%201/media?type=movie "));
        assert!(request.to_lowercase().contains("authorization: bearer tok"));
    }

    #[tokio::test]
    async fn test_discover_error_status() {
        let (base, server) = serve_once("HTTP/1.1 503 Service Unavailable", "{}").await;
        let client = ApiClient::new(&config(&base)).unwrap();

        let err = client.discover(MediaType::Music).await.unwrap_err();
        assert!(matches!(err, SourceError::Status { status: 503, .. }));
        server.await.unwrap();
    }
}
