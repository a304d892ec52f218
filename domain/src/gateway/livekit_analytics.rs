//! LiveKit Cloud analytics API client for room session history.
//!
//! This module lists the historical sessions of a LiveKit Cloud project,
//! together with the egress (recording) attempts attached to each session.

use crate::access_token::{required, AccessTokenMinter, LiveKitTokenMinter};
use crate::error::{DomainErrorKind, Error, ExternalErrorKind};
use crate::gateway::{SessionFilters, SessionSource};
use async_trait::async_trait;
use log::*;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use room_analytics::SessionsPage;
use secrecy::ExposeSecret;
use service::config::Config;

/// LiveKit Cloud analytics API client
pub struct LiveKitAnalyticsClient {
    client: reqwest::Client,
    base_url: String,
    project_id: String,
    minter: Box<dyn AccessTokenMinter>,
}

impl LiveKitAnalyticsClient {
    /// Create a client for `project_id` that authenticates each call with a token from `minter`
    pub fn new(
        base_url: &str,
        project_id: String,
        minter: Box<dyn AccessTokenMinter>,
    ) -> Result<Self, Error> {
        let client = reqwest::Client::builder().use_rustls_tls().build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            project_id,
            minter,
        })
    }

    /// Create a client from the credentials and project identifier in `config`.
    ///
    /// Missing credentials fail here with a configuration error, before any request is sent.
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        let minter = LiveKitTokenMinter::from_config(config)?;
        let project_id = required(config.livekit_project_id(), "LIVEKIT_PROJECT_ID")?;

        Self::new(
            config.livekit_analytics_base_url(),
            project_id,
            Box::new(minter),
        )
    }

    /// The sessions listing endpoint of the configured project
    pub fn sessions_url(&self) -> String {
        format!("{}/api/project/{}/sessions", self.base_url, self.project_id)
    }

    /// Fetch one page of session history.
    pub async fn fetch_sessions(&self, filters: &SessionFilters) -> Result<SessionsPage, Error> {
        let token = self.minter.mint()?;

        let mut request = self
            .client
            .get(self.sessions_url())
            .bearer_auth(token.expose_secret())
            .header(CACHE_CONTROL, "no-cache")
            .header(ACCEPT, "application/json");

        let query = filters.query_pairs();
        if !query.is_empty() {
            request = request.query(&query);
        }

        let request = request.build()?;
        debug!("Fetching LiveKit session history: {}", request.url());

        let response = self.client.execute(request).await.map_err(|e| {
            warn!("Failed to reach LiveKit analytics API: {e:?}");
            Error {
                source: Some(Box::new(e)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            warn!("Failed to read LiveKit analytics response body: {e:?}");
            Error {
                source: Some(Box::new(e)),
                error_kind: DomainErrorKind::External(ExternalErrorKind::Network),
            }
        })?;

        if !status.is_success() {
            warn!("LiveKit analytics API error: {} - {}", status, body);
            return Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::UpstreamHttp {
                    status: status.as_u16(),
                    body,
                }),
            });
        }

        let page: SessionsPage = serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse LiveKit analytics response: {e:?}");
            Error::from(e)
        })?;

        info!(
            "Fetched {} LiveKit sessions for project {}",
            page.sessions.len(),
            self.project_id
        );

        Ok(page)
    }
}

#[async_trait]
impl SessionSource for LiveKitAnalyticsClient {
    async fn fetch_sessions(&self, filters: &SessionFilters) -> Result<SessionsPage, Error> {
        LiveKitAnalyticsClient::fetch_sessions(self, filters).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InternalErrorKind;
    use clap::Parser;
    use mockito::{Matcher, Server};
    use secrecy::SecretString;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct StaticToken(&'static str);

    impl AccessTokenMinter for StaticToken {
        fn mint(&self) -> Result<SecretString, Error> {
            Ok(SecretString::new(self.0.to_string()))
        }
    }

    /// Hands out `token_1`, `token_2`, ... and counts how often it was asked
    struct CountingMinter(Arc<AtomicUsize>);

    impl AccessTokenMinter for CountingMinter {
        fn mint(&self) -> Result<SecretString, Error> {
            let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
            Ok(SecretString::new(format!("token_{n}")))
        }
    }

    fn client_for(server_url: &str) -> LiveKitAnalyticsClient {
        LiveKitAnalyticsClient::new(
            server_url,
            "p_test".to_string(),
            Box::new(StaticToken("test_token_123")),
        )
        .unwrap()
    }

    #[test]
    fn test_sessions_url_targets_the_project() {
        let client = client_for("https://cloud-api.livekit.io/");

        assert_eq!(
            client.sessions_url(),
            "https://cloud-api.livekit.io/api/project/p_test/sessions"
        );
    }

    #[tokio::test]
    async fn test_fetch_sessions_success() {
        let mut server = Server::new_async().await;

        let mock = server
            .mock("GET", "/api/project/p_test/sessions")
            .match_header("authorization", "Bearer test_token_123")
            .match_header("cache-control", "no-cache")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("limit".into(), "10".into()),
                Matcher::UrlEncoded("room_name".into(), "standup".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "sessions": [
                        {
                            "id": "RM_1",
                            "room_name": "standup",
                            "created_at": 1000,
                            "egress_info": [{ "egress_id": "EG_1", "status": "EGRESS_COMPLETE" }]
                        },
                        { "id": "RM_2", "room_name": "standup", "created_at": 2000 }
                    ],
                    "next_page_token": "page_2"
                })
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let filters = SessionFilters {
            limit: Some("10".to_string()),
            room_name: Some("standup".to_string()),
            ..Default::default()
        };

        let page = client_for(&server.url())
            .fetch_sessions(&filters)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(page.sessions.len(), 2);
        assert_eq!(page.sessions[0].id.as_deref(), Some("RM_1"));
        assert_eq!(page.sessions[1].id.as_deref(), Some("RM_2"));
        assert_eq!(page.next_page_token.as_deref(), Some("page_2"));
    }

    #[tokio::test]
    async fn test_each_fetch_presents_a_freshly_minted_token() {
        let mut server = Server::new_async().await;
        let first = server
            .mock("GET", "/api/project/p_test/sessions")
            .match_header("authorization", "Bearer token_1")
            .with_status(200)
            .with_body(json!({ "sessions": [] }).to_string())
            .expect(1)
            .create_async()
            .await;
        let second = server
            .mock("GET", "/api/project/p_test/sessions")
            .match_header("authorization", "Bearer token_2")
            .with_status(200)
            .with_body(json!({ "sessions": [] }).to_string())
            .expect(1)
            .create_async()
            .await;

        let mints = Arc::new(AtomicUsize::new(0));
        let client = LiveKitAnalyticsClient::new(
            &server.url(),
            "p_test".to_string(),
            Box::new(CountingMinter(Arc::clone(&mints))),
        )
        .unwrap();

        client.fetch_sessions(&SessionFilters::default()).await.unwrap();
        client.fetch_sessions(&SessionFilters::default()).await.unwrap();

        first.assert_async().await;
        second.assert_async().await;
        assert_eq!(mints.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fetch_sessions_propagates_upstream_status() {
        for status in [404, 500] {
            let mut server = Server::new_async().await;
            let _mock = server
                .mock("GET", "/api/project/p_test/sessions")
                .with_status(status)
                .with_body("upstream says no")
                .create_async()
                .await;

            let result = client_for(&server.url())
                .fetch_sessions(&SessionFilters::default())
                .await;

            match result {
                Err(e) => assert_eq!(
                    e.error_kind,
                    DomainErrorKind::External(ExternalErrorKind::UpstreamHttp {
                        status: status as u16,
                        body: "upstream says no".to_string(),
                    })
                ),
                Ok(page) => panic!("Expected UpstreamHttp error, got {} sessions", page.sessions.len()),
            }
        }
    }

    #[tokio::test]
    async fn test_fetch_sessions_rejects_unparseable_body() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/project/p_test/sessions")
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;

        let result = client_for(&server.url())
            .fetch_sessions(&SessionFilters::default())
            .await;

        assert!(matches!(
            result.map_err(|e| e.error_kind),
            Err(DomainErrorKind::External(ExternalErrorKind::Decode(_)))
        ));
    }

    #[tokio::test]
    async fn test_fetch_sessions_reports_transport_failure() {
        // Nothing listens on the discard port
        let result = client_for("http://127.0.0.1:9")
            .fetch_sessions(&SessionFilters::default())
            .await;

        assert!(matches!(
            result.map_err(|e| e.error_kind),
            Err(DomainErrorKind::External(ExternalErrorKind::Network))
        ));
    }

    #[test]
    fn test_from_config_requires_project_id() {
        let config = Config::try_parse_from([
            "room_history",
            "--livekit-api-key",
            "APIkey123",
            "--livekit-api-secret",
            "s3cr3t",
            "--livekit-project-id",
            "",
        ])
        .unwrap();

        let result = LiveKitAnalyticsClient::from_config(&config);

        assert!(matches!(
            result.map(|_| ()).map_err(|e| e.error_kind),
            Err(DomainErrorKind::Internal(InternalErrorKind::Config(_)))
        ));
    }
}
