use std::sync::Arc;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{CollectionItem, UserProfile},
};

use super::{
    mapper, transport::ReqwestTransport, Endpoint, Filters, RetryPolicy, Sleeper, TokioSleeper,
    Transport, XmlElement,
};

/// Client for the BGG XML API.
///
/// Stateless apart from its configuration; clones share the same transport.
#[derive(Clone)]
pub struct BggClient {
    transport: Arc<dyn Transport>,
    sleeper: Arc<dyn Sleeper>,
    base_url: String,
    retry: RetryPolicy,
}

impl BggClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        sleeper: Arc<dyn Sleeper>,
        base_url: impl Into<String>,
        retry: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            sleeper,
            base_url: base_url.into(),
            retry,
        }
    }

    /// Production client: `reqwest` transport and real sleeps
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let transport = ReqwestTransport::new(config.request_timeout())?;

        Ok(Self::new(
            Arc::new(transport),
            Arc::new(TokioSleeper),
            config.bgg_api_url.clone(),
            config.retry_policy(),
        ))
    }

    fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), endpoint.path())
    }

    /// Fetches `endpoint` for `username` and returns the parsed document.
    ///
    /// A 202 means BGG is still building the report: wait the configured delay
    /// and send the identical request again. 200 ends the loop; any other status
    /// fails immediately. Transport errors are not retried.
    pub async fn fetch_xml(
        &self,
        endpoint: Endpoint,
        username: &str,
        filters: &Filters,
    ) -> AppResult<XmlElement> {
        let url = self.endpoint_url(endpoint);
        let query = filters.to_query(username);
        let mut queued: u32 = 0;

        loop {
            tracing::debug!(
                endpoint = %endpoint,
                username = %username,
                attempt = queued + 1,
                "Requesting BGG"
            );

            let response = self.transport.get(&url, &query).await?;

            match response.status {
                202 => {
                    if let Some(max) = self.retry.max_queued_retries {
                        if queued >= max {
                            tracing::error!(
                                endpoint = %endpoint,
                                username = %username,
                                attempts = queued + 1,
                                "BGG request still queued, giving up"
                            );
                            return Err(AppError::QueuedTooLong {
                                attempts: queued + 1,
                            });
                        }
                    }

                    queued += 1;
                    tracing::info!(
                        endpoint = %endpoint,
                        username = %username,
                        retry_in_ms = self.retry.queued_delay.as_millis() as u64,
                        queued = queued,
                        "BGG request queued"
                    );
                    self.sleeper.sleep(self.retry.queued_delay).await;
                }
                200 => {
                    return XmlElement::parse(&response.body).map_err(|e| {
                        tracing::error!(
                            endpoint = %endpoint,
                            username = %username,
                            error = %e,
                            "Failed to parse BGG response"
                        );
                        e
                    });
                }
                status => {
                    tracing::warn!(
                        endpoint = %endpoint,
                        username = %username,
                        status = status,
                        "BGG request failed"
                    );
                    return Err(AppError::UpstreamUnavailable { status });
                }
            }
        }
    }

    /// Fetches a user's collection, in the order BGG returns it
    pub async fn fetch_collection(
        &self,
        username: &str,
        filters: &Filters,
    ) -> AppResult<Vec<CollectionItem>> {
        let document = self
            .fetch_xml(Endpoint::Collection, username, filters)
            .await?;
        let items = mapper::parse_collection(&document);

        tracing::info!(username = %username, items = items.len(), "Collection fetched");

        Ok(items)
    }

    /// Fetches a user's profile; `buddies`, `guilds`, `hot` and `top` filters fill the lists
    pub async fn fetch_user(&self, username: &str, filters: &Filters) -> AppResult<UserProfile> {
        let document = self.fetch_xml(Endpoint::User, username, filters).await?;
        Ok(mapper::parse_user(&document))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::bgg::transport::{MockSleeper, MockTransport};
    use crate::services::bgg::RawResponse;
    use mockall::{predicate::eq, Sequence};
    use std::time::Duration;

    const BASE_URL: &str = "https://boardgamegeek.com/xmlapi2/";

    const COLLECTION_XML: &str = r#"
        <items totalitems="1">
            <item objectid="1"><name>Game One</name></item>
        </items>
    "#;

    fn client(transport: MockTransport, sleeper: MockSleeper, retry: RetryPolicy) -> BggClient {
        BggClient::new(Arc::new(transport), Arc::new(sleeper), BASE_URL, retry)
    }

    fn no_sleep() -> MockSleeper {
        let mut sleeper = MockSleeper::new();
        sleeper.expect_sleep().never();
        sleeper
    }

    #[tokio::test]
    async fn test_success_builds_url_and_query() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .withf(|url, query| {
                url == "https://boardgamegeek.com/xmlapi2/user"
                    && query.len() == 2
                    && query[0] == ("username".to_string(), "testuser".to_string())
                    && query[1] == ("hot".to_string(), "1".to_string())
            })
            .times(1)
            .returning(|_, _| {
                Ok(RawResponse::new(
                    200,
                    r#"<user id="123" name="testuser" termsofuse="example"></user>"#,
                ))
            });

        let client = client(transport, no_sleep(), RetryPolicy::default());
        let document = client
            .fetch_xml(Endpoint::User, "testuser", &Filters::new().with("hot", 1))
            .await
            .unwrap();

        assert_eq!(document.name, "user");
        assert_eq!(document.attr("name"), Some("testuser"));
    }

    #[tokio::test]
    async fn test_queued_responses_are_polled_until_ready() {
        let mut seq = Sequence::new();
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(RawResponse::new(202, "")));
        transport
            .expect_get()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(RawResponse::new(200, COLLECTION_XML)));

        let mut sleeper = MockSleeper::new();
        sleeper
            .expect_sleep()
            .with(eq(Duration::from_secs(5)))
            .times(2)
            .returning(|_| ());

        let client = client(transport, sleeper, RetryPolicy::default());
        let items = client
            .fetch_collection("testuser", &Filters::new().with("own", 1).with("rated", 1))
            .await
            .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "Game One");
    }

    #[tokio::test]
    async fn test_error_status_fails_without_retry() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .times(1)
            .returning(|_, _| Ok(RawResponse::new(404, "")));

        let client = client(transport, no_sleep(), RetryPolicy::default());
        let err = client
            .fetch_xml(Endpoint::User, "invaliduser", &Filters::new())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::UpstreamUnavailable { status: 404 }));
        assert_eq!(err.to_string(), "Error fetching data: 404");
    }

    #[tokio::test]
    async fn test_malformed_body_is_not_retried() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .times(1)
            .returning(|_, _| Ok(RawResponse::new(200, "<items><item>")));

        let client = client(transport, no_sleep(), RetryPolicy::default());
        let err = client
            .fetch_collection("testuser", &Filters::new())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_transport_error_propagates() {
        let mut transport = MockTransport::new();
        transport.expect_get().times(1).returning(|_, _| {
            let err = reqwest::Client::new().get("not a url").build().unwrap_err();
            Err(AppError::Transport(err))
        });

        let client = client(transport, no_sleep(), RetryPolicy::default());
        let err = client
            .fetch_xml(Endpoint::User, "testuser", &Filters::new())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Transport(_)));
    }

    #[tokio::test]
    async fn test_bounded_policy_gives_up() {
        let mut transport = MockTransport::new();
        transport
            .expect_get()
            .times(3)
            .returning(|_, _| Ok(RawResponse::new(202, "")));

        let mut sleeper = MockSleeper::new();
        sleeper.expect_sleep().times(2).returning(|_| ());

        let retry = RetryPolicy {
            queued_delay: Duration::from_millis(10),
            max_queued_retries: Some(2),
        };
        let client = client(transport, sleeper, retry);
        let err = client
            .fetch_xml(Endpoint::Collection, "testuser", &Filters::new())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::QueuedTooLong { attempts: 3 }));
    }

    #[tokio::test]
    async fn test_fetch_user_maps_profile() {
        let mut transport = MockTransport::new();
        transport.expect_get().times(1).returning(|_, _| {
            Ok(RawResponse::new(
                200,
                r#"<user id="5" name="testuser"><country value="Canada"/>
                    <guilds><guild id="2" name="Meeple Guild"/></guilds></user>"#,
            ))
        });

        let client = client(transport, no_sleep(), RetryPolicy::default());
        let user = client
            .fetch_user("testuser", &Filters::new().with("guilds", 1))
            .await
            .unwrap();

        assert_eq!(user.id, "5");
        assert_eq!(user.country, "Canada");
        assert_eq!(user.guilds.len(), 1);
        assert!(user.buddies.is_empty());
    }

    #[test]
    fn test_endpoint_url_joins_without_double_slash() {
        let client = client(MockTransport::new(), MockSleeper::new(), RetryPolicy::default());
        assert_eq!(
            client.endpoint_url(Endpoint::Collection),
            "https://boardgamegeek.com/xmlapi2/collection"
        );

        let bare = BggClient::new(
            Arc::new(MockTransport::new()),
            Arc::new(MockSleeper::new()),
            "http://localhost:9000",
            RetryPolicy::default(),
        );
        assert_eq!(bare.endpoint_url(Endpoint::User), "http://localhost:9000/user");
    }
}
