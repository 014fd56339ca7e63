use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, error};

use crate::config::ApiConfig;
use crate::error::{HuntError, Stage};

/// JSON body of the search submission.
#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    maxresults: u32,
    media: u32,
    target: u32,
    term: &'a str,
    terminate: [Option<String>; 1],
    timeout: u32,
}

/// Thin client over the two phonebook endpoints.
pub struct PhonebookClient {
    client: Client,
    config: ApiConfig,
}

impl PhonebookClient {
    pub fn new(config: ApiConfig) -> Result<Self, HuntError> {
        let client = Client::builder()
            .default_headers(config.headers.clone())
            .timeout(config.request_timeout)
            .build()?;

        Ok(PhonebookClient { client, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Submit a search for `domain` and return the raw job token.
    pub async fn submit_search(&self, domain: &str) -> Result<String, HuntError> {
        let domain = domain.trim();
        if domain.is_empty() {
            return Err(HuntError::EmptyDomain);
        }

        let params = &self.config.search;
        let payload = SearchRequest {
            maxresults: params.max_results,
            media: params.media,
            target: params.target,
            term: domain,
            terminate: [None],
            timeout: params.timeout,
        };

        let url = self.config.search_url();
        debug!("Submitting search for '{}' to {}", domain, url);
        let response = self
            .client
            .post(&url)
            .query(&[("k", self.config.key.as_str())])
            .json(&payload)
            .send()
            .await?;

        read_body(Stage::Search, response).await
    }

    /// Fetch the result set for a token returned by [`submit_search`].
    ///
    /// The token is validated before any request is made.
    ///
    /// [`submit_search`]: PhonebookClient::submit_search
    pub async fn fetch_results(&self, token: &str) -> Result<String, HuntError> {
        let job_id = parse_job_id(token)?;
        let limit = self.config.result_limit.to_string();

        let url = self.config.result_url();
        debug!("Fetching results for job {} from {}", job_id, url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("k", self.config.key.as_str()),
                ("id", job_id.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await?;

        read_body(Stage::Results, response).await
    }
}

/// Pull the job id out of a search token.
pub fn parse_job_id(token: &str) -> Result<String, HuntError> {
    if token.trim().is_empty() {
        return Err(HuntError::EmptyToken);
    }

    let value: Value = serde_json::from_str(token).map_err(HuntError::InvalidToken)?;
    match value.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(HuntError::MissingJobId),
    }
}

async fn read_body(stage: Stage, response: Response) -> Result<String, HuntError> {
    let status = response.status();
    if let Some(err) = HuntError::from_status(stage, status) {
        error!("{} request failed with status {}", stage, status);
        return Err(err);
    }
    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{serve, StubResponse};

    fn client_for(base_url: &str) -> PhonebookClient {
        PhonebookClient::new(ApiConfig::new(base_url, "secret-key")).unwrap()
    }

    // Nothing listens on the discard port, so any request attempt would
    // surface as a transport error instead of a token error.
    const UNREACHABLE: &str = "http://127.0.0.1:9";

    #[test]
    fn job_id_is_read_from_token() {
        assert_eq!(
            parse_job_id(r#"{"id":"7c1e-42","status":0}"#).unwrap(),
            "7c1e-42"
        );
        assert_eq!(parse_job_id(r#"{"id":12}"#).unwrap(), "12");
    }

    #[test]
    fn token_without_id_is_rejected() {
        assert!(matches!(
            parse_job_id(r#"{"status":0}"#),
            Err(HuntError::MissingJobId)
        ));
        assert!(matches!(
            parse_job_id(r#"{"id":""}"#),
            Err(HuntError::MissingJobId)
        ));
    }

    #[tokio::test]
    async fn empty_token_fails_before_any_request() {
        let client = client_for(UNREACHABLE);
        assert!(matches!(
            client.fetch_results("").await,
            Err(HuntError::EmptyToken)
        ));
    }

    #[tokio::test]
    async fn non_json_token_fails_before_any_request() {
        let client = client_for(UNREACHABLE);
        assert!(matches!(
            client.fetch_results("<html>oops</html>").await,
            Err(HuntError::InvalidToken(_))
        ));
    }

    #[tokio::test]
    async fn empty_domain_is_rejected() {
        let client = client_for(UNREACHABLE);
        assert!(matches!(
            client.submit_search("  ").await,
            Err(HuntError::EmptyDomain)
        ));
    }

    #[tokio::test]
    async fn unreachable_host_is_a_transport_error_without_the_key() {
        let client = client_for(UNREACHABLE);

        let err = client.submit_search("example.com").await.unwrap_err();
        assert!(matches!(err, HuntError::Transport(_)));
        assert!(!err.to_string().contains("secret-key"));

        let err = client.fetch_results(r#"{"id":"job-1"}"#).await.unwrap_err();
        assert!(matches!(err, HuntError::Transport(_)));
        assert!(!err.to_string().contains("secret-key"));
    }

    #[tokio::test]
    async fn submit_sends_key_and_payload() {
        let stub = serve(vec![StubResponse::ok(r#"{"id":"job-1","status":0}"#)]).await;
        let client = client_for(&stub.base_url);

        let token = client.submit_search("example.com").await.unwrap();
        assert_eq!(token, r#"{"id":"job-1","status":0}"#);

        let requests = stub.requests().await;
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        assert!(request.starts_with("POST /phonebook/search?k=secret-key HTTP/1.1"));
        assert!(request.contains(r#""term":"example.com""#));
        assert!(request.contains(r#""maxresults":10000"#));
        assert!(request.contains(r#""terminate":[null]"#));
        assert!(request.to_lowercase().contains("origin: https://phonebook.cz"));
    }

    #[tokio::test]
    async fn fetch_sends_job_id_and_limit() {
        let stub = serve(vec![StubResponse::ok(r#"{"selectors":[]}"#)]).await;
        let client = client_for(&stub.base_url);

        let body = client.fetch_results(r#"{"id":"job-1"}"#).await.unwrap();
        assert_eq!(body, r#"{"selectors":[]}"#);

        let requests = stub.requests().await;
        assert!(requests[0]
            .starts_with("GET /phonebook/search/result?k=secret-key&id=job-1&limit=1000000 "));
    }

    #[tokio::test]
    async fn rate_limit_on_submit_is_fatal() {
        let stub = serve(vec![StubResponse::status(402, "")]).await;
        let client = client_for(&stub.base_url);
        assert!(matches!(
            client.submit_search("example.com").await,
            Err(HuntError::RateLimited(Stage::Search))
        ));
    }

    #[tokio::test]
    async fn rate_limit_on_fetch_is_fatal() {
        let stub = serve(vec![StubResponse::status(402, "")]).await;
        let client = client_for(&stub.base_url);
        assert!(matches!(
            client.fetch_results(r#"{"id":"job-1"}"#).await,
            Err(HuntError::RateLimited(Stage::Results))
        ));
    }

    #[tokio::test]
    async fn credential_and_blacklist_statuses_are_fatal() {
        let stub = serve(vec![
            StubResponse::status(401, ""),
            StubResponse::status(403, ""),
        ])
        .await;
        let client = client_for(&stub.base_url);
        assert!(matches!(
            client.submit_search("example.com").await,
            Err(HuntError::InvalidCredentials)
        ));
        assert!(matches!(
            client.fetch_results(r#"{"id":"job-1"}"#).await,
            Err(HuntError::Blacklisted)
        ));
    }

    #[tokio::test]
    async fn server_error_is_not_treated_as_success() {
        let stub = serve(vec![StubResponse::status(500, "boom")]).await;
        let client = client_for(&stub.base_url);
        assert!(matches!(
            client.fetch_results(r#"{"id":"job-1"}"#).await,
            Err(HuntError::UnexpectedStatus { stage: Stage::Results, .. })
        ));
    }
}
