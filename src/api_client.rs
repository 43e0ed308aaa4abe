use std::time::Duration;

use anyhow::Context;
use reqwest::{Client, Response, StatusCode, Url};

use crate::domain::{City, ConfirmationToken, SubscribeRequest, Weather};
use crate::routes::error_chain_fmt;

/// Client of the weather and subscription REST API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http_client: Client,
    base_url: Url,
}

/// The remote operations this application performs. Each one has its own
/// table of user facing messages for failing statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Weather,
    Subscribe,
    Confirm,
    Unsubscribe,
}

impl Endpoint {
    pub fn error_message(&self, status: StatusCode) -> String {
        let known = match (self, status.as_u16()) {
            (Endpoint::Weather, 400) => Some("Invalid request"),
            (Endpoint::Weather, 404) => Some("City not found"),
            (Endpoint::Subscribe, 400) => Some("Invalid input"),
            (Endpoint::Subscribe, 409) => Some("Email already subscribed"),
            (Endpoint::Confirm, 409) => Some("Email already subscribed"),
            (Endpoint::Confirm | Endpoint::Unsubscribe, 400) => Some("Invalid token"),
            (Endpoint::Confirm | Endpoint::Unsubscribe, 404) => Some("Token not found"),
            _ => None,
        };

        known
            .or_else(|| status.canonical_reason())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Unexpected status {}", status.as_u16()))
    }
}

#[derive(thiserror::Error)]
pub enum ApiError {
    #[error("{message}")]
    Status { status: StatusCode, message: String },
    #[error("Service unavailable")]
    Transport(#[source] reqwest::Error),
    #[error("Service unavailable")]
    Unexpected(#[source] anyhow::Error),
}

impl std::fmt::Debug for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ApiClient {
    pub fn new(base_url: String, timeout: Duration) -> Result<Self, anyhow::Error> {
        let base_url = Url::parse(&base_url)
            .with_context(|| format!("Failed parsing API base url {base_url}."))?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("API base url {base_url} cannot be used as a base.");
        }

        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build the API http client.")?;

        Ok(Self {
            http_client,
            base_url,
        })
    }

    #[tracing::instrument(name = "Fetching current weather", skip(self), fields(city = %city))]
    pub async fn get_weather(&self, city: &City) -> Result<Weather, ApiError> {
        let url = self.url(&["api", "v1", "weather"])?;

        let response = self
            .http_client
            .get(url)
            .query(&[("city", city.as_ref())])
            .send()
            .await
            .map_err(ApiError::Transport)?;

        check_status(Endpoint::Weather, response)
            .await?
            .json::<Weather>()
            .await
            .map_err(ApiError::Transport)
    }

    #[tracing::instrument(
        name = "Submitting a subscription",
        skip(self, request),
        fields(subscriber_email = %request.email, city = %request.city)
    )]
    pub async fn subscribe(&self, request: &SubscribeRequest) -> Result<(), ApiError> {
        let url = self.url(&["api", "v1", "subscribe"])?;

        let response = self
            .http_client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        check_status(Endpoint::Subscribe, response).await?;
        Ok(())
    }

    #[tracing::instrument(name = "Confirming a subscription", skip(self, token))]
    pub async fn confirm_subscription(&self, token: &ConfirmationToken) -> Result<(), ApiError> {
        self.token_call(Endpoint::Confirm, "confirm", token).await
    }

    #[tracing::instrument(name = "Unsubscribing", skip(self, token))]
    pub async fn unsubscribe(&self, token: &ConfirmationToken) -> Result<(), ApiError> {
        self.token_call(Endpoint::Unsubscribe, "unsubscribe", token)
            .await
    }

    async fn token_call(
        &self,
        endpoint: Endpoint,
        route: &str,
        token: &ConfirmationToken,
    ) -> Result<(), ApiError> {
        let url = self.url(&["api", "v1", route, token.as_ref()])?;

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(ApiError::Transport)?;

        check_status(endpoint, response).await?;
        Ok(())
    }

    fn url(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ApiError::Unexpected(anyhow::anyhow!(
                    "API base url {} cannot be used as a base.",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

async fn check_status(endpoint: Endpoint, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(
        status = status.as_u16(),
        body = %body,
        "API call to {:?} endpoint was rejected",
        endpoint
    );

    Err(ApiError::Status {
        status,
        message: endpoint.error_message(status),
    })
}
