use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

use super::{FilterState, RawQuestion};
use crate::configuration::UpstreamSettings;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("invalid upstream url {url}: {message}")]
    InvalidUrl { url: String, message: String },
    #[error("network error while fetching questions: {message}")]
    Network { message: String },
    #[error("questions service answered {status}: {message}")]
    Server { status: u16, message: String },
    #[error("unexpected questions payload: {message}")]
    Decode { message: String },
}

/// Remote list of questions, filtered by admission type and category.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    async fn fetch_questions(&self, filter: &FilterState) -> Result<Vec<RawQuestion>, FetchError>;
}

pub struct HttpQuestionSource {
    client: reqwest::Client,
    endpoint: Url,
    token: Option<SecretString>,
}

impl HttpQuestionSource {
    pub fn new(
        base_url: &str,
        questions_path: &str,
        token: Option<SecretString>,
        timeout: Option<Duration>,
    ) -> Result<Self, FetchError> {
        let invalid = |message: String| FetchError::InvalidUrl {
            url: format!("{base_url}{questions_path}"),
            message,
        };
        let mut endpoint = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if endpoint.cannot_be_a_base() {
            return Err(invalid("url cannot carry a path".to_owned()));
        }
        // questions_path is appended to whatever prefix base_url already has
        let path = format!(
            "{}/{}",
            endpoint.path().trim_end_matches('/'),
            questions_path.trim_start_matches('/')
        );
        endpoint.set_path(&path);

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| FetchError::Network {
            message: e.to_string(),
        })?;

        Ok(Self {
            client,
            endpoint,
            token,
        })
    }

    pub fn from_settings(settings: &UpstreamSettings) -> Result<Self, FetchError> {
        Self::new(
            &settings.base_url,
            &settings.questions_path,
            settings
                .token
                .as_ref()
                .map(|t| SecretString::from(t.expose_secret().to_owned())),
            settings.timeout_seconds.map(Duration::from_secs),
        )
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    #[tracing::instrument(skip(self))]
    async fn fetch_questions(&self, filter: &FilterState) -> Result<Vec<RawQuestion>, FetchError> {
        let mut request = self.client.get(self.endpoint.clone()).query(&[
            ("type", filter.admission_type.code()),
            ("category", filter.category.code()),
        ]);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await.map_err(|e| FetchError::Network {
            message: e.to_string(),
        })?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::Server {
                status: status.as_u16(),
                message,
            });
        }

        let questions: Vec<RawQuestion> =
            response.json().await.map_err(|e| FetchError::Decode {
                message: e.to_string(),
            })?;
        tracing::debug!("Fetched {} questions", questions.len());
        Ok(questions)
    }
}
