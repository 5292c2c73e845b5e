//! Minimal GraphQL-over-HTTP client for a Hasura endpoint.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tokio_retry::RetryIf;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, warn};

use crate::error::StoreError;

/// Header carrying the Hasura admin secret.
pub const ADMIN_SECRET_HEADER: &str = "x-hasura-admin-secret";

/// Error code Hasura reports for unique and foreign key violations.
const CONSTRAINT_VIOLATION: &str = "constraint-violation";

#[derive(Serialize)]
struct GraphQlRequest<'a, V> {
    query: &'a str,
    variables: &'a V,
}

/// Raw GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
    #[serde(default)]
    pub extensions: Option<GraphQlErrorExtensions>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlErrorExtensions {
    pub code: Option<String>,
    pub path: Option<String>,
}

impl GraphQlError {
    fn code(&self) -> Option<&str> {
        self.extensions.as_ref().and_then(|ext| ext.code.as_deref())
    }
}

impl<T> GraphQlResponse<T> {
    /// Converts the envelope into its `data`, mapping reported errors.
    ///
    /// # Errors
    ///
    /// - [`StoreError::Conflict`] if any error is a constraint violation
    /// - [`StoreError::Query`] for any other reported error
    /// - [`StoreError::Decode`] if neither data nor errors are present
    pub fn into_data(self) -> Result<T, StoreError> {
        if let Some(conflict) = self
            .errors
            .iter()
            .find(|e| e.code() == Some(CONSTRAINT_VIOLATION))
        {
            return Err(StoreError::Conflict(conflict.message.clone()));
        }

        if !self.errors.is_empty() {
            let messages: Vec<&str> = self.errors.iter().map(|e| e.message.as_str()).collect();
            return Err(StoreError::Query(messages.join("; ")));
        }

        self.data
            .ok_or_else(|| StoreError::Decode("response contained no data".to_string()))
    }
}

/// Client shared by every request; holds one connection pool.
pub struct GraphQlClient {
    http: reqwest::Client,
    endpoint: String,
    admin_secret: Option<String>,
    retry_attempts: usize,
}

impl GraphQlClient {
    /// Builds a client for `endpoint`.
    ///
    /// `timeout` bounds every request; `retry_attempts` is the number of extra
    /// attempts made by [`Self::query`] on transient failures.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Transport`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        admin_secret: Option<String>,
        timeout: Duration,
        retry_attempts: usize,
    ) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            admin_secret,
            retry_attempts,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Runs a read-only operation, retrying transient failures.
    pub async fn query<V, T>(&self, document: &str, variables: &V) -> Result<T, StoreError>
    where
        V: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let strategy = ExponentialBackoff::from_millis(10)
            .factor(5)
            .max_delay(Duration::from_secs(1))
            .map(jitter)
            .take(self.retry_attempts);

        RetryIf::spawn(
            strategy,
            || self.execute(document, variables),
            |e: &StoreError| {
                let transient = e.is_transient();
                if transient {
                    warn!(error = %e, "Transient store failure, retrying");
                }
                transient
            },
        )
        .await
    }

    /// Runs a mutation exactly once.
    pub async fn mutate<V, T>(&self, document: &str, variables: &V) -> Result<T, StoreError>
    where
        V: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        self.execute(document, variables).await
    }

    async fn execute<V, T>(&self, document: &str, variables: &V) -> Result<T, StoreError>
    where
        V: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let mut request = self.http.post(&self.endpoint).json(&GraphQlRequest {
            query: document,
            variables,
        });
        if let Some(secret) = &self.admin_secret {
            request = request.header(ADMIN_SECRET_HEADER, secret);
        }

        let response = request.send().await?;
        let status = response.status();
        debug!(%status, "Store responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        envelope.into_data()
    }
}
