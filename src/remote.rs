//! The client for the REST service that holds the expense list.

use std::future::Future;

use reqwest::{Client, Response, StatusCode, Url};

use crate::{
    Error,
    config::ClientConfig,
    endpoints,
    expense::{Expense, ExpenseId},
};

/// Failures talking to the REST service.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NetworkError {
    /// The request never got a response, e.g. the connection was refused or
    /// timed out.
    #[error("could not reach the expense service: {0}")]
    Transport(String),

    /// The service answered with an error status.
    #[error("the expense service responded with status {status}: {message}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The response body, if any.
        message: String,
    },

    /// The response body was not what was expected.
    #[error("could not read the response from the expense service: {0}")]
    Decode(String),

    /// The configured base URL cannot be used to address expenses.
    #[error("invalid expense service URL {0:?}")]
    InvalidUrl(String),
}

impl NetworkError {
    /// Whether repeating the request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::Transport(_) => true,
            NetworkError::Status { status, .. } => {
                *status >= 500
                    || *status == StatusCode::REQUEST_TIMEOUT.as_u16()
                    || *status == StatusCode::TOO_MANY_REQUESTS.as_u16()
            }
            NetworkError::Decode(_) | NetworkError::InvalidUrl(_) => false,
        }
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            NetworkError::Decode(error.to_string())
        } else {
            NetworkError::Transport(error.to_string())
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Error::Network(error.into())
    }
}

/// The operations on the remote expense collection.
pub trait ExpenseApi {
    /// Fetch every expense, in the order the service stores them.
    fn list(&self) -> impl Future<Output = Result<Vec<Expense>, Error>> + Send;

    /// Submit a new expense and get back the stored record.
    fn create(&self, expense: &Expense) -> impl Future<Output = Result<Expense, Error>> + Send;

    /// Replace the expense `id` with `expense` and get back the stored record.
    ///
    /// Returns [Error::NotFound] if the service has no expense with `id`.
    fn update(
        &self,
        id: &ExpenseId,
        expense: &Expense,
    ) -> impl Future<Output = Result<Expense, Error>> + Send;

    /// Delete the expense `id`.
    ///
    /// Returns [Error::NotFound] if the service has no expense with `id`.
    fn delete(&self, id: &ExpenseId) -> impl Future<Output = Result<(), Error>> + Send;
}

/// Talks JSON over HTTP to the `/expenses` resource.
///
/// There is no retry: failed calls return an error and the caller decides
/// whether to try again, see [Error::is_retryable].
#[derive(Debug, Clone)]
pub struct HttpExpenseApi {
    client: Client,
    collection_url: Url,
}

impl HttpExpenseApi {
    /// Create a client for the service at `config.api_url`.
    ///
    /// # Errors
    /// Returns an [Error::Network] if the HTTP client cannot be built or
    /// `config.api_url` is not a valid base URL.
    pub fn new(config: &ClientConfig) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        let base_url = config.api_url.trim_end_matches('/');
        let collection_url = Url::parse(&format!("{base_url}{}", endpoints::EXPENSES))
            .map_err(|_| NetworkError::InvalidUrl(config.api_url.clone()))?;

        if collection_url.cannot_be_a_base() {
            return Err(NetworkError::InvalidUrl(config.api_url.clone()).into());
        }

        Ok(Self {
            client,
            collection_url,
        })
    }

    /// The URL of the expense `id`, with the ID percent-encoded as a single
    /// path segment so that characters like '?', '#' and '/' stay part of it.
    fn item_url(&self, id: &ExpenseId) -> Result<Url, Error> {
        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|_| NetworkError::InvalidUrl(self.collection_url.to_string()))?
            .push(id.as_str());

        Ok(url)
    }
}

/// Turn error statuses into errors, mapping 404 to [Error::NotFound] when the
/// request was about a single expense.
async fn check_status(response: Response, id: Option<&ExpenseId>) -> Result<Response, Error> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::NOT_FOUND {
        if let Some(id) = id {
            return Err(Error::NotFound(id.clone()));
        }
    }

    let message = response.text().await.unwrap_or_default();

    Err(Error::Network(NetworkError::Status {
        status: status.as_u16(),
        message,
    }))
}

impl ExpenseApi for HttpExpenseApi {
    async fn list(&self) -> Result<Vec<Expense>, Error> {
        let url = self.collection_url.clone();
        tracing::debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let expenses: Vec<Expense> = check_status(response, None).await?.json().await?;

        tracing::debug!("Fetched {} expenses", expenses.len());
        Ok(expenses)
    }

    async fn create(&self, expense: &Expense) -> Result<Expense, Error> {
        let url = self.collection_url.clone();
        tracing::debug!("POST {url} {expense:?}");

        let response = self.client.post(url).json(expense).send().await?;
        let created = check_status(response, None).await?.json().await?;

        Ok(created)
    }

    async fn update(&self, id: &ExpenseId, expense: &Expense) -> Result<Expense, Error> {
        let url = self.item_url(id)?;
        tracing::debug!("PUT {url} {expense:?}");

        let response = self.client.put(url).json(expense).send().await?;
        let updated = check_status(response, Some(id)).await?.json().await?;

        Ok(updated)
    }

    async fn delete(&self, id: &ExpenseId) -> Result<(), Error> {
        let url = self.item_url(id)?;
        tracing::debug!("DELETE {url}");

        let response = self.client.delete(url).send().await?;
        check_status(response, Some(id)).await?;

        Ok(())
    }
}
