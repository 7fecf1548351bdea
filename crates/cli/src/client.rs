use api_types::{
    ErrorResponse, Success,
    balance::Balance,
    settle::Settle,
    stats::Stats,
    transaction::{Transaction, TransactionFilter, TransactionNew},
    user::{User, UserNew},
};
use reqwest::{Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::{CliError, Result};

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    /// Endpoints are resolved below `base_url`, which is treated as a
    /// directory whether or not it ends in `/`.
    pub fn new(base_url: &str) -> Result<Self> {
        let mut base_url = Url::parse(base_url).map_err(|err| CliError::Url(err.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(CliError::Url(format!("{base_url} cannot be a base url")));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            http: reqwest::Client::new(),
        })
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let endpoint = self
            .base_url
            .join(path)
            .map_err(|err| CliError::Url(err.to_string()))?;
        Ok(self.http.request(method, endpoint))
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let res = request.send().await?;
        if res.status().is_success() {
            return Ok(res.json::<T>().await?);
        }

        let status = res.status();
        let (kind, message) = res
            .json::<ErrorResponse>()
            .await
            .map(|err| (err.kind, err.error))
            .unwrap_or_else(|_| ("unknown".to_string(), "unknown error".to_string()));

        let err = match status.as_u16() {
            404 => CliError::NotFound(message),
            400 => CliError::Rejected { kind, message },
            status => CliError::Server { status, message },
        };
        Err(err)
    }

    pub async fn users(&self) -> Result<Vec<User>> {
        self.send(self.request(Method::GET, "users")?).await
    }

    pub async fn create_user(&self, payload: &UserNew) -> Result<User> {
        self.send(self.request(Method::POST, "users")?.json(payload))
            .await
    }

    pub async fn delete_user(&self, id: &str) -> Result<Success> {
        self.send(self.request(Method::DELETE, &format!("users/{id}"))?)
            .await
    }

    pub async fn transactions(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>> {
        self.send(self.request(Method::GET, "transactions")?.query(filter))
            .await
    }

    pub async fn user_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.send(self.request(Method::GET, &format!("users/{user_id}/transactions"))?)
            .await
    }

    pub async fn create_transaction(&self, payload: &TransactionNew) -> Result<Transaction> {
        self.send(self.request(Method::POST, "transactions")?.json(payload))
            .await
    }

    pub async fn delete_transaction(&self, id: &str) -> Result<Success> {
        self.send(self.request(Method::DELETE, &format!("transactions/{id}"))?)
            .await
    }

    pub async fn balance(&self, user_id: &str) -> Result<Balance> {
        self.send(self.request(Method::GET, &format!("balance/{user_id}"))?)
            .await
    }

    pub async fn stats(&self) -> Result<Stats> {
        self.send(self.request(Method::GET, "stats")?).await
    }

    pub async fn settle(&self, payload: &Settle) -> Result<Transaction> {
        self.send(self.request(Method::POST, "settle")?.json(payload))
            .await
    }
}
