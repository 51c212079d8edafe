//! HTTP client for the backend service (auth + records) and the public
//! exchange-rate API.
//!
//! The backend side implements the engine's `AuthProvider` and `RecordStore`
//! seams; credentials captured at login are attached to every later call.
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde::{Deserialize, Serialize};

use engine::{AuthError, AuthProvider, RecordStore, StoreError, TransactionRecord, User};

use crate::error::{AppError, Result};

#[derive(Debug)]
pub struct Client {
    base_url: Url,
    quotes_url: Url,
    http: reqwest::Client,
    credentials: RwLock<Option<(String, String)>>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Deserialize)]
struct UserPayload {
    name: String,
    email: String,
}

impl From<UserPayload> for User {
    fn from(payload: UserPayload) -> Self {
        Self {
            name: payload.name,
            email: payload.email,
        }
    }
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// One exchange-rate pair as returned by the quote API.
///
/// `bid` and `pctChange` arrive as decimal strings; they are display-only,
/// so the UI parses them at render time.
#[derive(Debug, Clone, Deserialize)]
pub struct QuotePayload {
    pub code: String,
    pub name: String,
    pub bid: String,
    #[serde(rename = "pctChange")]
    pub pct_change: String,
}

impl Client {
    pub fn new(base_url: &str, quotes_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|err| AppError::Terminal(format!("invalid base_url: {err}")))?;
        let quotes_url = Url::parse(quotes_url)
            .map_err(|err| AppError::Terminal(format!("invalid quotes_url: {err}")))?;
        Ok(Self {
            base_url,
            quotes_url,
            http: reqwest::Client::new(),
            credentials: RwLock::new(None),
        })
    }

    fn credentials(&self) -> Option<(String, String)> {
        self.credentials
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Fetches the configured pairs in one stateless GET.
    ///
    /// The response is keyed by the concatenated pair (`USDBRL`); the result
    /// keeps the requested order and skips pairs missing from the response.
    pub async fn quotes(&self, pairs: &[String]) -> Result<Vec<QuotePayload>> {
        let endpoint = self
            .quotes_url
            .join(&format!("last/{}", pairs.join(",")))
            .map_err(|err| AppError::Terminal(format!("invalid quotes_url: {err}")))?;

        tracing::debug!(%endpoint, "fetching quotes");
        let response = self.http.get(endpoint).send().await?.error_for_status()?;
        let mut table: HashMap<String, QuotePayload> = response.json().await?;

        Ok(pairs
            .iter()
            .filter_map(|pair| table.remove(&pair.replace('-', "")))
            .collect())
    }

    /// Lists the stored records for the logged-in user.
    pub async fn transactions(&self) -> std::result::Result<Vec<TransactionRecord>, StoreError> {
        let Some((email, password)) = self.credentials() else {
            return Err(StoreError::Unauthorized);
        };
        let endpoint = self
            .base_url
            .join("transactions")
            .map_err(|err| StoreError::Server(format!("invalid base_url: {err}")))?;

        let res = self
            .http
            .get(endpoint)
            .basic_auth(&email, Some(&password))
            .send()
            .await
            .map_err(transport)?;

        if res.status().is_success() {
            return res.json().await.map_err(transport);
        }
        Err(store_error(res).await)
    }
}

fn transport(err: reqwest::Error) -> StoreError {
    StoreError::Transport(err.to_string())
}

async fn error_body(res: reqwest::Response) -> String {
    res.json::<ErrorResponse>()
        .await
        .map(|err| err.error)
        .unwrap_or_else(|_| "unknown error".to_string())
}

async fn store_error(res: reqwest::Response) -> StoreError {
    let status = res.status();
    let body = error_body(res).await;
    match status.as_u16() {
        401 | 403 => StoreError::Unauthorized,
        404 => StoreError::NotFound,
        409 => StoreError::Conflict(body),
        422 => StoreError::Validation(body),
        _ => StoreError::Server(body),
    }
}

async fn auth_error(res: reqwest::Response) -> AuthError {
    let status = res.status();
    let body = error_body(res).await;
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AuthError::InvalidCredentials,
        _ => AuthError::Server(body),
    }
}

#[async_trait]
impl AuthProvider for Client {
    async fn current_user(&self) -> std::result::Result<Option<User>, AuthError> {
        let Some((email, password)) = self.credentials() else {
            return Ok(None);
        };
        let endpoint = self
            .base_url
            .join("auth/me")
            .map_err(|err| AuthError::Server(format!("invalid base_url: {err}")))?;

        let res = self
            .http
            .get(endpoint)
            .basic_auth(&email, Some(&password))
            .send()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;

        if res.status() == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        if res.status().is_success() {
            let payload: UserPayload = res
                .json()
                .await
                .map_err(|err| AuthError::Transport(err.to_string()))?;
            return Ok(Some(payload.into()));
        }
        Err(auth_error(res).await)
    }

    async fn login(&self, email: &str, password: &str) -> std::result::Result<User, AuthError> {
        let endpoint = self
            .base_url
            .join("auth/login")
            .map_err(|err| AuthError::Server(format!("invalid base_url: {err}")))?;

        let res = self
            .http
            .post(endpoint)
            .json(&LoginRequest { email, password })
            .send()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;

        if res.status().is_success() {
            let payload: UserPayload = res
                .json()
                .await
                .map_err(|err| AuthError::Transport(err.to_string()))?;
            *self
                .credentials
                .write()
                .unwrap_or_else(PoisonError::into_inner) =
                Some((email.to_string(), password.to_string()));
            tracing::info!(user = %payload.email, "login accepted");
            return Ok(payload.into());
        }
        Err(auth_error(res).await)
    }

    async fn logout(&self) -> std::result::Result<(), AuthError> {
        let creds = self
            .credentials
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some((email, password)) = creds else {
            return Ok(());
        };
        let endpoint = self
            .base_url
            .join("auth/logout")
            .map_err(|err| AuthError::Server(format!("invalid base_url: {err}")))?;

        let res = self
            .http
            .post(endpoint)
            .basic_auth(&email, Some(&password))
            .send()
            .await
            .map_err(|err| AuthError::Transport(err.to_string()))?;

        if res.status().is_success() {
            Ok(())
        } else {
            Err(auth_error(res).await)
        }
    }
}

#[async_trait]
impl RecordStore for Client {
    async fn create(&self, record: &TransactionRecord) -> std::result::Result<(), StoreError> {
        let Some((email, password)) = self.credentials() else {
            return Err(StoreError::Unauthorized);
        };
        let endpoint = self
            .base_url
            .join("transactions")
            .map_err(|err| StoreError::Server(format!("invalid base_url: {err}")))?;

        let res = self
            .http
            .post(endpoint)
            .basic_auth(&email, Some(&password))
            .json(record)
            .send()
            .await
            .map_err(transport)?;

        if res.status().is_success() {
            Ok(())
        } else {
            Err(store_error(res).await)
        }
    }

    async fn update(&self, record: &TransactionRecord) -> std::result::Result<(), StoreError> {
        let Some((email, password)) = self.credentials() else {
            return Err(StoreError::Unauthorized);
        };
        let endpoint = self
            .base_url
            .join(&format!("transactions/{}", record.id))
            .map_err(|err| StoreError::Server(format!("invalid base_url: {err}")))?;

        let res = self
            .http
            .put(endpoint)
            .basic_auth(&email, Some(&password))
            .json(record)
            .send()
            .await
            .map_err(transport)?;

        if res.status().is_success() {
            Ok(())
        } else {
            Err(store_error(res).await)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_payload_matches_the_api_shape() {
        let json = r#"{
            "code": "USD",
            "codein": "BRL",
            "name": "Dólar Americano/Real Brasileiro",
            "high": "5.45",
            "low": "5.39",
            "varBid": "0.01",
            "pctChange": "0.27",
            "bid": "5.4321",
            "ask": "5.4335",
            "timestamp": "1715527800",
            "create_date": "2024-05-12 11:50:00"
        }"#;
        let quote: QuotePayload = serde_json::from_str(json).unwrap();
        assert_eq!(quote.code, "USD");
        assert_eq!(quote.bid, "5.4321");
        assert_eq!(quote.pct_change, "0.27");
    }

    #[test]
    fn quote_response_is_keyed_by_concatenated_pair() {
        let json = r#"{
            "USDBRL": {"code": "USD", "name": "Dólar", "bid": "5.43", "pctChange": "0.1"},
            "EURBRL": {"code": "EUR", "name": "Euro", "bid": "5.90", "pctChange": "-0.2"}
        }"#;
        let table: HashMap<String, QuotePayload> = serde_json::from_str(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table["USDBRL"].code, "USD");
    }
}
