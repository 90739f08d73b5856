//! Blocking HTTP client for the finboard backend

use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use super::dto::{ApiResponse, ErrorBody, LoggedUser, LoginRequest, LoginResponse, SignupRequest};
use super::TransactionBackend;
use crate::error::{FinboardError, FinboardResult};
use crate::models::{NewTransaction, TransactionPatch, TransactionRecord};

const UA: &str = concat!("finboard/", env!("CARGO_PKG_VERSION"));

/// Shared reqwest client with a timeout and user agent
pub fn http_client() -> FinboardResult<Client> {
    let client = Client::builder()
        .timeout(Duration::from_secs(15))
        .user_agent(UA)
        .build()?;
    Ok(client)
}

/// Client bound to one backend and, optionally, one session token
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> FinboardResult<Self> {
        Ok(Self {
            http: http_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn transaction_url(&self, id: &str) -> String {
        self.url(&format!("transacoes/{}", id))
    }

    /// Attach the bearer token, failing before any request is sent when there is none
    fn authorized(&self, request: RequestBuilder) -> FinboardResult<RequestBuilder> {
        let token = self
            .token
            .as_deref()
            .ok_or(FinboardError::NotAuthenticated)?;
        Ok(request.bearer_auth(token))
    }

    /// Turn non-2xx responses into `Api` errors carrying the backend's message
    fn check(response: Response) -> FinboardResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body: ErrorBody = response.json().unwrap_or_default();
        let message = body
            .describe()
            .unwrap_or_else(|| format!("request failed with status {}", status));
        Err(FinboardError::Api(message))
    }

    fn result_of<T: DeserializeOwned>(response: Response) -> FinboardResult<T> {
        let body: ApiResponse<T> = Self::check(response)?.json()?;
        body.resultado.ok_or_else(|| {
            FinboardError::Api(
                body
                    .mensagem
                    .unwrap_or_else(|| "response carried no result".to_string()),
            )
        })
    }

    /// `POST /login`
    pub fn login(&self, login: &str, password: &str) -> FinboardResult<LoggedUser> {
        debug!("POST {}", self.url("login"));
        let response = self
            .http
            .post(self.url("login"))
            .json(&LoginRequest {
                login,
                senha: password,
            })
            .send()?;
        let parsed: LoginResponse = Self::check(response)?.json()?;
        info!("logged in as user {}", parsed.dados.logged_user.id);
        Ok(parsed.dados.logged_user)
    }

    /// `POST /usuarios`; returns the backend's confirmation message, if any
    pub fn signup(&self, request: &SignupRequest) -> FinboardResult<Option<String>> {
        debug!("POST {}", self.url("usuarios"));
        let response = self.http.post(self.url("usuarios")).json(request).send()?;
        let body: ApiResponse<serde_json::Value> = Self::check(response)?.json()?;
        if body.sucesso == Some(false) {
            return Err(FinboardError::Api(
                body
                    .mensagem
                    .unwrap_or_else(|| "signup was rejected".to_string()),
            ));
        }
        info!("created user {}", request.username);
        Ok(body.mensagem)
    }
}

impl TransactionBackend for ApiClient {
    fn fetch(&mut self) -> FinboardResult<Vec<TransactionRecord>> {
        let request = self.authorized(self.http.get(self.url("transacoes")))?;
        let records: Vec<TransactionRecord> = Self::result_of(request.send()?)?;
        debug!("fetched {} transactions", records.len());
        Ok(records)
    }

    fn create(&mut self, new: &NewTransaction) -> FinboardResult<TransactionRecord> {
        new.validate()?;
        let request = self.authorized(self.http.post(self.url("transacoes")))?;
        let record: TransactionRecord = Self::result_of(request.json(new).send()?)?;
        info!("created transaction {}", record.id);
        Ok(record)
    }

    fn edit(&mut self, id: &str, patch: &TransactionPatch) -> FinboardResult<TransactionRecord> {
        patch.validate()?;
        if patch.is_empty() {
            return Err(FinboardError::Validation("no changes".into()));
        }
        let request = self.authorized(self.http.patch(self.transaction_url(id)))?;
        let record: TransactionRecord = Self::result_of(request.json(patch).send()?)?;
        info!("edited transaction {}", id);
        Ok(record)
    }

    fn delete(&mut self, id: &str) -> FinboardResult<()> {
        let request = self.authorized(self.http.delete(self.transaction_url(id)))?;
        Self::check(request.send()?)?;
        info!("deleted transaction {}", id);
        Ok(())
    }
}
