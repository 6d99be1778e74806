//! HTTP access to the SOW service's JSON endpoints.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    domain::{ChargerTypeId, CustomerId, SowId},
    protocol::{ChargerTypeSummary, CustomerDetail, CustomerSummary, SowDetail, SowSummary},
};
use tracing::debug;

use crate::error::{ConfigError, NetworkError};

/// Read-only view of the SOW service consumed by the form.
#[async_trait]
pub trait SowApi: Send + Sync {
    async fn list_charger_types(&self) -> Result<Vec<ChargerTypeSummary>, NetworkError>;
    async fn list_customers(&self) -> Result<Vec<CustomerSummary>, NetworkError>;
    async fn list_sows(&self, charger: &ChargerTypeId) -> Result<Vec<SowSummary>, NetworkError>;
    async fn sow_detail(&self, sow: &SowId) -> Result<SowDetail, NetworkError>;
    async fn customer_detail(&self, customer: &CustomerId) -> Result<CustomerDetail, NetworkError>;
}

pub fn charger_types_route() -> &'static str {
    "/api/charger_types"
}

pub fn customers_route() -> &'static str {
    "/api/customers"
}

pub fn sows_route() -> &'static str {
    "/api/sows"
}

pub struct HttpSowApi {
    http: Client,
    server_url: String,
}

impl HttpSowApi {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            server_url: trim_base(server_url.into()),
        }
    }

    /// `None` keeps reqwest's default of waiting indefinitely.
    pub fn with_timeout(
        server_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            server_url: trim_base(server_url.into()),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.server_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        request: RequestBuilder,
    ) -> Result<T, NetworkError> {
        debug!(%url, "GET");
        let res = request
            .send()
            .await
            .map_err(|source| NetworkError::Transport {
                url: url.clone(),
                source,
            })?;
        let status = res.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                url,
                status: status.as_u16(),
            });
        }
        res.json::<T>()
            .await
            .map_err(|source| NetworkError::Decode { url, source })
    }
}

fn trim_base(raw: String) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[async_trait]
impl SowApi for HttpSowApi {
    async fn list_charger_types(&self) -> Result<Vec<ChargerTypeSummary>, NetworkError> {
        let url = self.url(charger_types_route());
        let request = self.http.get(&url).header(ACCEPT, "application/json");
        self.get_json(url, request).await
    }

    async fn list_customers(&self) -> Result<Vec<CustomerSummary>, NetworkError> {
        let url = self.url(customers_route());
        let request = self.http.get(&url).header(ACCEPT, "application/json");
        self.get_json(url, request).await
    }

    async fn list_sows(&self, charger: &ChargerTypeId) -> Result<Vec<SowSummary>, NetworkError> {
        let url = self.url(sows_route());
        let request = self
            .http
            .get(&url)
            .query(&[("charger_type_id", charger.as_str())])
            .header(ACCEPT, "application/json");
        self.get_json(url, request).await
    }

    async fn sow_detail(&self, sow: &SowId) -> Result<SowDetail, NetworkError> {
        let url = self.url(&format!("{}/{}", sows_route(), encode_segment(sow.as_str())));
        let request = self.http.get(&url);
        self.get_json(url, request).await
    }

    async fn customer_detail(&self, customer: &CustomerId) -> Result<CustomerDetail, NetworkError> {
        let url = self.url(&format!(
            "{}/{}",
            customers_route(),
            encode_segment(customer.as_str())
        ));
        let request = self.http.get(&url);
        self.get_json(url, request).await
    }
}

fn encode_segment(raw: &str) -> String {
    url::form_urlencoded::byte_serialize(raw.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
