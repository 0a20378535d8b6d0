//! REST 시세 Provider.
//!
//! - `GET {base}/price/{token_id}` → `{price, timestamp, symbol, confidence}`
//! - `GET {base}/history/{token_id}?days=N` → `[{timestamp, price, volume?}]`

use async_trait::async_trait;
use chrono::DateTime;
use dca_core::{PricePoint, ProviderConfig, TokenPrice};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error};

use super::MarketDataProvider;
use crate::error::{DataError, Result};

/// 히스토리 응답의 단일 포인트.
#[derive(Debug, Deserialize)]
struct RawHistoryPoint {
    /// Unix timestamp (초)
    timestamp: i64,
    price: f64,
    #[serde(default)]
    volume: Option<f64>,
}

/// reqwest 기반 Provider.
#[derive(Clone)]
pub struct HttpMarketProvider {
    client: Client,
    base_url: String,
}

impl HttpMarketProvider {
    /// 설정으로 Provider 생성.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| DataError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn public_get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("GET {}", url);

        let response = self.client.get(&url).query(params).send().await?;
        Self::handle_response(response, endpoint).await
    }

    async fn handle_response<T: DeserializeOwned>(
        response: reqwest::Response,
        endpoint: &str,
    ) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(DataError::NotFound(endpoint.to_string()));
        }
        if !status.is_success() {
            return Err(DataError::UpstreamStatus {
                status: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse response: {} - Body: {}", e, body);
            DataError::from(e)
        })
    }
}

#[async_trait]
impl MarketDataProvider for HttpMarketProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_history(&self, token_id: &str, days: u32) -> Result<Vec<PricePoint>> {
        let raw: Vec<RawHistoryPoint> = self
            .public_get(
                &format!("/history/{}", token_id),
                &[("days", days.to_string())],
            )
            .await?;

        let mut points = raw
            .into_iter()
            .map(|p| {
                if !p.price.is_finite() {
                    return Err(DataError::InvalidPayload(format!(
                        "non-finite price for {}",
                        token_id
                    )));
                }
                let timestamp = DateTime::from_timestamp(p.timestamp, 0).ok_or_else(|| {
                    DataError::InvalidPayload(format!("invalid timestamp {}", p.timestamp))
                })?;
                Ok(PricePoint::new(timestamp, p.price, p.volume))
            })
            .collect::<Result<Vec<_>>>()?;

        if points.len() < 2 {
            return Err(DataError::InvalidPayload(format!(
                "history for {} has {} point(s)",
                token_id,
                points.len()
            )));
        }

        points.sort_by_key(|p| p.timestamp);
        Ok(points)
    }

    async fn fetch_price(&self, token_id: &str) -> Result<TokenPrice> {
        let quote: TokenPrice = self
            .public_get(&format!("/price/{}", token_id), &[])
            .await?;

        if !quote.price.is_finite() {
            return Err(DataError::InvalidPayload(format!(
                "non-finite price for {}",
                token_id
            )));
        }
        Ok(quote)
    }
}
