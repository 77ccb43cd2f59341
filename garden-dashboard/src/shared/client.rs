//! HTTP client for the Garden Interchain analytics backend
//!
//! All three endpoints are `POST` with a [`TimeRange`] JSON body.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::shared::{
    config::DashboardConfig,
    error::ApiError,
    types::{AveragesResponse, OrdersResponse, TimeRange},
};

pub const AVERAGES_PATH: &str = "/averages";
pub const ALL_ORDERS_PATH: &str = "/orders/all";
pub const ANOMALOUS_ORDERS_PATH: &str = "/orders/anomalies";

/// Backend operations the dashboard depends on
#[async_trait]
pub trait GardenApi: Send + Sync {
    /// Per chain-pair average durations, thresholds and last-updated time
    async fn averages(&self, range: &TimeRange) -> Result<AveragesResponse, ApiError>;

    /// Every order in the range, grouped by chain pair
    async fn all_orders(&self, range: &TimeRange) -> Result<OrdersResponse, ApiError>;

    /// Orders flagged as anomalous, grouped by chain pair
    async fn anomalous_orders(&self, range: &TimeRange) -> Result<OrdersResponse, ApiError>;
}

/// reqwest-backed [`GardenApi`]
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: DashboardConfig,
}

impl HttpBackend {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn post<T: DeserializeOwned>(&self, path: &str, range: &TimeRange) -> Result<T, ApiError> {
        let url = self.config.endpoint(path);
        debug!(%url, ?range, "POST");

        self.client
            .post(&url)
            .json(range)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| ApiError::from_reqwest(path, e))?
            .json::<T>()
            .await
            .map_err(|e| ApiError::from_reqwest(path, e))
    }
}

#[async_trait]
impl GardenApi for HttpBackend {
    async fn averages(&self, range: &TimeRange) -> Result<AveragesResponse, ApiError> {
        self.post(AVERAGES_PATH, range).await
    }

    async fn all_orders(&self, range: &TimeRange) -> Result<OrdersResponse, ApiError> {
        self.post(ALL_ORDERS_PATH, range).await
    }

    async fn anomalous_orders(&self, range: &TimeRange) -> Result<OrdersResponse, ApiError> {
        self.post(ANOMALOUS_ORDERS_PATH, range).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend(server: &MockServer) -> HttpBackend {
        HttpBackend::new(DashboardConfig::new(&server.uri()).unwrap())
    }

    #[tokio::test]
    async fn test_averages_posts_time_range() {
        let server = MockServer::start().await;
        let range = TimeRange::new(
            Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            Some(Utc.with_ymd_and_hms(2024, 2, 1, 12, 30, 0).unwrap()),
        );

        Mock::given(method("POST"))
            .and(path("/averages"))
            .and(body_json(json!({
                "start_time": "2024-01-01T00:00:00.000Z",
                "end_time": "2024-02-01T12:30:00.000Z"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "ok",
                "last_updated": "2024-02-01T12:00:00Z",
                "averages": { "ethereum_bitcoin": { "total_orders": 2, "avg_user_init_duration": 40.0 } },
                "thresholds": {}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let response = backend(&server).averages(&range).await.unwrap();
        assert_eq!(response.averages["ethereum_bitcoin"].total_orders, 2);
        assert_eq!(response.thresholds.map(|t| t.len()), Some(0));
    }

    #[tokio::test]
    async fn test_orders_endpoints() {
        let server = MockServer::start().await;
        let order = json!({
            "create_order_id": "order-1",
            "created_at": "2024-01-02T00:00:00Z",
            "durations": { "overall_duration": 90.0 }
        });

        Mock::given(method("POST"))
            .and(path("/orders/all"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "ok",
                "orders": { "ethereum_arbitrum": [order] }
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/orders/anomalies"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": "ok",
                "orders": { "ethereum_arbitrum": [] }
            })))
            .mount(&server)
            .await;

        let backend = backend(&server);
        let all = backend.all_orders(&TimeRange::default()).await.unwrap();
        let anomalous = backend.anomalous_orders(&TimeRange::default()).await.unwrap();

        assert_eq!(all.orders["ethereum_arbitrum"][0].create_order_id, "order-1");
        assert!(anomalous.orders["ethereum_arbitrum"].is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/orders/all"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = backend(&server)
            .all_orders(&TimeRange::default())
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ApiError::Status {
                endpoint: "/orders/all".to_string(),
                status: 503,
            }
        );
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/averages"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{\"averages\": 42}"))
            .mount(&server)
            .await;

        let err = backend(&server)
            .averages(&TimeRange::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Decode { .. }), "unexpected error: {err:?}");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let backend = HttpBackend::new(DashboardConfig::new("http://127.0.0.1:1").unwrap());
        let err = backend.averages(&TimeRange::default()).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)), "unexpected error: {err:?}");
    }
}
