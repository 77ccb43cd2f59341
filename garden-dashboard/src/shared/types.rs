//! Core data types for the Garden Interchain backend API
//!
//! These types match the JSON bodies of the `/averages`, `/orders/all` and
//! `/orders/anomalies` endpoints. Mappings keep the key order of the JSON body.

use chrono::{DateTime, SecondsFormat, Utc};
use derive_more::Constructor;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

/// Chain-pair keyed mapping (e.g. "ethereum_bitcoin" => value)
pub type ChainPairMap<T> = IndexMap<String, T>;

/// Aggregate durations for one chain pair
///
/// All durations are in seconds; `None` means the backend had too little data.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DurationData {
    /// Orders the averages were computed from
    pub total_orders: u64,
    #[serde(default)]
    pub avg_user_init_duration: Option<f64>,
    #[serde(default)]
    pub avg_cobi_init_duration: Option<f64>,
    #[serde(default)]
    pub avg_user_redeem_duration: Option<f64>,
    #[serde(default)]
    pub avg_cobi_redeem_duration: Option<f64>,
    #[serde(default)]
    pub avg_user_refund_duration: Option<f64>,
    #[serde(default)]
    pub avg_cobi_refund_duration: Option<f64>,
}

impl DurationData {
    /// The six averages in display order: init, redeem, refund (user then cobi)
    pub fn averages(&self) -> [Option<f64>; 6] {
        [
            self.avg_user_init_duration,
            self.avg_cobi_init_duration,
            self.avg_user_redeem_duration,
            self.avg_cobi_redeem_duration,
            self.avg_user_refund_duration,
            self.avg_cobi_refund_duration,
        ]
    }
}

/// Per-direction durations of a single swap, in seconds
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OrderDurations {
    #[serde(default)]
    pub user_init_duration: Option<f64>,
    #[serde(default)]
    pub cobi_init_duration: Option<f64>,
    #[serde(default)]
    pub user_redeem_duration: Option<f64>,
    #[serde(default)]
    pub cobi_redeem_duration: Option<f64>,
    #[serde(default)]
    pub user_refund_duration: Option<f64>,
    #[serde(default)]
    pub cobi_refund_duration: Option<f64>,
    /// Creation to completion
    #[serde(default)]
    pub overall_duration: Option<f64>,
}

impl OrderDurations {
    /// The six directional durations in display order
    pub fn directional(&self) -> [Option<f64>; 6] {
        [
            self.user_init_duration,
            self.cobi_init_duration,
            self.user_redeem_duration,
            self.cobi_redeem_duration,
            self.user_refund_duration,
            self.cobi_refund_duration,
        ]
    }
}

/// A single swap order
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Order {
    /// Order identifier, unique within a response
    pub create_order_id: String,
    /// ISO-8601 creation time
    pub created_at: String,
    #[serde(default)]
    pub durations: OrderDurations,
}

/// Upper anomaly bound in seconds. No lower bound is modelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct Bound {
    #[serde(default)]
    pub upper: Option<f64>,
}

/// Anomaly thresholds for one chain pair (refunds have no thresholds)
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ThresholdData {
    #[serde(default)]
    pub user_init_duration: Bound,
    #[serde(default)]
    pub cobi_init_duration: Bound,
    #[serde(default)]
    pub user_redeem_duration: Bound,
    #[serde(default)]
    pub cobi_redeem_duration: Bound,
}

impl ThresholdData {
    /// Upper bounds in display order
    pub fn upper_bounds(&self) -> [Option<f64>; 4] {
        [
            self.user_init_duration.upper,
            self.cobi_init_duration.upper,
            self.user_redeem_duration.upper,
            self.cobi_redeem_duration.upper,
        ]
    }
}

/// Response body of `POST /averages`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AveragesResponse {
    #[serde(default)]
    pub message: String,
    /// ISO-8601 time of the backend's last aggregation
    pub last_updated: String,
    pub averages: ChainPairMap<DurationData>,
    #[serde(default)]
    pub thresholds: Option<ChainPairMap<ThresholdData>>,
}

/// Response body of `POST /orders/all` and `POST /orders/anomalies`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OrdersResponse {
    #[serde(default)]
    pub message: String,
    pub orders: ChainPairMap<Vec<Order>>,
    /// Decoded for completeness; the dashboard reads thresholds from `/averages`
    #[serde(default)]
    pub anomalies: Option<ChainPairMap<ThresholdData>>,
}

/// Request body shared by all three endpoints. Absent bounds are omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Constructor)]
pub struct TimeRange {
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_iso_millis"
    )]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_iso_millis"
    )]
    pub end_time: Option<DateTime<Utc>>,
}

/// Serialize as "2024-01-01T00:00:00.000Z"
fn serialize_iso_millis<S>(time: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match time {
        Some(time) => serializer.serialize_str(&time.to_rfc3339_opts(SecondsFormat::Millis, true)),
        None => serializer.serialize_none(),
    }
}
