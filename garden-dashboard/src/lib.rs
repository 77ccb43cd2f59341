/// Garden Dashboard - Shared Library
///
/// Terminal dashboard over the Garden Interchain analytics backend:
/// - average swap durations per chain pair
/// - anomaly thresholds and anomalous orders
/// - individual orders grouped by chain pair
///
/// Every table is split into Bitcoin and non-Bitcoin chain pairs.
///
/// The library includes:
/// - Backend response types and the HTTP client
/// - The controller owning dashboard state and the fetch cycle
/// - A pure view projection and the ratatui widgets drawing it
pub mod shared;

// Re-export commonly used types for convenience
pub use shared::types::{
    AveragesResponse, ChainPairMap, DurationData, Order, OrderDurations, OrdersResponse,
    ThresholdData, TimeRange,
};

pub use shared::client::{GardenApi, HttpBackend};
pub use shared::clipboard::{ClipboardSink, SystemClipboard};
pub use shared::config::DashboardConfig;
pub use shared::controller::{Controller, DashboardState, FetchOutcome};
pub use shared::date_input::DateInput;
pub use shared::error::{ApiError, ConfigError, DashboardError};

pub use shared::format::{format_duration, format_last_updated, format_timestamp};
pub use shared::chain_pair::{is_bitcoin_pair, partition, Network};

// Presentation
pub use shared::ui::{Focus, UiAction, UiState};
pub use shared::view::{render, DashboardView, SectionBody, SectionId, SectionKind, SECTIONS};
pub use shared::widget::render_dashboard;
