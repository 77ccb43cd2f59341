//! Root controller: owns the dashboard state and drives fetch cycles
//!
//! State lives behind a tokio mutex. Renderers work on cloned snapshots, so a
//! fetch or copy timer mutating the state never blocks a frame mid-draw.

use std::{sync::Arc, time::Duration};

use chrono::Local;
use tokio::{sync::Mutex, task::JoinHandle};
use tracing::{debug, error, info, warn};

use crate::shared::{
    client::GardenApi,
    clipboard::ClipboardSink,
    date_input::DateInput,
    error::DashboardError,
    types::{AveragesResponse, ChainPairMap, DurationData, Order, OrdersResponse, ThresholdData, TimeRange},
};

/// Result of a fetch cycle that reached the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Responses were written into the state
    Applied,
    /// A newer cycle started while this one was in flight; responses were dropped
    Superseded,
}

/// Snapshot of everything the dashboard renders
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub start_time: DateInput,
    pub end_time: DateInput,
    pub averages: Option<ChainPairMap<DurationData>>,
    pub orders: Option<ChainPairMap<Vec<Order>>>,
    pub anomalous_orders: Option<ChainPairMap<Vec<Order>>>,
    pub thresholds: Option<ChainPairMap<ThresholdData>>,
    pub last_updated: String,
    pub error_message: String,
    pub is_fetching: bool,
    pub copied_order_id: Option<String>,
    fetch_seq: u64,
    copy_generation: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        let now = Local::now();
        Self::with_time_range(DateInput::month_before(now), DateInput::Valid(now))
    }
}

impl DashboardState {
    /// Empty state with the given form values
    pub fn with_time_range(start_time: DateInput, end_time: DateInput) -> Self {
        Self {
            start_time,
            end_time,
            averages: None,
            orders: None,
            anomalous_orders: None,
            thresholds: None,
            last_updated: String::new(),
            error_message: String::new(),
            is_fetching: false,
            copied_order_id: None,
            fetch_seq: 0,
            copy_generation: 0,
        }
    }

    /// Request body for the current form values
    pub fn time_range(&self) -> Result<TimeRange, DashboardError> {
        Ok(TimeRange::new(self.start_time.to_utc()?, self.end_time.to_utc()?))
    }

    /// True once any dataset has been received and not cleared
    pub fn has_data(&self) -> bool {
        self.averages.is_some()
            || self.orders.is_some()
            || self.anomalous_orders.is_some()
            || self.thresholds.is_some()
    }

    /// Start a new cycle: clear datasets and the error, return its sequence number
    fn begin_fetch(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.is_fetching = true;
        self.averages = None;
        self.orders = None;
        self.anomalous_orders = None;
        self.thresholds = None;
        self.error_message.clear();
        self.fetch_seq
    }

    fn is_latest(&self, seq: u64) -> bool {
        self.fetch_seq == seq
    }

    fn apply(&mut self, averages: AveragesResponse, orders: OrdersResponse, anomalous: OrdersResponse) {
        let thresholds = averages.thresholds.unwrap_or_else(|| {
            warn!("No thresholds field in averages response, showing none");
            ChainPairMap::new()
        });

        info!(
            chain_pairs = averages.averages.len(),
            orders = orders.orders.values().map(Vec::len).sum::<usize>(),
            anomalous_orders = anomalous.orders.values().map(Vec::len).sum::<usize>(),
            last_updated = %averages.last_updated,
            "Fetched dashboard data"
        );

        self.averages = Some(averages.averages);
        self.thresholds = Some(thresholds);
        self.last_updated = averages.last_updated;
        self.orders = Some(orders.orders);
        self.anomalous_orders = Some(anomalous.orders);
        self.error_message.clear();
    }
}

/// Owns the dashboard state and the backend / clipboard handles
pub struct Controller<A> {
    api: Arc<A>,
    clipboard: Arc<dyn ClipboardSink>,
    state: Arc<Mutex<DashboardState>>,
    copied_reset: Duration,
}

impl<A> Clone for Controller<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            clipboard: Arc::clone(&self.clipboard),
            state: Arc::clone(&self.state),
            copied_reset: self.copied_reset,
        }
    }
}

impl<A> Controller<A>
where
    A: GardenApi,
{
    pub fn new(api: A, clipboard: Arc<dyn ClipboardSink>, copied_reset: Duration) -> Self {
        Self {
            api: Arc::new(api),
            clipboard,
            state: Arc::new(Mutex::new(DashboardState::default())),
            copied_reset,
        }
    }

    /// Replace the initial state (e.g. custom form defaults)
    pub fn with_state(self, state: DashboardState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
            ..self
        }
    }

    /// Clone of the current state for rendering
    pub async fn snapshot(&self) -> DashboardState {
        self.state.lock().await.clone()
    }

    /// Update both date fields of the form
    pub async fn set_time_range(&self, start_time: DateInput, end_time: DateInput) {
        let mut state = self.state.lock().await;
        state.start_time = start_time;
        state.end_time = end_time;
    }

    /// Fetch averages, all orders and anomalous orders for the form's range
    ///
    /// The three requests run concurrently and fail as a unit. Results of a
    /// cycle that is no longer the latest are discarded.
    pub async fn fetch_data(&self) -> Result<FetchOutcome, DashboardError> {
        let (seq, range) = {
            let mut state = self.state.lock().await;
            let range = match state.time_range() {
                Ok(range) => range,
                Err(e) => {
                    warn!("Rejected fetch: {}", e);
                    state.error_message = e.to_string();
                    return Err(e);
                }
            };
            (state.begin_fetch(), range)
        };

        info!(seq, ?range, "Fetching dashboard data");

        let result = tokio::try_join!(
            self.api.averages(&range),
            self.api.all_orders(&range),
            self.api.anomalous_orders(&range)
        );

        let mut state = self.state.lock().await;
        if !state.is_latest(seq) {
            debug!(seq, latest = state.fetch_seq, "Discarding superseded fetch");
            return Ok(FetchOutcome::Superseded);
        }
        state.is_fetching = false;

        match result {
            Ok((averages, orders, anomalous)) => {
                state.apply(averages, orders, anomalous);
                Ok(FetchOutcome::Applied)
            }
            Err(e) => {
                let e = DashboardError::from(e);
                error!("{}", e);
                state.error_message = e.to_string();
                Err(e)
            }
        }
    }

    /// Copy `text` to the clipboard and mark it as copied until the reset delay elapses
    ///
    /// Only the most recent copy's timer clears the marker. Returns the timer task.
    pub async fn copy_to_clipboard(&self, text: &str) -> JoinHandle<()> {
        if let Err(e) = self.clipboard.set_text(text) {
            warn!("Failed to write to clipboard: {}", e);
        }

        let generation = {
            let mut state = self.state.lock().await;
            state.copy_generation += 1;
            state.copied_order_id = Some(text.to_string());
            state.copy_generation
        };

        let state = Arc::clone(&self.state);
        let delay = self.copied_reset;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = state.lock().await;
            if state.copy_generation == generation {
                debug!("Clearing copied order marker");
                state.copied_order_id = None;
            }
        })
    }
}

impl<A> Controller<A>
where
    A: GardenApi + 'static,
{
    /// Run [`Controller::fetch_data`] in the background, logging its outcome
    pub fn spawn_fetch(&self) -> JoinHandle<()> {
        let controller = self.clone();
        tokio::spawn(async move {
            match controller.fetch_data().await {
                Ok(FetchOutcome::Applied) => debug!("Fetch cycle applied"),
                Ok(FetchOutcome::Superseded) => debug!("Fetch cycle superseded"),
                // Already recorded in the form's error message
                Err(e) if e.is_user_facing() => {}
                Err(e) => error!("Fetch cycle failed: {}", e),
            }
        })
    }
}
