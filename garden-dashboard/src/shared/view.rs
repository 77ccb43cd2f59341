//! Pure projection of [`DashboardState`] into the view tree the widget draws
//!
//! One parameterised renderer covers all eight sections. A section differs only
//! by its dataset ([`SectionKind`]) and its side of the Bitcoin split ([`Network`]).

use crate::shared::{
    chain_pair::{partition, Network},
    controller::DashboardState,
    format::{format_duration, format_last_updated, format_timestamp},
    types::{ChainPairMap, DurationData, Order, ThresholdData},
    ui::UiState,
};

pub const AVERAGE_COLUMNS: &[&str] = &[
    "Chain Pair",
    "Total Orders",
    "User Init",
    "Cobi Init",
    "User Redeem",
    "Cobi Redeem",
    "User Refund",
    "Cobi Refund",
];

pub const ORDER_COLUMNS: &[&str] = &[
    "Order ID",
    "Created At",
    "User Init",
    "Cobi Init",
    "User Redeem",
    "Cobi Redeem",
    "User Refund",
    "Cobi Refund",
    "Overall",
];

pub const THRESHOLD_COLUMNS: &[&str] = &[
    "Chain Pair",
    "User Init",
    "Cobi Init",
    "User Redeem",
    "Cobi Redeem",
];

/// Dataset shown by a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    AverageDurations,
    AnomalousOrders,
    AnomalyThresholds,
    IndividualOrders,
}

/// One of the eight dashboard sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionId {
    pub kind: SectionKind,
    pub network: Network,
}

impl SectionId {
    pub const fn new(kind: SectionKind, network: Network) -> Self {
        Self { kind, network }
    }

    pub fn title(&self) -> String {
        let name = match self.kind {
            SectionKind::AverageDurations => "Average Durations",
            SectionKind::AnomalousOrders => "Anomalous Orders",
            SectionKind::AnomalyThresholds => "Anomaly Thresholds",
            SectionKind::IndividualOrders => "Individual Orders",
        };
        format!("{}{}", self.network.prefix(), name)
    }

    pub fn columns(&self) -> &'static [&'static str] {
        match self.kind {
            SectionKind::AverageDurations => AVERAGE_COLUMNS,
            SectionKind::AnomalyThresholds => THRESHOLD_COLUMNS,
            SectionKind::AnomalousOrders | SectionKind::IndividualOrders => ORDER_COLUMNS,
        }
    }
}

/// Display order of the sections
pub const SECTIONS: [SectionId; 8] = [
    SectionId::new(SectionKind::AverageDurations, Network::NonBitcoin),
    SectionId::new(SectionKind::AverageDurations, Network::Bitcoin),
    SectionId::new(SectionKind::AnomalousOrders, Network::NonBitcoin),
    SectionId::new(SectionKind::AnomalousOrders, Network::Bitcoin),
    SectionId::new(SectionKind::AnomalyThresholds, Network::NonBitcoin),
    SectionId::new(SectionKind::AnomalyThresholds, Network::Bitcoin),
    SectionId::new(SectionKind::IndividualOrders, Network::NonBitcoin),
    SectionId::new(SectionKind::IndividualOrders, Network::Bitcoin),
];

/// Whole-screen view tree
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub form: FormView,
    pub sections: Vec<SectionView>,
}

impl DashboardView {
    pub fn section(&self, id: SectionId) -> Option<&SectionView> {
        self.sections.iter().find(|section| section.id == id)
    }
}

/// Date-range form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormView {
    pub start_time: String,
    pub end_time: String,
    pub last_updated: String,
    /// The single place errors are shown
    pub error: Option<String>,
    pub is_fetching: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub id: SectionId,
    pub title: String,
    pub columns: &'static [&'static str],
    pub body: SectionBody,
}

impl SectionView {
    /// Table rows, empty for placeholder bodies
    pub fn rows(&self) -> &[ViewRow] {
        match &self.body {
            SectionBody::Rows(rows) => rows,
            _ => &[],
        }
    }
}

/// Four-state display contract shared by every section
#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    /// Fetch in flight
    Fetching(String),
    /// No data yet and nothing in flight
    Loading(String),
    /// No data after a failed fetch; the form carries the error
    Blank,
    /// Data present but nothing to show for this partition
    Empty(String),
    /// Data present; an empty vec renders the header only
    Rows(Vec<ViewRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewRow {
    pub kind: RowKind,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowKind {
    /// Plain table row
    Data,
    /// Collapsible chain-pair group header
    Group { chain_pair: String, expanded: bool },
    /// Order inside an expanded group
    Order { order_id: String, copied: bool },
    /// Informational line inside an expanded group
    Note,
}

/// Project state plus UI-local state into the view tree
pub fn render(state: &DashboardState, ui: &UiState) -> DashboardView {
    let form = FormView {
        start_time: ui.start_input.clone(),
        end_time: ui.end_input.clone(),
        last_updated: format_last_updated(&state.last_updated),
        error: (!state.error_message.is_empty()).then(|| state.error_message.clone()),
        is_fetching: state.is_fetching,
    };

    let sections = SECTIONS
        .iter()
        .map(|&id| render_section(id, state, ui))
        .collect();

    DashboardView { form, sections }
}

fn render_section(id: SectionId, state: &DashboardState, ui: &UiState) -> SectionView {
    let prefix = id.network.prefix();
    let has_error = !state.error_message.is_empty();

    let body = match id.kind {
        SectionKind::AverageDurations => section_body(
            state.averages.as_ref(),
            state.is_fetching,
            has_error,
            format!("Fetching {prefix}chains..."),
            format!("Loading {prefix}average durations..."),
            |averages| SectionBody::Rows(average_rows(averages, id.network)),
        ),
        SectionKind::AnomalyThresholds => section_body(
            state.thresholds.as_ref(),
            state.is_fetching,
            has_error,
            format!("Fetching {prefix}thresholds..."),
            format!("Loading {prefix}anomaly thresholds..."),
            |thresholds| {
                let rows = threshold_rows(thresholds, id.network);
                if rows.is_empty() {
                    SectionBody::Empty(format!("No {prefix}anomaly thresholds available"))
                } else {
                    SectionBody::Rows(rows)
                }
            },
        ),
        SectionKind::AnomalousOrders => section_body(
            state.anomalous_orders.as_ref(),
            state.is_fetching,
            has_error,
            format!("Fetching {prefix}anomalous..."),
            format!("Loading {prefix}anomalous orders..."),
            |orders| SectionBody::Rows(order_rows(orders, id, state, ui)),
        ),
        SectionKind::IndividualOrders => section_body(
            state.orders.as_ref(),
            state.is_fetching,
            has_error,
            format!("Fetching {prefix}chains..."),
            format!("Loading {prefix}individual orders..."),
            |orders| SectionBody::Rows(order_rows(orders, id, state, ui)),
        ),
    };

    SectionView {
        id,
        title: id.title(),
        columns: id.columns(),
        body,
    }
}

fn section_body<T>(
    data: Option<&ChainPairMap<T>>,
    is_fetching: bool,
    has_error: bool,
    fetching: String,
    loading: String,
    present: impl FnOnce(&ChainPairMap<T>) -> SectionBody,
) -> SectionBody {
    if is_fetching {
        return SectionBody::Fetching(fetching);
    }
    match data {
        Some(data) => present(data),
        None if has_error => SectionBody::Blank,
        None => SectionBody::Loading(loading),
    }
}

/// Chain pairs with at least one order
fn average_rows(averages: &ChainPairMap<DurationData>, network: Network) -> Vec<ViewRow> {
    partition(Some(averages))
        .select(network)
        .iter()
        .filter_map(|&chain_pair| {
            let data = &averages[chain_pair];
            (data.total_orders > 0).then(|| {
                let mut cells = vec![chain_pair.to_string(), data.total_orders.to_string()];
                cells.extend(data.averages().into_iter().map(format_duration));
                ViewRow {
                    kind: RowKind::Data,
                    cells,
                }
            })
        })
        .collect()
}

fn threshold_rows(thresholds: &ChainPairMap<ThresholdData>, network: Network) -> Vec<ViewRow> {
    partition(Some(thresholds))
        .select(network)
        .iter()
        .map(|&chain_pair| {
            let mut cells = vec![chain_pair.to_string()];
            cells.extend(
                thresholds[chain_pair]
                    .upper_bounds()
                    .into_iter()
                    .map(format_duration),
            );
            ViewRow {
                kind: RowKind::Data,
                cells,
            }
        })
        .collect()
}

fn order_rows(
    orders: &ChainPairMap<Vec<Order>>,
    id: SectionId,
    state: &DashboardState,
    ui: &UiState,
) -> Vec<ViewRow> {
    let anomalous = id.kind == SectionKind::AnomalousOrders;
    let mut rows = Vec::new();

    for &chain_pair in partition(Some(orders)).select(id.network) {
        let group = &orders[chain_pair];
        let expanded = ui.is_expanded(id, chain_pair);

        rows.push(ViewRow {
            kind: RowKind::Group {
                chain_pair: chain_pair.to_string(),
                expanded,
            },
            cells: vec![chain_pair.to_string(), format!("{} orders", group.len())],
        });

        if !expanded {
            continue;
        }

        if group.is_empty() {
            let label = if anomalous { "anomalous " } else { "" };
            rows.push(ViewRow {
                kind: RowKind::Note,
                cells: vec![format!("No {label}orders found for this chain pair.")],
            });
            continue;
        }

        rows.extend(group.iter().map(|order| order_row(order, state)));
    }

    rows
}

fn order_row(order: &Order, state: &DashboardState) -> ViewRow {
    let mut cells = vec![
        order.create_order_id.clone(),
        format_timestamp(&order.created_at),
    ];
    cells.extend(order.durations.directional().into_iter().map(format_duration));
    cells.push(format_duration(order.durations.overall_duration));

    ViewRow {
        kind: RowKind::Order {
            order_id: order.create_order_id.clone(),
            copied: state.copied_order_id.as_deref() == Some(order.create_order_id.as_str()),
        },
        cells,
    }
}
