//! Ratatui widgets for the dashboard screen: form, section tabs, section table, help line

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Tabs},
    Frame,
};

use crate::shared::{
    ui::{Focus, UiState},
    view::{DashboardView, FormView, RowKind, SectionBody, SectionView, ViewRow, SECTIONS},
};

const C_ACCENT: Color = Color::Rgb(240, 98, 146);
const C_OK: Color = Color::Rgb(100, 220, 100);
const C_ERR: Color = Color::Rgb(220, 100, 100);
const C_WAIT: Color = Color::Rgb(180, 180, 100);
const C_DIM: Color = Color::Rgb(120, 120, 120);
const C_BRIGHT: Color = Color::Rgb(220, 220, 220);
const C_STRIPE: Color = Color::Rgb(28, 28, 34);

const COPIED: &str = " ✓ Copied!";

/// Draw the whole screen
pub fn render_dashboard(f: &mut Frame, view: &DashboardView, ui: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_form(f, &view.form, ui, chunks[0]);
    render_tabs(f, ui, chunks[1]);

    if let Some(section) = view.section(ui.selected_section()) {
        render_section(f, section, ui, chunks[2]);
    }

    render_help(f, ui, chunks[3]);
}

fn render_form(f: &mut Frame, form: &FormView, ui: &UiState, area: Rect) {
    let block = Block::default()
        .title(" Garden Interchain Analysis ")
        .title_style(Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(C_ACCENT));

    let field = |label: &'static str, value: &str, focused: bool| {
        let value_style = if focused {
            Style::default().fg(C_BRIGHT).add_modifier(Modifier::REVERSED)
        } else {
            Style::default().fg(C_BRIGHT)
        };
        let cursor = if focused { "_" } else { "" };
        Line::from(vec![
            Span::styled(label, Style::default().fg(C_DIM)),
            Span::styled(format!("{value}{cursor}"), value_style),
        ])
    };

    let mut lines = vec![
        field("Start Time:   ", &form.start_time, ui.focus == Focus::StartDate),
        field("End Time:     ", &form.end_time, ui.focus == Focus::EndDate),
        Line::from(vec![
            Span::styled("Last Updated: ", Style::default().fg(C_DIM)),
            Span::styled(form.last_updated.as_str(), Style::default().fg(C_BRIGHT)),
        ]),
    ];

    let mut action = vec![Span::styled(
        fetch_label(ui.focus),
        Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD),
    )];
    if form.is_fetching {
        action.push(Span::styled("  Fetching...", Style::default().fg(C_WAIT)));
    }
    lines.push(Line::from(action));

    if let Some(error) = &form.error {
        lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(C_ERR).add_modifier(Modifier::BOLD),
        )));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Key that submits the form from the current focus
fn fetch_label(focus: Focus) -> &'static str {
    match focus {
        Focus::StartDate | Focus::EndDate => "[Enter] Fetch Data",
        Focus::Sections => "[r] Fetch Data",
    }
}

fn render_tabs(f: &mut Frame, ui: &UiState, area: Rect) {
    let titles = SECTIONS
        .iter()
        .enumerate()
        .map(|(i, id)| format!("{} {}", i + 1, id.title()));

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(C_DIM))
        .highlight_style(Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD))
        .select(ui.selected_section % SECTIONS.len())
        .divider("|");

    f.render_widget(tabs, area);
}

fn render_section(f: &mut Frame, section: &SectionView, ui: &UiState, area: Rect) {
    let border = if ui.focus == Focus::Sections { C_ACCENT } else { C_DIM };
    let block = Block::default()
        .title(format!(" {} ", section.title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));

    let placeholder = |text: &str, color: Color| {
        Paragraph::new(Line::from(Span::styled(
            text.to_string(),
            Style::default().fg(color),
        )))
        .block(block.clone())
    };

    match &section.body {
        SectionBody::Fetching(text) => f.render_widget(placeholder(text, C_WAIT), area),
        SectionBody::Loading(text) | SectionBody::Empty(text) => {
            f.render_widget(placeholder(text, C_DIM), area)
        }
        SectionBody::Blank => f.render_widget(block, area),
        SectionBody::Rows(rows) => {
            let header = Row::new(section.columns.iter().map(|column| {
                Cell::from(*column).style(Style::default().fg(C_ACCENT).add_modifier(Modifier::BOLD))
            }))
            .height(1);

            let widths = column_widths(section.columns, rows);
            let body = rows.iter().enumerate().map(|(i, row)| {
                let stripe = if i % 2 == 1 {
                    Style::default().bg(C_STRIPE)
                } else {
                    Style::default()
                };
                Row::new(row_cells(row)).style(stripe)
            });

            let table = Table::new(body, widths)
                .header(header)
                .block(block)
                .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
                .highlight_symbol("> ");

            let mut state = TableState::default();
            if ui.focus == Focus::Sections && !rows.is_empty() {
                state.select(Some(ui.cursor.min(rows.len() - 1)));
            }
            f.render_stateful_widget(table, area, &mut state);
        }
    }
}

fn row_cells(row: &ViewRow) -> Vec<Cell<'_>> {
    match &row.kind {
        RowKind::Data => row.cells.iter().map(|c| Cell::from(c.as_str())).collect(),
        RowKind::Group { expanded, .. } => {
            let marker = if *expanded { "▾ " } else { "▸ " };
            let mut cells = row.cells.iter();
            let mut out = Vec::with_capacity(row.cells.len());
            if let Some(chain_pair) = cells.next() {
                out.push(Cell::from(Line::from(vec![
                    Span::styled(marker, Style::default().fg(C_ACCENT)),
                    Span::styled(
                        chain_pair.as_str(),
                        Style::default().fg(C_BRIGHT).add_modifier(Modifier::BOLD),
                    ),
                ])));
            }
            out.extend(cells.map(|c| Cell::from(Span::styled(c.as_str(), Style::default().fg(C_DIM)))));
            out
        }
        RowKind::Order { copied, .. } => {
            let mut cells = row.cells.iter();
            let mut out = Vec::with_capacity(row.cells.len());
            if let Some(order_id) = cells.next() {
                let mut spans = vec![Span::raw(format!("  {order_id}"))];
                if *copied {
                    spans.push(Span::styled(
                        COPIED,
                        Style::default().fg(C_OK).add_modifier(Modifier::BOLD),
                    ));
                }
                out.push(Cell::from(Line::from(spans)));
            }
            out.extend(cells.map(|c| Cell::from(c.as_str())));
            out
        }
        RowKind::Note => row
            .cells
            .iter()
            .map(|c| Cell::from(Span::styled(format!("  {c}"), Style::default().fg(C_DIM))))
            .collect(),
    }
}

/// Content-sized columns; group and note rows do not widen data columns
fn column_widths(columns: &[&str], rows: &[ViewRow]) -> Vec<Constraint> {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.chars().count()).collect();

    for row in rows {
        let extra = match &row.kind {
            RowKind::Data => 0,
            RowKind::Order { copied, .. } => 2 + if *copied { COPIED.chars().count() } else { 0 },
            RowKind::Group { .. } | RowKind::Note => continue,
        };
        for (i, cell) in row.cells.iter().enumerate() {
            if let Some(width) = widths.get_mut(i) {
                let cell_width = cell.chars().count() + if i == 0 { extra } else { 0 };
                *width = (*width).max(cell_width);
            }
        }
    }

    widths
        .into_iter()
        .map(|w| Constraint::Length(u16::try_from(w).unwrap_or(u16::MAX).saturating_add(1)))
        .collect()
}

fn render_help(f: &mut Frame, ui: &UiState, area: Rect) {
    let text = match ui.focus {
        Focus::StartDate | Focus::EndDate => {
            "type YYYY-MM-DD HH:MM | Enter fetch | Tab next field | Esc back to sections"
        }
        Focus::Sections => {
            "←/→ section | ↑/↓ row | Enter expand/copy | c copy | r refresh | Tab edit dates | q quit"
        }
    };
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(text, Style::default().fg(C_DIM)))),
        area,
    );
}
