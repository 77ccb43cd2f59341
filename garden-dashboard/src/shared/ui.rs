//! UI-local state: focus, date-field buffers, section and row cursor, expanded groups
//!
//! Key handling is pure. It mutates only this state and reports the actions
//! that need the controller.

use std::collections::HashSet;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::shared::{
    date_input::DateInput,
    view::{DashboardView, RowKind, SectionId, SECTIONS},
};

const PAGE_SIZE: usize = 10;

/// Which part of the screen receives key presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    StartDate,
    EndDate,
    Sections,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::StartDate => Focus::EndDate,
            Focus::EndDate => Focus::Sections,
            Focus::Sections => Focus::StartDate,
        }
    }

    fn prev(self) -> Self {
        match self {
            Focus::StartDate => Focus::Sections,
            Focus::EndDate => Focus::StartDate,
            Focus::Sections => Focus::EndDate,
        }
    }
}

/// Work for the controller produced by a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    /// Store the parsed form values and start a fetch cycle
    Submit { start: DateInput, end: DateInput },
    /// Copy an order id to the clipboard
    Copy(String),
    Quit,
}

#[derive(Debug, Clone)]
pub struct UiState {
    pub focus: Focus,
    pub start_input: String,
    pub end_input: String,
    /// Index into [`SECTIONS`]
    pub selected_section: usize,
    /// Row cursor within the selected section
    pub cursor: usize,
    expanded: HashSet<(SectionId, String)>,
}

impl UiState {
    /// Seed the form buffers from the controller's date inputs
    pub fn new(start: &DateInput, end: &DateInput) -> Self {
        Self {
            focus: Focus::Sections,
            start_input: start.display(),
            end_input: end.display(),
            selected_section: 0,
            cursor: 0,
            expanded: HashSet::new(),
        }
    }

    pub fn selected_section(&self) -> SectionId {
        SECTIONS[self.selected_section % SECTIONS.len()]
    }

    pub fn is_expanded(&self, section: SectionId, chain_pair: &str) -> bool {
        self.expanded.contains(&(section, chain_pair.to_string()))
    }

    pub fn toggle_group(&mut self, section: SectionId, chain_pair: &str) {
        let key = (section, chain_pair.to_string());
        if !self.expanded.remove(&key) {
            self.expanded.insert(key);
        }
    }

    /// Keep the cursor inside the selected section's rows
    pub fn clamp_cursor(&mut self, view: &DashboardView) {
        let len = self.row_count(view);
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    fn row_count(&self, view: &DashboardView) -> usize {
        view.section(self.selected_section())
            .map(|section| section.rows().len())
            .unwrap_or(0)
    }

    fn selected_row<'a>(&self, view: &'a DashboardView) -> Option<&'a RowKind> {
        view.section(self.selected_section())?
            .rows()
            .get(self.cursor)
            .map(|row| &row.kind)
    }

    fn submit(&self) -> UiAction {
        UiAction::Submit {
            start: DateInput::parse(&self.start_input),
            end: DateInput::parse(&self.end_input),
        }
    }

    fn select_section(&mut self, index: usize) {
        self.selected_section = index % SECTIONS.len();
        self.cursor = 0;
    }

    /// Apply a key press, returning controller work if any
    pub fn handle_key(&mut self, key: KeyEvent, view: &DashboardView) -> Option<UiAction> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(UiAction::Quit);
        }

        self.clamp_cursor(view);

        match self.focus {
            Focus::StartDate | Focus::EndDate => self.handle_form_key(key),
            Focus::Sections => self.handle_section_key(key, view),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<UiAction> {
        let buffer = match self.focus {
            Focus::StartDate => &mut self.start_input,
            _ => &mut self.end_input,
        };

        match key.code {
            KeyCode::Char(c) => buffer.push(c),
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Enter => return Some(self.submit()),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Esc => self.focus = Focus::Sections,
            _ => {}
        }
        None
    }

    fn handle_section_key(&mut self, key: KeyEvent, view: &DashboardView) -> Option<UiAction> {
        let last_row = self.row_count(view).saturating_sub(1);

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Some(UiAction::Quit),
            KeyCode::Char('r') => return Some(self.submit()),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Left | KeyCode::Char('h') => {
                self.select_section(self.selected_section + SECTIONS.len() - 1)
            }
            KeyCode::Right | KeyCode::Char('l') => self.select_section(self.selected_section + 1),
            KeyCode::Char(c @ '1'..='8') => self.select_section(c as usize - '1' as usize),
            KeyCode::Up | KeyCode::Char('k') => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.cursor = (self.cursor + 1).min(last_row),
            KeyCode::PageUp => self.cursor = self.cursor.saturating_sub(PAGE_SIZE),
            KeyCode::PageDown => self.cursor = (self.cursor + PAGE_SIZE).min(last_row),
            KeyCode::Home | KeyCode::Char('g') => self.cursor = 0,
            KeyCode::End | KeyCode::Char('G') => self.cursor = last_row,
            KeyCode::Enter | KeyCode::Char(' ') => {
                return match self.selected_row(view).cloned() {
                    Some(RowKind::Group { chain_pair, .. }) => {
                        self.toggle_group(self.selected_section(), &chain_pair);
                        None
                    }
                    Some(RowKind::Order { order_id, .. }) => Some(UiAction::Copy(order_id)),
                    _ => None,
                };
            }
            KeyCode::Char('c') => {
                if let Some(RowKind::Order { order_id, .. }) = self.selected_row(view) {
                    return Some(UiAction::Copy(order_id.clone()));
                }
            }
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{
        chain_pair::Network,
        controller::DashboardState,
        types::{ChainPairMap, Order},
        view::{render, SectionKind},
    };

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ui() -> UiState {
        UiState::new(&DateInput::parse("2024-01-01 00:00"), &DateInput::Absent)
    }

    fn state_with_orders() -> DashboardState {
        let mut state = DashboardState::with_time_range(DateInput::Absent, DateInput::Absent);
        let mut orders = ChainPairMap::new();
        orders.insert(
            "ethereum_arbitrum".to_string(),
            vec![Order {
                create_order_id: "order-1".to_string(),
                created_at: "2024-01-01T00:00:00Z".to_string(),
                durations: Default::default(),
            }],
        );
        state.orders = Some(orders);
        state
    }

    #[test]
    fn test_new_seeds_form_buffers() {
        let ui = ui();
        assert_eq!(ui.start_input, "2024-01-01 00:00");
        assert_eq!(ui.end_input, "");
        assert_eq!(ui.focus, Focus::Sections);
        assert_eq!(ui.selected_section(), SECTIONS[0]);
    }

    #[test]
    fn test_edit_and_submit_form() {
        let mut ui = ui();
        let view = render(&DashboardState::default(), &ui);

        ui.handle_key(press(KeyCode::Tab), &view);
        assert_eq!(ui.focus, Focus::StartDate);

        for _ in 0..5 {
            ui.handle_key(press(KeyCode::Backspace), &view);
        }
        for c in "12:30".chars() {
            ui.handle_key(press(KeyCode::Char(c)), &view);
        }
        assert_eq!(ui.start_input, "2024-01-01 12:30");

        ui.handle_key(press(KeyCode::Tab), &view);
        for c in "oops".chars() {
            ui.handle_key(press(KeyCode::Char(c)), &view);
        }

        // 'q' is text while editing
        assert_eq!(ui.handle_key(press(KeyCode::Char('q')), &view), None);

        let action = ui.handle_key(press(KeyCode::Enter), &view);
        assert_eq!(
            action,
            Some(UiAction::Submit {
                start: DateInput::parse("2024-01-01 12:30"),
                end: DateInput::Invalid("oopsq".to_string()),
            })
        );
    }

    #[test]
    fn test_section_navigation_wraps() {
        let mut ui = ui();
        let view = render(&DashboardState::default(), &ui);

        ui.handle_key(press(KeyCode::Left), &view);
        assert_eq!(ui.selected_section(), SECTIONS[7]);
        ui.handle_key(press(KeyCode::Right), &view);
        assert_eq!(ui.selected_section(), SECTIONS[0]);
        ui.handle_key(press(KeyCode::Char('5')), &view);
        assert_eq!(
            ui.selected_section(),
            SectionId::new(SectionKind::AnomalyThresholds, Network::NonBitcoin)
        );
    }

    #[test]
    fn test_toggle_group_and_copy_order() {
        let state = state_with_orders();
        let mut ui = ui();
        ui.handle_key(press(KeyCode::Char('7')), &render(&state, &ui));

        // Collapsed group: Enter expands it
        let view = render(&state, &ui);
        assert_eq!(ui.handle_key(press(KeyCode::Enter), &view), None);
        assert!(ui.is_expanded(ui.selected_section(), "ethereum_arbitrum"));

        // Cursor moves onto the order, which copies
        let view = render(&state, &ui);
        ui.handle_key(press(KeyCode::Down), &view);
        assert_eq!(ui.cursor, 1);
        assert_eq!(
            ui.handle_key(press(KeyCode::Char('c')), &view),
            Some(UiAction::Copy("order-1".to_string()))
        );
        assert_eq!(
            ui.handle_key(press(KeyCode::Enter), &view),
            Some(UiAction::Copy("order-1".to_string()))
        );

        // Cursor clamps at the last row
        ui.handle_key(press(KeyCode::PageDown), &view);
        assert_eq!(ui.cursor, 1);
    }

    #[test]
    fn test_cursor_clamps_after_collapse() {
        let state = state_with_orders();
        let mut ui = ui();
        ui.select_section(6);
        let id = ui.selected_section();
        ui.toggle_group(id, "ethereum_arbitrum");
        ui.cursor = 1;

        ui.toggle_group(id, "ethereum_arbitrum");
        ui.clamp_cursor(&render(&state, &ui));
        assert_eq!(ui.cursor, 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut ui = ui();
        let view = render(&DashboardState::default(), &ui);

        assert_eq!(ui.handle_key(press(KeyCode::Char('q')), &view), Some(UiAction::Quit));
        assert_eq!(
            ui.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &view),
            Some(UiAction::Quit)
        );

        ui.focus = Focus::EndDate;
        assert_eq!(ui.handle_key(press(KeyCode::Esc), &view), None);
        assert_eq!(ui.focus, Focus::Sections);
    }
}
