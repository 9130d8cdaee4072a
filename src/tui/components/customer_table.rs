//! # Customer Table Component
//!
//! The list screen: a search box, the current page of customers, and a
//! pager strip. It never filters or sorts anything itself; rows arrive
//! already computed by the query pipeline (`App::visible()`).
//!
//! ## Keys
//!
//! | Key                 | Effect                              |
//! |---------------------|-------------------------------------|
//! | `/`                 | focus the search box                |
//! | `Esc`               | leave search / clear the search     |
//! | `↑` `↓`             | move the row selection              |
//! | `←` `→` `PgUp` `PgDn` | previous / next page              |
//! | `f`                 | cycle the status filter             |
//! | `s`                 | cycle the sort preset               |
//! | `a`                 | add a customer                      |
//! | `Enter` / `v`       | view the selected customer          |
//! | `e` / `d`           | edit / delete the selected customer |
//! | `q`                 | quit                                |

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState};
use unicode_width::UnicodeWidthStr;

use super::truncate_str;
use crate::core::format::{format_currency, format_date};
use crate::core::model::{Customer, CustomerStatus};
use crate::core::query::{PageLink, QuerySpec, StatusFilter, VisiblePage, page_window};
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

/// Persistent state for the list screen.
#[derive(Debug, Default)]
pub struct CustomerTableState {
    pub table_state: TableState,
    pub search_input: String,
    /// Keystrokes go to the search box instead of the row commands.
    pub searching: bool,
    /// Ids of the rows currently on screen, in display order.
    row_ids: Vec<String>,
}

/// Events emitted by the list screen.
#[derive(Debug, Clone, PartialEq)]
pub enum TableEvent {
    SearchChanged(String),
    CycleFilter,
    CycleSort,
    NextPage,
    PreviousPage,
    Add,
    View(String),
    Edit(String),
    Delete(String),
    Quit,
}

impl CustomerTableState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the on-screen row ids, keeping the selection on the same
    /// customer when it is still visible.
    pub fn sync_rows(&mut self, ids: Vec<String>) {
        let previous = self.selected_id().map(str::to_owned);
        self.row_ids = ids;
        let selected = match previous {
            Some(id) => self
                .row_ids
                .iter()
                .position(|row| *row == id)
                .or_else(|| self.table_state.selected()),
            None => Some(0),
        };
        self.table_state.select(match selected {
            _ if self.row_ids.is_empty() => None,
            Some(i) => Some(i.min(self.row_ids.len() - 1)),
            None => Some(0),
        });
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.table_state
            .selected()
            .and_then(|i| self.row_ids.get(i))
            .map(String::as_str)
    }

    fn with_selected(&self, make: fn(String) -> TableEvent) -> Option<TableEvent> {
        self.selected_id().map(|id| make(id.to_string()))
    }

    fn handle_search_key(&mut self, event: &TuiEvent) -> Option<TableEvent> {
        match event {
            TuiEvent::Escape | TuiEvent::Submit | TuiEvent::CursorDown => {
                self.searching = false;
                None
            }
            TuiEvent::InputChar(c) => {
                self.search_input.push(*c);
                Some(TableEvent::SearchChanged(self.search_input.clone()))
            }
            TuiEvent::Paste(text) => {
                self.search_input
                    .extend(text.chars().filter(|c| !c.is_control()));
                Some(TableEvent::SearchChanged(self.search_input.clone()))
            }
            TuiEvent::Backspace => {
                self.search_input.pop()?;
                Some(TableEvent::SearchChanged(self.search_input.clone()))
            }
            _ => None,
        }
    }
}

impl EventHandler for CustomerTableState {
    type Event = TableEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<TableEvent> {
        if self.searching {
            return self.handle_search_key(event);
        }

        match event {
            TuiEvent::InputChar('/') => {
                self.searching = true;
                None
            }
            TuiEvent::Escape if !self.search_input.is_empty() => {
                self.search_input.clear();
                Some(TableEvent::SearchChanged(String::new()))
            }
            TuiEvent::CursorUp => {
                if !self.row_ids.is_empty() {
                    let i = self.table_state.selected().unwrap_or(0).saturating_sub(1);
                    self.table_state.select(Some(i));
                }
                None
            }
            TuiEvent::CursorDown => {
                if !self.row_ids.is_empty() {
                    let i = self
                        .table_state
                        .selected()
                        .map_or(0, |i| (i + 1).min(self.row_ids.len() - 1));
                    self.table_state.select(Some(i));
                }
                None
            }
            TuiEvent::CursorRight | TuiEvent::PageDown | TuiEvent::InputChar(']') => {
                Some(TableEvent::NextPage)
            }
            TuiEvent::CursorLeft | TuiEvent::PageUp | TuiEvent::InputChar('[') => {
                Some(TableEvent::PreviousPage)
            }
            TuiEvent::InputChar('f') => Some(TableEvent::CycleFilter),
            TuiEvent::InputChar('s') => Some(TableEvent::CycleSort),
            TuiEvent::InputChar('a') => Some(TableEvent::Add),
            TuiEvent::Submit | TuiEvent::InputChar('v') => self.with_selected(TableEvent::View),
            TuiEvent::InputChar('e') => self.with_selected(TableEvent::Edit),
            TuiEvent::InputChar('d') => self.with_selected(TableEvent::Delete),
            TuiEvent::InputChar('q') => Some(TableEvent::Quit),
            _ => None,
        }
    }
}

pub(crate) fn status_style(status: CustomerStatus) -> Style {
    match status {
        CustomerStatus::Active => Style::default().fg(Color::Green),
        CustomerStatus::Prospect => Style::default().fg(Color::Blue),
        CustomerStatus::Inactive => Style::default().fg(Color::DarkGray),
    }
}

const STATUS_WIDTH: u16 = 8;
const VALUE_WIDTH: u16 = 12;
const DATE_WIDTH: u16 = 12;
const COLUMN_SPACING: u16 = 1;

/// Widths for name, company, email, phone; the fixed columns take the rest.
fn flexible_widths(total: u16) -> [u16; 4] {
    let fixed = STATUS_WIDTH + VALUE_WIDTH + DATE_WIDTH + COLUMN_SPACING * 6;
    let flex = total.saturating_sub(fixed);
    let name = flex * 25 / 100;
    let company = flex * 25 / 100;
    let email = flex * 30 / 100;
    let phone = flex.saturating_sub(name + company + email);
    [name, company, email, phone]
}

/// Transient render wrapper for the list screen.
pub struct CustomerTable<'a> {
    state: &'a mut CustomerTableState,
    page: &'a VisiblePage<'a>,
    query: &'a QuerySpec,
    /// Dimmed while a modal view sits on top.
    focused: bool,
}

impl<'a> CustomerTable<'a> {
    pub fn new(
        state: &'a mut CustomerTableState,
        page: &'a VisiblePage<'a>,
        query: &'a QuerySpec,
        focused: bool,
    ) -> Self {
        Self {
            state,
            page,
            query,
            focused,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [search_area, table_area, pager_area] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_search(frame, search_area);
        if self.page.total_matches == 0 {
            self.render_empty(frame, table_area);
        } else {
            self.render_rows(frame, table_area);
        }
        self.render_pager(frame, pager_area);
    }

    fn render_search(&self, frame: &mut Frame, area: Rect) {
        let border = if self.state.searching {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let filters = format!(
            " Status: {} | Sort: {} ",
            self.query.status.label(),
            self.query.sort_label()
        );
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .title(" Search ")
            .title_top(Line::from(filters).right_aligned());

        let text = if self.state.search_input.is_empty() && !self.state.searching {
            Line::from(Span::styled(
                "Search customers... (press /)",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(self.state.search_input.as_str())
        };
        frame.render_widget(Paragraph::new(text).block(block), area);

        if self.state.searching && self.focused {
            let x = area.x + 1 + self.state.search_input.width() as u16;
            frame.set_cursor_position(Position::new(
                x.min(area.right().saturating_sub(2)),
                area.y + 1,
            ));
        }
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let hint = if !self.query.search.is_empty() || self.query.status != StatusFilter::All {
            "Try adjusting your search or filters"
        } else {
            "Get started by adding your first customer (press a)"
        };
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No customers found",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
        ];
        let empty = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
        frame.render_widget(empty, area);
    }

    fn render_rows(&mut self, frame: &mut Frame, area: Rect) {
        let [name_w, company_w, email_w, phone_w] = flexible_widths(area.width.saturating_sub(2));
        let widths = [
            Constraint::Length(name_w),
            Constraint::Length(company_w),
            Constraint::Length(email_w),
            Constraint::Length(phone_w),
            Constraint::Length(STATUS_WIDTH),
            Constraint::Length(VALUE_WIDTH),
            Constraint::Length(DATE_WIDTH),
        ];

        let header = Row::new([
            "Customer",
            "Company",
            "Email",
            "Phone",
            "Status",
            "Value",
            "Last Contact",
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows = self.page.rows.iter().map(|c: &&Customer| {
            Row::new([
                Cell::from(truncate_str(&c.name, name_w as usize)),
                Cell::from(truncate_str(&c.company, company_w as usize)),
                Cell::from(truncate_str(&c.email, email_w as usize)),
                Cell::from(truncate_str(&c.phone, phone_w as usize)),
                Cell::from(Span::styled(c.status.label(), status_style(c.status))),
                Cell::from(Line::from(format_currency(c.value)).right_aligned()),
                Cell::from(format_date(c.last_contact)),
            ])
        });

        let highlight = if self.focused {
            Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().add_modifier(Modifier::BOLD)
        };
        let table = Table::new(rows, widths)
            .header(header)
            .column_spacing(COLUMN_SPACING)
            .row_highlight_style(highlight)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::DarkGray))
                    .title(" Customers "),
            );

        frame.render_stateful_widget(table, area, &mut self.state.table_state);
    }

    fn render_pager(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            self.page.range_label(),
            Style::default().fg(Color::Gray),
        )];

        if self.page.total_pages > 1 {
            let dim = Style::default().fg(Color::DarkGray);
            spans.push(Span::raw("   "));
            spans.push(Span::styled(
                "‹ Prev ",
                if self.page.has_previous() { Style::default() } else { dim },
            ));
            for link in page_window(self.page.page, self.page.total_pages) {
                match link {
                    PageLink::Page(n) if n == self.page.page => spans.push(Span::styled(
                        format!("[{n}]"),
                        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                    )),
                    PageLink::Page(n) => spans.push(Span::raw(format!(" {n} "))),
                    PageLink::Gap => spans.push(Span::styled(" … ", dim)),
                }
            }
            spans.push(Span::styled(
                " Next ›",
                if self.page.has_next() { Style::default() } else { dim },
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::query::compute_visible;
    use crate::test_support::{customer, test_app};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn state_with_rows(ids: &[&str]) -> CustomerTableState {
        let mut state = CustomerTableState::new();
        state.sync_rows(ids.iter().map(|s| s.to_string()).collect());
        state
    }

    fn render_text(records: &[Customer], query: &QuerySpec, state: &mut CustomerTableState) -> String {
        let backend = TestBackend::new(120, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        let page = compute_visible(records, query);
        terminal
            .draw(|f| {
                CustomerTable::new(state, &page, query, true).render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_sync_rows_selects_first_row() {
        let state = state_with_rows(&["5", "4", "1"]);
        assert_eq!(state.selected_id(), Some("5"));
    }

    #[test]
    fn test_sync_rows_follows_selected_customer() {
        let mut state = state_with_rows(&["5", "4", "1"]);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected_id(), Some("4"));

        state.sync_rows(vec!["1".into(), "4".into()]);
        assert_eq!(state.selected_id(), Some("4"));
    }

    #[test]
    fn test_sync_rows_clamps_when_selection_disappears() {
        let mut state = state_with_rows(&["5", "4", "1"]);
        state.handle_event(&TuiEvent::CursorDown);
        state.handle_event(&TuiEvent::CursorDown);
        assert_eq!(state.selected_id(), Some("1"));

        state.sync_rows(vec!["5".into()]);
        assert_eq!(state.selected_id(), Some("5"));

        state.sync_rows(Vec::new());
        assert_eq!(state.selected_id(), None);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut state = state_with_rows(&["1", "2"]);
        state.handle_event(&TuiEvent::CursorUp);
        assert_eq!(state.selected_id(), Some("1"));
        for _ in 0..5 {
            state.handle_event(&TuiEvent::CursorDown);
        }
        assert_eq!(state.selected_id(), Some("2"));
    }

    #[test]
    fn test_row_commands_carry_selected_id() {
        let mut state = state_with_rows(&["3", "7"]);
        state.handle_event(&TuiEvent::CursorDown);

        assert_eq!(
            state.handle_event(&TuiEvent::Submit),
            Some(TableEvent::View("7".to_string()))
        );
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('e')),
            Some(TableEvent::Edit("7".to_string()))
        );
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('d')),
            Some(TableEvent::Delete("7".to_string()))
        );
    }

    #[test]
    fn test_row_commands_need_a_row() {
        let mut state = state_with_rows(&[]);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('e')), None);
        assert_eq!(state.handle_event(&TuiEvent::Submit), None);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('a')), Some(TableEvent::Add));
    }

    #[test]
    fn test_search_mode_captures_letters() {
        let mut state = state_with_rows(&["1"]);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('/')), None);
        assert!(state.searching);

        // 'd' is text here, not delete
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('d')),
            Some(TableEvent::SearchChanged("d".to_string()))
        );
        assert_eq!(
            state.handle_event(&TuiEvent::Paste("av\nid".to_string())),
            Some(TableEvent::SearchChanged("david".to_string()))
        );
        assert_eq!(
            state.handle_event(&TuiEvent::Backspace),
            Some(TableEvent::SearchChanged("davi".to_string()))
        );

        state.handle_event(&TuiEvent::Submit);
        assert!(!state.searching);
        assert_eq!(state.search_input, "davi");
    }

    #[test]
    fn test_backspace_on_empty_search_is_silent() {
        let mut state = CustomerTableState::new();
        state.handle_event(&TuiEvent::InputChar('/'));
        assert_eq!(state.handle_event(&TuiEvent::Backspace), None);
    }

    #[test]
    fn test_escape_clears_search() {
        let mut state = CustomerTableState::new();
        state.search_input = "acme".to_string();
        assert_eq!(
            state.handle_event(&TuiEvent::Escape),
            Some(TableEvent::SearchChanged(String::new()))
        );
        assert!(state.search_input.is_empty());
        assert_eq!(state.handle_event(&TuiEvent::Escape), None);
    }

    #[test]
    fn test_paging_and_cycling_keys() {
        let mut state = CustomerTableState::new();
        assert_eq!(state.handle_event(&TuiEvent::PageDown), Some(TableEvent::NextPage));
        assert_eq!(state.handle_event(&TuiEvent::CursorLeft), Some(TableEvent::PreviousPage));
        assert_eq!(state.handle_event(&TuiEvent::InputChar('f')), Some(TableEvent::CycleFilter));
        assert_eq!(state.handle_event(&TuiEvent::InputChar('s')), Some(TableEvent::CycleSort));
        assert_eq!(state.handle_event(&TuiEvent::InputChar('q')), Some(TableEvent::Quit));
    }

    #[test]
    fn test_render_shows_rows_and_range() {
        let app = test_app();
        let mut state = CustomerTableState::new();
        let text = render_text(&app.customers, &app.query, &mut state);

        assert!(text.contains("David Wilson"));
        assert!(text.contains("Sarah Johnson"));
        assert!(text.contains("Showing 1 to 5 of 5 results"));
        assert!(text.contains("Sort: Name A-Z"));
        // Single page: no pager strip
        assert!(!text.contains("Next"));
    }

    #[test]
    fn test_render_pager_when_paginated() {
        let records: Vec<Customer> = (1..=25)
            .map(|i| customer(&i.to_string(), &format!("Customer {i:02}"), CustomerStatus::Active))
            .collect();
        let query = QuerySpec {
            page: 2,
            ..QuerySpec::default()
        };
        let mut state = CustomerTableState::new();
        let text = render_text(&records, &query, &mut state);

        assert!(text.contains("Showing 11 to 20 of 25 results"));
        assert!(text.contains("[2]"));
        assert!(text.contains("Next"));
    }

    #[test]
    fn test_render_empty_with_filters() {
        let app = test_app();
        let query = QuerySpec {
            search: "zzz".to_string(),
            ..QuerySpec::default()
        };
        let mut state = CustomerTableState::new();
        let text = render_text(&app.customers, &query, &mut state);

        assert!(text.contains("No customers found"));
        assert!(text.contains("Try adjusting your search or filters"));
        assert!(text.contains("0 results"));
    }

    #[test]
    fn test_render_empty_record_set() {
        let mut state = CustomerTableState::new();
        let text = render_text(&[], &QuerySpec::default(), &mut state);
        assert!(text.contains("Get started by adding your first customer"));
    }

    #[test]
    fn test_flexible_widths_fill_available_space() {
        let widths = flexible_widths(100);
        let fixed = STATUS_WIDTH + VALUE_WIDTH + DATE_WIDTH + COLUMN_SPACING * 6;
        assert_eq!(widths.iter().sum::<u16>(), 100 - fixed);
        assert_eq!(flexible_widths(10), [0, 0, 0, 0]);
    }
}
