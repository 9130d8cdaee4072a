//! # Customer Details Component
//!
//! Read-only profile overlay: contact info, a deals overview, the most
//! recent activities and the customer's deals. Content can outgrow the
//! overlay, so it renders into a `ScrollView`.

use ratatui::Frame;
use ratatui::layout::{Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use super::centered_rect;
use super::customer_table::status_style;
use crate::core::format::{format_currency, format_date, format_timestamp};
use crate::core::insights::{RECENT_ACTIVITY_LIMIT, customer_deals, deal_stats, recent_activities};
use crate::core::model::{Activity, ActivityKind, Customer, Deal};
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

#[derive(Debug, Default)]
pub struct DetailsState {
    pub scroll_state: ScrollViewState,
}

/// Events emitted by the details overlay. The subject is whatever
/// customer the view is showing, so no id travels with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailsEvent {
    Edit,
    Delete,
    Close,
}

impl EventHandler for DetailsState {
    type Event = DetailsEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<DetailsEvent> {
        match event {
            TuiEvent::InputChar('e') => Some(DetailsEvent::Edit),
            TuiEvent::InputChar('d') => Some(DetailsEvent::Delete),
            TuiEvent::Escape | TuiEvent::InputChar('q') => Some(DetailsEvent::Close),
            TuiEvent::CursorUp => {
                self.scroll_state.scroll_up();
                None
            }
            TuiEvent::CursorDown => {
                self.scroll_state.scroll_down();
                None
            }
            TuiEvent::PageUp => {
                self.scroll_state.scroll_page_up();
                None
            }
            TuiEvent::PageDown => {
                self.scroll_state.scroll_page_down();
                None
            }
            _ => None,
        }
    }
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<14}"), Style::default().fg(Color::Gray)),
        Span::raw(value),
    ])
}

fn activity_style(kind: ActivityKind) -> Style {
    match kind {
        ActivityKind::DealWon => Style::default().fg(Color::Green),
        ActivityKind::DealLost => Style::default().fg(Color::Red),
        ActivityKind::Meeting => Style::default().fg(Color::Magenta),
        _ => Style::default().fg(Color::Blue),
    }
}

/// Transient render wrapper for the details overlay.
pub struct CustomerDetails<'a> {
    state: &'a mut DetailsState,
    customer: &'a Customer,
    deals: &'a [Deal],
    activities: &'a [Activity],
}

impl<'a> CustomerDetails<'a> {
    pub fn new(
        state: &'a mut DetailsState,
        customer: &'a Customer,
        deals: &'a [Deal],
        activities: &'a [Activity],
    ) -> Self {
        Self {
            state,
            customer,
            deals,
            activities,
        }
    }

    /// Every line of the profile, wrapped to `width` columns.
    fn content_lines(&self, width: usize) -> Vec<Line<'static>> {
        let c = self.customer;
        let mut lines = vec![
            Line::from(vec![
                Span::styled(
                    format!("({}) ", c.initials()),
                    Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
                ),
                Span::styled(c.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(c.status.label(), status_style(c.status)),
            ]),
            Line::from(Span::styled(c.company.clone(), Style::default().fg(Color::Gray))),
            Line::from(""),
            heading("Contact Information"),
            field("Email", c.email.clone()),
            field("Phone", c.phone.clone()),
            field("Company", c.company.clone()),
            field("Value", format_currency(c.value)),
            field("Created", format_date(c.created_at)),
            field("Last Contact", format_date(c.last_contact)),
        ];
        if let Some(avatar) = &c.avatar {
            lines.push(field("Avatar", avatar.clone()));
        }

        let stats = deal_stats(&c.id, self.deals);
        lines.push(Line::from(""));
        lines.push(heading("Deals Overview"));
        lines.push(field("Total Deals", stats.total.to_string()));
        lines.push(field("Won Deals", stats.won.to_string()));
        lines.push(field("Active Deals", stats.active.to_string()));
        lines.push(field("Total Value", format_currency(stats.total_value)));

        lines.push(Line::from(""));
        lines.push(heading("Recent Activity"));
        let recent = recent_activities(&c.id, self.activities, RECENT_ACTIVITY_LIMIT);
        if recent.is_empty() {
            lines.push(Line::from(Span::styled(
                "No Recent Activity",
                Style::default().fg(Color::DarkGray),
            )));
        }
        let wrap = textwrap::Options::new(width.saturating_sub(2).max(1))
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        for activity in recent {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("[{}] ", activity.kind.label()),
                    activity_style(activity.kind),
                ),
                Span::styled(activity.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ]));
            for row in textwrap::wrap(&activity.description, &wrap) {
                lines.push(Line::from(format!("  {row}")));
            }
            let deal_title = activity
                .deal_id
                .as_deref()
                .and_then(|id| self.deals.iter().find(|d| d.id == id))
                .map(|d| format!(" · Deal: {}", d.title))
                .unwrap_or_default();
            lines.push(Line::from(Span::styled(
                format!(
                    "  {} · {}{}",
                    format_timestamp(activity.created_at),
                    activity.assigned_to,
                    deal_title
                ),
                Style::default().fg(Color::DarkGray),
            )));
        }

        let deals = customer_deals(&c.id, self.deals);
        if !deals.is_empty() {
            lines.push(Line::from(""));
            lines.push(heading("Associated Deals"));
            for deal in deals {
                lines.push(Line::from(vec![
                    Span::styled(deal.title.clone(), Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(format!("  {}", format_currency(deal.value))),
                    Span::styled(
                        format!("  {}", deal.stage.label()),
                        Style::default().fg(Color::Yellow),
                    ),
                ]));
                lines.push(Line::from(Span::styled(
                    format!(
                        "  Probability: {}% · Expected Close: {}",
                        deal.probability,
                        format_date(deal.expected_close_date)
                    ),
                    Style::default().fg(Color::DarkGray),
                )));
            }
        }

        lines
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 85, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Customer Details ")
            .title_bottom(Line::from(" e Edit  d Delete  ↑↓ Scroll  Esc Close ").centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        // One column for the scrollbar
        let content_width = inner.width.saturating_sub(1);
        let lines = self.content_lines(content_width as usize);
        let height = lines.len() as u16;

        let mut scroll_view = ScrollView::new(Size::new(content_width, height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);
        scroll_view.render_widget(Paragraph::new(lines), Rect::new(0, 0, content_width, height));
        frame.render_stateful_widget(scroll_view, inner, &mut self.state.scroll_state);
    }
}
