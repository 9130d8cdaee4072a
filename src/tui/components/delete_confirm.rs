//! # Delete Confirmation Component
//!
//! Small overlay asking the user to confirm removing a customer. Holds no
//! state: the subject comes from `ViewState::Delete`, the busy flag and
//! any store error from `App`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap};

use super::centered_rect;
use super::customer_table::status_style;
use crate::core::format::format_currency;
use crate::core::model::Customer;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmEvent {
    Confirm,
    Cancel,
}

/// Map a key to a confirmation decision.
pub fn handle_confirm_event(event: &TuiEvent) -> Option<ConfirmEvent> {
    match event {
        TuiEvent::InputChar('y') | TuiEvent::InputChar('Y') | TuiEvent::Submit => {
            Some(ConfirmEvent::Confirm)
        }
        TuiEvent::InputChar('n') | TuiEvent::InputChar('N') | TuiEvent::Escape => {
            Some(ConfirmEvent::Cancel)
        }
        _ => None,
    }
}

pub struct DeleteConfirm<'a> {
    pub customer: &'a Customer,
    pub busy: bool,
    pub store_error: Option<&'a str>,
}

impl DeleteConfirm<'_> {
    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(60, 50, area);
        frame.render_widget(Clear, overlay);

        let help = if self.busy {
            " Deleting... "
        } else {
            " y Delete Customer  n Cancel "
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red))
            .title(" Delete Customer ")
            .title_bottom(Line::from(help).centered())
            .padding(Padding::horizontal(1));

        let c = self.customer;
        let mut lines = vec![
            Line::from(
                "Are you sure you want to delete this customer? This action cannot be undone.",
            ),
            Line::from(""),
            Line::from(vec![
                Span::styled(c.name.as_str(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(c.status.label(), status_style(c.status)),
                Span::raw(format!("  {}", format_currency(c.value))),
            ]),
            Line::from(Span::styled(c.company.as_str(), Style::default().fg(Color::Gray))),
            Line::from(Span::styled(c.email.as_str(), Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(Span::styled(
                "Warning: associated deals and activities will lose their customer reference.",
                Style::default().fg(Color::Yellow),
            )),
        ];
        if let Some(message) = self.store_error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Could not delete: {message}"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }

        let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(block);
        frame.render_widget(paragraph, overlay);
    }
}
