//! # TitleBar Component
//!
//! Single-line status bar at the top of the screen.
//!
//! Stateless: every field is a prop copied from `App` each frame. The text
//! is built in priority order so the important part survives narrow
//! terminals:
//!
//! 1. **Busy**: `"CRM | 5 customers | ⠋ Saving customer..."`
//! 2. **Status message**: `"CRM | 5 customers | Customer added"`
//! 3. **Default**: `"CRM | 5 customers"`

use crate::tui::component::Component;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct TitleBar {
    pub customer_count: usize,
    pub status_message: String,
    /// Label of the store call in flight, if any ("create", "delete", ...)
    pub pending: Option<&'static str>,
    pub spinner_frame: usize,
}

impl TitleBar {
    pub fn new(customer_count: usize, status_message: String) -> Self {
        Self {
            customer_count,
            status_message,
            pending: None,
            spinner_frame: 0,
        }
    }
}

fn pending_text(label: &str) -> &'static str {
    match label {
        "delete" => "Deleting customer...",
        _ => "Saving customer...",
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let noun = if self.customer_count == 1 { "customer" } else { "customers" };
        let mut spans = vec![
            Span::styled("CRM", Style::default().fg(Color::Cyan)),
            Span::raw(format!(" | {} {}", self.customer_count, noun)),
        ];

        if let Some(label) = self.pending {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("{} {}", spinner, pending_text(label)),
                Style::default().fg(Color::Yellow),
            ));
        } else if !self.status_message.is_empty() {
            spans.push(Span::raw(format!(" | {}", self.status_message)));
        }

        frame.render_widget(Line::from(spans), area);
    }
}
