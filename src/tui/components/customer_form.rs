//! # Customer Form Component
//!
//! Add/Edit overlay. The form owns only the draft being typed; validation
//! results (`App::form_errors`) and store failures (`App::error`) arrive as
//! props, since deciding whether a save goes through is the coordinator's
//! job.
//!
//! An inline error disappears as soon as the user edits that field, and
//! comes back on the next submit if it still applies.

use std::collections::BTreeSet;

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Padding, Paragraph};
use unicode_width::UnicodeWidthStr;

use super::centered_rect;
use super::customer_table::status_style;
use crate::core::format::format_date;
use crate::core::model::Customer;
use crate::core::validation::{CustomerDraft, Field, FieldErrors};
use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Company,
    Avatar,
    Status,
    Value,
}

/// Tab order.
const FIELDS: [FormField; 7] = [
    FormField::Name,
    FormField::Email,
    FormField::Phone,
    FormField::Company,
    FormField::Avatar,
    FormField::Status,
    FormField::Value,
];

impl FormField {
    fn label(self) -> &'static str {
        match self {
            FormField::Name => "Full Name *",
            FormField::Email => "Email Address *",
            FormField::Phone => "Phone Number *",
            FormField::Company => "Company *",
            FormField::Avatar => "Avatar URL",
            FormField::Status => "Status",
            FormField::Value => "Customer Value ($) *",
        }
    }

    fn placeholder(self) -> &'static str {
        match self {
            FormField::Name => "Enter full name",
            FormField::Email => "Enter email address",
            FormField::Phone => "Enter phone number",
            FormField::Company => "Enter company name",
            FormField::Avatar => "https://example.com/avatar.jpg",
            FormField::Status => "",
            FormField::Value => "0",
        }
    }

    /// The validated field this input feeds, if any.
    fn validated(self) -> Option<Field> {
        match self {
            FormField::Name => Some(Field::Name),
            FormField::Email => Some(Field::Email),
            FormField::Phone => Some(Field::Phone),
            FormField::Company => Some(Field::Company),
            FormField::Value => Some(Field::Value),
            FormField::Avatar | FormField::Status => None,
        }
    }

    fn index(self) -> usize {
        FIELDS.iter().position(|f| *f == self).unwrap_or(0)
    }

    fn next(self) -> FormField {
        FIELDS[(self.index() + 1) % FIELDS.len()]
    }

    fn previous(self) -> FormField {
        FIELDS[(self.index() + FIELDS.len() - 1) % FIELDS.len()]
    }
}

/// Persistent state for the Add/Edit overlay.
#[derive(Debug, Clone)]
pub struct CustomerFormState {
    pub draft: CustomerDraft,
    pub focus: FormField,
    /// Id of the customer being edited; `None` when adding.
    pub editing: Option<String>,
    /// Fields typed into since the last submit.
    edited: BTreeSet<Field>,
}

/// Events emitted by the form.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    Submit(CustomerDraft),
    Cancel,
}

impl CustomerFormState {
    pub fn new_add() -> Self {
        Self {
            draft: CustomerDraft::default(),
            focus: FormField::Name,
            editing: None,
            edited: BTreeSet::new(),
        }
    }

    pub fn edit(customer: &Customer) -> Self {
        Self {
            draft: CustomerDraft::from_customer(customer),
            focus: FormField::Name,
            editing: Some(customer.id.clone()),
            edited: BTreeSet::new(),
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.draft.name),
            FormField::Email => Some(&mut self.draft.email),
            FormField::Phone => Some(&mut self.draft.phone),
            FormField::Company => Some(&mut self.draft.company),
            FormField::Avatar => Some(&mut self.draft.avatar),
            FormField::Value => Some(&mut self.draft.value),
            FormField::Status => None,
        }
    }

    fn text(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.draft.name,
            FormField::Email => &self.draft.email,
            FormField::Phone => &self.draft.phone,
            FormField::Company => &self.draft.company,
            FormField::Avatar => &self.draft.avatar,
            FormField::Value => &self.draft.value,
            FormField::Status => self.draft.status.label(),
        }
    }

    fn mark_edited(&mut self) {
        if let Some(field) = self.focus.validated() {
            self.edited.insert(field);
        }
    }

    /// The error to show under `field`, unless the user has touched it since.
    fn visible_error<'e>(&self, field: FormField, errors: &'e FieldErrors) -> Option<&'e str> {
        let field = field.validated()?;
        if self.edited.contains(&field) {
            return None;
        }
        errors.get(&field).map(String::as_str)
    }
}

impl EventHandler for CustomerFormState {
    type Event = FormEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<FormEvent> {
        match event {
            TuiEvent::Escape => return Some(FormEvent::Cancel),
            TuiEvent::Submit => {
                self.edited.clear();
                return Some(FormEvent::Submit(self.draft.clone()));
            }
            TuiEvent::NextField | TuiEvent::CursorDown => {
                self.focus = self.focus.next();
                return None;
            }
            TuiEvent::PrevField | TuiEvent::CursorUp => {
                self.focus = self.focus.previous();
                return None;
            }
            _ => {}
        }

        if self.focus == FormField::Status {
            match event {
                TuiEvent::InputChar(' ') | TuiEvent::CursorRight => {
                    self.draft.status = self.draft.status.next();
                }
                TuiEvent::CursorLeft => {
                    // Three states, so two steps forward is one step back
                    self.draft.status = self.draft.status.next().next();
                }
                _ => {}
            }
            return None;
        }

        let focus = self.focus;
        let text = self.text_mut(focus)?;
        let changed = match event {
            TuiEvent::InputChar(c) => {
                text.push(*c);
                true
            }
            TuiEvent::Paste(pasted) => {
                text.extend(pasted.chars().filter(|c| !c.is_control()));
                true
            }
            TuiEvent::Backspace => text.pop().is_some(),
            _ => false,
        };
        if changed {
            self.mark_edited();
        }
        None
    }
}

/// Transient render wrapper for the Add/Edit overlay.
pub struct CustomerForm<'a> {
    state: &'a CustomerFormState,
    errors: &'a FieldErrors,
    /// The record being edited, for the created/last-contact header.
    subject: Option<&'a Customer>,
    busy: bool,
    store_error: Option<&'a str>,
}

impl<'a> CustomerForm<'a> {
    pub fn new(
        state: &'a CustomerFormState,
        errors: &'a FieldErrors,
        subject: Option<&'a Customer>,
        busy: bool,
        store_error: Option<&'a str>,
    ) -> Self {
        Self {
            state,
            errors,
            subject,
            busy,
            store_error,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_rect(70, 90, area);
        frame.render_widget(Clear, overlay);

        let title = if self.state.editing.is_some() {
            " Edit Customer "
        } else {
            " Add New Customer "
        };
        let help = if self.busy {
            " Saving... "
        } else if self.state.focus == FormField::Status {
            " Space Change status  Tab Next  Enter Save  Esc Cancel "
        } else {
            " Tab Next  Shift+Tab Back  Enter Save  Esc Cancel "
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(title)
            .title_bottom(Line::from(help).centered())
            .padding(Padding::horizontal(1));
        let inner = block.inner(overlay);

        let mut lines: Vec<Line> = Vec::new();
        if let Some(customer) = self.subject {
            lines.push(Line::from(Span::styled(
                format!(
                    "Created: {}   Last Contact: {}",
                    format_date(customer.created_at),
                    format_date(customer.last_contact)
                ),
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::from(""));
        }

        let mut cursor: Option<Position> = None;
        for field in FIELDS {
            let focused = field == self.state.focus;
            let label_style = if focused {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            let marker = if focused { "> " } else { "  " };
            lines.push(Line::from(vec![
                Span::styled(marker, label_style),
                Span::styled(field.label(), label_style),
            ]));

            let value = self.state.text(field);
            let value_line = if field == FormField::Status {
                Line::from(vec![
                    Span::raw("  ‹ "),
                    Span::styled(value, status_style(self.state.draft.status)),
                    Span::raw(" ›"),
                ])
            } else if value.is_empty() {
                Line::from(vec![
                    Span::raw("  "),
                    Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray)),
                ])
            } else {
                Line::from(format!("  {value}"))
            };
            if focused && field != FormField::Status && !self.busy {
                let x = inner.x + 2 + value.width() as u16;
                cursor = Some(Position::new(
                    x.min(inner.right().saturating_sub(1)),
                    inner.y + lines.len() as u16,
                ));
            }
            lines.push(value_line);

            if let Some(message) = self.state.visible_error(field, self.errors) {
                lines.push(Line::from(Span::styled(
                    format!("  {message}"),
                    Style::default().fg(Color::Red),
                )));
            }
        }

        if let Some(message) = self.store_error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Could not save: {message}"),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )));
        }

        frame.render_widget(Paragraph::new(lines).block(block), overlay);

        if let Some(position) = cursor
            && position.y < inner.bottom()
        {
            frame.set_cursor_position(position);
        }
    }
}
