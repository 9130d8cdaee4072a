use crate::core::state::App;
use crate::core::view::ViewState;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{CustomerDetails, CustomerForm, CustomerTable, DeleteConfirm, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// Key hints for the bottom bar.
fn help_text(app: &App, tui: &TuiState) -> &'static str {
    match &app.view {
        ViewState::List if tui.table.searching => "Type to search  Enter/Esc Done",
        ViewState::List => {
            "/ Search  f Filter  s Sort  ←→ Page  a Add  Enter View  e Edit  d Delete  q Quit"
        }
        ViewState::Add | ViewState::Edit(_) => "Tab Next field  Enter Save  Esc Cancel",
        ViewState::Details(_) => "e Edit  d Delete  Esc Back",
        ViewState::Delete(_) => "y Confirm  n Cancel",
    }
}

fn draw_help(frame: &mut Frame, area: Rect, app: &App, tui: &TuiState) {
    let line = match (&app.error, app.view.is_modal()) {
        // Modal views show the error inside the overlay
        (Some(error), false) => Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        )),
        _ => Line::from(Span::styled(
            help_text(app, tui),
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(line, area);
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Min(0), Length(1)]);
    let [title_area, main_area, help_area] = layout.areas(frame.area());

    let mut title_bar = TitleBar::new(app.customers.len(), app.status_message.clone());
    title_bar.pending = app.pending.as_ref().map(|request| request.label());
    title_bar.spinner_frame = spinner_frame;
    title_bar.render(frame, title_area);

    // The list stays visible behind every overlay
    let page = app.visible();
    CustomerTable::new(&mut tui.table, &page, &app.query, !app.view.is_modal())
        .render(frame, main_area);

    let busy = app.is_busy();
    let store_error = app.error.as_deref();
    match &app.view {
        ViewState::List => {}
        ViewState::Add | ViewState::Edit(_) => {
            if let Some(form) = &tui.form {
                CustomerForm::new(form, &app.form_errors, app.view.selected(), busy, store_error)
                    .render(frame, main_area);
            }
        }
        ViewState::Details(customer) => {
            CustomerDetails::new(&mut tui.details, customer, &app.deals, &app.activities)
                .render(frame, main_area);
        }
        ViewState::Delete(customer) => {
            DeleteConfirm {
                customer,
                busy,
                store_error,
            }
            .render(frame, main_area);
        }
    }

    draw_help(frame, help_area, app, tui);
}
