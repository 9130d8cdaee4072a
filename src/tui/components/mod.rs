//! # TUI Components
//!
//! All widgets for the terminal interface.
//!
//! ## Component Architecture
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: top status bar with record count, status and busy spinner
//!
//! ### Stateful Components (persistent state + transient wrapper)
//!
//! The state struct lives in `TuiState` across frames; the wrapper is built
//! each frame with borrowed state and borrowed App data as props.
//!
//! - `CustomerTableState` / `CustomerTable`: search box, table, pager
//! - `CustomerFormState` / `CustomerForm`: Add/Edit overlay
//! - `DetailsState` / `CustomerDetails`: read-only profile overlay
//! - `DeleteConfirm`: confirmation overlay (no state of its own)
//!
//! Each file holds the state type, its event type, rendering, event
//! handling and tests.
//!
//! ```text
//! components/
//! ├── mod.rs               (this file, shared layout helpers)
//! ├── title_bar.rs
//! ├── customer_table.rs
//! ├── customer_form.rs
//! ├── customer_details.rs
//! └── delete_confirm.rs
//! ```

use ratatui::layout::{Constraint, Layout, Rect};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub mod customer_details;
pub mod customer_form;
pub mod customer_table;
pub mod delete_confirm;
mod title_bar;

pub use customer_details::{CustomerDetails, DetailsEvent, DetailsState};
pub use customer_form::{CustomerForm, CustomerFormState, FormEvent};
pub use customer_table::{CustomerTable, CustomerTableState, TableEvent};
pub use delete_confirm::{ConfirmEvent, DeleteConfirm};
pub use title_bar::TitleBar;

/// Truncate a string to fit within `max_width` columns, adding "..." if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let budget = max_width - 3;
    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str("...");
    out
}

/// Compute a centered rect using percentage of the outer rect.
pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
