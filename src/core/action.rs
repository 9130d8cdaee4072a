//! # Actions
//!
//! Everything that can happen in the CRM becomes an `Action`.
//! User presses `e` on a row? That's `Action::OpenEdit(id)`.
//! The store finishes a save? That's `Action::StoreCompleted(result)`.
//!
//! The `update()` function takes the current state and an action,
//! mutates it, and returns an `Effect` describing any I/O the adapter
//! must perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! ## Save and delete are two-phase
//!
//! `Save` / `ConfirmDelete` only mark the operation pending and return
//! `Effect::Persist`. The record set changes when the matching
//! `StoreCompleted(Ok(..))` arrives. A failed store call leaves the
//! record set untouched and keeps the user in the form they came from.

use log::{debug, info, warn};

use crate::core::model::Customer;
use crate::core::query::{SortDirection, SortKey, StatusFilter};
use crate::core::state::App;
use crate::core::validation::CustomerDraft;
use crate::core::view::ViewState;
use crate::store::{StoreError, StoreOutcome, StoreRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // Query
    SetSearch(String),
    SetStatusFilter(StatusFilter),
    CycleStatusFilter,
    SetSort(SortKey, SortDirection),
    CycleSort,
    GoToPage(usize),
    NextPage,
    PreviousPage,

    // View transitions
    OpenAdd,
    OpenEdit(String),
    OpenDetails(String),
    OpenDelete(String),
    Save(CustomerDraft),
    ConfirmDelete,
    Cancel,
    StoreCompleted(Result<StoreOutcome, StoreError>),

    Quit,
}

/// Side effects the adapter must carry out after `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Send this request to the store; report back with `StoreCompleted`.
    Persist(StoreRequest),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?} (view={}, busy={})", action, app.view.label(), app.is_busy());
    match action {
        Action::SetSearch(text) => {
            app.query.search = text;
            app.query.page = 1;
            Effect::None
        }
        Action::SetStatusFilter(filter) => {
            app.query.status = filter;
            app.query.page = 1;
            Effect::None
        }
        Action::CycleStatusFilter => {
            app.query.status = app.query.status.next();
            app.query.page = 1;
            app.status_message = format!("Filter: {}", app.query.status.label());
            Effect::None
        }
        Action::SetSort(key, direction) => {
            app.query.sort = key;
            app.query.direction = direction;
            app.query.page = 1;
            Effect::None
        }
        Action::CycleSort => {
            let preset = app.query.next_sort_preset();
            app.query.sort = preset.key;
            app.query.direction = preset.direction;
            app.query.page = 1;
            app.status_message = format!("Sort: {}", preset.label);
            Effect::None
        }
        Action::GoToPage(page) => {
            app.query.page = page;
            app.clamp_page();
            Effect::None
        }
        Action::NextPage => {
            app.query.page += 1;
            app.clamp_page();
            Effect::None
        }
        Action::PreviousPage => {
            app.query.page = app.query.page.saturating_sub(1);
            app.clamp_page();
            Effect::None
        }

        Action::OpenAdd => {
            if app.is_busy() || app.view.is_modal() {
                debug!("OpenAdd ignored in {} view", app.view.label());
                return Effect::None;
            }
            enter(app, ViewState::Add);
            Effect::None
        }
        Action::OpenEdit(id) => open_selected(app, &id, Target::Edit),
        Action::OpenDetails(id) => open_selected(app, &id, Target::Details),
        Action::OpenDelete(id) => open_selected(app, &id, Target::Delete),

        Action::Save(draft) => save(app, draft),
        Action::ConfirmDelete => {
            if app.is_busy() {
                debug!("ConfirmDelete ignored: store call already in flight");
                return Effect::None;
            }
            let ViewState::Delete(customer) = &app.view else {
                debug!("ConfirmDelete ignored in {} view", app.view.label());
                return Effect::None;
            };
            let request = StoreRequest::Delete(customer.id.clone());
            info!("Deleting customer {}", customer.id);
            app.status_message = format!("Deleting {}...", customer.name);
            begin(app, request)
        }
        Action::Cancel => {
            if app.is_busy() {
                debug!("Cancel ignored: store call already in flight");
                return Effect::None;
            }
            if app.view.is_modal() {
                info!("Leaving {} view", app.view.label());
                enter(app, ViewState::List);
            }
            Effect::None
        }
        Action::StoreCompleted(result) => complete(app, result),

        Action::Quit => Effect::Quit,
    }
}

fn enter(app: &mut App, view: ViewState) {
    app.view = view;
    app.form_errors.clear();
    app.error = None;
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Edit,
    Details,
    Delete,
}

impl Target {
    fn view(self, customer: Customer) -> ViewState {
        match self {
            Target::Edit => ViewState::Edit(customer),
            Target::Details => ViewState::Details(customer),
            Target::Delete => ViewState::Delete(customer),
        }
    }
}

/// List fans out to Edit/Details/Delete for an existing id; Details fans
/// out to Edit/Delete for its own customer.
fn open_selected(app: &mut App, id: &str, target: Target) -> Effect {
    if app.is_busy() {
        debug!("Open {id} ignored: store call already in flight");
        return Effect::None;
    }

    let allowed = match (&app.view, target) {
        (ViewState::List, _) => true,
        (ViewState::Details(current), Target::Edit | Target::Delete) => current.id == id,
        _ => false,
    };
    if !allowed {
        debug!("Open {target:?} {id} ignored in {} view", app.view.label());
        return Effect::None;
    }

    let Some(customer) = app.find(id).cloned() else {
        warn!("Selection refused: customer {id} does not exist");
        app.status_message = format!("Customer {id} not found");
        return Effect::None;
    };

    let next = target.view(customer);
    info!("Entering {} view for customer {id}", next.label());
    enter(app, next);
    Effect::None
}

fn save(app: &mut App, draft: CustomerDraft) -> Effect {
    if app.is_busy() {
        debug!("Save ignored: store call already in flight");
        return Effect::None;
    }
    if !matches!(app.view, ViewState::Add | ViewState::Edit(_)) {
        debug!("Save ignored in {} view", app.view.label());
        return Effect::None;
    }

    let fields = match draft.into_fields() {
        Ok(fields) => fields,
        Err(errors) => {
            debug!("Validation failed on {} field(s)", errors.len());
            app.status_message = match errors.len() {
                1 => "Please fix 1 field".to_string(),
                n => format!("Please fix {n} fields"),
            };
            app.form_errors = errors;
            return Effect::None;
        }
    };
    app.form_errors.clear();
    let today = app.today();

    let request = match &app.view {
        ViewState::Edit(original) => StoreRequest::Update(Customer {
            id: original.id.clone(),
            name: fields.name,
            email: fields.email,
            phone: fields.phone,
            company: fields.company,
            status: fields.status,
            value: fields.value,
            created_at: original.created_at,
            last_contact: today,
            avatar: fields.avatar,
        }),
        _ => {
            let id = app.ids.allocate(&app.customers);
            StoreRequest::Create(Customer {
                id,
                name: fields.name,
                email: fields.email,
                phone: fields.phone,
                company: fields.company,
                status: fields.status,
                value: fields.value,
                created_at: today,
                last_contact: today,
                avatar: fields.avatar,
            })
        }
    };

    info!("Saving customer ({})", request.label());
    app.status_message = "Saving...".to_string();
    begin(app, request)
}

fn begin(app: &mut App, request: StoreRequest) -> Effect {
    app.error = None;
    app.pending = Some(request.clone());
    Effect::Persist(request)
}

fn complete(app: &mut App, result: Result<StoreOutcome, StoreError>) -> Effect {
    let Some(request) = app.pending.take() else {
        warn!("Store completion arrived with nothing pending: {:?}", result);
        return Effect::None;
    };

    match result {
        Ok(outcome) => {
            apply(app, outcome);
            enter(app, ViewState::List);
            app.clamp_page();
        }
        Err(e) => {
            warn!("Store {} failed: {}", request.label(), e);
            app.status_message = format!("Could not {} customer", request.label());
            app.error = Some(e.to_string());
        }
    }
    Effect::None
}

fn apply(app: &mut App, outcome: StoreOutcome) {
    match outcome {
        StoreOutcome::Created(customer) => {
            info!("Customer {} added", customer.id);
            app.status_message = format!("Added {}", customer.name);
            app.customers.push(customer);
        }
        StoreOutcome::Updated(customer) => {
            match app.customers.iter_mut().find(|c| c.id == customer.id) {
                Some(slot) => {
                    info!("Customer {} updated", customer.id);
                    app.status_message = format!("Updated {}", customer.name);
                    *slot = customer;
                }
                None => {
                    warn!("Updated customer {} is no longer in the record set", customer.id);
                    app.status_message =
                        format!("{} was removed before the update landed", customer.name);
                }
            }
        }
        StoreOutcome::Deleted(id) => {
            info!("Customer {id} deleted");
            app.customers.retain(|c| c.id != id);
            app.status_message = "Customer deleted".to_string();
        }
    }
}
