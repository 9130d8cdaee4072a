use chrono::NaiveDate;
use crm::core::action::{Action, Effect, update};
use crm::core::ids::IdPolicy;
use crm::core::model::CustomerStatus;
use crm::core::seed;
use crm::core::state::App;
use crm::core::validation::{CustomerDraft, Field};
use crm::core::view::ViewState;
use crm::store::{self, CustomerStore, SimulatedStore, StoreError, StoreRequest};
use std::sync::{Arc, mpsc};
use std::time::Duration;

// ============================================================================
// Helper Functions
// ============================================================================

const TIMEOUT: Duration = Duration::from_secs(1);

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

/// Bundled seed data with the given page size and a fixed clock.
fn create_test_app(page_size: usize) -> App {
    let dataset = seed::bundled().unwrap();
    App::new(dataset, page_size, IdPolicy::Sequential).with_clock(today)
}

fn valid_draft(name: &str) -> CustomerDraft {
    CustomerDraft {
        name: name.to_string(),
        email: "  Ann@Lee.IO ".to_string(),
        phone: "+1 (555) 123-4567".to_string(),
        company: "Lee & Co".to_string(),
        status: CustomerStatus::Active,
        value: "1200.50".to_string(),
        avatar: String::new(),
    }
}

/// Apply `action`, carrying out any store request to completion the way
/// the TUI event loop does.
async fn drive(app: &mut App, store: &dyn CustomerStore, action: Action) -> Effect {
    let mut effect = update(app, action);
    while let Effect::Persist(request) = effect {
        let result = store::execute(store, request, TIMEOUT).await;
        effect = update(app, Action::StoreCompleted(result));
    }
    effect
}

/// Wait for the next action a background task sends.
async fn next_action(rx: &mpsc::Receiver<Action>) -> Action {
    for _ in 0..200 {
        if let Ok(action) = rx.try_recv() {
            return action;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("no action arrived from the store task");
}

// ============================================================================
// Add / Edit / Delete flows
// ============================================================================

#[tokio::test]
async fn test_add_flow_appends_normalized_customer() {
    let mut app = create_test_app(10);
    let store = SimulatedStore::new(Duration::ZERO);

    drive(&mut app, &store, Action::OpenAdd).await;
    assert_eq!(app.view, ViewState::Add);

    let effect = drive(&mut app, &store, Action::Save(valid_draft(" Ann Lee "))).await;
    assert_eq!(effect, Effect::None);
    assert_eq!(app.view, ViewState::List);
    assert!(!app.is_busy());
    assert_eq!(app.customers.len(), 6);

    let added = app.find("6").unwrap();
    assert_eq!(added.name, "Ann Lee");
    assert_eq!(added.email, "ann@lee.io");
    assert_eq!(added.value, 1200.5);
    assert_eq!(added.created_at, today());
    assert_eq!(added.last_contact, today());
    assert_eq!(added.avatar, None);
}

#[tokio::test]
async fn test_edit_flow_replaces_in_place_and_refreshes_last_contact() {
    let mut app = create_test_app(10);
    let store = SimulatedStore::new(Duration::ZERO);
    let original = app.find("1").unwrap().clone();

    drive(&mut app, &store, Action::OpenDetails("1".to_string())).await;
    drive(&mut app, &store, Action::OpenEdit("1".to_string())).await;
    assert!(matches!(&app.view, ViewState::Edit(c) if c.id == "1"));

    let mut draft = CustomerDraft::from_customer(&original);
    draft.company = "Smith Holdings".to_string();
    drive(&mut app, &store, Action::Save(draft)).await;

    assert_eq!(app.view, ViewState::List);
    assert_eq!(app.customers.len(), 5);
    let position = app.customers.iter().position(|c| c.id == "1").unwrap();
    let position_before = create_test_app(10)
        .customers
        .iter()
        .position(|c| c.id == "1")
        .unwrap();
    assert_eq!(position, position_before);

    let edited = &app.customers[position];
    assert_eq!(edited.company, "Smith Holdings");
    assert_eq!(edited.created_at, original.created_at);
    assert_eq!(edited.last_contact, today());
}

#[tokio::test]
async fn test_delete_flow_removes_customer() {
    let mut app = create_test_app(10);
    let store = SimulatedStore::new(Duration::ZERO);

    drive(&mut app, &store, Action::OpenDelete("3".to_string())).await;
    drive(&mut app, &store, Action::ConfirmDelete).await;

    assert_eq!(app.view, ViewState::List);
    assert!(app.find("3").is_none());
    assert_eq!(app.customers.len(), 4);
    assert_eq!(app.visible().range_label(), "Showing 1 to 4 of 4 results");
}

#[tokio::test]
async fn test_ids_are_not_reused_after_deleting_the_highest() {
    let mut app = create_test_app(10);
    let store = SimulatedStore::new(Duration::ZERO);

    drive(&mut app, &store, Action::OpenDelete("5".to_string())).await;
    drive(&mut app, &store, Action::ConfirmDelete).await;
    assert!(app.find("5").is_none());

    drive(&mut app, &store, Action::OpenAdd).await;
    drive(&mut app, &store, Action::Save(valid_draft("Ann Lee"))).await;

    assert!(app.find("5").is_none());
    assert_eq!(app.find("6").unwrap().name, "Ann Lee");
}

#[tokio::test]
async fn test_invalid_save_never_reaches_the_store() {
    let mut app = create_test_app(10);
    let store = SimulatedStore::failing(
        Duration::ZERO,
        StoreError::Unavailable("must not be called".to_string()),
    );

    drive(&mut app, &store, Action::OpenAdd).await;
    let mut draft = valid_draft("A");
    draft.value = "-5".to_string();
    let effect = drive(&mut app, &store, Action::Save(draft)).await;

    assert_eq!(effect, Effect::None);
    assert_eq!(app.view, ViewState::Add);
    assert!(app.error.is_none());
    assert_eq!(
        app.form_errors.get(&Field::Name).map(String::as_str),
        Some("Name must be at least 2 characters")
    );
    assert_eq!(
        app.form_errors.get(&Field::Value).map(String::as_str),
        Some("Please enter a valid positive number")
    );
}

// ============================================================================
// Store failures and the busy flag
// ============================================================================

#[tokio::test]
async fn test_failed_save_keeps_form_and_records() {
    let mut app = create_test_app(10);
    let store = SimulatedStore::failing(
        Duration::ZERO,
        StoreError::Unavailable("offline".to_string()),
    );
    let before = app.customers.clone();

    drive(&mut app, &store, Action::OpenEdit("2".to_string())).await;
    let mut draft = CustomerDraft::from_customer(app.find("2").unwrap());
    draft.name = "Sarah Connor".to_string();
    drive(&mut app, &store, Action::Save(draft)).await;

    assert!(matches!(&app.view, ViewState::Edit(c) if c.id == "2"));
    assert!(!app.is_busy());
    assert_eq!(app.customers, before);
    assert_eq!(app.error.as_deref(), Some("store unavailable: offline"));

    // The user can still back out
    drive(&mut app, &store, Action::Cancel).await;
    assert_eq!(app.view, ViewState::List);
    assert!(app.error.is_none());
}

#[tokio::test]
async fn test_store_timeout_keeps_delete_view() {
    let mut app = create_test_app(10);
    let slow = SimulatedStore::new(Duration::from_secs(5));

    update(&mut app, Action::OpenDelete("4".to_string()));
    let Effect::Persist(request) = update(&mut app, Action::ConfirmDelete) else {
        panic!("confirm should request a delete");
    };
    let result = store::execute(&slow, request, Duration::from_millis(10)).await;
    update(&mut app, Action::StoreCompleted(result));

    assert!(matches!(&app.view, ViewState::Delete(c) if c.id == "4"));
    assert!(app.find("4").is_some());
    assert!(app.error.as_deref().unwrap().contains("timed out"));
}

#[tokio::test]
async fn test_busy_flag_blocks_until_completion() {
    let mut app = create_test_app(10);
    let store = SimulatedStore::new(Duration::ZERO);

    update(&mut app, Action::OpenAdd);
    let effect = update(&mut app, Action::Save(valid_draft("Ann Lee")));
    let Effect::Persist(request) = effect else {
        panic!("valid save should persist");
    };
    assert!(matches!(&request, StoreRequest::Create(c) if c.id == "6"));
    assert!(app.is_busy());

    // Everything that would change the view or start another call is refused
    assert_eq!(update(&mut app, Action::Save(valid_draft("Bo Diaz"))), Effect::None);
    assert_eq!(update(&mut app, Action::Cancel), Effect::None);
    assert_eq!(update(&mut app, Action::OpenDetails("1".to_string())), Effect::None);
    assert_eq!(app.view, ViewState::Add);

    let result = store::execute(&store, request, TIMEOUT).await;
    update(&mut app, Action::StoreCompleted(result));
    assert!(!app.is_busy());
    assert_eq!(app.view, ViewState::List);
    assert_eq!(app.customers.len(), 6);
}

// ============================================================================
// Query pipeline across mutations
// ============================================================================

#[tokio::test]
async fn test_deleting_last_row_of_last_page_clamps_page() {
    let mut app = create_test_app(2);
    let store = SimulatedStore::new(Duration::ZERO);

    update(&mut app, Action::GoToPage(3));
    let page = app.visible();
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.rows.len(), 1);
    let last_id = page.rows[0].id.clone();

    drive(&mut app, &store, Action::OpenDelete(last_id)).await;
    drive(&mut app, &store, Action::ConfirmDelete).await;

    assert_eq!(app.query.page, 2);
    let page = app.visible();
    assert_eq!(page.total_pages, 2);
    assert_eq!(page.rows.len(), 2);
}

#[tokio::test]
async fn test_search_resets_page_and_survives_add() {
    let mut app = create_test_app(2);
    let store = SimulatedStore::new(Duration::ZERO);

    update(&mut app, Action::NextPage);
    assert_eq!(app.query.page, 2);
    update(&mut app, Action::SetSearch("lee".to_string()));
    assert_eq!(app.query.page, 1);
    assert_eq!(app.visible().total_matches, 0);
    assert_eq!(app.visible().total_pages, 0);

    drive(&mut app, &store, Action::OpenAdd).await;
    drive(&mut app, &store, Action::Save(valid_draft("Ann Lee"))).await;

    let page = app.visible();
    assert_eq!(page.total_matches, 1);
    assert_eq!(page.rows[0].name, "Ann Lee");
}

// ============================================================================
// Background task plumbing
// ============================================================================

#[tokio::test]
async fn test_spawned_store_call_reports_back_over_channel() {
    let mut app = create_test_app(10);
    let store: Arc<dyn CustomerStore> = Arc::new(SimulatedStore::new(Duration::from_millis(20)));
    let (tx, rx) = mpsc::channel();

    update(&mut app, Action::OpenDelete("1".to_string()));
    let Effect::Persist(request) = update(&mut app, Action::ConfirmDelete) else {
        panic!("confirm should request a delete");
    };
    crm::tui::spawn_store_request(store, request, TIMEOUT, tx);

    // Still pending until the completion is applied
    assert!(app.find("1").is_some());
    let action = next_action(&rx).await;
    assert!(matches!(action, Action::StoreCompleted(Ok(_))));

    update(&mut app, action);
    assert!(app.find("1").is_none());
    assert_eq!(app.view, ViewState::List);
}
