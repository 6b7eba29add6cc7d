//! FFI use-case API for the Flutter shell.
//!
//! # Responsibility
//! - Expose form, navigation and to-do use-cases as sync FRB functions.
//! - Hold one process-wide UI session and one task store behind mutexes.
//!
//! # Invariants
//! - Exported functions never panic across the FFI boundary.
//! - Leaving the form page resets form state and cancels the autofill check.
//! - The task store is opened lazily; a failed open is retried on next call.

use assignboard_core::db::open_db;
use assignboard_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppConfig, CancelHandle, FormField, FormRecord, FormState, KvTaskRepository, Page, Shell,
    SqliteKvStore, SubmitOutcome, TaskFilter, TaskInputError, TaskSort, TaskStore,
};
use log::warn;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, OnceLock};
use std::time::Instant;
use uuid::Uuid;

const TODO_DB_FILE_NAME: &str = "assignboard_tasks.sqlite3";

static CONFIG: OnceLock<AppConfig> = OnceLock::new();
static TODO_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static UI_SESSION: OnceLock<Mutex<UiSession>> = OnceLock::new();
static TODO_SESSION: OnceLock<Mutex<Option<TodoStore>>> = OnceLock::new();

type TodoStore = TaskStore<KvTaskRepository<SqliteKvStore>>;

struct UiSession {
    form: FormState,
    autofill: Option<CancelHandle>,
    shell: Shell,
}

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Exposes core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Idempotent for the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Installs configuration from JSON before first form/to-do use.
///
/// # FFI contract
/// - Returns empty string on success and error message on failure.
/// - Fails once any session has read the configuration.
#[flutter_rust_bridge::frb(sync)]
pub fn configure(config_json: String) -> String {
    let config = match AppConfig::from_json_str(&config_json) {
        Ok(config) => config,
        Err(err) => return format!("configure failed: {err}"),
    };
    match CONFIG.set(config) {
        Ok(()) => String::new(),
        Err(_) => "configure failed: configuration already in use".to_string(),
    }
}

/// One field's render state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldEntry {
    /// camelCase field name.
    pub field: String,
    pub value: String,
    /// Error gated by touched state; empty when nothing should show.
    pub error: String,
}

/// Whole-form render state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub fields: Vec<FieldEntry>,
    /// Submit button enablement.
    pub submittable: bool,
    pub available_cities: Vec<String>,
    /// Non-empty when the request itself was malformed.
    pub message: String,
}

/// Label/value row for the success page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryItem {
    pub label: String,
    pub value: String,
}

/// Current page and its history bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavState {
    pub page: String,
    pub route: String,
    pub section_label: String,
    /// Submitted record rows; only populated on the success page.
    pub summary: Vec<SummaryItem>,
}

/// Submit response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmitResponse {
    pub ok: bool,
    pub message: String,
    pub form: FormSnapshot,
    pub nav: NavState,
}

/// Applies an input change.
#[flutter_rust_bridge::frb(sync)]
pub fn form_change(field: String, value: String) -> FormSnapshot {
    with_form_field(&field, |session, field| session.form.on_change(field, &value))
}

/// Applies a blur event.
#[flutter_rust_bridge::frb(sync)]
pub fn form_blur(field: String, value: String) -> FormSnapshot {
    with_form_field(&field, |session, field| session.form.on_blur(field, &value))
}

/// Returns the current form render state.
#[flutter_rust_bridge::frb(sync)]
pub fn form_snapshot() -> FormSnapshot {
    snapshot(&lock_ui().form, String::new())
}

/// Submits the form; on success the shell moves to the success page.
#[flutter_rust_bridge::frb(sync)]
pub fn form_submit() -> FormSubmitResponse {
    let mut guard = lock_ui();
    let session = &mut *guard;
    let outcome = session.form.submit(&mut session.shell);
    let (ok, message) = match outcome {
        SubmitOutcome::Accepted(_) => (true, "Registration successful.".to_string()),
        SubmitOutcome::Rejected(errors) => (
            false,
            format!("Please fix {} field(s) before submitting.", errors.len()),
        ),
    };
    FormSubmitResponse {
        ok,
        message,
        form: snapshot(&session.form, String::new()),
        nav: nav_state(&session.shell),
    }
}

/// Schedules the autofill check for a freshly shown form.
#[flutter_rust_bridge::frb(sync)]
pub fn form_mount() {
    let mut session = lock_ui();
    let handle = session.form.mount(Instant::now());
    session.autofill = Some(handle);
}

/// Runs the autofill check if due. Returns the updated form when it ran.
#[flutter_rust_bridge::frb(sync)]
pub fn form_poll_autofill() -> Option<FormSnapshot> {
    let mut session = lock_ui();
    if !session.form.poll_deferred(Instant::now()) {
        return None;
    }
    session.autofill = None;
    Some(snapshot(&session.form, String::new()))
}

/// Cancels the autofill check when the form view is torn down.
#[flutter_rust_bridge::frb(sync)]
pub fn form_unmount() {
    let mut session = lock_ui();
    unmount_form(&mut session);
}

/// Sidebar page selection (`form`, `success`, `todo`).
#[flutter_rust_bridge::frb(sync)]
pub fn nav_select(page: String) -> NavState {
    let mut session = lock_ui();
    let Some(target) = Page::parse(&page) else {
        warn!("event=navigate module=ffi status=rejected reason=unknown_page");
        return nav_state(&session.shell);
    };
    let leaving_form = session.shell.current() == Page::Form && target != Page::Form;
    session.shell.navigate(target);
    if leaving_form {
        unmount_form(&mut session);
        session.form.reset();
    }
    nav_state(&session.shell)
}

/// History back action.
#[flutter_rust_bridge::frb(sync)]
pub fn nav_back() -> NavState {
    let mut session = lock_ui();
    let was_form = session.shell.current() == Page::Form;
    let page = session.shell.back();
    if was_form && page != Page::Form {
        unmount_form(&mut session);
        session.form.reset();
    }
    nav_state(&session.shell)
}

/// One task row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: i64,
}

/// To-do list render state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoViewResponse {
    pub items: Vec<TodoItem>,
    pub active_count: u32,
    pub has_completed: bool,
    /// Placeholder text when `items` is empty.
    pub empty_message: String,
    /// Diagnostics; empty on success.
    pub message: String,
}

/// Generic to-do mutation envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoActionResponse {
    pub ok: bool,
    pub task_id: Option<String>,
    /// User-facing validation text or diagnostics.
    pub message: String,
}

impl TodoActionResponse {
    fn success(task_id: Option<String>) -> Self {
        Self {
            ok: true,
            task_id,
            message: String::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Adds a task; validation failures come back as `message`.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_add(text: String) -> TodoActionResponse {
    match with_todo(|store| store.add(&text)) {
        Ok(Ok(id)) => TodoActionResponse::success(Some(id.to_string())),
        Ok(Err(err)) => TodoActionResponse::failure(err.to_string()),
        Err(err) => TodoActionResponse::failure(format!("todo_add failed: {err}")),
    }
}

/// Flips completion; unknown ids are a successful no-op.
///
/// Reopening a task whose twin is already open fails with the duplicate message.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_toggle(task_id: String) -> TodoActionResponse {
    let id = match Uuid::parse_str(task_id.trim()) {
        Ok(id) => id,
        Err(_) => return TodoActionResponse::failure(format!("invalid task id `{task_id}`")),
    };
    let result = with_todo(|store| store.toggle(id) || store.get(id).is_none());
    match result {
        Ok(true) => TodoActionResponse::success(Some(id.to_string())),
        Ok(false) => TodoActionResponse::failure(TaskInputError::Duplicate.to_string()),
        Err(err) => TodoActionResponse::failure(format!("todo_toggle failed: {err}")),
    }
}

/// Deletes a task; unknown ids are a successful no-op.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_remove(task_id: String) -> TodoActionResponse {
    let id = match Uuid::parse_str(task_id.trim()) {
        Ok(id) => id,
        Err(_) => return TodoActionResponse::failure(format!("invalid task id `{task_id}`")),
    };
    match with_todo(|store| store.remove(id)) {
        Ok(_) => TodoActionResponse::success(Some(id.to_string())),
        Err(err) => TodoActionResponse::failure(format!("todo_remove failed: {err}")),
    }
}

#[flutter_rust_bridge::frb(sync)]
pub fn todo_clear_completed() -> TodoActionResponse {
    match with_todo(|store| store.clear_completed()) {
        Ok(removed) => TodoActionResponse {
            ok: true,
            task_id: None,
            message: format!("Removed {removed} completed task(s)."),
        },
        Err(err) => TodoActionResponse::failure(format!("todo_clear_completed failed: {err}")),
    }
}

/// Derived list for `filter` (`all|active|completed`) and `sort`
/// (`date-desc|date-asc|name-asc|name-desc`); unknown values use defaults.
#[flutter_rust_bridge::frb(sync)]
pub fn todo_view(filter: String, sort: String) -> TodoViewResponse {
    let filter = TaskFilter::parse(&filter).unwrap_or_default();
    let sort = TaskSort::parse(&sort).unwrap_or_default();
    let result = with_todo(|store| TodoViewResponse {
        items: store
            .view(filter, sort)
            .into_iter()
            .map(|task| TodoItem {
                id: task.id.to_string(),
                text: task.text.clone(),
                completed: task.completed,
                created_at: task.created_at,
            })
            .collect(),
        active_count: u32::try_from(store.active_count()).unwrap_or(u32::MAX),
        has_completed: store.has_completed(),
        empty_message: filter.empty_message().to_string(),
        message: String::new(),
    });
    result.unwrap_or_else(|err| TodoViewResponse {
        items: Vec::new(),
        active_count: 0,
        has_completed: false,
        empty_message: filter.empty_message().to_string(),
        message: format!("todo_view failed: {err}"),
    })
}

fn config() -> &'static AppConfig {
    CONFIG.get_or_init(AppConfig::default)
}

fn lock_ui() -> MutexGuard<'static, UiSession> {
    UI_SESSION
        .get_or_init(|| {
            Mutex::new(UiSession {
                form: FormState::from_config(config()),
                autofill: None,
                shell: Shell::new(),
            })
        })
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn unmount_form(session: &mut UiSession) {
    session.form.unmount();
    session.autofill = None;
}

fn with_form_field(field: &str, apply: impl FnOnce(&mut UiSession, FormField)) -> FormSnapshot {
    let mut session = lock_ui();
    match FormField::parse(field) {
        Some(field) => {
            apply(&mut session, field);
            snapshot(&session.form, String::new())
        }
        None => snapshot(&session.form, format!("unknown form field `{field}`")),
    }
}

fn snapshot(form: &FormState, message: String) -> FormSnapshot {
    FormSnapshot {
        fields: FormField::ALL
            .into_iter()
            .map(|field| FieldEntry {
                field: field.as_str().to_string(),
                value: form.values().get(field).to_string(),
                error: form.visible_error(field).unwrap_or_default().to_string(),
            })
            .collect(),
        submittable: form.is_submittable(),
        available_cities: form.available_cities().to_vec(),
        message,
    }
}

fn nav_state(shell: &Shell) -> NavState {
    let page = shell.current();
    NavState {
        page: page.as_str().to_string(),
        route: page.route_path().to_string(),
        section_label: page.section_label().to_string(),
        summary: shell.submitted().map(summary_items).unwrap_or_default(),
    }
}

fn summary_items(record: &FormRecord) -> Vec<SummaryItem> {
    record
        .entries()
        .into_iter()
        .map(|(field, value)| SummaryItem {
            label: field.label().to_string(),
            value: value.to_string(),
        })
        .collect()
}

fn resolve_todo_db_path() -> PathBuf {
    TODO_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("ASSIGNBOARD_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(TODO_DB_FILE_NAME)
        })
        .clone()
}

fn with_todo<T>(f: impl FnOnce(&mut TodoStore) -> T) -> Result<T, String> {
    let mut slot = TODO_SESSION
        .get_or_init(|| Mutex::new(None))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if slot.is_none() {
        let conn = open_db(resolve_todo_db_path())
            .map_err(|err| format!("task storage open failed: {err}"))?;
        let repo = KvTaskRepository::with_key(SqliteKvStore::new(conn), config().storage_key.clone());
        *slot = Some(TaskStore::from_config(repo, config()));
    }
    match slot.as_mut() {
        Some(store) => Ok(f(store)),
        None => Err("task storage unavailable".to_string()),
    }
}
