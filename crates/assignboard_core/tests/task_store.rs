use assignboard_core::db::{open_db, open_db_in_memory};
use assignboard_core::{
    compare_text, AppConfig, Clock, KeyValueStore, KvTaskRepository, MemoryKvStore,
    SqliteKvStore, StorageResult, Task, TaskFilter, TaskInput, TaskInputError, TaskRepository,
    TaskSort, TaskStore,
};
use std::cmp::Ordering;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};

/// Advances one millisecond per reading.
struct StepClock(AtomicI64);

impl Clock for StepClock {
    fn now_epoch_ms(&self) -> i64 {
        self.0.fetch_add(1, AtomicOrdering::SeqCst)
    }
}

/// Repository that counts saves and can be told to fail.
#[derive(Clone, Default)]
struct CountingRepo {
    saves: Arc<AtomicUsize>,
    fail: bool,
}

impl TaskRepository for CountingRepo {
    fn load(&self) -> StorageResult<Vec<Task>> {
        Ok(Vec::new())
    }

    fn save(&self, _tasks: &[Task]) -> StorageResult<()> {
        self.saves.fetch_add(1, AtomicOrdering::SeqCst);
        if self.fail {
            return Err(assignboard_core::StorageError::CorruptData {
                key: "test".to_string(),
                message: "disk full".to_string(),
            });
        }
        Ok(())
    }
}

fn memory_store() -> TaskStore<KvTaskRepository<MemoryKvStore>> {
    TaskStore::open_with(
        KvTaskRepository::new(MemoryKvStore::new()),
        Box::new(StepClock(AtomicI64::new(1_700_000_000_000))),
        100,
    )
}

#[test]
fn add_prepends_trimmed_task() {
    let mut store = memory_store();
    store.add("first").unwrap();
    let id = store.add("  second  ").unwrap();

    assert_eq!(store.tasks()[0].id, id);
    assert_eq!(store.tasks()[0].text, "second");
    assert_eq!(store.tasks()[1].text, "first");
    assert!(store.tasks()[0].created_at > store.tasks()[1].created_at);
    assert!(!store.tasks()[0].completed);
}

#[test]
fn add_rejects_empty_and_too_long_text() {
    let mut store = memory_store();
    assert_eq!(store.add("   ").unwrap_err(), TaskInputError::Empty);

    let too_long = "x".repeat(101);
    let err = store.add(&too_long).unwrap_err();
    assert_eq!(err, TaskInputError::TooLong { max: 100 });
    assert_eq!(err.to_string(), "Task text is too long (max 100 characters).");

    store.add(&"x".repeat(100)).unwrap();
    assert_eq!(store.len(), 1);
}

#[test]
fn case_insensitive_duplicate_of_active_task_is_rejected() {
    let mut store = memory_store();
    for text in ["Buy milk", "walk the dog", "Ünïcode Task"] {
        store.add(text).unwrap();
        let before = store.len();
        let err = store.add(&text.to_uppercase()).unwrap_err();
        assert_eq!(err, TaskInputError::Duplicate);
        assert_eq!(err.to_string(), "This task already exists.");
        assert_eq!(store.len(), before);
    }
}

#[test]
fn duplicate_of_completed_task_is_allowed() {
    let mut store = memory_store();
    let id = store.add("Buy milk").unwrap();
    store.toggle(id);

    store.add("buy milk").unwrap();
    assert_eq!(store.len(), 2);
    assert_eq!(store.active_count(), 1);
}

#[test]
fn reopening_completed_task_is_refused_while_twin_is_active() {
    let mut store = memory_store();
    let original = store.add("Buy milk").unwrap();
    store.toggle(original);
    let twin = store.add("buy milk").unwrap();

    assert!(!store.toggle(original));
    assert!(store.get(original).unwrap().completed);
    let active = store
        .view(TaskFilter::Active, TaskSort::NameAsc)
        .iter()
        .map(|task| task.id)
        .collect::<Vec<_>>();
    assert_eq!(active, [twin]);

    // Once the twin is gone the original may be reopened.
    store.remove(twin);
    assert!(store.toggle(original));
    assert_eq!(store.active_count(), 1);
}

#[test]
fn toggle_twice_restores_original_flag() {
    let mut store = memory_store();
    let id = store.add("Buy milk").unwrap();

    assert!(store.toggle(id));
    assert!(store.get(id).unwrap().completed);
    assert!(store.toggle(id));
    assert!(!store.get(id).unwrap().completed);
}

#[test]
fn toggle_and_remove_unknown_id_are_noops() {
    let mut store = memory_store();
    store.add("keep").unwrap();
    let stranger = uuid::Uuid::now_v7();

    assert!(!store.toggle(stranger));
    assert!(!store.remove(stranger));
    assert_eq!(store.len(), 1);
    assert!(!store.tasks()[0].completed);
}

#[test]
fn remove_and_clear_completed() {
    let mut store = memory_store();
    let a = store.add("a").unwrap();
    let b = store.add("b").unwrap();
    let c = store.add("c").unwrap();

    assert!(store.remove(b));
    store.toggle(a);
    assert!(store.has_completed());
    assert_eq!(store.clear_completed(), 1);

    assert_eq!(store.len(), 1);
    assert_eq!(store.tasks()[0].id, c);
    assert!(!store.has_completed());
}

#[test]
fn every_mutation_saves_and_failures_do_not_propagate() {
    let repo = CountingRepo {
        fail: true,
        ..CountingRepo::default()
    };
    let saves = Arc::clone(&repo.saves);
    let mut store = TaskStore::open(repo);

    let id = store.add("a").unwrap();
    store.toggle(id);
    store.clear_completed();
    store.remove(id);
    let _ = store.add("");

    assert_eq!(saves.load(AtomicOrdering::SeqCst), 4);
    assert!(store.is_empty());
}

#[test]
fn observers_see_each_mutation() {
    let mut store = memory_store();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    store.subscribe(move |tasks: &[Task]| sink.lock().unwrap().push(tasks.len()));

    let id = store.add("a").unwrap();
    store.add("b").unwrap();
    store.remove(id);

    assert_eq!(*seen.lock().unwrap(), vec![1, 2, 1]);
}

#[test]
fn observers_skip_mutations_that_change_nothing() {
    let repo = CountingRepo::default();
    let saves = Arc::clone(&repo.saves);
    let mut store = TaskStore::open(repo);
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    store.subscribe(move |_: &[Task]| {
        counter.fetch_add(1, AtomicOrdering::SeqCst);
    });

    let stranger = uuid::Uuid::now_v7();
    store.toggle(stranger);
    store.remove(stranger);
    assert_eq!(store.clear_completed(), 0);
    assert_eq!(calls.load(AtomicOrdering::SeqCst), 0);
    assert_eq!(saves.load(AtomicOrdering::SeqCst), 3);

    let id = store.add("a").unwrap();
    store.toggle(id);
    assert_eq!(store.clear_completed(), 1);
    assert_eq!(calls.load(AtomicOrdering::SeqCst), 3);
}

#[test]
fn completed_view_sorted_by_name_is_ordered() {
    let mut store = memory_store();
    for text in ["pear", "Apple", "banana", "cherry", "apple pie", "Date"] {
        let id = store.add(text).unwrap();
        if text != "cherry" {
            store.toggle(id);
        }
    }

    let view = store.view(TaskFilter::Completed, TaskSort::NameAsc);
    assert_eq!(view.len(), 5);
    assert!(view.iter().all(|task| task.completed));
    for pair in view.windows(2) {
        assert_ne!(
            compare_text(&pair[0].text, &pair[1].text),
            Ordering::Greater
        );
    }
    let texts = view.iter().map(|task| task.text.as_str()).collect::<Vec<_>>();
    assert_eq!(texts, ["Apple", "apple pie", "banana", "Date", "pear"]);
}

#[test]
fn sqlite_collection_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tasks.db");

    let (first_id, second_id) = {
        let repo = KvTaskRepository::new(SqliteKvStore::new(open_db(&path).unwrap()));
        let mut store = TaskStore::open(repo);
        let first = store.add("write report").unwrap();
        let second = store.add("call mom").unwrap();
        store.toggle(first);
        (first, second)
    };

    let repo = KvTaskRepository::new(SqliteKvStore::new(open_db(&path).unwrap()));
    let store = TaskStore::open(repo);
    assert_eq!(store.len(), 2);
    assert_eq!(store.tasks()[0].id, second_id);
    assert_eq!(store.tasks()[1].id, first_id);
    assert!(store.get(first_id).unwrap().completed);
}

#[test]
fn corrupt_storage_opens_empty() {
    let kv = SqliteKvStore::new(open_db_in_memory().unwrap());
    kv.put("assignboard.tasks", "[{\"id\": 12}]").unwrap();

    let mut store = TaskStore::open(KvTaskRepository::new(&kv));
    assert!(store.is_empty());

    store.add("fresh start").unwrap();
    let raw = kv.get("assignboard.tasks").unwrap().unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored[0]["text"], "fresh start");
    assert_eq!(stored[0]["completed"], false);
    assert!(stored[0]["created_at"].is_i64());
    assert!(stored[0]["id"].is_string());
}

#[test]
fn config_sets_max_length() {
    let config = AppConfig::from_json_str(r#"{"task_max_len": 5}"#).unwrap();
    let mut store = TaskStore::from_config(KvTaskRepository::new(MemoryKvStore::new()), &config);

    assert_eq!(store.max_len(), 5);
    assert_eq!(
        store.add("toolong").unwrap_err(),
        TaskInputError::TooLong { max: 5 }
    );
}

#[test]
fn task_input_error_clears_on_next_valid_keystroke() {
    let mut store = memory_store();
    let mut input = TaskInput::new();

    input.on_input("   ");
    assert_eq!(input.submit(&mut store), None);
    assert_eq!(input.error_message().as_deref(), Some("Task cannot be empty."));

    input.on_input("  ");
    assert!(input.error().is_some());

    input.on_input("B");
    assert!(input.error().is_none());

    input.on_input("Buy milk");
    assert!(input.submit(&mut store).is_some());
    assert_eq!(input.draft(), "");

    input.on_input("buy MILK");
    assert_eq!(input.submit(&mut store), None);
    assert_eq!(input.error(), Some(&TaskInputError::Duplicate));
    assert_eq!(input.draft(), "buy MILK");
}
