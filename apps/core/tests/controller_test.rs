use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{SystemTime, UNIX_EPOCH};

use winswitch_core::activation::{ActivationError, WindowActivator};
use winswitch_core::config::Config;
use winswitch_core::controller::{ExtensionController, ServiceError};
use winswitch_core::model::UNKNOWN_APP_NAME;
use winswitch_core::window_source::{FixtureSource, RawWindow, SourceError, WindowSource};

fn unique_dir(tag: &str) -> PathBuf {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be valid")
        .as_nanos();
    std::env::temp_dir().join(format!("winswitch-{tag}-{unique}"))
}

fn test_config(tag: &str) -> Config {
    Config {
        cache_dir: unique_dir(tag),
        ..Default::default()
    }
}

struct RecordingActivator {
    activated: Arc<Mutex<Vec<u64>>>,
}

impl WindowActivator for RecordingActivator {
    fn activate(&self, id: u64) -> Result<(), ActivationError> {
        self.activated.lock().unwrap().push(id);
        Ok(())
    }
}

struct FailingActivator;

impl WindowActivator for FailingActivator {
    fn activate(&self, _id: u64) -> Result<(), ActivationError> {
        Err(ActivationError::Spawn(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing utility",
        )))
    }
}

struct CountingSource {
    windows: Vec<RawWindow>,
    calls: Arc<Mutex<usize>>,
}

impl WindowSource for CountingSource {
    fn source_name(&self) -> &'static str {
        "counting"
    }

    fn windows(&self) -> Result<Vec<RawWindow>, SourceError> {
        *self.calls.lock().unwrap() += 1;
        Ok(self.windows.clone())
    }
}

struct SharedSource {
    windows: Arc<Mutex<Vec<RawWindow>>>,
}

impl WindowSource for SharedSource {
    fn source_name(&self) -> &'static str {
        "shared"
    }

    fn windows(&self) -> Result<Vec<RawWindow>, SourceError> {
        Ok(self.windows.lock().unwrap().clone())
    }
}

struct FailingSource;

impl WindowSource for FailingSource {
    fn source_name(&self) -> &'static str {
        "failing"
    }

    fn windows(&self) -> Result<Vec<RawWindow>, SourceError> {
        Err(SourceError::new("display gone"))
    }
}

fn fixture_controller(tag: &str) -> (ExtensionController, Arc<Mutex<Vec<u64>>>) {
    let activated = Arc::new(Mutex::new(Vec::new()));
    let controller = ExtensionController::new(
        test_config(tag),
        Box::new(FixtureSource::deterministic_fixture()),
        Box::new(RecordingActivator {
            activated: Arc::clone(&activated),
        }),
    )
    .expect("controller should initialize");
    (controller, activated)
}

#[test]
fn empty_query_renders_full_list_in_enumeration_order() {
    let (mut controller, _) = fixture_controller("full-list");

    let records = controller.handle_query("");

    let ids: Vec<u64> = records.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert!(records.iter().all(|r| !r.is_last_selected));
}

#[test]
fn whitespace_query_is_treated_as_empty() {
    let (mut controller, _) = fixture_controller("whitespace");

    let records = controller.handle_query("   ");

    assert_eq!(records.len(), 2);
}

#[test]
fn query_filters_on_title_and_app_name() {
    let (mut controller, _) = fixture_controller("scenario");
    controller.handle_query("");

    let by_title = controller.handle_query("git");
    assert_eq!(by_title.len(), 1);
    assert_eq!(by_title[0].id, 2);

    let by_app = controller.handle_query("TERM");
    assert_eq!(by_app.len(), 1);
    assert_eq!(by_app[0].id, 1);
}

#[test]
fn non_empty_query_reuses_last_enumeration() {
    let calls = Arc::new(Mutex::new(0));
    let source = CountingSource {
        windows: vec![
            RawWindow::new(1, "Terminal", "bash"),
            RawWindow::new(2, "Browser", "GitHub - repo"),
        ],
        calls: Arc::clone(&calls),
    };
    let mut controller = ExtensionController::new(
        test_config("reuse"),
        Box::new(source),
        Box::new(FailingActivator),
    )
    .expect("controller should initialize");

    controller.handle_query("");
    controller.handle_query("git");
    controller.handle_query("browser");
    assert_eq!(*calls.lock().unwrap(), 1);

    controller.handle_query("");
    assert_eq!(*calls.lock().unwrap(), 2);
}

#[test]
fn hidden_windows_never_render() {
    let mut pager_hidden = RawWindow::new(7, "Dock", "dock");
    pager_hidden.skip_pager = true;
    let mut tasklist_hidden = RawWindow::new(8, "Panel", "panel");
    tasklist_hidden.skip_tasklist = true;

    let source = FixtureSource::from_windows(vec![
        RawWindow::new(1, "Terminal", "bash"),
        pager_hidden,
        tasklist_hidden,
    ]);
    let mut controller = ExtensionController::new(
        test_config("hidden"),
        Box::new(source),
        Box::new(FailingActivator),
    )
    .expect("controller should initialize");

    let all = controller.handle_query("");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, 1);

    let filtered = controller.handle_query("pa");
    assert!(filtered.is_empty());
}

#[test]
fn activation_preselects_window_on_next_rebuild() {
    let (mut controller, activated) = fixture_controller("preselect");
    controller.handle_query("");

    let command = controller
        .handle_activation(1)
        .expect("activation should succeed");
    assert_eq!(command, "wmctrl -ia 1");
    assert_eq!(controller.selection(), Some(1));
    assert_eq!(*activated.lock().unwrap(), vec![1]);

    let records = controller.handle_query("");
    assert!(records[0].is_last_selected);
    assert!(!records[1].is_last_selected);
}

#[test]
fn stale_selection_preselects_nothing() {
    let windows = Arc::new(Mutex::new(vec![
        RawWindow::new(1, "Terminal", "bash"),
        RawWindow::new(2, "Browser", "GitHub - repo"),
    ]));
    let activated = Arc::new(Mutex::new(Vec::new()));
    let mut controller = ExtensionController::new(
        test_config("stale"),
        Box::new(SharedSource {
            windows: Arc::clone(&windows),
        }),
        Box::new(RecordingActivator {
            activated: Arc::clone(&activated),
        }),
    )
    .expect("controller should initialize");

    controller.handle_query("");
    controller
        .handle_activation(1)
        .expect("activation should succeed");

    windows.lock().unwrap().remove(0);

    let records = controller.handle_query("");
    assert_eq!(records.len(), 1);
    assert!(records.iter().all(|r| !r.is_last_selected));
}

#[test]
fn activation_of_unlisted_window_is_item_not_found() {
    let (mut controller, activated) = fixture_controller("not-found");
    controller.handle_query("");

    let result = controller.handle_activation(99);

    match result {
        Err(ServiceError::ItemNotFound(id)) => assert_eq!(id, 99),
        other => panic!("unexpected result: {other:?}"),
    }
    assert!(activated.lock().unwrap().is_empty());
    assert_eq!(controller.selection(), None);
}

#[test]
fn activation_failure_leaves_selection_memory_empty() {
    let mut controller = ExtensionController::new(
        test_config("spawn-fail"),
        Box::new(FixtureSource::deterministic_fixture()),
        Box::new(FailingActivator),
    )
    .expect("controller should initialize");
    controller.handle_query("");

    let result = controller.handle_activation(1);

    match result {
        Err(ServiceError::Activation(_)) => {}
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(controller.selection(), None);
}

#[test]
fn missing_metadata_degrades_to_placeholders() {
    let window = RawWindow {
        id: 5,
        app_name: None,
        title: None,
        icon: None,
        skip_pager: false,
        skip_tasklist: false,
        workspace: None,
    };
    let mut controller = ExtensionController::new(
        test_config("placeholder"),
        Box::new(FixtureSource::from_windows(vec![window])),
        Box::new(FailingActivator),
    )
    .expect("controller should initialize");

    let records = controller.handle_query("");

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].app_name, UNKNOWN_APP_NAME);
    assert_eq!(records[0].title, "");
}

#[test]
fn records_without_icon_pixels_use_fallback_icon() {
    let config = test_config("fallback-icon");
    let fallback = config.fallback_icon.clone();
    let mut controller = ExtensionController::new(
        config,
        Box::new(FixtureSource::deterministic_fixture()),
        Box::new(FailingActivator),
    )
    .expect("controller should initialize");

    let records = controller.handle_query("");

    assert!(records.iter().all(|r| r.icon_path == fallback));
}

#[test]
fn enumeration_failure_yields_empty_list() {
    let mut controller = ExtensionController::new(
        test_config("enum-fail"),
        Box::new(FailingSource),
        Box::new(FailingActivator),
    )
    .expect("controller should initialize");

    let records = controller.handle_query("");

    assert!(records.is_empty());
}
