use std::fmt::{Display, Formatter};

use crate::icon_cache::RawIcon;
use crate::logging;

/// One top-level window as reported by the windowing system. Optional
/// fields model properties the system may not provide; their absence must
/// never abort an enumeration batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawWindow {
    pub id: u64,
    pub app_name: Option<String>,
    pub title: Option<String>,
    pub icon: Option<RawIcon>,
    pub skip_pager: bool,
    pub skip_tasklist: bool,
    pub workspace: Option<u32>,
}

impl RawWindow {
    pub fn new(id: u64, app_name: &str, title: &str) -> Self {
        Self {
            id,
            app_name: Some(app_name.to_string()),
            title: Some(title.to_string()),
            icon: None,
            skip_pager: false,
            skip_tasklist: false,
            workspace: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceError {
    message: String,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for SourceError {}

pub trait WindowSource: Send + Sync {
    fn source_name(&self) -> &'static str;
    fn windows(&self) -> Result<Vec<RawWindow>, SourceError>;
}

/// Windows carrying either task-switcher skip hint never surface.
pub fn is_hidden(window: &RawWindow) -> bool {
    window.skip_pager || window.skip_tasklist
}

/// Enumerates through the source, dropping hidden windows. An enumeration
/// failure degrades to an empty list; the next query event retries
/// naturally.
pub fn visible_windows(source: &dyn WindowSource) -> Vec<RawWindow> {
    match source.windows() {
        Ok(windows) => windows.into_iter().filter(|w| !is_hidden(w)).collect(),
        Err(error) => {
            logging::error(&format!(
                "window enumeration failed ({}): {error}",
                source.source_name()
            ));
            Vec::new()
        }
    }
}

pub struct FixtureSource {
    windows: Vec<RawWindow>,
}

impl FixtureSource {
    pub fn from_windows(windows: Vec<RawWindow>) -> Self {
        Self { windows }
    }

    pub fn deterministic_fixture() -> Self {
        Self {
            windows: vec![
                RawWindow::new(1, "Terminal", "bash"),
                RawWindow::new(2, "Browser", "GitHub - repo"),
            ],
        }
    }
}

impl WindowSource for FixtureSource {
    fn source_name(&self) -> &'static str {
        "fixture"
    }

    fn windows(&self) -> Result<Vec<RawWindow>, SourceError> {
        Ok(self.windows.clone())
    }
}
