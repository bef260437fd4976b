use std::path::{Path, PathBuf};

/// Substituted when the windowing system reports no owning application.
pub const UNKNOWN_APP_NAME: &str = "(unknown)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowRecord {
    pub id: u64,
    pub app_name: String,
    pub title: String,
    pub icon_path: PathBuf,
    pub is_last_selected: bool,
    normalized_app_name: String,
    normalized_title: String,
}

impl WindowRecord {
    pub fn new(
        id: u64,
        app_name: &str,
        title: &str,
        icon_path: &Path,
        is_last_selected: bool,
    ) -> Self {
        Self::from_owned(
            id,
            app_name.to_string(),
            title.to_string(),
            icon_path.to_path_buf(),
            is_last_selected,
        )
    }

    pub fn from_owned(
        id: u64,
        app_name: String,
        title: String,
        icon_path: PathBuf,
        is_last_selected: bool,
    ) -> Self {
        let normalized_app_name = normalize_for_match(&app_name);
        let normalized_title = normalize_for_match(&title);
        Self {
            id,
            app_name,
            title,
            icon_path,
            is_last_selected,
            normalized_app_name,
            normalized_title,
        }
    }

    pub fn normalized_app_name(&self) -> &str {
        &self.normalized_app_name
    }

    pub fn normalized_title(&self) -> &str {
        &self.normalized_title
    }
}

pub fn normalize_for_match(input: &str) -> String {
    input.to_lowercase()
}
