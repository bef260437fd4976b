use crate::activation::{self, ActivationError, WindowActivator};
use crate::config::{validate, Config};
use crate::icon_cache;
use crate::logging;
use crate::matcher;
use crate::model::{WindowRecord, UNKNOWN_APP_NAME};
use crate::window_source::{visible_windows, RawWindow, SourceError, WindowSource};

#[derive(Debug)]
pub enum ServiceError {
    Config(String),
    Source(SourceError),
    Activation(ActivationError),
    ItemNotFound(u64),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::Source(error) => write!(f, "source error: {error}"),
            Self::Activation(error) => write!(f, "activation error: {error}"),
            Self::ItemNotFound(id) => write!(f, "window not found: {id}"),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<SourceError> for ServiceError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

impl From<ActivationError> for ServiceError {
    fn from(value: ActivationError) -> Self {
        Self::Activation(value)
    }
}

/// Owns the window list, the previous-selection memory, and the icon cache
/// directory lifecycle. One instance handles one host session; every event
/// runs to completion before the next is accepted.
pub struct ExtensionController {
    config: Config,
    source: Box<dyn WindowSource>,
    activator: Box<dyn WindowActivator>,
    items: Vec<WindowRecord>,
    selection: Option<u64>,
}

impl ExtensionController {
    pub fn new(
        config: Config,
        source: Box<dyn WindowSource>,
        activator: Box<dyn WindowActivator>,
    ) -> Result<Self, ServiceError> {
        validate(&config).map_err(ServiceError::Config)?;
        std::fs::create_dir_all(&config.cache_dir)
            .map_err(|error| ServiceError::Config(format!("cache dir create failed: {error}")))?;

        Ok(Self {
            config,
            source,
            activator,
            items: Vec::new(),
            selection: None,
        })
    }

    /// An empty (or whitespace) query is the only trigger for
    /// re-enumeration: it rebuilds the whole record list from scratch. A
    /// non-empty query re-filters the list built at the last empty-query
    /// event, so windows opened mid-query stay invisible until the query is
    /// cleared.
    pub fn handle_query(&mut self, query: &str) -> Vec<WindowRecord> {
        let query = if query.trim().is_empty() { "" } else { query };
        if query.is_empty() {
            logging::info("generating window list");
            self.rebuild_items();
        }

        matcher::filter(&self.items, query)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Delegates the focus operation to the activator and remembers the
    /// identity so the next rebuild pre-selects it. Returns the shell form
    /// of the focus command for hosts that render it.
    pub fn handle_activation(&mut self, id: u64) -> Result<String, ServiceError> {
        if !self.items.iter().any(|item| item.id == id) {
            return Err(ServiceError::ItemNotFound(id));
        }

        self.activator.activate(id)?;
        self.selection = Some(id);
        Ok(activation::activation_command(id))
    }

    pub fn selection(&self) -> Option<u64> {
        self.selection
    }

    pub fn items(&self) -> &[WindowRecord] {
        &self.items
    }

    fn rebuild_items(&mut self) {
        let windows = visible_windows(self.source.as_ref());
        let previous_selection = self.selection;
        let items = windows
            .iter()
            .map(|window| self.build_record(window, previous_selection))
            .collect();
        self.items = items;
    }

    fn build_record(&self, window: &RawWindow, previous_selection: Option<u64>) -> WindowRecord {
        let app_name = window
            .app_name
            .clone()
            .unwrap_or_else(|| UNKNOWN_APP_NAME.to_string());
        let title = window.title.clone().unwrap_or_default();
        let icon_path = icon_cache::resolve_icon(
            &app_name,
            window.id,
            window.icon.as_ref(),
            &self.config.cache_dir,
            &self.config.fallback_icon,
        );

        WindowRecord::from_owned(
            window.id,
            app_name,
            title,
            icon_path,
            previous_selection == Some(window.id),
        )
    }
}
