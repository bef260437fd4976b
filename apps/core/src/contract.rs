use serde::{Deserialize, Serialize};

use crate::activation::activation_command;
use crate::model::WindowRecord;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivateRequest {
    pub id: u64,
}

/// One rendered result row: application name as the primary label, window
/// title as the secondary one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderItem {
    pub icon: String,
    pub name: String,
    pub description: String,
    pub selected_by_default: bool,
    pub on_enter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RenderListResponse {
    pub items: Vec<RenderItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActivateResponse {
    pub activated: bool,
    pub command: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum ExtensionRequest {
    Query(QueryRequest),
    Activate(ActivateRequest),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "payload")]
pub enum ExtensionResponse {
    RenderList(RenderListResponse),
    Activate(ActivateResponse),
}

impl From<&WindowRecord> for RenderItem {
    fn from(value: &WindowRecord) -> Self {
        Self {
            icon: value.icon_path.to_string_lossy().into_owned(),
            name: value.app_name.clone(),
            description: value.title.clone(),
            selected_by_default: value.is_last_selected,
            on_enter: activation_command(value.id),
        }
    }
}
