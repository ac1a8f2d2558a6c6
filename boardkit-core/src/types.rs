/// Entity model for the board: projects own columns, columns own tickets.
/// List order is display order; no implicit sorting anywhere.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Column names used to seed a newly created project.
pub const DEFAULT_COLUMNS: &[&str] = &["Backlog", "Ongoing", "Review", "Done"];

/// Default path of the todo note used for task import.
pub const DEFAULT_TODO_FILE: &str = "Todo.md";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub source_note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub tickets: Vec<Ticket>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub columns: Vec<Column>,
}

/// Process-wide user settings, persisted alongside the projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub default_columns: Vec<String>,
    pub todo_file_path: String,
    pub last_project_id: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_columns: DEFAULT_COLUMNS.iter().map(|s| s.to_string()).collect(),
            todo_file_path: DEFAULT_TODO_FILE.to_string(),
            last_project_id: None,
        }
    }
}

impl Settings {
    /// Merge a raw settings object over the defaults, field by field.
    /// Absent or mistyped fields keep their default value.
    pub fn merged_from(raw: &Value) -> Self {
        let mut settings = Self::default();
        if let Some(cols) = raw.get("defaultColumns").and_then(Value::as_array) {
            settings.default_columns = cols
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect();
        }
        if let Some(path) = raw.get("todoFilePath").and_then(Value::as_str) {
            settings.todo_file_path = path.to_string();
        }
        settings.last_project_id = raw
            .get("lastProjectId")
            .and_then(Value::as_str)
            .map(str::to_string);
        settings
    }
}

/// The full persisted document: all projects plus settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardData {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub settings: Settings,
}

impl BoardData {
    /// Decode a persisted payload leniently: a missing `projects` key is an
    /// empty list, a missing `settings` key falls back to defaults, and
    /// settings fields merge individually (see [`Settings::merged_from`]).
    pub fn from_raw(raw: &Value) -> Self {
        let projects = match raw.get("projects") {
            Some(value) => serde_json::from_value(value.clone()).unwrap_or_else(|e| {
                log::warn!("[boardkit.types] Ignoring malformed projects payload: {}", e);
                Vec::new()
            }),
            None => Vec::new(),
        };
        let settings = raw
            .get("settings")
            .map(Settings::merged_from)
            .unwrap_or_default();
        Self { projects, settings }
    }
}

/// Where a ticket currently lives: its owning column and position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketLocation {
    pub col_id: String,
    pub index: usize,
}

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Mint an opaque unique ID with an entity prefix, e.g. `ticket-42-18c9a3b7f01`.
pub fn generate_id(prefix: &str) -> String {
    let seq = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    let ts = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis();
    format!("{}-{}-{:x}", prefix, seq, ts)
}
