use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Identifier assigned by the backend.
pub type ItemId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: ItemId,
    pub name: String,
    pub description: String,
}

/// Write payload for POST and PUT.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub name: String,
    pub description: String,
}

impl ItemDraft {
    /// Trims both fields; `None` if either ends up empty.
    pub fn from_inputs(name: &str, description: &str) -> Option<Self> {
        let name = name.trim();
        let description = description.trim();
        if name.is_empty() || description.is_empty() {
            return None;
        }

        Some(Self {
            name: name.to_string(),
            description: description.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInputs {
    pub name: String,
    pub description: String,
}

impl FormInputs {
    pub fn clear(&mut self) {
        self.name.clear();
        self.description.clear();
    }

    pub fn draft(&self) -> Option<ItemDraft> {
        ItemDraft::from_inputs(&self.name, &self.description)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogKind {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dialog {
    pub kind: DialogKind,
    pub title: String,
    pub message: String,
}

impl Dialog {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Info,
            title: "Success".to_string(),
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Warning,
            title: "Warning".to_string(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: DialogKind::Error,
            title: "Error".to_string(),
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activity {
    #[default]
    Idle,
    Loading,
}

#[derive(Debug, Clone)]
pub struct CatalogState {
    // Rows from the last successful Load
    pub items: Vec<CatalogItem>,
    pub selected_id: Option<ItemId>,

    pub form: FormInputs,

    // Status bar text
    pub status: String,
    pub activity: Activity,

    // Shown front to back, one at a time
    pub dialogs: VecDeque<Dialog>,

    // Set while the yes/no confirmation is open
    pub pending_delete: Option<ItemId>,
}

impl Default for CatalogState {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            selected_id: None,
            form: FormInputs::default(),
            status: "Ready".to_string(),
            activity: Activity::Idle,
            dialogs: VecDeque::new(),
            pending_delete: None,
        }
    }
}

impl CatalogState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_loading(&self) -> bool {
        self.activity == Activity::Loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.activity = if loading {
            Activity::Loading
        } else {
            Activity::Idle
        };
    }

    pub fn push_dialog(&mut self, dialog: Dialog) {
        self.dialogs.push_back(dialog);
    }

    pub fn current_dialog(&self) -> Option<&Dialog> {
        self.dialogs.front()
    }

    pub fn dismiss_dialog(&mut self) -> Option<Dialog> {
        self.dialogs.pop_front()
    }

    /// Whether anything modal should block the main form.
    pub fn has_modal(&self) -> bool {
        !self.dialogs.is_empty() || self.pending_delete.is_some()
    }

    /// Clicking the selected row again clears the selection.
    pub fn toggle_selection(&mut self, id: ItemId) {
        if self.selected_id == Some(id) {
            self.selected_id = None;
        } else if self.items.iter().any(|item| item.id == id) {
            self.selected_id = Some(id);
        }
    }

    pub fn selected_item(&self) -> Option<&CatalogItem> {
        let id = self.selected_id?;
        self.items.iter().find(|item| item.id == id)
    }

    /// Repopulates the table; rows are rebuilt so the selection does not survive.
    pub fn replace_items(&mut self, items: Vec<CatalogItem>) {
        self.items = items;
        self.selected_id = None;
    }
}
