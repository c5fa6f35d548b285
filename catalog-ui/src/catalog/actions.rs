use super::state::ItemId;

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogAction {
    // Backend calls
    Load,
    Add,
    Update,
    ConfirmDelete,

    // Delete confirmation
    RequestDelete,
    CancelDelete,

    // Table and dialogs
    Select { id: ItemId },
    DismissDialog,
}

impl CatalogAction {
    pub fn description(&self) -> &'static str {
        match self {
            CatalogAction::Load => "Loading catalog items",
            CatalogAction::Add => "Adding catalog item",
            CatalogAction::Update => "Updating selected item",
            CatalogAction::ConfirmDelete => "Deleting selected item",
            CatalogAction::RequestDelete => "Asking for delete confirmation",
            CatalogAction::CancelDelete => "Cancelling delete",
            CatalogAction::Select { .. } => "Selecting row",
            CatalogAction::DismissDialog => "Dismissing dialog",
        }
    }

    /// Actions that may hit the backend.
    pub fn is_async(&self) -> bool {
        match self {
            CatalogAction::Load
            | CatalogAction::Add
            | CatalogAction::Update
            | CatalogAction::ConfirmDelete => true,

            CatalogAction::RequestDelete
            | CatalogAction::CancelDelete
            | CatalogAction::Select { .. }
            | CatalogAction::DismissDialog => false,
        }
    }
}
