use std::collections::VecDeque;

use super::client::CatalogClient;
use super::{CatalogAction, CatalogState, Dialog, FormInputs, ItemId};
use crate::config::UiConfig;
use crate::http_client::ClientError;

const MISSING_FIELDS: &str = "Please enter both name and description";
const NO_SELECTION: &str = "Please select an item first";

pub struct CatalogManager {
    // Current state - single source of truth
    state: CatalogState,

    catalog_client: CatalogClient,

    // Processed one per update(), in dispatch order
    pending_actions: VecDeque<CatalogAction>,
}

impl CatalogManager {
    pub fn new(api_url: &str) -> Self {
        Self::new_with_client(CatalogClient::new(api_url))
    }

    pub fn new_with_client(catalog_client: CatalogClient) -> Self {
        Self {
            state: CatalogState::default(),
            catalog_client,
            pending_actions: VecDeque::new(),
        }
    }

    /// Manager for the configured backend, with the start-up Load queued when enabled.
    pub fn from_config(config: &UiConfig) -> Self {
        let mut manager = Self::new(&config.api_url);
        if config.load_on_start {
            manager.dispatch(CatalogAction::Load);
        }
        manager
    }

    /// UI calls this - synchronous, just queues the action
    pub fn dispatch(&mut self, action: CatalogAction) {
        log::debug!("Dispatching action: {}", action.description());
        self.pending_actions.push_back(action);
    }

    /// Processes one action from the queue
    pub async fn update(&mut self) {
        if let Some(action) = self.pending_actions.pop_front() {
            log::debug!("Processing action: {}", action.description());
            self.handle_action(action).await;
        }
    }

    /// One frame's worth of work.
    ///
    /// A backend call runs only after a frame has been painted with the state
    /// in `Loading`: the first step marks it, the next step performs it.
    /// Local actions (selection, dialogs, cancel) run immediately.
    pub async fn step_frame(&mut self) {
        if self.state.is_loading() {
            self.update().await;
        }

        while !self.state.is_loading() {
            let next_is_async = match self.pending_actions.front() {
                Some(action) => action.is_async(),
                None => break,
            };
            if next_is_async {
                self.state.set_loading(true);
            } else {
                self.update().await;
            }
        }
    }

    /// Drains the whole queue.
    pub async fn run_pending(&mut self) {
        while !self.pending_actions.is_empty() {
            self.update().await;
        }
    }

    pub fn state(&self) -> &CatalogState {
        &self.state
    }

    /// The two text inputs are edited in place by the UI.
    pub fn form_mut(&mut self) -> &mut FormInputs {
        &mut self.state.form
    }

    pub fn has_pending_actions(&self) -> bool {
        !self.pending_actions.is_empty()
    }

    /// True when the next queued action will hit the backend.
    pub fn next_action_is_async(&self) -> bool {
        self.pending_actions
            .front()
            .map(CatalogAction::is_async)
            .unwrap_or(false)
    }

    async fn handle_action(&mut self, action: CatalogAction) {
        if action.is_async() {
            self.state.set_loading(true);
        }

        match action {
            CatalogAction::Load => self.handle_load().await,
            CatalogAction::Add => self.handle_add().await,
            CatalogAction::Update => self.handle_update().await,
            CatalogAction::ConfirmDelete => self.handle_confirm_delete().await,
            CatalogAction::RequestDelete => self.handle_request_delete(),
            CatalogAction::CancelDelete => {
                self.state.pending_delete = None;
                log::info!("Delete cancelled");
            }
            CatalogAction::Select { id } => self.state.toggle_selection(id),
            CatalogAction::DismissDialog => {
                self.state.dismiss_dialog();
            }
        }

        self.state.set_loading(false);
    }

    fn selected_id(&self) -> Option<ItemId> {
        self.state.selected_item().map(|item| item.id)
    }
}

// Action handler implementations
impl CatalogManager {
    async fn handle_load(&mut self) {
        match self.catalog_client.list_items().await {
            Ok(items) => {
                let count = items.len();
                self.state.replace_items(items);
                self.state.status = format!("Loaded {} items", count);
                log::info!("Loaded {} items from {}", count, self.catalog_client.api_url());
            }
            Err(error) => {
                log::error!("Failed to load items: {}", error);
                self.state
                    .push_dialog(Dialog::error(format!("Could not connect to backend: {}", error)));
                self.state.status = "Connection failed".to_string();
            }
        }
    }

    async fn handle_add(&mut self) {
        let Some(draft) = self.state.form.draft() else {
            self.state.push_dialog(Dialog::warning(MISSING_FIELDS));
            return;
        };

        match self.catalog_client.create_item(&draft).await {
            Ok(()) => {
                log::info!("Added item '{}'", draft.name);
                self.state.push_dialog(Dialog::info("Item added!"));
                self.state.form.clear();
                self.handle_load().await;
            }
            Err(error) => {
                log::error!("Failed to add item: {}", error);
                self.state.push_dialog(failure_dialog(&error, "Failed to add item"));
            }
        }
    }

    async fn handle_update(&mut self) {
        let Some(id) = self.selected_id() else {
            self.state.push_dialog(Dialog::warning(NO_SELECTION));
            return;
        };

        let Some(draft) = self.state.form.draft() else {
            self.state.push_dialog(Dialog::warning(MISSING_FIELDS));
            return;
        };

        match self.catalog_client.update_item(id, &draft).await {
            Ok(()) => {
                log::info!("Updated item {}", id);
                self.state.push_dialog(Dialog::info("Item updated!"));
                self.handle_load().await;
            }
            Err(error) => {
                log::error!("Failed to update item {}: {}", id, error);
                self.state.push_dialog(failure_dialog(&error, "Failed to update"));
            }
        }
    }

    fn handle_request_delete(&mut self) {
        match self.selected_id() {
            Some(id) => self.state.pending_delete = Some(id),
            None => self.state.push_dialog(Dialog::warning(NO_SELECTION)),
        }
    }

    async fn handle_confirm_delete(&mut self) {
        let Some(id) = self.state.pending_delete.take() else {
            log::warn!("Delete confirmed with nothing pending");
            return;
        };

        match self.catalog_client.delete_item(id).await {
            Ok(()) => {
                log::info!("Deleted item {}", id);
                self.state.push_dialog(Dialog::info("Item deleted!"));
                self.handle_load().await;
            }
            Err(error) => {
                log::error!("Failed to delete item {}: {}", id, error);
                self.state.push_dialog(failure_dialog(&error, "Failed to delete"));
            }
        }
    }
}

/// A reachable backend with the wrong status gets the fixed text; anything else shows the error itself.
fn failure_dialog(error: &ClientError, status_message: &str) -> Dialog {
    if error.is_unexpected_status() {
        Dialog::error(status_message)
    } else {
        Dialog::error(error.to_string())
    }
}
