#[cfg(test)]
mod tests {
    use crate::catalog::{Activity, CatalogAction, CatalogManager, DialogKind};
    use crate::config::UiConfig;
    use serde_json::{json, Value};
    use wiremock::matchers::{any, body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const CATALOG_PATH: &str = "/api/catalog";

    fn catalog_json(count: i64) -> Value {
        let items: Vec<Value> = (1..=count)
            .map(|id| {
                json!({
                    "id": id,
                    "name": format!("Item {}", id),
                    "description": format!("Description {}", id),
                })
            })
            .collect();
        Value::Array(items)
    }

    fn manager_for(server: &MockServer) -> CatalogManager {
        CatalogManager::new(&format!("{}{}", server.uri(), CATALOG_PATH))
    }

    async fn mount_list(server: &MockServer, count: i64, times: u64) {
        Mock::given(method("GET"))
            .and(path(CATALOG_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(catalog_json(count)))
            .up_to_n_times(times)
            .expect(times)
            .mount(server)
            .await;
    }

    fn fill_form(manager: &mut CatalogManager, name: &str, description: &str) {
        let form = manager.form_mut();
        form.name = name.to_string();
        form.description = description.to_string();
    }

    fn dialog_messages(manager: &CatalogManager) -> Vec<String> {
        manager
            .state()
            .dialogs
            .iter()
            .map(|d| d.message.clone())
            .collect()
    }

    #[tokio::test]
    async fn test_manager_initialization() {
        let manager = CatalogManager::new("http://localhost:8080/api/catalog");
        let state = manager.state();

        assert!(state.items.is_empty());
        assert_eq!(state.status, "Ready");
        assert_eq!(state.activity, Activity::Idle);
        assert!(state.dialogs.is_empty());
        assert!(!manager.has_pending_actions());
    }

    #[tokio::test]
    async fn test_load_populates_table() {
        let server = MockServer::start().await;
        mount_list(&server, 2, 1).await;

        let mut manager = manager_for(&server);
        manager.dispatch(CatalogAction::Load);
        manager.update().await;

        let state = manager.state();
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.items[1].name, "Item 2");
        assert_eq!(state.status, "Loaded 2 items");
        assert!(!state.is_loading());
        assert!(state.dialogs.is_empty());
    }

    #[tokio::test]
    async fn test_failed_load_keeps_previous_rows() {
        let server = MockServer::start().await;
        mount_list(&server, 2, 1).await;
        Mock::given(method("GET"))
            .and(path(CATALOG_PATH))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let mut manager = manager_for(&server);
        manager.dispatch(CatalogAction::Load);
        manager.dispatch(CatalogAction::Load);
        manager.run_pending().await;

        let state = manager.state();
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.status, "Connection failed");
        let dialog = state.current_dialog().unwrap();
        assert_eq!(dialog.kind, DialogKind::Error);
        assert!(dialog.message.starts_with("Could not connect to backend:"));
    }

    #[tokio::test]
    async fn test_add_with_empty_field_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let mut manager = manager_for(&server);
        fill_form(&mut manager, "Lamp", "   ");
        manager.dispatch(CatalogAction::Add);
        manager.update().await;

        let dialog = manager.state().current_dialog().unwrap();
        assert_eq!(dialog.kind, DialogKind::Warning);
        assert_eq!(dialog.message, "Please enter both name and description");
        assert_eq!(manager.state().form.name, "Lamp");
    }

    #[tokio::test]
    async fn test_add_success_clears_inputs_and_reloads() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(CATALOG_PATH))
            .and(body_json(json!({ "name": "Lamp", "description": "Desk lamp" })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": 3, "name": "Lamp", "description": "Desk lamp"
            })))
            .expect(1)
            .mount(&server)
            .await;
        mount_list(&server, 3, 1).await;

        let mut manager = manager_for(&server);
        fill_form(&mut manager, "  Lamp ", " Desk lamp");
        manager.dispatch(CatalogAction::Add);
        manager.update().await;

        let state = manager.state();
        assert_eq!(state.items.len(), 3);
        assert_eq!(state.status, "Loaded 3 items");
        assert!(state.form.name.is_empty());
        assert!(state.form.description.is_empty());
        assert_eq!(dialog_messages(&manager), vec!["Item added!".to_string()]);
    }

    #[tokio::test]
    async fn test_add_without_created_status_does_not_reload() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(catalog_json(1)))
            .expect(0)
            .mount(&server)
            .await;

        let mut manager = manager_for(&server);
        fill_form(&mut manager, "Lamp", "Desk lamp");
        manager.dispatch(CatalogAction::Add);
        manager.update().await;

        assert_eq!(dialog_messages(&manager), vec!["Failed to add item".to_string()]);
        assert_eq!(manager.state().form.name, "Lamp");
    }

    #[tokio::test]
    async fn test_add_transport_error_shows_the_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let mut manager = CatalogManager::new(&format!("http://127.0.0.1:{}/api/catalog", port));
        fill_form(&mut manager, "Lamp", "Desk lamp");
        manager.dispatch(CatalogAction::Add);
        manager.update().await;

        let dialog = manager.state().current_dialog().unwrap();
        assert_eq!(dialog.kind, DialogKind::Error);
        assert_ne!(dialog.message, "Failed to add item");
        assert!(!dialog.message.is_empty());
    }

    #[tokio::test]
    async fn test_update_without_selection_warns() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut manager = manager_for(&server);
        fill_form(&mut manager, "Lamp", "Desk lamp");
        manager.dispatch(CatalogAction::Update);
        manager.update().await;

        assert_eq!(
            dialog_messages(&manager),
            vec!["Please select an item first".to_string()]
        );
    }

    #[tokio::test]
    async fn test_update_with_empty_field_sends_nothing() {
        let server = MockServer::start().await;
        mount_list(&server, 2, 1).await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut manager = manager_for(&server);
        manager.dispatch(CatalogAction::Load);
        manager.dispatch(CatalogAction::Select { id: 2 });
        manager.run_pending().await;

        fill_form(&mut manager, "", "Desk lamp");
        manager.dispatch(CatalogAction::Update);
        manager.update().await;

        assert_eq!(
            dialog_messages(&manager),
            vec!["Please enter both name and description".to_string()]
        );
    }

    #[tokio::test]
    async fn test_update_success_reloads() {
        let server = MockServer::start().await;
        mount_list(&server, 2, 1).await;
        Mock::given(method("PUT"))
            .and(path("/api/catalog/2"))
            .and(body_json(json!({ "name": "Shelf", "description": "Oak shelf" })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(CATALOG_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "id": 1, "name": "Item 1", "description": "Description 1" },
                { "id": 2, "name": "Shelf", "description": "Oak shelf" }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let mut manager = manager_for(&server);
        manager.dispatch(CatalogAction::Load);
        manager.dispatch(CatalogAction::Select { id: 2 });
        manager.run_pending().await;
        assert_eq!(manager.state().selected_id, Some(2));

        fill_form(&mut manager, "Shelf", "Oak shelf");
        manager.dispatch(CatalogAction::Update);
        manager.update().await;

        let state = manager.state();
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.items[1].name, "Shelf");
        assert!(state.selected_id.is_none());
        assert_eq!(dialog_messages(&manager), vec!["Item updated!".to_string()]);
    }

    #[tokio::test]
    async fn test_update_rejected_by_backend() {
        let server = MockServer::start().await;
        mount_list(&server, 1, 1).await;
        Mock::given(method("PUT"))
            .and(path("/api/catalog/1"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let mut manager = manager_for(&server);
        manager.dispatch(CatalogAction::Load);
        manager.dispatch(CatalogAction::Select { id: 1 });
        manager.run_pending().await;

        fill_form(&mut manager, "Shelf", "Oak shelf");
        manager.dispatch(CatalogAction::Update);
        manager.update().await;

        assert_eq!(dialog_messages(&manager), vec!["Failed to update".to_string()]);
        // Stale rows stay until the next Load
        assert_eq!(manager.state().items[0].name, "Item 1");
    }

    #[tokio::test]
    async fn test_delete_cancel_sends_nothing() {
        let server = MockServer::start().await;
        mount_list(&server, 2, 1).await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut manager = manager_for(&server);
        manager.dispatch(CatalogAction::Load);
        manager.dispatch(CatalogAction::Select { id: 2 });
        manager.dispatch(CatalogAction::RequestDelete);
        manager.run_pending().await;

        assert_eq!(manager.state().pending_delete, Some(2));
        assert!(manager.state().has_modal());

        manager.dispatch(CatalogAction::CancelDelete);
        manager.update().await;

        assert!(manager.state().pending_delete.is_none());
        assert_eq!(manager.state().items.len(), 2);
    }

    #[tokio::test]
    async fn test_delete_without_selection_warns() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let mut manager = manager_for(&server);
        manager.dispatch(CatalogAction::RequestDelete);
        manager.update().await;

        assert!(manager.state().pending_delete.is_none());
        assert_eq!(
            dialog_messages(&manager),
            vec!["Please select an item first".to_string()]
        );
    }

    #[tokio::test]
    async fn test_confirmed_delete_reloads() {
        let server = MockServer::start().await;
        mount_list(&server, 2, 1).await;
        Mock::given(method("DELETE"))
            .and(path("/api/catalog/2"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        mount_list(&server, 1, 1).await;

        let mut manager = manager_for(&server);
        manager.dispatch(CatalogAction::Load);
        manager.dispatch(CatalogAction::Select { id: 2 });
        manager.dispatch(CatalogAction::RequestDelete);
        manager.dispatch(CatalogAction::ConfirmDelete);
        manager.run_pending().await;

        let state = manager.state();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.status, "Loaded 1 items");
        assert!(state.pending_delete.is_none());
        assert_eq!(dialog_messages(&manager), vec!["Item deleted!".to_string()]);
    }

    #[tokio::test]
    async fn test_delete_rejected_by_backend() {
        let server = MockServer::start().await;
        mount_list(&server, 1, 1).await;
        Mock::given(method("DELETE"))
            .and(path("/api/catalog/1"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let mut manager = manager_for(&server);
        manager.dispatch(CatalogAction::Load);
        manager.dispatch(CatalogAction::Select { id: 1 });
        manager.dispatch(CatalogAction::RequestDelete);
        manager.dispatch(CatalogAction::ConfirmDelete);
        manager.run_pending().await;

        assert_eq!(dialog_messages(&manager), vec!["Failed to delete".to_string()]);
        assert_eq!(manager.state().items.len(), 1);
    }

    #[tokio::test]
    async fn test_dialogs_dismiss_in_order() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;

        let mut manager = manager_for(&server);
        fill_form(&mut manager, "Lamp", "Desk lamp");
        manager.dispatch(CatalogAction::Add);
        manager.update().await;

        assert_eq!(manager.state().dialogs.len(), 2);
        assert_eq!(manager.state().current_dialog().unwrap().message, "Item added!");

        manager.dispatch(CatalogAction::DismissDialog);
        manager.update().await;
        let next = manager.state().current_dialog().unwrap();
        assert_eq!(next.kind, DialogKind::Error);
        assert_eq!(manager.state().status, "Connection failed");
    }

    #[tokio::test]
    async fn test_action_queuing() {
        let server = MockServer::start().await;
        mount_list(&server, 1, 1).await;

        let mut manager = manager_for(&server);
        manager.dispatch(CatalogAction::Load);
        manager.dispatch(CatalogAction::Select { id: 1 });
        manager.dispatch(CatalogAction::Select { id: 1 });

        assert!(manager.has_pending_actions());
        assert!(manager.next_action_is_async());

        manager.update().await;
        assert!(manager.has_pending_actions());
        assert!(!manager.next_action_is_async());

        manager.update().await;
        assert_eq!(manager.state().selected_id, Some(1));

        manager.update().await;
        assert!(!manager.has_pending_actions());
        assert!(manager.state().selected_id.is_none());
    }

    #[tokio::test]
    async fn test_backend_call_runs_on_frame_after_loading_is_shown() {
        let server = MockServer::start().await;
        mount_list(&server, 1, 1).await;

        let mut manager = manager_for(&server);
        manager.dispatch(CatalogAction::Load);

        // First frame only marks the call; the status bar paints "Loading..."
        manager.step_frame().await;
        assert!(manager.state().is_loading());
        assert_eq!(manager.state().status, "Ready");
        assert!(server.received_requests().await.unwrap().is_empty());

        manager.step_frame().await;
        assert!(!manager.state().is_loading());
        assert_eq!(manager.state().status, "Loaded 1 items");
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
        assert!(!manager.has_pending_actions());
    }

    #[tokio::test]
    async fn test_local_actions_do_not_wait_for_a_frame() {
        let server = MockServer::start().await;
        mount_list(&server, 2, 2).await;

        let mut manager = manager_for(&server);
        manager.dispatch(CatalogAction::Load);
        manager.run_pending().await;

        manager.dispatch(CatalogAction::Select { id: 2 });
        manager.dispatch(CatalogAction::Load);
        manager.step_frame().await;

        assert_eq!(manager.state().selected_id, Some(2));
        assert!(manager.state().is_loading());
        assert_eq!(server.received_requests().await.unwrap().len(), 1);

        manager.step_frame().await;
        assert!(!manager.state().is_loading());
        assert!(manager.state().selected_id.is_none());
    }

    #[tokio::test]
    async fn test_startup_issues_one_load() {
        let server = MockServer::start().await;
        mount_list(&server, 3, 1).await;

        let config = UiConfig {
            api_url: format!("{}{}", server.uri(), CATALOG_PATH),
            ..UiConfig::default()
        };
        let mut manager = CatalogManager::from_config(&config);
        assert!(manager.next_action_is_async());

        manager.step_frame().await;
        manager.step_frame().await;
        manager.step_frame().await;

        assert_eq!(manager.state().items.len(), 3);
        assert_eq!(manager.state().status, "Loaded 3 items");
    }

    #[tokio::test]
    async fn test_startup_load_can_be_disabled() {
        let server = MockServer::start().await;
        Mock::given(any())
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let config = UiConfig {
            api_url: format!("{}{}", server.uri(), CATALOG_PATH),
            load_on_start: false,
            dark_mode: false,
        };
        let mut manager = CatalogManager::from_config(&config);
        assert!(!manager.has_pending_actions());

        manager.step_frame().await;
        assert_eq!(manager.state().status, "Ready");
    }
}
