use eframe::egui;
use tokio::runtime::Runtime;

use crate::catalog::{CatalogAction, CatalogManager, CatalogState, DialogKind, FormInputs};
use crate::config::UiConfig;

const CONFIRM_DELETE: &str = "Are you sure you want to delete this item?";

/// Single-window catalog form: table, two inputs, four buttons.
pub struct CatalogApp {
    manager: CatalogManager,
    // Backend calls block the frame loop on this runtime
    runtime: Runtime,
}

impl CatalogApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &UiConfig, runtime: Runtime) -> Self {
        cc.egui_ctx.set_visuals(if config.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        });

        Self {
            manager: CatalogManager::from_config(config),
            runtime,
        }
    }
}

impl eframe::App for CatalogApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // A backend call marked last frame runs now, after "Loading..." was painted
        self.runtime.block_on(self.manager.step_frame());

        let mut actions = Vec::new();
        let modal_open = self.manager.state().has_modal();
        let busy = self.manager.state().is_loading();

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if busy {
                    ui.spinner();
                    ui.label("Loading...");
                } else {
                    ui.label(self.manager.state().status.as_str());
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Catalog Management System");
            });
            ui.add_space(10.0);

            ui.add_enabled_ui(!modal_open, |ui| {
                render_table(ui, self.manager.state(), &mut actions);
                ui.add_space(10.0);
                render_inputs(ui, self.manager.form_mut());
                ui.add_space(10.0);
                render_buttons(ui, &mut actions);
            });
        });

        render_modals(ctx, self.manager.state(), &mut actions);

        for action in actions {
            self.manager.dispatch(action);
        }

        if self.manager.has_pending_actions() {
            ctx.request_repaint();
        }
    }
}

fn render_table(ui: &mut egui::Ui, state: &CatalogState, actions: &mut Vec<CatalogAction>) {
    let table_height = (ui.available_height() - 120.0).max(120.0);

    ui.group(|ui| {
        egui::ScrollArea::vertical()
            .max_height(table_height)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                egui::Grid::new("catalog_table")
                    .num_columns(3)
                    .striped(true)
                    .spacing([16.0, 6.0])
                    .min_col_width(50.0)
                    .show(ui, |ui| {
                        ui.label(egui::RichText::new("ID").strong());
                        ui.label(egui::RichText::new("Name").strong());
                        ui.label(egui::RichText::new("Description").strong());
                        ui.end_row();

                        for item in &state.items {
                            let selected = state.selected_id == Some(item.id);
                            let clicked = ui.selectable_label(selected, item.id.to_string()).clicked()
                                | ui.selectable_label(selected, item.name.as_str()).clicked()
                                | ui.selectable_label(selected, item.description.as_str()).clicked();
                            if clicked {
                                actions.push(CatalogAction::Select { id: item.id });
                            }
                            ui.end_row();
                        }
                    });

                if state.items.is_empty() {
                    ui.weak("No items loaded");
                }
            });
    });
}

fn render_inputs(ui: &mut egui::Ui, form: &mut FormInputs) {
    ui.vertical_centered(|ui| {
        egui::Grid::new("catalog_inputs")
            .num_columns(2)
            .spacing([10.0, 8.0])
            .show(ui, |ui| {
                ui.label("Name:");
                ui.add(egui::TextEdit::singleline(&mut form.name).desired_width(240.0));
                ui.end_row();

                ui.label("Description:");
                ui.add(egui::TextEdit::singleline(&mut form.description).desired_width(240.0));
                ui.end_row();
            });
    });
}

fn render_buttons(ui: &mut egui::Ui, actions: &mut Vec<CatalogAction>) {
    ui.vertical_centered(|ui| {
        ui.horizontal(|ui| {
            if ui.button("Load Items").clicked() {
                actions.push(CatalogAction::Load);
            }
            if ui.button("Add").clicked() {
                actions.push(CatalogAction::Add);
            }
            if ui.button("Update").clicked() {
                actions.push(CatalogAction::Update);
            }
            if ui.button("Delete").clicked() {
                actions.push(CatalogAction::RequestDelete);
            }
        });
    });
}

fn render_modals(ctx: &egui::Context, state: &CatalogState, actions: &mut Vec<CatalogAction>) {
    if let Some(dialog) = state.current_dialog() {
        let color = match dialog.kind {
            DialogKind::Info => ctx.style().visuals.text_color(),
            DialogKind::Warning => egui::Color32::from_rgb(200, 140, 0),
            DialogKind::Error => egui::Color32::RED,
        };

        egui::Window::new(dialog.title.as_str())
            .id(egui::Id::new("catalog_dialog"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.colored_label(color, dialog.message.as_str());
                ui.add_space(8.0);
                ui.vertical_centered(|ui| {
                    if ui.button("OK").clicked() {
                        actions.push(CatalogAction::DismissDialog);
                    }
                });
            });
        return;
    }

    if state.pending_delete.is_some() {
        egui::Window::new("Confirm")
            .id(egui::Id::new("catalog_confirm_delete"))
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(CONFIRM_DELETE);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Yes").clicked() {
                        actions.push(CatalogAction::ConfirmDelete);
                    }
                    if ui.button("No").clicked() {
                        actions.push(CatalogAction::CancelDelete);
                    }
                });
            });
    }
}
