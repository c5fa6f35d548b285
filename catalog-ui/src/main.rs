// Desktop entry point for the catalog manager
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use catalog_ui::app::CatalogApp;
use catalog_ui::config::UiConfig;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = UiConfig::load().unwrap_or_else(|e| {
        log::error!("Invalid configuration, falling back to defaults: {}", e);
        UiConfig::default()
    });
    log::info!("Catalog backend: {}", config.api_url);

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([650.0, 450.0])
            .with_min_inner_size([480.0, 360.0])
            .with_title("Catalog Manager"),
        ..Default::default()
    };

    eframe::run_native(
        "Catalog Manager",
        native_options,
        Box::new(move |cc| {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            Ok(Box::new(CatalogApp::new(cc, &config, runtime)))
        }),
    )
}
