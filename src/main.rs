mod app;
mod config;
mod error;
mod event;
mod session;
mod theme;
mod ui;
mod upload;

use app::MediChatApp;
use config::AppConfig;
use eframe::egui;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn load_config() -> AppConfig {
    match AppConfig::load() {
        Ok(config) => config,
        Err(err) => {
            warn!(%err, path = %config::config_path().display(), "falling back to default config");
            AppConfig::default()
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let config = load_config();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("medichat-runtime")
        .build()?;
    let handle = runtime.handle().clone();

    let [width, height] = config.window_size;
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("MediChat")
            .with_inner_size([width, height])
            .with_min_inner_size([1024.0, 640.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    info!(upload_step = config.upload_step, upload_tick_ms = config.upload_tick_ms, "starting medichat");
    eframe::run_native(
        "MediChat",
        native_options,
        Box::new(move |creation_context| {
            Ok(Box::new(MediChatApp::new(
                creation_context.egui_ctx.clone(),
                handle,
                &config,
            )))
        }),
    )?;

    drop(runtime);
    Ok(())
}
