mod app;
mod color;
mod config;
mod data;
mod state;
mod ui;

use anyhow::Context;
use app::TweetLensApp;
use config::AppConfig;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = AppConfig::from_env().context("resolving configuration")?;
    let dataset_path = config.dataset.clone();
    let mut state = AppState::new(config);

    // No dataset, no dashboard: fail before the window opens.
    state
        .load_path(&dataset_path)
        .inspect_err(|e| log::error!("Cannot start without a dataset: {e:#}"))?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 850.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Tweet Lens – Twitter Data Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(TweetLensApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("running viewer: {e}"))
}
