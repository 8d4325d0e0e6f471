//! # Gesture Frontend
//!
//! Shares the backend's **types** (config, gesture reports, frame formats) but runs as a separate
//! process; all communication with the backend goes over Tether. The frontend only displays state
//! and sends control messages; it never classifies gestures or injects input itself.
//!
use clap::Parser;

use cli::Cli;
use env_logger::Env;
use log::{debug, error};
use model::Model;

mod cli;
mod model;
mod ui;

fn main() -> Result<(), eframe::Error> {
    let cli = Cli::parse();

    // Initialize the logger from the environment

    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level))
        .filter_module("paho_mqtt", log::LevelFilter::Warn)
        .filter_module("tether_agent", log::LevelFilter::Warn)
        .filter_module("winit", log::LevelFilter::Warn)
        .filter_module("eframe", log::LevelFilter::Warn)
        .init();

    debug!("Started; args: {:?}", cli);

    let model = match Model::new(&cli) {
        Ok(model) => model,
        Err(e) => {
            error!("Failed to start Gesture Frontend: {:#}", e);
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(1280.0, 800.0)),
        ..Default::default()
    };
    eframe::run_native(
        "Tether Gesture Control",
        options,
        Box::new(move |_cc| Box::new(model)),
    )
}
