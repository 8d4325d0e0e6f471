use clap::Parser;
use tether_gesture_control::actuator::create_actuator;
use tether_gesture_control::backend_config::load_config_from_file;
use tether_gesture_control::systems::Systems;
use tether_gesture_control::tether_interface::{
    Inputs, Outputs, handle_adjust_elevation_message, handle_depth_message,
    handle_drag_lock_message, handle_skeleton_message, publish_pending_actions, request_elevation,
};

use anyhow::{Context, Result};
use env_logger::Env;
use log::{debug, error, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;
use tether_agent::TetherAgentOptionsBuilder;

mod cli;

use cli::Cli;

/// Set by the Ctrl-C / SIGTERM handler
static SHUTDOWN_REQUESTED: AtomicBool = AtomicBool::new(false);

fn main() {
    let cli = Cli::parse();

    // Initialize the logger from the environment

    env_logger::Builder::from_env(Env::default().default_filter_or(&cli.log_level))
        .filter_module("paho_mqtt", log::LevelFilter::Warn)
        .filter_module("tether_agent", log::LevelFilter::Warn)
        .init();

    debug!("Started; args: {:?}", cli);

    // Startup failures are fatal; there is no retry
    if let Err(e) = run(&cli) {
        error!("Gesture backend stopped: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut tether_agent = TetherAgentOptionsBuilder::new(&cli.agent_role)
        .id(Some(&cli.agent_group))
        .host(Some(&cli.tether_host.to_string()))
        .build()
        .context("failed to init and/or connect Tether Agent")?;

    let inputs = Inputs::new(&mut tether_agent)?;
    let outputs = Outputs::new(&mut tether_agent)?;

    let mut config = load_config_from_file(&cli.config_path)?;
    info!("Loaded gesture config OK; publish with retain=true");
    // Always publish on first start/load...
    tether_agent
        .encode_and_publish(&outputs.config_output, &config)
        .context("failed to publish config")?;

    let mut systems = Systems::new(&config);
    let mut actuator = create_actuator(cli.actuator, config.screen_size());
    info!("Using {:?} input actuator", cli.actuator);

    request_elevation(systems.camera_elevation.angle(), &tether_agent, &outputs);

    ctrlc::set_handler(|| SHUTDOWN_REQUESTED.store(true, Ordering::SeqCst))
        .context("failed to install shutdown handler")?;

    while !SHUTDOWN_REQUESTED.load(Ordering::SeqCst) {
        let mut work_done = false;

        if let Some((topic, message)) = tether_agent.check_messages() {
            work_done = true;

            if inputs.skeleton_frames_input.matches(&topic) {
                handle_skeleton_message(
                    &message,
                    &mut systems,
                    actuator.as_mut(),
                    &tether_agent,
                    &outputs,
                );
            }

            if inputs.depth_frames_input.matches(&topic) && !cli.depth_image_disable {
                handle_depth_message(&message, &systems, &tether_agent, &outputs);
            }

            if inputs.save_config_input.matches(&topic) {
                if let Err(e) = config.handle_save_message(
                    &tether_agent,
                    &outputs.config_output,
                    &message,
                    &cli.config_path,
                ) {
                    warn!("Config save failed: {}", e);
                }
                systems.update_config(&config);
            }

            if inputs.adjust_elevation_input.matches(&topic) {
                handle_adjust_elevation_message(
                    &message,
                    &mut systems,
                    &tether_agent,
                    &outputs,
                );
            }

            if inputs.drag_lock_input.matches(&topic) {
                handle_drag_lock_message(&message, &mut systems);
            }
        }

        if !work_done {
            thread::sleep(Duration::from_millis(1));
        }
    }

    // No key or pointer button may stay held once the agent is gone
    info!("Shutdown requested; releasing held inputs");
    systems.dispatcher.release_all(actuator.as_mut());
    publish_pending_actions(actuator.as_mut(), &tether_agent, &outputs);

    Ok(())
}
