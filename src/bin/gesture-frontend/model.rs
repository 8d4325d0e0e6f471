use std::collections::VecDeque;

use anyhow::{Context, Result};
use egui::{ColorImage, TextureHandle, TextureOptions};
use log::{debug, info, warn};
use tether_agent::{PlugDefinition, PlugOptionsBuilder, TetherAgent, TetherAgentOptionsBuilder};
use tether_gesture_control::{
    backend_config::BackendConfig,
    frames::ColorFrame,
    systems::{
        GestureReport,
        depth_visualizer::bgr_to_rgb,
        gesture::GestureReadout,
    },
    tether_interface::{
        ADJUST_ELEVATION, COLOUR_FRAMES, DEPTH_IMAGE, GESTURE_STATE, PROVIDE_CONFIG, SAVE_CONFIG,
        SET_DRAG_LOCK,
    },
    HEIGHT, WIDTH,
};

use crate::cli::Cli;
use crate::ui::render_ui;

pub struct Inputs {
    pub gesture_state: PlugDefinition,
    pub depth_image: PlugDefinition,
    pub colour_frames: PlugDefinition,
    pub config: PlugDefinition,
}

pub struct Outputs {
    pub save_config: PlugDefinition,
    pub adjust_elevation: PlugDefinition,
    pub drag_lock: PlugDefinition,
}

pub struct Model {
    pub tether_agent: TetherAgent,
    pub inputs: Inputs,
    pub outputs: Outputs,
    pub backend_config: Option<BackendConfig>,
    pub is_editing: bool,
    pub report: Option<GestureReport>,
    pub readout_history: VecDeque<GestureReadout>,
    pub history_length: usize,
    pub depth_texture: Option<TextureHandle>,
    pub colour_texture: Option<TextureHandle>,
    pub show_raw_video: bool,
}

impl Model {
    pub fn new(cli: &Cli) -> Result<Self> {
        let mut tether_agent = TetherAgentOptionsBuilder::new("gestureFrontend")
            .host(Some(&cli.tether_host.to_string()))
            .build()
            .context("failed to init+connect Tether Agent")?;

        let inputs = Inputs {
            gesture_state: PlugOptionsBuilder::create_input(GESTURE_STATE)
                .build(&mut tether_agent)?,
            depth_image: PlugOptionsBuilder::create_input(DEPTH_IMAGE).build(&mut tether_agent)?,
            colour_frames: PlugOptionsBuilder::create_input(COLOUR_FRAMES)
                .build(&mut tether_agent)?,
            config: PlugOptionsBuilder::create_input(PROVIDE_CONFIG).build(&mut tether_agent)?,
        };

        let outputs = Outputs {
            save_config: PlugOptionsBuilder::create_output(SAVE_CONFIG)
                .qos(Some(2))
                .build(&mut tether_agent)?,
            adjust_elevation: PlugOptionsBuilder::create_output(ADJUST_ELEVATION)
                .qos(Some(1))
                .build(&mut tether_agent)?,
            drag_lock: PlugOptionsBuilder::create_output(SET_DRAG_LOCK)
                .qos(Some(1))
                .build(&mut tether_agent)?,
        };

        info!("Gesture Frontend started OK");

        Ok(Model {
            tether_agent,
            inputs,
            outputs,
            backend_config: None,
            is_editing: false,
            report: None,
            readout_history: VecDeque::with_capacity(cli.history_length),
            history_length: cli.history_length,
            depth_texture: None,
            colour_texture: None,
            show_raw_video: false,
        })
    }

    /// Drain everything waiting on Tether before drawing
    fn check_tether_messages(&mut self, ctx: &egui::Context) {
        while let Some((topic, message)) = self.tether_agent.check_messages() {
            if self.inputs.gesture_state.matches(&topic) {
                match rmp_serde::from_slice::<GestureReport>(&message) {
                    Ok(report) => self.push_report(report),
                    Err(e) => warn!("Failed to decode gesture report: {}", e),
                }
            }

            if self.inputs.depth_image.matches(&topic) {
                match bgr_to_rgb(&message) {
                    Ok(rgb) => {
                        let image = ColorImage::from_rgb([WIDTH, HEIGHT], &rgb);
                        update_texture(&mut self.depth_texture, ctx, "depth", image);
                    }
                    Err(e) => warn!("Dropping depth image: {}", e),
                }
            }

            if self.inputs.colour_frames.matches(&topic) && self.show_raw_video {
                match rmp_serde::from_slice::<ColorFrame>(&message) {
                    Ok(frame) => match frame.to_rgb() {
                        Ok(rgb) => {
                            let image = ColorImage::from_rgb([frame.width, frame.height], &rgb);
                            update_texture(&mut self.colour_texture, ctx, "colour", image);
                        }
                        Err(e) => warn!("Dropping colour frame: {}", e),
                    },
                    Err(e) => warn!("Failed to decode colour frame: {}", e),
                }
            }

            if self.inputs.config.matches(&topic) {
                if self.is_editing {
                    debug!("Ignore incoming config while editing");
                } else {
                    match rmp_serde::from_slice::<BackendConfig>(&message) {
                        Ok(config) => {
                            info!("Received gesture config from backend");
                            self.backend_config = Some(config);
                        }
                        Err(e) => warn!("Failed to decode config: {}", e),
                    }
                }
            }
        }
    }

    fn push_report(&mut self, report: GestureReport) {
        if self.readout_history.len() >= self.history_length {
            self.readout_history.pop_front();
        }
        self.readout_history.push_back(report.readout);
        self.report = Some(report);
    }
}

fn update_texture(
    slot: &mut Option<TextureHandle>,
    ctx: &egui::Context,
    name: &str,
    image: ColorImage,
) {
    match slot {
        Some(texture) => texture.set(image, TextureOptions::default()),
        None => *slot = Some(ctx.load_texture(name, image, TextureOptions::default())),
    }
}

impl eframe::App for Model {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_tether_messages(ctx);
        render_ui(ctx, self);
        ctx.request_repaint();
    }
}
