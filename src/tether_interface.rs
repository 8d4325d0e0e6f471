use std::time::Instant;

use anyhow::Result;
use log::{debug, warn};
use tether_agent::{PlugDefinition, PlugOptionsBuilder, TetherAgent};

use crate::{
    actuator::InputActuator,
    frames::SkeletonFrame,
    systems::Systems,
};

// Plug names shared by the backend and frontend
pub const SKELETON_FRAMES: &str = "skeletonFrames";
pub const DEPTH_FRAMES: &str = "depthFrames";
pub const COLOUR_FRAMES: &str = "colourFrames";
pub const GESTURE_STATE: &str = "gestureState";
pub const DEPTH_IMAGE: &str = "depthImage";
pub const INPUT_ACTIONS: &str = "inputActions";
pub const PROVIDE_CONFIG: &str = "provideGestureConfig";
pub const SAVE_CONFIG: &str = "saveGestureConfig";
pub const ADJUST_ELEVATION: &str = "adjustElevation";
pub const SET_ELEVATION: &str = "setElevation";
pub const SET_DRAG_LOCK: &str = "setDragLock";

pub struct Outputs {
    pub config_output: PlugDefinition,
    pub gesture_state_output: PlugDefinition,
    pub depth_image_output: PlugDefinition,
    pub input_actions_output: PlugDefinition,
    pub elevation_output: PlugDefinition,
}

impl Outputs {
    pub fn new(tether_agent: &mut TetherAgent) -> Result<Outputs> {
        let config_output = PlugOptionsBuilder::create_output(PROVIDE_CONFIG)
            .qos(Some(2))
            .retain(Some(true))
            .build(tether_agent)?;

        let gesture_state_output = PlugOptionsBuilder::create_output(GESTURE_STATE)
            .qos(Some(0))
            .build(tether_agent)?;
        let depth_image_output = PlugOptionsBuilder::create_output(DEPTH_IMAGE)
            .qos(Some(0))
            .build(tether_agent)?;

        // Actions must arrive in order and exactly once
        let input_actions_output = PlugOptionsBuilder::create_output(INPUT_ACTIONS)
            .qos(Some(2))
            .build(tether_agent)?;

        let elevation_output = PlugOptionsBuilder::create_output(SET_ELEVATION)
            .qos(Some(1))
            .build(tether_agent)?;

        Ok(Outputs {
            config_output,
            gesture_state_output,
            depth_image_output,
            input_actions_output,
            elevation_output,
        })
    }
}

pub struct Inputs {
    pub skeleton_frames_input: PlugDefinition,
    pub depth_frames_input: PlugDefinition,
    pub save_config_input: PlugDefinition,
    pub adjust_elevation_input: PlugDefinition,
    pub drag_lock_input: PlugDefinition,
}

impl Inputs {
    pub fn new(tether_agent: &mut TetherAgent) -> Result<Inputs> {
        let skeleton_frames_input = PlugOptionsBuilder::create_input(SKELETON_FRAMES)
            .qos(Some(0))
            .build(tether_agent)?;
        let depth_frames_input = PlugOptionsBuilder::create_input(DEPTH_FRAMES)
            .qos(Some(0))
            .build(tether_agent)?;
        let save_config_input = PlugOptionsBuilder::create_input(SAVE_CONFIG)
            .qos(Some(2))
            .build(tether_agent)?;
        let adjust_elevation_input = PlugOptionsBuilder::create_input(ADJUST_ELEVATION)
            .qos(Some(1))
            .build(tether_agent)?;
        let drag_lock_input = PlugOptionsBuilder::create_input(SET_DRAG_LOCK)
            .qos(Some(1))
            .build(tether_agent)?;

        Ok(Inputs {
            skeleton_frames_input,
            depth_frames_input,
            save_config_input,
            adjust_elevation_input,
            drag_lock_input,
        })
    }
}

pub fn handle_skeleton_message(
    payload: &[u8],
    systems: &mut Systems,
    actuator: &mut dyn InputActuator,
    tether_agent: &TetherAgent,
    outputs: &Outputs,
) {
    let skeletons: SkeletonFrame = match rmp_serde::from_slice(payload) {
        Ok(skeletons) => skeletons,
        Err(e) => {
            warn!("Dropping undecodable skeleton frame: {}", e);
            return;
        }
    };

    if let Some(report) = systems.handle_skeleton_frame(&skeletons, actuator, Instant::now()) {
        publish_pending_actions(actuator, tether_agent, outputs);
        if let Err(e) = tether_agent.encode_and_publish(&outputs.gesture_state_output, &report) {
            warn!("Failed to publish gesture state: {}", e);
        }
    }
}

pub fn handle_depth_message(
    payload: &[u8],
    systems: &Systems,
    tether_agent: &TetherAgent,
    outputs: &Outputs,
) {
    match systems.render_depth(payload) {
        Ok(image) => {
            if let Err(e) = tether_agent.publish(&outputs.depth_image_output, Some(&image)) {
                warn!("Failed to publish depth image: {}", e);
            }
        }
        Err(e) => warn!("Dropping malformed depth frame: {}", e),
    }
}

pub fn handle_adjust_elevation_message(
    payload: &[u8],
    systems: &mut Systems,
    tether_agent: &TetherAgent,
    outputs: &Outputs,
) {
    let Ok(direction) = rmp_serde::from_slice::<i8>(payload) else {
        debug!("Ignoring undecodable elevation request");
        return;
    };
    if let Some(angle) = systems.camera_elevation.adjust(direction) {
        request_elevation(angle, tether_agent, outputs);
    }
}

/// Best-effort: a failed request is not reported
pub fn request_elevation(angle: i32, tether_agent: &TetherAgent, outputs: &Outputs) {
    debug!("Request camera elevation {}°", angle);
    if let Err(e) = tether_agent.encode_and_publish(&outputs.elevation_output, angle) {
        debug!("Elevation request not sent: {}", e);
    }
}

pub fn handle_drag_lock_message(payload: &[u8], systems: &mut Systems) {
    match rmp_serde::from_slice::<bool>(payload) {
        Ok(enabled) => systems.dispatcher.set_drag_lock(enabled),
        Err(e) => warn!("Failed to parse drag-lock message: {}", e),
    }
}

/// Forward whatever a queued actuator collected, in dispatch order
pub fn publish_pending_actions(
    actuator: &mut dyn InputActuator,
    tether_agent: &TetherAgent,
    outputs: &Outputs,
) {
    for action in actuator.take_pending() {
        if let Err(e) = tether_agent.encode_and_publish(&outputs.input_actions_output, action) {
            warn!("Failed to publish input action {:?}: {}", action, e);
        }
    }
}
