pub mod depth_visualizer;
pub mod dispatch;
pub mod elevation;
pub mod gesture;
pub mod joint_tracking;

use std::time::Instant;

use dispatch::{ActionDispatcher, Markers};
use elevation::CameraElevation;
use gesture::{classify, readout, GestureReadout, GestureState};
use joint_tracking::{JointTracker, KinectProjection, Tracking};
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    actuator::InputActuator, backend_config::BackendConfig, error::FormatError,
    frames::Skeleton, tracking::JointSet,
};

/// Everything a UI needs after one classified skeleton frame
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GestureReport {
    pub state: GestureState,
    pub label: String,
    pub markers: Markers,
    pub readout: GestureReadout,
    pub drag_lock: bool,
    pub joints: JointSet,
}

pub struct Systems {
    pub joint_tracker: JointTracker<KinectProjection>,
    pub joints: JointSet,
    pub dispatcher: ActionDispatcher,
    pub camera_elevation: CameraElevation,
    thresholds: (i32, i32),
}

impl Systems {
    pub fn new(config: &BackendConfig) -> Systems {
        Systems {
            joint_tracker: JointTracker::new(KinectProjection),
            joints: JointSet::default(),
            dispatcher: ActionDispatcher::new(config.dispatch_settings()),
            camera_elevation: CameraElevation::new(config.initial_elevation, config.elevation_step),
            thresholds: (config.depth_thresh_one, config.depth_thresh_two),
        }
    }

    pub fn update_config(&mut self, config: &BackendConfig) {
        info!(
            "Apply config: thresholds {}/{}, drag scale {}, settle offset {}ms",
            config.depth_thresh_one,
            config.depth_thresh_two,
            config.drag_scale,
            config.settle_delay_offset_ms
        );
        self.thresholds = (config.depth_thresh_one, config.depth_thresh_two);
        self.dispatcher.update_settings(config.dispatch_settings());
        self.camera_elevation.set_step(config.elevation_step);
    }

    /// Track joints, then classify and dispatch. Returns None when the frame had
    /// no tracked skeleton, or arrived while the dispatcher is settling.
    pub fn handle_skeleton_frame(
        &mut self,
        skeletons: &[Skeleton],
        actuator: &mut dyn InputActuator,
        now: Instant,
    ) -> Option<GestureReport> {
        let tracking = self.joint_tracker.extract(skeletons, self.joints);
        self.joints = *tracking.joints();

        let Tracking::Tracked(joints) = tracking else {
            self.dispatcher.tracking_lost();
            return None;
        };

        if self.dispatcher.is_settling(now) {
            debug!("Settling after left-hand gesture; skip classification");
            return None;
        }

        let JointSet {
            head,
            hand_right,
            hand_left,
        } = &joints;
        let (thresh_one, thresh_two) = self.thresholds;
        let state = classify(head, hand_right, hand_left, thresh_one, thresh_two);

        self.dispatcher.dispatch(state, &joints, actuator, now);

        Some(GestureReport {
            state,
            label: state.label().into(),
            markers: self.dispatcher.markers(),
            readout: readout(head, hand_right, hand_left),
            drag_lock: self.dispatcher.drag_lock(),
            joints,
        })
    }

    /// Render a depth frame with the latest joint positions overlaid
    pub fn render_depth(&self, depth_buffer: &[u8]) -> Result<Vec<u8>, FormatError> {
        depth_visualizer::render(depth_buffer, &self.joints)
    }
}
