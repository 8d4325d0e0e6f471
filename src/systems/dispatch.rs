use std::time::{Duration, Instant};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    actuator::{DirectionKey, InputAction, InputActuator},
    geometry_utils::truncated_delta,
    tracking::JointSet,
    Point2D,
};

use super::gesture::{side_of, GestureState, Side};

/// Fixed part of the settle delay after a left-hand gesture
pub const SETTLE_DELAY_BASE: Duration = Duration::from_millis(20);
/// Screen pixels moved per depth-image pixel of hand movement while dragging
pub const DEFAULT_DRAG_SCALE: i32 = 8;

#[derive(Debug, Clone, Copy)]
pub struct DispatchSettings {
    pub drag_scale: i32,
    /// Added to SETTLE_DELAY_BASE
    pub settle_delay_offset: Duration,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        DispatchSettings {
            drag_scale: DEFAULT_DRAG_SCALE,
            settle_delay_offset: Duration::ZERO,
        }
    }
}

/// The two side indicators shown to the user; both are lit while dragging
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Markers {
    pub left: bool,
    pub right: bool,
}

pub struct ActionDispatcher {
    settings: DispatchSettings,
    left_key_down: bool,
    right_key_down: bool,
    pointer_down: bool,
    /// Last sampled hands centroid; Some only while continuously in TwoHands
    reference: Option<Point2D>,
    drag_lock: bool,
    markers: Markers,
    previous: Option<GestureState>,
    settle_until: Option<Instant>,
}

impl ActionDispatcher {
    pub fn new(settings: DispatchSettings) -> Self {
        ActionDispatcher {
            settings,
            left_key_down: false,
            right_key_down: false,
            pointer_down: false,
            reference: None,
            drag_lock: false,
            markers: Markers::default(),
            previous: None,
            settle_until: None,
        }
    }

    pub fn update_settings(&mut self, settings: DispatchSettings) {
        self.settings = settings;
    }

    /// True while frames should be skipped after entering LeftHand
    pub fn is_settling(&self, now: Instant) -> bool {
        matches!(self.settle_until, Some(deadline) if now < deadline)
    }

    /// Re-enable (or clear) drag-lock from outside. While not dragging, an
    /// enabled drag-lock recentres the pointer on the next frame.
    pub fn set_drag_lock(&mut self, enabled: bool) {
        self.drag_lock = enabled;
    }

    pub fn drag_lock(&self) -> bool {
        self.drag_lock
    }

    pub fn markers(&self) -> Markers {
        self.markers
    }

    pub fn reference(&self) -> Option<Point2D> {
        self.reference
    }

    pub fn is_pointer_down(&self) -> bool {
        self.pointer_down
    }

    pub fn dispatch(
        &mut self,
        state: GestureState,
        joints: &JointSet,
        actuator: &mut dyn InputActuator,
        now: Instant,
    ) {
        if self.previous != Some(state) {
            debug!("Gesture {:?} -> {:?}", self.previous, state);
        }

        if state != GestureState::TwoHands {
            self.leave_drag(actuator);
        }

        match state {
            GestureState::NoHands => {
                self.release_key(DirectionKey::Left, actuator);
                self.release_key(DirectionKey::Right, actuator);
                self.drag_lock = false;
                self.markers = Markers::default();
            }
            GestureState::RightHand | GestureState::LeftHand => {
                if let Some(hand) = state.raised_hand(joints) {
                    let side = side_of(hand, &joints.head);
                    self.press_key(side, actuator);
                }
                if state == GestureState::LeftHand && self.previous != Some(GestureState::LeftHand) {
                    self.settle_until = Some(now + SETTLE_DELAY_BASE + self.settings.settle_delay_offset);
                }
            }
            GestureState::TwoHands => self.drag(joints, actuator),
        }

        self.previous = Some(state);
    }

    /// Repeated key-downs while held are intentional (they drive auto-repeat)
    fn press_key(&mut self, side: Side, actuator: &mut dyn InputActuator) {
        let key = match side {
            Side::Left => {
                self.left_key_down = true;
                self.markers = Markers {
                    left: true,
                    right: false,
                };
                DirectionKey::Left
            }
            Side::Right => {
                self.right_key_down = true;
                self.markers = Markers {
                    left: false,
                    right: true,
                };
                DirectionKey::Right
            }
        };
        actuator.perform(InputAction::KeyDown { key });
    }

    fn release_key(&mut self, key: DirectionKey, actuator: &mut dyn InputActuator) {
        let held = match key {
            DirectionKey::Left => &mut self.left_key_down,
            DirectionKey::Right => &mut self.right_key_down,
        };
        if *held {
            *held = false;
            actuator.perform(InputAction::KeyUp { key });
        }
    }

    fn press_pointer(&mut self, actuator: &mut dyn InputActuator) {
        if !self.pointer_down {
            self.pointer_down = true;
            actuator.perform(InputAction::PointerButtonDown);
        }
    }

    fn release_pointer(&mut self, actuator: &mut dyn InputActuator) {
        if self.pointer_down {
            self.pointer_down = false;
            actuator.perform(InputAction::PointerButtonUp);
        }
    }

    fn drag(&mut self, joints: &JointSet, actuator: &mut dyn InputActuator) {
        let centre = joints.hands_centroid();
        self.press_pointer(actuator);
        self.drag_lock = true;
        self.markers = Markers {
            left: true,
            right: true,
        };

        if let Some(reference) = self.reference {
            let (dx, dy) = truncated_delta(reference, centre);
            let (x, y) = actuator.pointer_position();
            let scale = self.settings.drag_scale;
            actuator.perform(InputAction::PointerSetPosition {
                x: x.saturating_add(dx.saturating_mul(scale)),
                y: y.saturating_add(dy.saturating_mul(scale)),
            });
        } else {
            info!("Drag started at {:?}", centre);
        }

        self.reference = Some(centre);
    }

    /// Tracking dropped out; the next classified frame counts as a fresh entry
    pub fn tracking_lost(&mut self) {
        self.previous = None;
    }

    /// Release every held key and the pointer button, e.g. before shutting down
    pub fn release_all(&mut self, actuator: &mut dyn InputActuator) {
        self.release_key(DirectionKey::Left, actuator);
        self.release_key(DirectionKey::Right, actuator);
        self.release_pointer(actuator);
        self.reference = None;
        self.drag_lock = false;
        self.markers = Markers::default();
        self.previous = None;
    }

    /// Runs on every frame that is not TwoHands
    fn leave_drag(&mut self, actuator: &mut dyn InputActuator) {
        let was_dragging = self.reference.take().is_some();
        self.release_pointer(actuator);
        if was_dragging {
            info!("Drag ended");
        } else if self.drag_lock {
            let (x, y) = actuator.screen_centre();
            debug!("Drag-lock re-enabled while idle; recentre pointer at {x},{y}");
            actuator.perform(InputAction::PointerSetPosition { x, y });
        }
        self.drag_lock = false;
    }
}
