//! Input actuators perform the logical key and pointer actions requested by the
//! gesture dispatcher. Actions are fire-and-forget: failures are logged, never
//! reported back or retried.

#[cfg(target_os = "macos")]
mod macos_input;
mod queued;
#[cfg(target_os = "windows")]
mod windows_input;

use log::warn;
use serde::{Deserialize, Serialize};

pub use queued::QueuedActuator;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionKey {
    Left,
    Right,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum InputAction {
    KeyDown { key: DirectionKey },
    KeyUp { key: DirectionKey },
    PointerButtonDown,
    PointerButtonUp,
    /// Absolute screen position
    PointerSetPosition { x: i32, y: i32 },
}

pub trait InputActuator {
    fn perform(&mut self, action: InputAction);

    fn pointer_position(&mut self) -> (i32, i32);

    fn screen_centre(&self) -> (i32, i32);

    /// Actions waiting to be forwarded elsewhere, oldest first. Actuators that
    /// act immediately have nothing pending.
    fn take_pending(&mut self) -> Vec<InputAction> {
        Vec::new()
    }
}

#[derive(clap::ValueEnum, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorKind {
    /// Inject key and pointer events into this machine's OS
    Native,
    /// Publish actions on Tether for another agent to perform
    Tether,
}

/// Native injection is only available on Windows and macOS; anywhere else this
/// falls back to the queued actuator.
pub fn create_actuator(kind: ActuatorKind, screen_size: (i32, i32)) -> Box<dyn InputActuator> {
    match kind {
        ActuatorKind::Native => match native_actuator() {
            Some(actuator) => actuator,
            None => {
                warn!("No native input actuator for this platform; publishing actions via Tether instead");
                Box::new(QueuedActuator::new(screen_size))
            }
        },
        ActuatorKind::Tether => Box::new(QueuedActuator::new(screen_size)),
    }
}

#[cfg(target_os = "windows")]
fn native_actuator() -> Option<Box<dyn InputActuator>> {
    Some(Box::new(windows_input::WindowsActuator))
}

#[cfg(target_os = "macos")]
fn native_actuator() -> Option<Box<dyn InputActuator>> {
    Some(Box::new(macos_input::MacActuator::default()))
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn native_actuator() -> Option<Box<dyn InputActuator>> {
    None
}
