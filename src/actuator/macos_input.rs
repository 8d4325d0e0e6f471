use core_graphics::display::CGDisplay;
use core_graphics::event::{CGEvent, CGEventTapLocation, CGEventType, CGKeyCode, CGMouseButton};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use core_graphics::geometry::CGPoint;
use log::debug;

use super::{DirectionKey, InputAction, InputActuator};

const KEY_LEFT_ARROW: CGKeyCode = 123;
const KEY_RIGHT_ARROW: CGKeyCode = 124;

/// Posts synthetic events at the HID level through Quartz
#[derive(Default)]
pub struct MacActuator {
    button_down: bool,
}

fn event_source() -> Option<CGEventSource> {
    CGEventSource::new(CGEventSourceStateID::HIDSystemState).ok()
}

fn key_code(key: DirectionKey) -> CGKeyCode {
    match key {
        DirectionKey::Left => KEY_LEFT_ARROW,
        DirectionKey::Right => KEY_RIGHT_ARROW,
    }
}

impl MacActuator {
    fn post_key(&self, key: DirectionKey, down: bool) {
        let event = event_source().and_then(|source| {
            CGEvent::new_keyboard_event(source, key_code(key), down).ok()
        });
        match event {
            Some(event) => event.post(CGEventTapLocation::HID),
            None => debug!("Could not create keyboard event for {:?}", key),
        }
    }

    fn post_mouse(&self, event_type: CGEventType, position: CGPoint) {
        let event = event_source().and_then(|source| {
            CGEvent::new_mouse_event(source, event_type, position, CGMouseButton::Left).ok()
        });
        match event {
            Some(event) => event.post(CGEventTapLocation::HID),
            None => debug!("Could not create mouse event"),
        }
    }
}

impl InputActuator for MacActuator {
    fn perform(&mut self, action: InputAction) {
        match action {
            InputAction::KeyDown { key } => self.post_key(key, true),
            InputAction::KeyUp { key } => self.post_key(key, false),
            InputAction::PointerButtonDown => {
                let (x, y) = self.pointer_position();
                self.post_mouse(CGEventType::LeftMouseDown, CGPoint::new(x as f64, y as f64));
                self.button_down = true;
            }
            InputAction::PointerButtonUp => {
                let (x, y) = self.pointer_position();
                self.post_mouse(CGEventType::LeftMouseUp, CGPoint::new(x as f64, y as f64));
                self.button_down = false;
            }
            InputAction::PointerSetPosition { x, y } => {
                // Moves with the button held must be drags, or apps never see them
                let event_type = if self.button_down {
                    CGEventType::LeftMouseDragged
                } else {
                    CGEventType::MouseMoved
                };
                self.post_mouse(event_type, CGPoint::new(x as f64, y as f64));
            }
        }
    }

    fn pointer_position(&mut self) -> (i32, i32) {
        match event_source().and_then(|source| CGEvent::new(source).ok()) {
            Some(event) => {
                let location = event.location();
                (location.x as i32, location.y as i32)
            }
            None => self.screen_centre(),
        }
    }

    fn screen_centre(&self) -> (i32, i32) {
        let bounds = CGDisplay::main().bounds();
        (
            (bounds.size.width / 2.) as i32,
            (bounds.size.height / 2.) as i32,
        )
    }
}
