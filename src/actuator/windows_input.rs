use log::debug;
use windows::Win32::Foundation::POINT;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    keybd_event, mouse_event, KEYBD_EVENT_FLAGS, KEYEVENTF_KEYUP, MOUSEEVENTF_LEFTDOWN,
    MOUSEEVENTF_LEFTUP, VK_LEFT, VK_RIGHT,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetCursorPos, GetSystemMetrics, SetCursorPos, SM_CXSCREEN, SM_CYSCREEN,
};

use super::{DirectionKey, InputAction, InputActuator};

/// Injects events through the legacy user32 keyboard/mouse calls
pub struct WindowsActuator;

fn virtual_key(key: DirectionKey) -> u8 {
    match key {
        DirectionKey::Left => VK_LEFT.0 as u8,
        DirectionKey::Right => VK_RIGHT.0 as u8,
    }
}

impl InputActuator for WindowsActuator {
    fn perform(&mut self, action: InputAction) {
        unsafe {
            match action {
                InputAction::KeyDown { key } => {
                    keybd_event(virtual_key(key), 0, KEYBD_EVENT_FLAGS(0), 0)
                }
                InputAction::KeyUp { key } => keybd_event(virtual_key(key), 0, KEYEVENTF_KEYUP, 0),
                InputAction::PointerButtonDown => mouse_event(MOUSEEVENTF_LEFTDOWN, 0, 0, 0, 0),
                InputAction::PointerButtonUp => mouse_event(MOUSEEVENTF_LEFTUP, 0, 0, 0, 0),
                InputAction::PointerSetPosition { x, y } => {
                    if let Err(e) = SetCursorPos(x, y) {
                        debug!("SetCursorPos({x},{y}) failed: {e}");
                    }
                }
            }
        }
    }

    fn pointer_position(&mut self) -> (i32, i32) {
        let mut point = POINT::default();
        match unsafe { GetCursorPos(&mut point) } {
            Ok(()) => (point.x, point.y),
            Err(e) => {
                debug!("GetCursorPos failed: {e}");
                self.screen_centre()
            }
        }
    }

    fn screen_centre(&self) -> (i32, i32) {
        unsafe {
            (
                GetSystemMetrics(SM_CXSCREEN) / 2,
                GetSystemMetrics(SM_CYSCREEN) / 2,
            )
        }
    }
}
