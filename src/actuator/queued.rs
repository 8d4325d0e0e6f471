use super::{InputAction, InputActuator};

/// Collects actions for publishing, tracking a virtual pointer on a screen of
/// the configured size. The pointer starts at the screen centre.
pub struct QueuedActuator {
    pending: Vec<InputAction>,
    pointer: (i32, i32),
    screen_size: (i32, i32),
}

impl QueuedActuator {
    pub fn new(screen_size: (i32, i32)) -> Self {
        let (width, height) = screen_size;
        QueuedActuator {
            pending: Vec::new(),
            pointer: (width / 2, height / 2),
            screen_size,
        }
    }
}

impl InputActuator for QueuedActuator {
    /// Pointer moves are clamped to the screen before they are queued
    fn perform(&mut self, action: InputAction) {
        let action = match action {
            InputAction::PointerSetPosition { x, y } => {
                let (width, height) = self.screen_size;
                self.pointer = (x.clamp(0, (width - 1).max(0)), y.clamp(0, (height - 1).max(0)));
                let (x, y) = self.pointer;
                InputAction::PointerSetPosition { x, y }
            }
            other => other,
        };
        self.pending.push(action);
    }

    fn pointer_position(&mut self) -> (i32, i32) {
        self.pointer
    }

    fn screen_centre(&self) -> (i32, i32) {
        let (width, height) = self.screen_size;
        (width / 2, height / 2)
    }

    fn take_pending(&mut self) -> Vec<InputAction> {
        std::mem::take(&mut self.pending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_pointer_follows_and_clamps() {
        let mut actuator = QueuedActuator::new((800, 600));
        assert_eq!(actuator.pointer_position(), (400, 300));

        actuator.perform(InputAction::PointerSetPosition { x: 420, y: 280 });
        assert_eq!(actuator.pointer_position(), (420, 280));

        actuator.perform(InputAction::PointerSetPosition { x: -50, y: 9000 });
        assert_eq!(actuator.pointer_position(), (0, 599));
        assert_eq!(
            actuator.take_pending().last(),
            Some(&InputAction::PointerSetPosition { x: 0, y: 599 })
        );
    }

    #[test]
    fn pending_actions_drain_in_order() {
        let mut actuator = QueuedActuator::new((800, 600));
        actuator.perform(InputAction::PointerButtonDown);
        actuator.perform(InputAction::PointerButtonUp);
        assert_eq!(
            actuator.take_pending(),
            vec![InputAction::PointerButtonDown, InputAction::PointerButtonUp]
        );
        assert!(actuator.take_pending().is_empty());
    }
}
