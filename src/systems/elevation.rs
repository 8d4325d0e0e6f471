use log::debug;

/// Tilt motor limits, in degrees
pub const MIN_ELEVATION: i32 = -27;
pub const MAX_ELEVATION: i32 = 27;

/// Tracks the requested camera tilt. Requests are best-effort: the sensor bridge
/// may ignore them, and nothing here waits for confirmation.
pub struct CameraElevation {
    angle: i32,
    step: i32,
}

impl CameraElevation {
    pub fn new(initial: i32, step: i32) -> Self {
        CameraElevation {
            angle: initial.clamp(MIN_ELEVATION, MAX_ELEVATION),
            step,
        }
    }

    pub fn angle(&self) -> i32 {
        self.angle
    }

    pub fn set_step(&mut self, step: i32) {
        self.step = step;
    }

    /// Move one step up (positive direction) or down (negative). Returns the new
    /// angle, or None if already at the limit.
    pub fn adjust(&mut self, direction: i8) -> Option<i32> {
        let target = (self.angle + self.step * direction.signum() as i32)
            .clamp(MIN_ELEVATION, MAX_ELEVATION);
        if target == self.angle {
            debug!("Elevation already at {}; ignore", self.angle);
            None
        } else {
            self.angle = target;
            Some(target)
        }
    }
}
