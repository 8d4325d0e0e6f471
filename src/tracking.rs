use serde::{Deserialize, Serialize};

use crate::{
    geometry_utils::{centroid, clamp_to_grid},
    Point2D, HEIGHT, WIDTH,
};

/// A joint position in depth-image pixel space, plus the raw sensor depth value.
///
/// Invalidating a point leaves its coordinates and depth untouched, so an
/// untracked joint keeps reporting where it was last seen.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct TrackedPoint {
    pub x: f32,
    pub y: f32,
    pub depth: i32,
    pub is_valid: bool,
}

impl TrackedPoint {
    pub fn new(x: f32, y: f32, depth: i32) -> Self {
        TrackedPoint {
            x: clamp_to_grid(x, WIDTH),
            y: clamp_to_grid(y, HEIGHT),
            depth,
            is_valid: true,
        }
    }

    pub fn invalidate(&mut self) {
        self.is_valid = false;
    }

    pub fn position(&self) -> Point2D {
        (self.x, self.y)
    }

    /// The pixel this point falls in
    pub fn pixel(&self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }
}

/// The three joints the gesture pipeline cares about, passed frame to frame by value
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct JointSet {
    pub head: TrackedPoint,
    pub hand_right: TrackedPoint,
    pub hand_left: TrackedPoint,
}

impl JointSet {
    /// Drawing order for overlays: head, right hand, left hand
    pub fn points(&self) -> [&TrackedPoint; 3] {
        [&self.head, &self.hand_right, &self.hand_left]
    }

    pub fn hands_centroid(&self) -> Point2D {
        centroid(&[self.hand_left.position(), self.hand_right.position()])
            .unwrap_or_else(|| self.hand_left.position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_points_are_clamped_and_valid() {
        let p = TrackedPoint::new(-12., 500., 4000);
        assert_eq!(p.x, 0.);
        assert_eq!(p.y, (HEIGHT - 1) as f32);
        assert_eq!(p.depth, 4000);
        assert!(p.is_valid);
    }

    #[test]
    fn default_point_is_invalid() {
        assert!(!TrackedPoint::default().is_valid);
    }

    #[test]
    fn invalidate_keeps_stale_position() {
        let mut p = TrackedPoint::new(100.7, 50.2, 9000);
        p.invalidate();
        assert!(!p.is_valid);
        assert_eq!(p.pixel(), (100, 50));
        assert_eq!(p.depth, 9000);
    }

    #[test]
    fn centroid_is_midpoint_of_hands() {
        let joints = JointSet {
            head: TrackedPoint::new(160., 120., 0),
            hand_right: TrackedPoint::new(200., 100., 0),
            hand_left: TrackedPoint::new(100., 140., 0),
        };
        assert_eq!(joints.hands_centroid(), (150., 120.));
    }
}
