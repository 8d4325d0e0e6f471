use log::debug;

use crate::{
    frames::{JointId, Skeleton},
    tracking::{JointSet, TrackedPoint},
    HEIGHT, WIDTH,
};

/// Maps a skeleton-space position onto the depth image.
///
/// Returns normalised image coordinates (nominally `[0;1]` on both axes, but
/// not guaranteed to stay in range) and the raw depth value in sensor units.
pub trait DepthProjection {
    fn skeleton_to_depth_image(&self, position: (f32, f32, f32)) -> (f32, f32, i32);
}

/// Focal multiplier for the 320x240 depth stream
const SKELETON_TO_DEPTH_IMAGE_MULTIPLIER: f32 = 285.63;

/// Depth values carry the 3 player-index bits below the millimetre value
const DEPTH_PLAYER_INDEX_BITS: i32 = 3;

/// The Kinect (v1) skeleton-to-depth transform
#[derive(Debug, Default, Clone, Copy)]
pub struct KinectProjection;

impl DepthProjection for KinectProjection {
    fn skeleton_to_depth_image(&self, position: (f32, f32, f32)) -> (f32, f32, i32) {
        let (x, y, z) = position;
        if z <= f32::EPSILON {
            return (0.5, 0.5, 0);
        }
        let nx = 0.5 + x * SKELETON_TO_DEPTH_IMAGE_MULTIPLIER / (WIDTH as f32 * z);
        let ny = 0.5 - y * SKELETON_TO_DEPTH_IMAGE_MULTIPLIER / (HEIGHT as f32 * z);
        let millimetres = (z * 1000.) as i32;
        let depth = millimetres
            .saturating_mul(1 << DEPTH_PLAYER_INDEX_BITS)
            .min(i16::MAX as i32);
        (nx, ny, depth)
    }
}

pub enum Tracking {
    /// A tracked skeleton updated the joints
    Tracked(JointSet),
    /// Nothing tracked; head and right hand were invalidated, positions kept
    Lost(JointSet),
}

impl Tracking {
    pub fn joints(&self) -> &JointSet {
        match self {
            Tracking::Tracked(joints) | Tracking::Lost(joints) => joints,
        }
    }
}

pub struct JointTracker<P: DepthProjection> {
    projection: P,
}

impl<P: DepthProjection> JointTracker<P> {
    pub fn new(projection: P) -> Self {
        JointTracker { projection }
    }

    /// Only the first tracked skeleton in the frame is used
    pub fn extract(&self, skeletons: &[Skeleton], previous: JointSet) -> Tracking {
        let mut joints = previous;
        match skeletons.iter().find(|s| s.is_tracked()) {
            Some(skeleton) => {
                for joint in skeleton.joints.iter() {
                    let target = match joint.id {
                        JointId::Spine => &mut joints.head,
                        JointId::WristRight => &mut joints.hand_right,
                        JointId::WristLeft => &mut joints.hand_left,
                        _ => continue,
                    };
                    *target = self.project(joint.position);
                }
                Tracking::Tracked(joints)
            }
            None => {
                debug!("No tracked skeleton in frame of {}", skeletons.len());
                joints.head.invalidate();
                joints.hand_right.invalidate();
                Tracking::Lost(joints)
            }
        }
    }

    fn project(&self, position: (f32, f32, f32)) -> TrackedPoint {
        let (nx, ny, depth) = self.projection.skeleton_to_depth_image(position);
        TrackedPoint::new(nx * WIDTH as f32, ny * HEIGHT as f32, depth)
    }
}
