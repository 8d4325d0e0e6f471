pub mod actuator;
pub mod backend_config;
pub mod error;
pub mod frames;
pub mod geometry_utils;
pub mod systems;
pub mod tether_interface;
pub mod tracking;

pub type Point2D = (f32, f32);

/// Width of the depth map, in pixels
pub const WIDTH: usize = 320;
/// Height of the depth map, in pixels
pub const HEIGHT: usize = 240;
