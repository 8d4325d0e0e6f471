//! False-colour rendering of the packed depth + player index buffer.
//!
//! Background pixels are drawn as dim grey, banded by depth; any pixel that
//! belongs to a tracked player is drawn in one flat highlight colour so the
//! subject stands out from the scene. Small white squares mark the tracked
//! joints; they are drawn whether or not the joint is currently valid.

use crate::{error::FormatError, frames::DepthFrame, tracking::JointSet, HEIGHT, WIDTH};

/// Output bytes per pixel (BGR)
pub const BYTES_PER_PIXEL: usize = 3;
/// Number of depth bands used for the background shading
pub const MAX_ZONES: u16 = 20;
/// Half-width of the joint marker squares; bounds are exclusive
pub const MARKER_SIZE: i32 = 3;

const SHADE_OFFSET: u16 = 30;
const SUBJECT_COLOUR: [u8; 3] = [55, 55, 200];
const MARKER_COLOUR: [u8; 3] = [255, 255, 255];

pub fn image_len() -> usize {
    WIDTH * HEIGHT * BYTES_PER_PIXEL
}

/// Render a depth buffer to a W×H BGR image, row-major, top to bottom
pub fn render(depth_buffer: &[u8], joints: &JointSet) -> Result<Vec<u8>, FormatError> {
    let frame = DepthFrame::from_bytes(depth_buffer)?;
    let mut image = Vec::with_capacity(image_len());

    for pixel in frame.pixels() {
        if pixel.player_id == 0 {
            // Deliberately 8-bit: far depths wrap back into dark bands
            let shade = ((pixel.depth / MAX_ZONES) + SHADE_OFFSET) as u8 / 3;
            image.extend_from_slice(&[shade, shade, shade]);
        } else {
            image.extend_from_slice(&SUBJECT_COLOUR);
        }
    }

    for point in joints.points() {
        let (cx, cy) = point.pixel();
        paint_marker(&mut image, cx, cy);
    }

    Ok(image)
}

fn paint_marker(image: &mut [u8], cx: i32, cy: i32) {
    let x_range = (cx - MARKER_SIZE + 1).max(0)..(cx + MARKER_SIZE).min(WIDTH as i32);
    let y_range = (cy - MARKER_SIZE + 1).max(0)..(cy + MARKER_SIZE).min(HEIGHT as i32);

    for y in y_range {
        for x in x_range.clone() {
            let index = (y as usize * WIDTH + x as usize) * BYTES_PER_PIXEL;
            image[index..index + BYTES_PER_PIXEL].copy_from_slice(&MARKER_COLOUR);
        }
    }
}

/// Convert a rendered BGR image to RGB, for display surfaces that only take RGB
pub fn bgr_to_rgb(bgr: &[u8]) -> Result<Vec<u8>, FormatError> {
    if bgr.len() != image_len() {
        return Err(FormatError::ImageLength {
            expected: image_len(),
            actual: bgr.len(),
        });
    }
    Ok(bgr
        .chunks_exact(BYTES_PER_PIXEL)
        .flat_map(|p| [p[2], p[1], p[0]])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tracking::TrackedPoint;

    fn pixel_at(image: &[u8], x: usize, y: usize) -> [u8; 3] {
        let i = (y * WIDTH + x) * BYTES_PER_PIXEL;
        [image[i], image[i + 1], image[i + 2]]
    }

    /// Joints parked far from the pixels a test looks at
    fn corner_joints() -> JointSet {
        let p = TrackedPoint::new((WIDTH - 1) as f32, (HEIGHT - 1) as f32, 0);
        JointSet {
            head: p,
            hand_right: p,
            hand_left: p,
        }
    }

    fn buffer_of(raw: u16) -> Vec<u8> {
        raw.to_le_bytes()
            .iter()
            .cycle()
            .take(DepthFrame::expected_len())
            .copied()
            .collect()
    }

    #[test]
    fn zero_background_is_uniform_dark_grey() {
        let image = render(&buffer_of(0), &corner_joints()).unwrap();
        assert_eq!(image.len(), image_len());
        assert_eq!(pixel_at(&image, 0, 0), [10, 10, 10]);
        assert_eq!(pixel_at(&image, 150, 100), [10, 10, 10]);
    }

    #[test]
    fn background_shade_bands_by_depth() {
        // depth 600 -> 600/20 + 30 = 60 -> 20
        let image = render(&buffer_of(600 << 3), &corner_joints()).unwrap();
        assert_eq!(pixel_at(&image, 10, 10), [20, 20, 20]);

        // depth 8000 -> 400 + 30 = 430, wraps to 174 -> 58
        let image = render(&buffer_of(8000 << 3), &corner_joints()).unwrap();
        assert_eq!(pixel_at(&image, 10, 10), [58, 58, 58]);
    }

    #[test]
    fn player_pixels_use_highlight_regardless_of_depth() {
        let near = render(&buffer_of((100 << 3) | 1), &corner_joints()).unwrap();
        let far = render(&buffer_of((4000 << 3) | 6), &corner_joints()).unwrap();
        assert_eq!(pixel_at(&near, 10, 10), [55, 55, 200]);
        assert_eq!(pixel_at(&far, 10, 10), [55, 55, 200]);
    }

    #[test]
    fn marker_at_origin_is_clipped_to_the_image() {
        let mut joints = corner_joints();
        joints.head = TrackedPoint::new(0., 0., 0);
        joints.head.invalidate();

        let image = render(&buffer_of(0), &joints).unwrap();
        for y in 0..6 {
            for x in 0..6 {
                let expected = if x < 3 && y < 3 {
                    [255, 255, 255]
                } else {
                    [10, 10, 10]
                };
                assert_eq!(pixel_at(&image, x, y), expected, "pixel {x},{y}");
            }
        }
    }

    #[test]
    fn marker_covers_five_by_five_square() {
        let mut joints = corner_joints();
        joints.hand_left = TrackedPoint::new(100.9, 50.2, 0);
        let image = render(&buffer_of(0), &joints).unwrap();

        let white = (0..WIDTH * HEIGHT)
            .filter(|i| pixel_at(&image, i % WIDTH, i / WIDTH) == [255, 255, 255])
            .filter(|i| i % WIDTH < 200)
            .count();
        assert_eq!(white, 25);
        assert_eq!(pixel_at(&image, 98, 48), [255, 255, 255]);
        assert_eq!(pixel_at(&image, 102, 52), [255, 255, 255]);
        assert_eq!(pixel_at(&image, 97, 50), [10, 10, 10]);
        assert_eq!(pixel_at(&image, 103, 50), [10, 10, 10]);
    }

    #[test]
    fn render_is_deterministic() {
        let buffer: Vec<u8> = (0..DepthFrame::expected_len()).map(|i| (i * 7 % 251) as u8).collect();
        let joints = JointSet {
            head: TrackedPoint::new(160., 120., 0),
            hand_right: TrackedPoint::new(40., 30., 0),
            hand_left: TrackedPoint::new(300., 200., 0),
        };
        assert_eq!(render(&buffer, &joints).unwrap(), render(&buffer, &joints).unwrap());
    }

    #[test]
    fn short_buffer_is_a_format_error() {
        let result = render(&[0u8; 10], &corner_joints());
        assert!(matches!(result, Err(FormatError::DepthLength { actual: 10, .. })));
    }

    #[test]
    fn bgr_to_rgb_swaps_channels() {
        let image = render(&buffer_of((100 << 3) | 2), &corner_joints()).unwrap();
        let rgb = bgr_to_rgb(&image).unwrap();
        assert_eq!(&rgb[..3], &[200, 55, 55]);
        assert_eq!(
            bgr_to_rgb(&[1, 2, 3]),
            Err(FormatError::ImageLength {
                expected: image_len(),
                actual: 3
            })
        );
    }
}
