use serde::{Deserialize, Serialize};

use crate::{error::FormatError, HEIGHT, WIDTH};

/// Bytes per pixel in a packed depth + player index frame
pub const DEPTH_BYTES_PER_PIXEL: usize = 2;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackingState {
    NotTracked,
    PositionOnly,
    Tracked,
}

/// Skeleton joints as named by the sensor runtime
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointId {
    HipCenter,
    Spine,
    ShoulderCenter,
    Head,
    ShoulderLeft,
    ElbowLeft,
    WristLeft,
    HandLeft,
    ShoulderRight,
    ElbowRight,
    WristRight,
    HandRight,
    HipLeft,
    KneeLeft,
    AnkleLeft,
    FootLeft,
    HipRight,
    KneeRight,
    AnkleRight,
    FootRight,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Joint {
    pub id: JointId,
    /// Skeleton-space position, in metres
    pub position: (f32, f32, f32),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Skeleton {
    pub tracking_state: TrackingState,
    pub joints: Vec<Joint>,
}

impl Skeleton {
    pub fn is_tracked(&self) -> bool {
        self.tracking_state == TrackingState::Tracked
    }
}

/// As per the sensor bridge: all skeleton slots, tracked or not, in sensor order
pub type SkeletonFrame = Vec<Skeleton>;

/// One decoded depth pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthPixel {
    /// 0 is background; anything else is a tracked subject
    pub player_id: u8,
    pub depth: u16,
}

impl DepthPixel {
    /// The low 3 bits of the first byte are the player index; the remaining 13
    /// bits (little-endian) are the depth value
    pub fn decode(lo: u8, hi: u8) -> Self {
        DepthPixel {
            player_id: lo & 0x07,
            depth: ((hi as u16) << 5) | ((lo as u16) >> 3),
        }
    }
}

/// A borrowed, length-checked W×H depth buffer
#[derive(Debug, Clone, Copy)]
pub struct DepthFrame<'a> {
    bits: &'a [u8],
}

impl<'a> DepthFrame<'a> {
    pub fn expected_len() -> usize {
        WIDTH * HEIGHT * DEPTH_BYTES_PER_PIXEL
    }

    pub fn from_bytes(bits: &'a [u8]) -> Result<Self, FormatError> {
        let expected = Self::expected_len();
        if bits.len() != expected {
            return Err(FormatError::DepthLength {
                expected,
                actual: bits.len(),
            });
        }
        Ok(DepthFrame { bits })
    }

    /// Pixels in row-major order, top to bottom, left to right
    pub fn pixels(&self) -> impl Iterator<Item = DepthPixel> + 'a {
        self.bits
            .chunks_exact(DEPTH_BYTES_PER_PIXEL)
            .map(|pair| DepthPixel::decode(pair[0], pair[1]))
    }
}

/// Raw colour video frame, passed through for display only
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ColorFrame {
    pub width: usize,
    pub height: usize,
    pub bytes_per_pixel: usize,
    pub stride: usize,
    /// BGR(X) pixel data, `stride` bytes per row
    pub bits: Vec<u8>,
}

impl ColorFrame {
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.width == 0 || self.height == 0 || self.stride == 0 {
            return Err(FormatError::ColorEmpty {
                width: self.width,
                height: self.height,
                stride: self.stride,
            });
        }
        if self.bytes_per_pixel < 3 {
            return Err(FormatError::ColorPixelSize(self.bytes_per_pixel));
        }
        let overflow = FormatError::ColorOverflow {
            width: self.width,
            height: self.height,
        };
        let row_bytes = self
            .width
            .checked_mul(self.bytes_per_pixel)
            .ok_or(overflow.clone())?;
        if self.stride < row_bytes {
            return Err(FormatError::ColorStride {
                stride: self.stride,
                width: self.width,
                bytes_per_pixel: self.bytes_per_pixel,
            });
        }
        let expected = self.stride.checked_mul(self.height).ok_or(overflow)?;
        if self.bits.len() != expected {
            return Err(FormatError::ColorLength {
                expected,
                actual: self.bits.len(),
            });
        }
        Ok(())
    }

    /// Tightly packed RGB, for display surfaces
    pub fn to_rgb(&self) -> Result<Vec<u8>, FormatError> {
        self.validate()?;
        let mut rgb = Vec::with_capacity(self.width * self.height * 3);
        for row in self.bits.chunks_exact(self.stride) {
            for pixel in row[..self.width * self.bytes_per_pixel].chunks_exact(self.bytes_per_pixel) {
                rgb.extend_from_slice(&[pixel[2], pixel[1], pixel[0]]);
            }
        }
        Ok(rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_splits_player_and_depth() {
        // depth 1000 = 0b1_1111_0100, player 3
        let raw: u16 = (1000 << 3) | 3;
        let [lo, hi] = raw.to_le_bytes();
        assert_eq!(
            DepthPixel::decode(lo, hi),
            DepthPixel {
                player_id: 3,
                depth: 1000
            }
        );
    }

    #[test]
    fn depth_frame_rejects_wrong_length() {
        let short = vec![0u8; DepthFrame::expected_len() - 2];
        assert_eq!(
            DepthFrame::from_bytes(&short).unwrap_err(),
            FormatError::DepthLength {
                expected: 153_600,
                actual: 153_598
            }
        );
        let exact = vec![0u8; DepthFrame::expected_len()];
        let frame = DepthFrame::from_bytes(&exact).unwrap();
        assert_eq!(frame.pixels().count(), WIDTH * HEIGHT);
    }

    #[test]
    fn colour_frame_checks_stride_and_length() {
        let mut frame = ColorFrame {
            width: 2,
            height: 2,
            bytes_per_pixel: 4,
            stride: 8,
            bits: vec![0; 16],
        };
        assert!(frame.validate().is_ok());

        frame.stride = 6;
        assert!(matches!(
            frame.validate(),
            Err(FormatError::ColorStride { .. })
        ));

        frame.stride = 8;
        frame.bits.pop();
        assert_eq!(
            frame.validate(),
            Err(FormatError::ColorLength {
                expected: 16,
                actual: 15
            })
        );
    }

    #[test]
    fn colour_frame_with_empty_shape_is_rejected() {
        let frame = ColorFrame {
            width: 0,
            height: 4,
            bytes_per_pixel: 3,
            stride: 0,
            bits: vec![],
        };
        assert_eq!(
            frame.to_rgb(),
            Err(FormatError::ColorEmpty {
                width: 0,
                height: 4,
                stride: 0
            })
        );
    }

    #[test]
    fn colour_frame_with_huge_shape_is_rejected() {
        let wide = ColorFrame {
            width: usize::MAX / 2,
            height: 1,
            bytes_per_pixel: 3,
            stride: 8,
            bits: vec![0; 8],
        };
        assert!(matches!(wide.validate(), Err(FormatError::ColorOverflow { .. })));

        let tall = ColorFrame {
            width: 1,
            height: usize::MAX / 2,
            bytes_per_pixel: 3,
            stride: 8,
            bits: vec![0; 8],
        };
        assert!(matches!(tall.to_rgb(), Err(FormatError::ColorOverflow { .. })));
    }

    #[test]
    fn colour_frame_to_rgb_skips_padding() {
        let frame = ColorFrame {
            width: 1,
            height: 2,
            bytes_per_pixel: 3,
            stride: 4,
            bits: vec![1, 2, 3, 99, 4, 5, 6, 99],
        };
        assert_eq!(frame.to_rgb().unwrap(), vec![3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn skeleton_frame_decodes_from_msgpack() {
        let frame: SkeletonFrame = vec![Skeleton {
            tracking_state: TrackingState::Tracked,
            joints: vec![Joint {
                id: JointId::Spine,
                position: (0.1, 0.2, 2.0),
            }],
        }];
        let payload = rmp_serde::to_vec_named(&frame).unwrap();
        let decoded: SkeletonFrame = rmp_serde::from_slice(&payload).unwrap();
        assert!(decoded[0].is_tracked());
        assert_eq!(decoded[0].joints[0].id, JointId::Spine);
    }
}
