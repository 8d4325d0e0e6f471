use serde::{Deserialize, Serialize};

use crate::tracking::{JointSet, TrackedPoint};

/// Default depth difference (head/spine minus hand) that selects a single hand
pub const DEPTH_THRESH_ONE: i32 = 3000;
/// Default summed depth difference (both hands) that selects two hands
pub const DEPTH_THRESH_TWO: i32 = 6000;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    NoHands,
    RightHand,
    LeftHand,
    TwoHands,
}

impl GestureState {
    pub fn label(&self) -> &'static str {
        match self {
            GestureState::NoHands => "Hands down",
            GestureState::RightHand => "Right hand",
            GestureState::LeftHand => "Left hand",
            GestureState::TwoHands => "Both hands",
        }
    }

    /// The hand that triggered a single-hand state
    pub fn raised_hand<'a>(&self, joints: &'a JointSet) -> Option<&'a TrackedPoint> {
        match self {
            GestureState::RightHand => Some(&joints.hand_right),
            GestureState::LeftHand => Some(&joints.hand_left),
            GestureState::NoHands | GestureState::TwoHands => None,
        }
    }
}

/// Which side of the head a raised hand is on, as seen in the depth image
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Equal x counts as the right side
pub fn side_of(hand: &TrackedPoint, head: &TrackedPoint) -> Side {
    if hand.x < head.x {
        Side::Left
    } else {
        Side::Right
    }
}

/// Per-frame depth differences, for diagnostics
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GestureReadout {
    pub delta_left: i32,
    pub delta_right: i32,
    pub sum: i32,
}

pub fn readout(head: &TrackedPoint, hand_right: &TrackedPoint, hand_left: &TrackedPoint) -> GestureReadout {
    let delta_right = head.depth.saturating_sub(hand_right.depth);
    let delta_left = head.depth.saturating_sub(hand_left.depth);
    GestureReadout {
        delta_left,
        delta_right,
        sum: delta_left.saturating_add(delta_right),
    }
}

/// Checks run two-hands first, then right, then left; the first match wins.
pub fn classify(
    head: &TrackedPoint,
    hand_right: &TrackedPoint,
    hand_left: &TrackedPoint,
    thresh_one: i32,
    thresh_two: i32,
) -> GestureState {
    let GestureReadout {
        delta_left,
        delta_right,
        sum,
    } = readout(head, hand_right, hand_left);

    if sum > thresh_two {
        GestureState::TwoHands
    } else if delta_right > thresh_one {
        GestureState::RightHand
    } else if delta_left > thresh_one {
        GestureState::LeftHand
    } else {
        GestureState::NoHands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_depth(x: f32, depth: i32) -> TrackedPoint {
        TrackedPoint::new(x, 120., depth)
    }

    fn classify_depths(head: i32, right: i32, left: i32) -> GestureState {
        classify(
            &at_depth(160., head),
            &at_depth(200., right),
            &at_depth(120., left),
            DEPTH_THRESH_ONE,
            DEPTH_THRESH_TWO,
        )
    }

    #[test]
    fn right_hand_scenario() {
        // deltaRight 4000, deltaLeft -500, sum 3500
        assert_eq!(classify_depths(5000, 1000, 5500), GestureState::RightHand);
    }

    #[test]
    fn two_hands_wins_over_single_hands() {
        // deltas 9000 and 8500 each pass the single-hand threshold too
        assert_eq!(classify_depths(10000, 1000, 1500), GestureState::TwoHands);
    }

    #[test]
    fn left_hand_only_when_right_is_below_threshold() {
        assert_eq!(classify_depths(5000, 5000, 1000), GestureState::LeftHand);
    }

    #[test]
    fn right_hand_checked_before_left() {
        // Both deltas are 3001; the sum 6002 stays under a raised two-hands threshold
        let head = at_depth(160., 10000);
        let right = at_depth(200., 6999);
        let left = at_depth(120., 6999);
        assert_eq!(
            classify(&head, &right, &left, 3000, 7000),
            GestureState::RightHand
        );
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(classify_depths(3000, 0, 3000), GestureState::NoHands);
        assert_eq!(classify_depths(6000, 3000, 3000), GestureState::NoHands);
        assert_eq!(classify_depths(6001, 3000, 3000), GestureState::TwoHands);
    }

    #[test]
    fn hands_down_when_nothing_passes() {
        assert_eq!(classify_depths(5000, 5200, 4800), GestureState::NoHands);
        assert_eq!(classify_depths(0, 0, 0), GestureState::NoHands);
    }

    #[test]
    fn side_depends_only_on_x() {
        let head = at_depth(160., 0);
        assert_eq!(side_of(&at_depth(100., 0), &head), Side::Left);
        assert_eq!(side_of(&at_depth(200., 0), &head), Side::Right);
        assert_eq!(side_of(&at_depth(160., 0), &head), Side::Right);
    }

    #[test]
    fn readout_reports_both_deltas_and_sum() {
        let r = readout(&at_depth(0., 5000), &at_depth(0., 1000), &at_depth(0., 5500));
        assert_eq!(
            r,
            GestureReadout {
                delta_left: -500,
                delta_right: 4000,
                sum: 3500
            }
        );
    }

    #[test]
    fn labels() {
        assert_eq!(GestureState::TwoHands.label(), "Both hands");
        assert_eq!(GestureState::NoHands.label(), "Hands down");
    }
}
