//! Collision detection for axis-aligned boxes and the ball
//!
//! Pure geometry only. The response (reflection, push-back, brick
//! destruction) is applied by the tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle, top-left anchored
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn half_extents(&self) -> Vec2 {
        self.size / 2.0
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.half_extents()
    }
}

/// Side of a box a contact vector points at
///
/// Screen space has y growing downward, so `Up` is the +y axis here: a
/// contact vector pointing `Up` means the box is below the ball center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Checked in this order; the first strictly best axis wins ties
    const COMPASS: [(Direction, Vec2); 4] = [
        (Direction::Up, Vec2::new(0.0, 1.0)),
        (Direction::Right, Vec2::new(1.0, 0.0)),
        (Direction::Down, Vec2::new(0.0, -1.0)),
        (Direction::Left, Vec2::new(-1.0, 0.0)),
    ];

    /// Classify a vector by the compass axis it is most aligned with
    ///
    /// The zero vector (or anything non-finite) has no positive alignment and
    /// falls back to `Up`.
    pub fn classify(target: Vec2) -> Direction {
        let target = target.normalize_or_zero();
        let mut best = Direction::Up;
        let mut max = 0.0;
        for (direction, axis) in Self::COMPASS {
            let dot = target.dot(axis);
            if dot > max {
                max = dot;
                best = direction;
            }
        }
        best
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Result of a ball-vs-box test
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collision {
    Miss,
    Hit {
        direction: Direction,
        /// Closest point on the box minus the circle center
        difference: Vec2,
    },
}

impl Collision {
    pub fn is_hit(&self) -> bool {
        matches!(self, Collision::Hit { .. })
    }
}

/// Closed-interval AABB overlap: touching edges count
pub fn box_overlap(a: Rect, b: Rect) -> bool {
    let overlap_x = a.pos.x + a.size.x >= b.pos.x && b.pos.x + b.size.x >= a.pos.x;
    let overlap_y = a.pos.y + a.size.y >= b.pos.y && b.pos.y + b.size.y >= a.pos.y;
    overlap_x && overlap_y
}

/// Check a ball (top-left `ball_pos`, `radius`) against a box
///
/// The circle center is `ball_pos + radius` on both components. The box's
/// closest point to that center is found by clamping the center-to-center
/// offset into the box's half extents.
pub fn ball_box_collision(ball_pos: Vec2, radius: f32, rect: Rect) -> Collision {
    let center = ball_pos + radius;

    let half_extents = rect.half_extents();
    let box_center = rect.center();

    let offset = center - box_center;
    let clamped = offset.clamp(-half_extents, half_extents);
    let closest = box_center + clamped;

    let difference = closest - center;
    if difference.length() <= radius {
        Collision::Hit {
            direction: Direction::classify(difference),
            difference,
        }
    } else {
        Collision::Miss
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_box_overlap_touching_edges() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        assert!(box_overlap(a, rect(10.0, 0.0, 5.0, 5.0)));
        assert!(box_overlap(a, rect(10.0, 10.0, 5.0, 5.0)));
        assert!(!box_overlap(a, rect(10.5, 0.0, 5.0, 5.0)));
        assert!(!box_overlap(a, rect(0.0, -6.0, 5.0, 5.0)));
    }

    #[test]
    fn test_classify_axes() {
        assert_eq!(Direction::classify(Vec2::new(0.0, 1.0)), Direction::Up);
        assert_eq!(Direction::classify(Vec2::new(1.0, 0.0)), Direction::Right);
        assert_eq!(Direction::classify(Vec2::new(0.0, -1.0)), Direction::Down);
        assert_eq!(Direction::classify(Vec2::new(-1.0, 0.0)), Direction::Left);
    }

    #[test]
    fn test_classify_diagonal_tie_prefers_up() {
        assert_eq!(Direction::classify(Vec2::new(1.0, 1.0)), Direction::Up);
        // Right is checked before Down
        assert_eq!(Direction::classify(Vec2::new(1.0, -1.0)), Direction::Right);
    }

    #[test]
    fn test_classify_zero_is_deterministic() {
        assert_eq!(Direction::classify(Vec2::ZERO), Direction::Up);
        assert_eq!(Direction::classify(Vec2::new(f32::NAN, 1.0)), Direction::Up);
    }

    #[test]
    fn test_ball_inside_box() {
        let result = ball_box_collision(Vec2::new(40.0, 40.0), 5.0, rect(0.0, 0.0, 100.0, 100.0));
        match result {
            Collision::Hit { difference, .. } => assert_eq!(difference, Vec2::ZERO),
            Collision::Miss => panic!("ball inside box must collide"),
        }
    }

    #[test]
    fn test_ball_far_from_box() {
        // Center (27.5, 27.5) is more than 12.5 away from the box on both axes
        let result = ball_box_collision(Vec2::new(15.0, 15.0), 12.5, rect(50.0, 50.0, 10.0, 10.0));
        assert_eq!(result, Collision::Miss);
    }

    #[test]
    fn test_ball_resting_on_top_of_box() {
        // Center at (50, 40), box top edge at y = 50
        let result = ball_box_collision(Vec2::new(40.0, 30.0), 10.0, rect(0.0, 50.0, 100.0, 20.0));
        match result {
            Collision::Hit {
                direction,
                difference,
            } => {
                assert_eq!(direction, Direction::Up);
                assert!((difference.y - 10.0).abs() < 1e-5);
            }
            Collision::Miss => panic!("touching ball must collide"),
        }
    }

    #[test]
    fn test_ball_against_left_side_of_box() {
        // Center at (95, 25), box left edge at x = 100
        let result = ball_box_collision(Vec2::new(87.0, 17.0), 8.0, rect(100.0, 0.0, 50.0, 50.0));
        assert!(matches!(
            result,
            Collision::Hit {
                direction: Direction::Right,
                ..
            }
        ));
    }

    #[test]
    fn test_zero_radius_ball() {
        let r = rect(0.0, 0.0, 10.0, 10.0);
        assert!(ball_box_collision(Vec2::new(5.0, 5.0), 0.0, r).is_hit());
        assert!(!ball_box_collision(Vec2::new(20.0, 5.0), 0.0, r).is_hit());
    }

    proptest! {
        #[test]
        fn prop_box_overlap_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            aw in 0.1f32..200.0, ah in 0.1f32..200.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            bw in 0.1f32..200.0, bh in 0.1f32..200.0,
        ) {
            let a = rect(ax, ay, aw, ah);
            let b = rect(bx, by, bw, bh);
            prop_assert_eq!(box_overlap(a, b), box_overlap(b, a));
        }

        #[test]
        fn prop_separated_boxes_never_overlap(
            x in -500.0f32..500.0, y in -500.0f32..500.0,
            w in 0.1f32..200.0, h in 0.1f32..200.0,
            gap in 0.5f32..100.0,
        ) {
            let a = rect(x, y, w, h);
            let b = rect(x + w + gap, y, w, h);
            prop_assert!(!box_overlap(a, b));
        }

        #[test]
        fn prop_classify_positive_quadrant(x in 0.0f32..1000.0, y in 0.0f32..1000.0) {
            let direction = Direction::classify(Vec2::new(x, y));
            prop_assert!(matches!(direction, Direction::Up | Direction::Right));
        }

        #[test]
        fn prop_hit_difference_within_radius(
            bx in -100.0f32..100.0, by in -100.0f32..100.0,
            radius in 0.5f32..30.0,
        ) {
            if let Collision::Hit { difference, .. } =
                ball_box_collision(Vec2::new(bx, by), radius, rect(0.0, 0.0, 40.0, 20.0))
            {
                prop_assert!(difference.length() <= radius);
            }
        }
    }
}
