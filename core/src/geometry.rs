//! Bounds policy and overlap tests shared by the world and the systems.

use glam::{DVec2, IVec2};

/// Fixed rectangular world every entity must stay inside.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    width: u32,
    height: u32,
}

impl Bounds {
    /// Creates a world rectangle anchored at the origin.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width of the world measured in world units.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the world measured in world units.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Clamps the top-left corner of a square of side `size` into the world.
    ///
    /// The result satisfies `0 <= x <= width - size` and
    /// `0 <= y <= height - size`; positions already inside pass through
    /// unchanged.
    #[must_use]
    pub fn clamp(&self, position: DVec2, size: f64) -> DVec2 {
        let max_x = (f64::from(self.width) - size).max(0.0);
        let max_y = (f64::from(self.height) - size).max(0.0);
        DVec2::new(
            position.x.max(0.0).min(max_x),
            position.y.max(0.0).min(max_y),
        )
    }

    /// Clamps a grid position of side `size` into the world.
    #[must_use]
    pub fn clamp_cell(&self, cell: IVec2, size: u32) -> IVec2 {
        let max_x = i64::from(self.width).saturating_sub(i64::from(size)).max(0);
        let max_y = i64::from(self.height).saturating_sub(i64::from(size)).max(0);
        IVec2::new(clamp_axis(cell.x, max_x), clamp_axis(cell.y, max_y))
    }

    /// Reports whether a square of side `size` at `cell` lies fully inside.
    ///
    /// Grid moves use this as a guard: a step whose destination is not
    /// admitted is dropped rather than clamped.
    #[must_use]
    pub fn admits(&self, cell: IVec2, size: u32) -> bool {
        let max_x = i64::from(self.width) - i64::from(size);
        let max_y = i64::from(self.height) - i64::from(size);
        let x = i64::from(cell.x);
        let y = i64::from(cell.y);
        x >= 0 && y >= 0 && x <= max_x && y <= max_y
    }

    /// Center of the world, used as the player's starting corner.
    #[must_use]
    pub fn center(&self) -> DVec2 {
        DVec2::new(f64::from(self.width / 2), f64::from(self.height / 2))
    }
}

fn clamp_axis(value: i32, max: i64) -> i32 {
    let clamped = i64::from(value).max(0).min(max);
    i32::try_from(clamped).unwrap_or(i32::MAX)
}

/// Overlap semantics used to decide whether two entities touch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CollisionRule {
    /// Axis-aligned squares overlap strictly; touching edges do not count.
    ///
    /// Compares the exact sub-unit positions. Squares whose whole-unit
    /// corners would only touch still overlap when the fractional parts
    /// close the gap.
    RectangleOverlap,
    /// Entity centers lie within `radius` of each other, boundary included.
    CenterDistance {
        /// Hitbox radius measured between entity centers.
        radius: f64,
    },
}

impl CollisionRule {
    /// Tests two squares of side `size` anchored at their top-left corners.
    #[must_use]
    pub fn collides(self, a: DVec2, b: DVec2, size: f64) -> bool {
        match self {
            Self::RectangleOverlap => rectangles_overlap(a, b, size),
            Self::CenterDistance { radius } => centers_within(a, b, size, radius),
        }
    }
}

/// Strict axis-aligned overlap test for two squares of side `size`.
#[must_use]
pub fn rectangles_overlap(a: DVec2, b: DVec2, size: f64) -> bool {
    a.x < b.x + size && a.x + size > b.x && a.y < b.y + size && a.y + size > b.y
}

/// Reports whether the centers of two squares of side `size` are at most
/// `radius` apart.
#[must_use]
pub fn centers_within(a: DVec2, b: DVec2, size: f64, radius: f64) -> bool {
    let half = DVec2::splat(size / 2.0);
    (a + half).distance(b + half) <= radius
}

#[cfg(test)]
mod tests {
    use super::*;

    const WORLD: Bounds = Bounds::new(640, 480);

    #[test]
    fn clamp_is_idempotent() {
        let samples = [
            DVec2::new(-50.0, -3.5),
            DVec2::new(700.0, 12.0),
            DVec2::new(320.4, 900.0),
            DVec2::new(608.0, 448.0),
        ];

        for sample in samples {
            let once = WORLD.clamp(sample, 32.0);
            assert_eq!(WORLD.clamp(once, 32.0), once);
        }
    }

    #[test]
    fn clamp_passes_in_bounds_positions_through() {
        let samples = [
            DVec2::ZERO,
            DVec2::new(320.1, 240.7),
            DVec2::new(608.0, 448.0),
        ];

        for sample in samples {
            assert_eq!(WORLD.clamp(sample, 32.0), sample);
        }
    }

    #[test]
    fn clamp_keeps_square_inside_far_edges() {
        assert_eq!(
            WORLD.clamp(DVec2::new(639.0, 479.0), 32.0),
            DVec2::new(608.0, 448.0)
        );
        assert_eq!(WORLD.clamp(DVec2::new(-0.1, -9.0), 32.0), DVec2::ZERO);
    }

    #[test]
    fn clamp_cell_matches_floating_clamp() {
        assert_eq!(
            WORLD.clamp_cell(IVec2::new(-16, 470), 16),
            IVec2::new(0, 464)
        );
        assert_eq!(
            WORLD.clamp_cell(IVec2::new(160, 120), 16),
            IVec2::new(160, 120)
        );
    }

    #[test]
    fn admits_rejects_cells_leaving_the_world() {
        assert!(WORLD.admits(IVec2::new(0, 0), 16));
        assert!(WORLD.admits(IVec2::new(624, 464), 16));
        assert!(!WORLD.admits(IVec2::new(640, 0), 16));
        assert!(!WORLD.admits(IVec2::new(0, 480), 16));
        assert!(!WORLD.admits(IVec2::new(-16, 0), 16));
        assert!(!WORLD.admits(IVec2::new(0, -1), 16));
    }

    #[test]
    fn center_is_half_the_world() {
        assert_eq!(WORLD.center(), DVec2::new(320.0, 240.0));
    }

    #[test]
    fn rectangle_overlap_is_symmetric() {
        let pairs = [
            (DVec2::new(0.0, 0.0), DVec2::new(10.0, 10.0)),
            (DVec2::new(100.0, 50.0), DVec2::new(131.9, 50.0)),
            (DVec2::new(5.0, 5.0), DVec2::new(200.0, 5.0)),
            (DVec2::new(64.0, 0.0), DVec2::new(32.0, 0.0)),
        ];

        for (a, b) in pairs {
            assert_eq!(
                rectangles_overlap(a, b, 32.0),
                rectangles_overlap(b, a, 32.0)
            );
        }
    }

    #[test]
    fn identical_positions_overlap() {
        let position = DVec2::new(123.25, 77.5);
        assert!(rectangles_overlap(position, position, 32.0));
    }

    #[test]
    fn separated_rectangles_do_not_overlap() {
        let a = DVec2::new(100.0, 100.0);

        assert!(!rectangles_overlap(a, DVec2::new(140.0, 100.0), 32.0));
        assert!(!rectangles_overlap(a, DVec2::new(100.0, 40.0), 32.0));
        assert!(!rectangles_overlap(a, DVec2::new(100.0, 132.0), 32.0));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = DVec2::new(100.0, 100.0);

        assert!(!rectangles_overlap(a, DVec2::new(132.0, 100.0), 32.0));
        assert!(!rectangles_overlap(a, DVec2::new(100.0, 68.0), 32.0));
        assert!(rectangles_overlap(a, DVec2::new(131.9, 100.0), 32.0));
    }

    #[test]
    fn fractional_positions_are_not_truncated_before_overlap() {
        let a = DVec2::new(100.0, 0.0);
        let right = DVec2::new(131.5, 0.0);
        let left = DVec2::new(68.8, 0.0);

        assert!(rectangles_overlap(a, right, 32.0));
        assert!(rectangles_overlap(a + DVec2::new(0.75, 0.0), left, 32.0));
        assert!(CollisionRule::RectangleOverlap.collides(a, right, 32.0));
    }

    #[test]
    fn center_distance_includes_the_radius() {
        let a = DVec2::new(0.0, 0.0);

        assert!(centers_within(a, DVec2::new(40.0, 0.0), 16.0, 40.0));
        assert!(centers_within(a, DVec2::new(24.0, 32.0), 16.0, 40.0));
        assert!(!centers_within(a, DVec2::new(40.0 + 1e-9, 0.0), 16.0, 40.0));
        assert!(!centers_within(a, DVec2::new(41.0, 0.0), 16.0, 40.0));
    }

    #[test]
    fn collision_rule_dispatches_to_matching_test() {
        let a = DVec2::ZERO;
        let b = DVec2::new(20.0, 0.0);

        assert!(!CollisionRule::RectangleOverlap.collides(a, b, 16.0));
        assert!(CollisionRule::CenterDistance { radius: 40.0 }.collides(a, b, 16.0));
    }
}
