//! Collision detection and response against the tile grid
//!
//! Bodies move through the grid in small sub-steps so that even a fast
//! body cannot skip over a one-tile wall. Each sub-step samples the
//! leading edge at several points, not just the centre, so thin gaps and
//! partial overlaps are resolved correctly.

use serde::{Deserialize, Serialize};

use super::body::Aabb;
use super::level::TileLevel;
use crate::consts::TILE_SIZE;
use crate::tile_index;
use crate::tuning::StompTuning;

/// Longest distance a body may travel in one sub-step (pixels)
pub const MAX_SUBSTEP: f32 = 2.0;
/// Largest gap between two sample points along an edge
pub const SAMPLE_SPACING: f32 = 6.0;
/// Keeps the far edge sample inside the body (a body at x=0, w=16 ends before 16)
pub const EDGE_EPSILON: f32 = 0.01;

/// A solid tile that stopped a sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileHit {
    pub column: i32,
    pub row: i32,
}

/// Number of sub-steps needed to cover `distance`
pub fn substep_count(distance: f32) -> u32 {
    ((distance.abs() / MAX_SUBSTEP).ceil() as u32).max(1)
}

/// Evenly spaced samples covering `[start, end]`, both ends included,
/// never more than `spacing` apart. A degenerate span yields its midpoint.
pub fn sample_span(start: f32, end: f32, spacing: f32) -> impl Iterator<Item = f32> {
    let (start, end) = if end < start {
        let mid = (start + end) * 0.5;
        (mid, mid)
    } else {
        (start, end)
    };
    let count = ((end - start) / spacing).ceil() as u32;
    (0..=count).map(move |i| {
        if count == 0 {
            start
        } else {
            start + (end - start) * i as f32 / count as f32
        }
    })
}

/// Move `body` horizontally by `dx`, stopping flush against the first
/// solid tile. The leading edge is sampled from top to bottom with
/// `vertical_margin` excluded at both ends.
pub fn sweep_x(level: &TileLevel, body: &mut Aabb, dx: f32, vertical_margin: f32) -> Option<TileHit> {
    if dx == 0.0 {
        return None;
    }

    let steps = substep_count(dx);
    let step = dx / steps as f32;
    let top = body.top() + vertical_margin;
    let bottom = body.bottom() - vertical_margin - EDGE_EPSILON;

    for _ in 0..steps {
        let next_x = body.pos.x + step;
        let edge = if step > 0.0 {
            next_x + body.size.x - EDGE_EPSILON
        } else {
            next_x
        };
        let column = tile_index(edge);

        let blocked_row = sample_span(top, bottom, SAMPLE_SPACING)
            .map(tile_index)
            .find(|&row| level.tile_at_grid(column, row).is_solid());

        if let Some(row) = blocked_row {
            body.pos.x = if step > 0.0 {
                column as f32 * TILE_SIZE - body.size.x
            } else {
                (column + 1) as f32 * TILE_SIZE
            };
            return Some(TileHit { column, row });
        }
        body.pos.x = next_x;
    }
    None
}

/// Move `body` vertically by `dy`, stopping flush against the first solid
/// tile. The leading edge is sampled across the width with `side_margin`
/// excluded; when several tiles are struck, the one nearest the body's
/// centre is reported.
pub fn sweep_y(level: &TileLevel, body: &mut Aabb, dy: f32, side_margin: f32) -> Option<TileHit> {
    if dy == 0.0 {
        return None;
    }

    let steps = substep_count(dy);
    let step = dy / steps as f32;
    let left = body.left() + side_margin;
    let right = body.right() - side_margin - EDGE_EPSILON;
    let center = body.center().x;

    for _ in 0..steps {
        let next_y = body.pos.y + step;
        let edge = if step > 0.0 {
            next_y + body.size.y - EDGE_EPSILON
        } else {
            next_y
        };
        let row = tile_index(edge);

        let struck_x = sample_span(left, right, SAMPLE_SPACING)
            .filter(|&x| level.tile_at_grid(tile_index(x), row).is_solid())
            .min_by(|a, b| (a - center).abs().total_cmp(&(b - center).abs()));

        if let Some(x) = struck_x {
            body.pos.y = if step > 0.0 {
                row as f32 * TILE_SIZE - body.size.y
            } else {
                (row + 1) as f32 * TILE_SIZE
            };
            return Some(TileHit {
                column: tile_index(x),
                row,
            });
        }
        body.pos.y = next_y;
    }
    None
}

/// Slack allowed when checking that the attacker started above the target
const STOMP_TOP_SLACK: f32 = 1.0;

/// Is `attacker` landing on top of `target` this tick?
///
/// The attacker must be descending and its bottom edge must cross the
/// target's top edge this tick: at or above it before the move, and now
/// inside the upper region. The region grows by the distance fallen this
/// tick so a fast fall that sank deep still counts. The two must also
/// share enough horizontal span that a graze along the side is not
/// mistaken for a stomp.
pub fn is_stomp(
    attacker: &Aabb,
    prev_bottom: f32,
    vy: f32,
    target: &Aabb,
    tuning: &StompTuning,
) -> bool {
    if vy <= 0.0 || prev_bottom > target.top() + STOMP_TOP_SLACK {
        return false;
    }
    let fall = (attacker.bottom() - prev_bottom).max(vy);
    let threshold = target.top() + target.size.y * tuning.upper_fraction + fall;
    let min_overlap = attacker.size.x.min(target.size.x) * tuning.min_overlap_fraction;

    attacker.bottom() <= threshold && attacker.horizontal_overlap(target) >= min_overlap
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::TileKind;
    use crate::sim::test_support::{flat_level, level_with};
    use glam::Vec2;
    use proptest::prelude::*;

    fn body(x: f32, y: f32, w: f32, h: f32) -> Aabb {
        Aabb::new(Vec2::new(x, y), Vec2::new(w, h))
    }

    #[test]
    fn test_substep_count() {
        assert_eq!(substep_count(0.0), 1);
        assert_eq!(substep_count(1.5), 1);
        assert_eq!(substep_count(2.0), 1);
        assert_eq!(substep_count(-2.5), 2);
        assert_eq!(substep_count(20.0), 10);
    }

    #[test]
    fn test_sample_span_includes_ends() {
        let samples: Vec<f32> = sample_span(0.0, 12.0, 6.0).collect();
        assert_eq!(samples, vec![0.0, 6.0, 12.0]);
        let samples: Vec<f32> = sample_span(2.0, 12.99, 6.0).collect();
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[0], 2.0);
        assert!((samples[2] - 12.99).abs() < 1e-4);
        let samples: Vec<f32> = sample_span(5.0, 3.0, 6.0).collect();
        assert_eq!(samples, vec![4.0]);
    }

    #[test]
    fn test_sweep_x_stops_flush_at_wall() {
        // One-tile wall in column 8, rows 12-13
        let level = level_with(
            20,
            &[(8, 12, TileKind::Hard), (8, 13, TileKind::Hard)],
        );
        let mut b = body(100.0, 208.0, 16.0, 16.0);
        let hit = sweep_x(&level, &mut b, 20.0, 2.0);
        assert_eq!(hit, Some(TileHit { column: 8, row: 13 }));
        assert_eq!(b.pos.x, 112.0);
    }

    #[test]
    fn test_sweep_x_fast_body_does_not_tunnel() {
        let wall = TileKind::Hard;
        let level = level_with(30, &[(8, 12, wall), (8, 13, wall)]);
        let wall_box = body(128.0, 192.0, 16.0, 32.0);

        for dx in [17.0, 24.0, 40.0, 64.0] {
            let mut b = body(96.0, 208.0, 16.0, 16.0);
            let hit = sweep_x(&level, &mut b, dx, 2.0);
            assert!(hit.is_some(), "dx={dx} passed through the wall");
            assert!(!b.overlaps(&wall_box));
            assert_eq!(b.right(), 128.0);
        }

        // Leftward
        let mut b = body(180.0, 208.0, 16.0, 16.0);
        assert!(sweep_x(&level, &mut b, -60.0, 2.0).is_some());
        assert_eq!(b.left(), 144.0);
    }

    #[test]
    fn test_sweep_x_ignores_tiles_within_margin() {
        // Ground directly under the body only touches the excluded margin
        let level = flat_level(20);
        let mut b = body(32.0, 208.0, 16.0, 16.0);
        assert_eq!(sweep_x(&level, &mut b, 10.0, 2.0), None);
        assert_eq!(b.pos.x, 42.0);
    }

    #[test]
    fn test_sweep_y_lands_on_ground() {
        let level = flat_level(20);
        let mut b = body(32.0, 200.0, 16.0, 16.0);
        let hit = sweep_y(&level, &mut b, 9.0, 2.0);
        assert_eq!(hit.map(|h| h.row), Some(14));
        assert_eq!(b.bottom(), 224.0);
    }

    #[test]
    fn test_sweep_y_reports_block_nearest_centre() {
        // Body straddles columns 4 and 5, mostly under column 5
        let level = level_with(
            20,
            &[(4, 9, TileKind::Brick), (5, 9, TileKind::Question)],
        );
        let mut b = body(76.0, 162.0, 16.0, 16.0);
        let hit = sweep_y(&level, &mut b, -8.0, 2.0);
        assert_eq!(hit, Some(TileHit { column: 5, row: 9 }));
        assert_eq!(b.top(), 160.0);
    }

    fn enemy_box() -> Aabb {
        body(100.0, 100.0, 16.0, 16.0)
    }

    #[test]
    fn test_stomp_from_above() {
        let t = StompTuning::default();
        let e = enemy_box();
        // Just touching the top
        assert!(is_stomp(&body(100.0, 84.0, 16.0, 16.0), 98.0, 2.0, &e, &t));
        // Fast fall that sank deep in one tick
        assert!(is_stomp(&body(100.0, 95.0, 16.0, 16.0), 98.0, 13.0, &e, &t));
        // Diagonal landing that only overlaps after the move
        assert!(is_stomp(&body(94.0, 98.0, 16.0, 16.0), 97.0, 5.0, &e, &t));
    }

    #[test]
    fn test_side_hit_is_not_stomp() {
        let t = StompTuning::default();
        let e = enemy_box();
        // Same vertical level, drifting down slightly
        assert!(!is_stomp(&body(100.0, 100.0, 16.0, 16.0), 116.0, 1.0, &e, &t));
        // Grounded walk-in
        assert!(!is_stomp(&body(90.0, 100.0, 16.0, 16.0), 116.0, 0.0, &e, &t));
        // Rising through the enemy
        assert!(!is_stomp(&body(100.0, 90.0, 16.0, 16.0), 110.0, -3.0, &e, &t));
        // Descending from above but only grazing the corner
        assert!(!is_stomp(&body(86.0, 86.0, 16.0, 16.0), 98.0, 4.0, &e, &t));
        // Already below the top edge, drifting down into the side
        assert!(!is_stomp(&body(88.0, 99.5, 16.0, 16.0), 106.0, 5.0, &e, &t));
    }

    proptest! {
        #[test]
        fn prop_start_below_top_never_stomps(
            sunk in 1.5f32..16.0,
            drop in 0.0f32..12.0,
            dx in -12.0f32..12.0,
        ) {
            let t = StompTuning::default();
            let e = enemy_box();
            let prev_bottom = e.top() + sunk;
            let attacker = body(100.0 + dx, prev_bottom + drop - 16.0, 16.0, 16.0);
            prop_assert!(!is_stomp(&attacker, prev_bottom, drop.max(0.5), &e, &t));
        }

        #[test]
        fn prop_level_side_contact_never_stomps(dx in -15.0f32..15.0, vy in 0.0f32..1.0) {
            // Bodies on the same floor line: previous bottom equals the enemy bottom
            let t = StompTuning::default();
            let e = enemy_box();
            let attacker = body(100.0 + dx, 100.0, 16.0, 16.0);
            prop_assert!(!is_stomp(&attacker, 116.0, vy, &e, &t));
        }
    }
}
