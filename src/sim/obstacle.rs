//! Obstacle pool and recycle scan
//!
//! The pool holds a fixed number of upper/lower pairs for the whole run.
//! Pairs that scroll fully past the left edge are moved back to the right
//! instead of being destroyed, and each move scores a point.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::difficulty::DifficultyTier;
use super::spawn::place_pair;
use super::state::{PromotionRule, RunState};

/// One upper + lower obstacle sharing a vertical gap.
///
/// The upper half hangs from `upper.y` (origin at its bottom-left corner), the
/// lower half stands on `lower.y` (origin at its top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ObstaclePair {
    pub upper: Vec2,
    pub lower: Vec2,
}

impl ObstaclePair {
    /// Horizontal position of the pair (both halves share it at spawn)
    #[inline]
    pub fn x(&self) -> f32 {
        self.upper.x
    }

    /// Vertical size of the gap
    #[inline]
    pub fn opening(&self) -> f32 {
        self.lower.y - self.upper.y
    }

    /// Center of the gap, handy for autopilots and HUD markers
    pub fn gap_center(&self) -> f32 {
        (self.upper.y + self.lower.y) / 2.0
    }

    #[inline]
    pub fn upper_expired(&self, width: f32) -> bool {
        self.upper.x + width < 0.0
    }

    #[inline]
    pub fn lower_expired(&self, width: f32) -> bool {
        self.lower.x + width < 0.0
    }
}

/// A pair that was moved back to the right during a recycle scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecycleEvent {
    /// Pool slot that was re-placed
    pub index: usize,
    /// New position of the pair
    pub pair: ObstaclePair,
    /// Score after this pair was counted
    pub score: u32,
    /// Tier the run was promoted to by this pair, if any
    pub promoted: Option<DifficultyTier>,
}

/// Fixed-size pool of obstacle pairs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstaclePool {
    pairs: Vec<ObstaclePair>,
    /// Sprite width of one half, used for the off-screen test
    width: f32,
}

impl ObstaclePool {
    /// Create a pool of `size` pairs stacked at the origin (call `populate` next)
    pub fn new(size: usize, width: f32) -> Self {
        Self {
            pairs: vec![ObstaclePair::default(); size],
            width,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn pairs(&self) -> &[ObstaclePair] {
        &self.pairs
    }

    pub fn get(&self, index: usize) -> Option<&ObstaclePair> {
        self.pairs.get(index)
    }

    /// Overwrite a slot with engine-reported positions
    pub fn set(&mut self, index: usize, pair: ObstaclePair) {
        self.pairs[index] = pair;
    }

    /// Largest X over every half in the pool (0 when all are left of the origin)
    pub fn rightmost_x(&self) -> f32 {
        self.pairs
            .iter()
            .flat_map(|p| [p.upper.x, p.lower.x])
            .fold(0.0, f32::max)
    }

    /// Reset every slot to the origin and lay the pairs out left to right
    pub fn populate<R: Rng>(&mut self, tier: DifficultyTier, canvas_height: f32, rng: &mut R) {
        for pair in &mut self.pairs {
            *pair = ObstaclePair::default();
        }
        for i in 0..self.pairs.len() {
            self.respawn(i, tier, canvas_height, rng);
        }
    }

    /// Re-place one slot to the right of the current rightmost obstacle
    pub fn respawn<R: Rng>(
        &mut self,
        index: usize,
        tier: DifficultyTier,
        canvas_height: f32,
        rng: &mut R,
    ) -> ObstaclePair {
        // Fresh every call: earlier respawns in the same scan move the edge
        let rightmost = self.rightmost_x();
        let pair = &mut self.pairs[index];
        place_pair(pair, tier, rightmost, canvas_height, rng);
        *pair
    }

    /// Slots whose halves are both fully past the left edge, in pool order.
    ///
    /// # Panics
    ///
    /// If only one half of a pair is expired; recycling it would break the gap.
    pub fn expired(&self) -> Vec<usize> {
        self.pairs
            .iter()
            .enumerate()
            .filter_map(|(i, pair)| {
                match (pair.upper_expired(self.width), pair.lower_expired(self.width)) {
                    (true, true) => Some(i),
                    (false, false) => None,
                    (upper, lower) => panic!(
                        "obstacle pair {i} split: upper expired={upper}, \
                         lower expired={lower} ({pair:?})"
                    ),
                }
            })
            .collect()
    }

    /// Recycle every expired pair and count it toward the run.
    ///
    /// Each pair is placed with the tier in effect at that moment, so a
    /// promotion caused by one pair already applies to the next one in the
    /// same scan.
    pub fn recycle<R: Rng>(
        &mut self,
        run: &mut RunState,
        rule: PromotionRule,
        canvas_height: f32,
        rng: &mut R,
    ) -> Vec<RecycleEvent> {
        let expired = self.expired();
        let mut events = Vec::with_capacity(expired.len());
        for index in expired {
            let pair = self.respawn(index, run.tier, canvas_height, rng);
            let promoted = run.on_pair_recycled(rule);
            log::debug!(
                "Recycled pair {} to x={} (score {}, {} tier)",
                index,
                pair.x(),
                run.score,
                run.tier
            );
            events.push(RecycleEvent {
                index,
                pair,
                score: run.score,
                promoted,
            });
        }
        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{CANVAS_HEIGHT, OBSTACLE_PAIRS, OBSTACLE_WIDTH};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn pool(seed: u64) -> (ObstaclePool, Pcg32) {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut pool = ObstaclePool::new(OBSTACLE_PAIRS, OBSTACLE_WIDTH);
        pool.populate(DifficultyTier::Easy, CANVAS_HEIGHT, &mut rng);
        (pool, rng)
    }

    /// Pair with both halves at `x` and the gap spanning `top..bottom`
    fn pair_at(x: f32, top: f32, bottom: f32) -> ObstaclePair {
        ObstaclePair {
            upper: Vec2::new(x, top),
            lower: Vec2::new(x, bottom),
        }
    }

    /// Scroll every pair left, as the engine's group velocity would
    fn scroll(pool: &mut ObstaclePool, dx: f32) {
        for i in 0..pool.len() {
            let mut pair = pool.pairs()[i];
            pair.upper.x -= dx;
            pair.lower.x -= dx;
            pool.set(i, pair);
        }
    }

    #[test]
    fn test_populate_lays_out_left_to_right() {
        let (pool, _) = pool(1);
        assert_eq!(pool.len(), OBSTACLE_PAIRS);

        let mut previous = 0.0;
        for pair in pool.pairs() {
            let spacing = (pair.x() - previous) as i32;
            assert!(DifficultyTier::Easy.params().horizontal_spacing.contains(spacing));
            previous = pair.x();
        }
        assert_eq!(pool.rightmost_x(), previous);
    }

    #[test]
    fn test_rightmost_floors_at_zero() {
        let mut pool = ObstaclePool::new(2, OBSTACLE_WIDTH);
        pool.set(0, pair_at(-50.0, 0.0, 10.0));
        pool.set(1, pair_at(-80.0, 0.0, 10.0));
        assert_eq!(pool.rightmost_x(), 0.0);
    }

    #[test]
    fn test_nothing_expires_on_screen() {
        let (mut pool, mut rng) = pool(2);
        let mut run = RunState::new();
        let events = pool.recycle(&mut run, PromotionRule::ExactScore, CANVAS_HEIGHT, &mut rng);
        assert!(events.is_empty());
        assert_eq!(run.score, 0);
    }

    #[test]
    fn test_expiry_uses_right_edge() {
        let pair = ObstaclePair {
            upper: Vec2::new(-OBSTACLE_WIDTH, 100.0),
            lower: Vec2::new(-OBSTACLE_WIDTH, 250.0),
        };
        // Right edge exactly at 0 is still on screen
        assert!(!pair.upper_expired(OBSTACLE_WIDTH));
        let pair = ObstaclePair {
            upper: Vec2::new(-OBSTACLE_WIDTH - 0.5, 100.0),
            lower: Vec2::new(-OBSTACLE_WIDTH - 0.5, 250.0),
        };
        assert!(pair.upper_expired(OBSTACLE_WIDTH));
        assert!(pair.lower_expired(OBSTACLE_WIDTH));
    }

    #[test]
    fn test_recycled_pair_lands_right_of_everyone() {
        let (mut pool, mut rng) = pool(3);
        let first_x = pool.pairs()[0].x();
        scroll(&mut pool, first_x + OBSTACLE_WIDTH + 1.0);

        let before: Vec<f32> = pool.pairs().iter().map(|p| p.x()).collect();
        let rightmost_before = pool.rightmost_x();
        let mut run = RunState::new();
        let events = pool.recycle(&mut run, PromotionRule::ExactScore, CANVAS_HEIGHT, &mut rng);

        assert_eq!(events.len(), 1);
        let event = events[0];
        assert_eq!(event.index, 0);
        assert_eq!(event.score, 1);
        let spacing = (event.pair.x() - rightmost_before) as i32;
        assert!(DifficultyTier::Easy.params().horizontal_spacing.contains(spacing));
        for (i, x) in before.iter().enumerate().skip(1) {
            assert!(event.pair.x() > *x, "pair {i} at {x} not left of recycled pair");
        }
    }

    #[test]
    fn test_multiple_recycles_chain_rightmost() {
        let mut rng = Pcg32::seed_from_u64(4);
        let mut pool = ObstaclePool::new(3, OBSTACLE_WIDTH);
        pool.populate(DifficultyTier::Easy, CANVAS_HEIGHT, &mut rng);
        // Push the first two pairs off screen, keep the third visible
        let keep = pool.pairs()[2];
        for i in 0..2 {
            pool.set(i, pair_at(-100.0, 50.0, 200.0));
        }

        let mut run = RunState::new();
        let events = pool.recycle(&mut run, PromotionRule::ExactScore, CANVAS_HEIGHT, &mut rng);
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].index, 0);
        assert_eq!(events[1].index, 1);
        assert!(events[0].pair.x() > keep.x());
        // Second placement starts from the first one, not the stale edge
        assert!(events[1].pair.x() > events[0].pair.x());
        assert_eq!(events[1].score, 2);
    }

    #[test]
    fn test_promotion_applies_mid_scan() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut pool = ObstaclePool::new(2, OBSTACLE_WIDTH);
        for i in 0..2 {
            pool.set(i, pair_at(-100.0, 50.0, 200.0));
        }
        let mut run = RunState::new();
        run.score = 9;

        let events = pool.recycle(&mut run, PromotionRule::ExactScore, CANVAS_HEIGHT, &mut rng);
        assert_eq!(events[0].promoted, Some(DifficultyTier::Normal));
        assert_eq!(events[1].promoted, None);
        // Second pair was placed with the normal tier
        let opening = events[1].pair.opening() as i32;
        assert!(DifficultyTier::Normal.params().vertical_opening.contains(opening));
    }

    #[test]
    #[should_panic(expected = "split")]
    fn test_split_pair_panics() {
        let mut pool = ObstaclePool::new(1, OBSTACLE_WIDTH);
        let split = ObstaclePair {
            upper: Vec2::new(-100.0, 50.0),
            lower: Vec2::new(100.0, 200.0),
        };
        pool.set(0, split);
        let _ = pool.expired();
    }
}
