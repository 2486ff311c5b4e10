//! Spawn planner
//!
//! Decides where a recycled obstacle pair goes: to the right of everything
//! currently placed, with a gap drawn from the active tier.

use glam::Vec2;
use rand::Rng;

use super::difficulty::DifficultyTier;
use super::obstacle::ObstaclePair;
use crate::consts::{MARGIN_BOTTOM, MARGIN_TOP};

/// Place `pair` at `rightmost_x` plus a tier spacing.
///
/// Draw order is opening, vertical position, spacing so a seeded RNG replays
/// the same layout. The gap never touches the top or bottom margin.
///
/// # Panics
///
/// If the canvas is too short to fit the drawn opening between the margins.
pub fn place_pair<R: Rng>(
    pair: &mut ObstaclePair,
    tier: DifficultyTier,
    rightmost_x: f32,
    canvas_height: f32,
    rng: &mut R,
) {
    let params = tier.params();

    let opening = params.vertical_opening.sample(rng);
    let lowest_top = canvas_height as i32 - MARGIN_BOTTOM - opening;
    assert!(
        lowest_top >= MARGIN_TOP,
        "canvas height {canvas_height} cannot fit a {opening}px opening ({tier} tier)"
    );
    let vertical_position = rng.random_range(MARGIN_TOP..=lowest_top);
    let spacing = params.horizontal_spacing.sample(rng);

    let x = rightmost_x + spacing as f32;
    pair.upper = Vec2::new(x, vertical_position as f32);
    pair.lower = Vec2::new(x, (vertical_position + opening) as f32);
}
