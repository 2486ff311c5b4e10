//! Terminal-condition checks

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounds of a sprite in canvas coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl Bounds {
    /// Bounds of a sprite with its origin at the top-left corner
    pub fn from_origin(position: Vec2, size: Vec2) -> Self {
        Self {
            min: position,
            max: position + size,
        }
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.min.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.max.y
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.min.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.max.x
    }

    /// Strict overlap (touching edges do not count)
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalCause {
    FellOffBottom,
    FlewOffTop,
    Collision,
}

impl std::fmt::Display for TerminalCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            TerminalCause::FellOffBottom => "fell off the bottom",
            TerminalCause::FlewOffTop => "flew off the top",
            TerminalCause::Collision => "hit an obstacle",
        };
        f.write_str(text)
    }
}

/// Check the player's bounds against the canvas edges.
///
/// Collisions are reported separately by the engine.
pub fn check_terminal(player: &Bounds, canvas_height: f32) -> Option<TerminalCause> {
    if player.bottom() >= canvas_height {
        Some(TerminalCause::FellOffBottom)
    } else if player.top() <= 0.0 {
        Some(TerminalCause::FlewOffTop)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIZE: Vec2 = Vec2::new(40.0, 20.0);

    #[test]
    fn test_inside_canvas_is_fine() {
        let bounds = Bounds::from_origin(Vec2::new(40.0, 300.0), SIZE);
        assert_eq!(check_terminal(&bounds, 600.0), None);
    }

    #[test]
    fn test_bottom_edge_is_terminal() {
        let bounds = Bounds::from_origin(Vec2::new(40.0, 580.0), SIZE);
        assert_eq!(check_terminal(&bounds, 600.0), Some(TerminalCause::FellOffBottom));
        let bounds = Bounds::from_origin(Vec2::new(40.0, 579.5), SIZE);
        assert_eq!(check_terminal(&bounds, 600.0), None);
    }

    #[test]
    fn test_top_edge_is_terminal() {
        let bounds = Bounds::from_origin(Vec2::new(40.0, 0.0), SIZE);
        assert_eq!(check_terminal(&bounds, 600.0), Some(TerminalCause::FlewOffTop));
        let bounds = Bounds::from_origin(Vec2::new(40.0, -12.0), SIZE);
        assert_eq!(check_terminal(&bounds, 600.0), Some(TerminalCause::FlewOffTop));
    }

    #[test]
    fn test_overlap_excludes_touching() {
        let a = Bounds::from_origin(Vec2::ZERO, Vec2::splat(10.0));
        let b = Bounds::from_origin(Vec2::new(10.0, 0.0), Vec2::splat(10.0));
        let c = Bounds::from_origin(Vec2::new(9.0, 9.0), Vec2::splat(10.0));
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
    }
}
