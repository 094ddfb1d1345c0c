//! Racer - Individual boat state and behavior
//!
//! Each boat has a crew size, a sprite and the distance it has covered.
//! The track asks every boat to row once per tick.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{RaceError, Result};

/// Character art for a boat, authored top row first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    rows: Vec<Vec<char>>,
}

impl Sprite {
    /// Create a sprite from rows of characters, top row first
    pub fn new(rows: Vec<Vec<char>>) -> Self {
        Self { rows }
    }

    /// Create a sprite from text lines, one character per cell
    pub fn from_lines(lines: &[&str]) -> Self {
        Self::new(lines.iter().map(|line| line.chars().collect()).collect())
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// True when the sprite has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in authored order
    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    /// Rows bottom-to-top, so the hull sits on the baseline
    pub fn render_rows(&self) -> impl ExactSizeIterator<Item = &[char]> + DoubleEndedIterator {
        self.rows.iter().rev().map(Vec::as_slice)
    }

    /// Width of the last row in render order.
    ///
    /// The track never draws a boat left of this column.
    pub fn anchor_width(&self) -> usize {
        self.render_rows().last().map_or(0, <[char]>::len)
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self::from_lines(&[" < ", " | ", "<_>"])
    }
}

/// Range the per-stroke multiplier is drawn from, `[min, max)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrokeRange {
    pub min: f64,
    pub max: f64,
}

impl Default for StrokeRange {
    fn default() -> Self {
        Self { min: 0.4, max: 1.0 }
    }
}

impl StrokeRange {
    /// Check the range is finite, non-negative and non-empty
    pub fn validate(&self) -> Result<()> {
        let Self { min, max } = *self;
        if min.is_finite() && max.is_finite() && min >= 0.0 && min < max {
            Ok(())
        } else {
            Err(RaceError::InvalidStrokeRange { min, max })
        }
    }

    /// Draw one multiplier uniformly from the range
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        rng.gen_range(self.min..self.max)
    }

    /// Whether a multiplier could have come from this range
    pub fn contains(&self, multiplier: f64) -> bool {
        (self.min..self.max).contains(&multiplier)
    }
}

/// A boat taking part in one race
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Racer {
    /// Boat name
    name: String,
    /// Crew size, scales every stroke
    rower_count: u32,
    /// Boat image
    sprite: Sprite,
    /// Distance covered so far, never decreases
    progress: f64,
}

impl Racer {
    /// Create a boat with the default sprite at the start line
    pub fn new(name: impl Into<String>, rower_count: u32) -> Result<Self> {
        Self::with_options(name, rower_count, None, 0.0)
    }

    /// Create a boat with an optional custom sprite and head start
    pub fn with_options(
        name: impl Into<String>,
        rower_count: u32,
        sprite: Option<Sprite>,
        progress: f64,
    ) -> Result<Self> {
        let name = name.into();

        if rower_count == 0 {
            return Err(RaceError::ZeroRowers { name });
        }
        if !progress.is_finite() || progress < 0.0 {
            return Err(RaceError::InvalidProgress { name, progress });
        }

        let sprite = sprite.unwrap_or_default();
        if sprite.is_empty() {
            return Err(RaceError::EmptySprite { name });
        }

        Ok(Self {
            name,
            rower_count,
            sprite,
            progress,
        })
    }

    /// Get boat name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get crew size
    pub fn rower_count(&self) -> u32 {
        self.rower_count
    }

    /// Get boat image
    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }

    /// Get distance covered so far
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Row once: move forward by the crew size times a random multiplier
    pub fn advance<R: Rng + ?Sized>(&mut self, rng: &mut R, stroke: &StrokeRange) {
        let multiplier = stroke.sample(rng);
        self.progress += f64::from(self.rower_count) * multiplier;
    }

    /// Sprite rows bottom-to-top
    pub fn render_rows(&self) -> impl ExactSizeIterator<Item = &[char]> + DoubleEndedIterator {
        self.sprite.render_rows()
    }
}

/// Compact boat state for logging and reporting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RacerSnapshot {
    pub name: String,
    pub rower_count: u32,
    pub progress: f64,
}

impl From<&Racer> for RacerSnapshot {
    fn from(racer: &Racer) -> Self {
        Self {
            name: racer.name.clone(),
            rower_count: racer.rower_count,
            progress: racer.progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn default_sprite_renders_hull_first() {
        let racer = Racer::new("Mayflower", 6).unwrap();
        let rows: Vec<String> = racer
            .render_rows()
            .map(|row| row.iter().collect())
            .collect();
        assert_eq!(rows, vec!["<_>", " | ", " < "]);
        // stored order is untouched
        assert_eq!(racer.sprite().rows()[0], vec![' ', '<', ' ']);
    }

    #[test]
    fn anchor_width_uses_last_render_row() {
        let sprite = Sprite::from_lines(&["ab", "cdef"]);
        assert_eq!(sprite.anchor_width(), 2);
        assert_eq!(Sprite::default().anchor_width(), 3);
    }

    #[test]
    fn advance_adds_crew_times_multiplier() {
        let mut rng = StdRng::seed_from_u64(7);
        let stroke = StrokeRange::default();

        for _ in 0..500 {
            let mut racer = Racer::new("Codfather", 7).unwrap();
            racer.advance(&mut rng, &stroke);
            let multiplier = racer.progress() / 7.0;
            assert!(stroke.contains(multiplier), "multiplier {multiplier} out of range");
        }
    }

    #[test]
    fn head_start_is_kept() {
        let racer = Racer::with_options("Hooker", 8, None, 42.5).unwrap();
        assert_eq!(racer.progress(), 42.5);
    }

    #[test]
    fn rejects_bad_construction() {
        assert!(matches!(
            Racer::new("Empty", 0),
            Err(RaceError::ZeroRowers { .. })
        ));
        assert!(matches!(
            Racer::with_options("Back", 1, None, -1.0),
            Err(RaceError::InvalidProgress { .. })
        ));
        assert!(matches!(
            Racer::with_options("Nan", 1, None, f64::NAN),
            Err(RaceError::InvalidProgress { .. })
        ));
        assert!(matches!(
            Racer::with_options("Ghost", 1, Some(Sprite::new(Vec::new())), 0.0),
            Err(RaceError::EmptySprite { .. })
        ));
    }

    #[test]
    fn stroke_range_validation() {
        assert!(StrokeRange::default().validate().is_ok());
        assert!(StrokeRange { min: 1.0, max: 1.0 }.validate().is_err());
        assert!(StrokeRange { min: -0.5, max: 1.0 }.validate().is_err());
        assert!(StrokeRange { min: 0.0, max: f64::INFINITY }.validate().is_err());
    }
}
