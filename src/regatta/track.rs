//! Track - Race configuration, frame composition and finish detection
//!
//! Owns the boats and the target distance, maps each boat's progress to a
//! column and draws every sprite onto a fresh character grid per frame.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{RaceError, Result};
use crate::regatta::racer::{Racer, RacerSnapshot, Sprite, StrokeRange};

/// Track configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackConfig {
    /// Width of the water in characters
    pub frame_width: usize,
    /// Blank rows above the filler rows
    pub vertical_padding: usize,
    /// Rows under the padding, bottom row first
    pub fillers: Vec<char>,
    /// Finish line glyphs, top first; the last one lands on the bottom row
    pub finish_line: Vec<String>,
    /// Pause between frames
    pub refresh_delay_ms: u64,
    /// Stroke multiplier range
    pub stroke: StrokeRange,
}

impl Default for TrackConfig {
    fn default() -> Self {
        Self {
            frame_width: 80,
            vertical_padding: 20,
            fillers: vec!['.'],
            finish_line: vec![String::new(), "!".to_string(), ".".to_string()],
            refresh_delay_ms: 200,
            stroke: StrokeRange::default(),
        }
    }
}

impl TrackConfig {
    /// Total rows in a frame
    pub fn frame_height(&self) -> usize {
        self.vertical_padding + self.fillers.len()
    }

    /// Pause between frames as a duration
    pub fn refresh_delay(&self) -> Duration {
        Duration::from_millis(self.refresh_delay_ms)
    }

    /// Check the layout can hold a race
    pub fn validate(&self) -> Result<()> {
        if self.frame_width == 0 {
            return Err(RaceError::ZeroFrameWidth);
        }
        if self.finish_line.len() > self.frame_height() {
            return Err(RaceError::FinishLineTooTall {
                glyphs: self.finish_line.len(),
                rows: self.frame_height(),
            });
        }
        self.stroke.validate()
    }
}

/// Race status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RaceStatus {
    NotStarted,
    Racing,
    Finished,
}

/// One rendered character grid, top row first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    rows: Vec<Vec<char>>,
}

impl Frame {
    /// Empty water: padding rows of spaces, then the filler rows
    pub fn blank(config: &TrackConfig) -> Self {
        let width = config.frame_width;
        let rows = std::iter::repeat(' ')
            .take(config.vertical_padding)
            .chain(config.fillers.iter().rev().copied())
            .map(|filler| vec![filler; width])
            .collect();
        Self { rows }
    }

    /// Rows top first
    pub fn rows(&self) -> &[Vec<char>] {
        &self.rows
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Character at a cell, `None` outside the grid
    pub fn get(&self, row: usize, column: usize) -> Option<char> {
        self.rows.get(row)?.get(column).copied()
    }

    /// Draw a sprite whose trailing edge sits at column `pos`.
    ///
    /// Render row `i` goes on the `i`-th row from the bottom and cell `j`
    /// on column `pos + j - sprite height`. Cells left of the grid, past
    /// `width` or above the top row are skipped.
    pub fn draw_sprite(&mut self, sprite: &Sprite, pos: usize, width: usize) {
        let height = sprite.height();

        for (line, row) in self.rows.iter_mut().rev().zip(sprite.render_rows()) {
            for (j, &piece) in row.iter().enumerate() {
                let Some(column) = pos.saturating_add(j).checked_sub(height) else {
                    continue;
                };
                if column < width {
                    if let Some(cell) = line.get_mut(column) {
                        *cell = piece;
                    }
                }
            }
        }
    }

    /// Append finish line glyphs to the bottom rows, last glyph lowest
    pub fn draw_finish_line(&mut self, glyphs: &[String]) {
        for (line, glyph) in self.rows.iter_mut().rev().zip(glyphs.iter().rev()) {
            line.extend(glyph.chars());
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.rows {
            for ch in row {
                write!(f, "{ch}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// A boat race
#[derive(Debug, Clone)]
pub struct RaceTrack {
    /// Race label
    pub(crate) name: String,
    /// Boats in draw order
    pub(crate) participants: Vec<Racer>,
    /// Progress a boat must exceed to win
    pub(crate) target_distance: f64,
    pub(crate) config: TrackConfig,
    /// Template every frame starts from
    base: Frame,
    /// Boats entered, shown in the banner
    pub(crate) entered: usize,
    pub(crate) status: RaceStatus,
    /// Ticks run so far
    pub(crate) ticks: u32,
}

impl RaceTrack {
    /// Create a race, checking every precondition up front
    pub fn new(
        name: impl Into<String>,
        participants: Vec<Racer>,
        target_distance: f64,
        config: TrackConfig,
    ) -> Result<Self> {
        if !(target_distance.is_finite() && target_distance > 0.0) {
            return Err(RaceError::NonPositiveDistance(target_distance));
        }
        if participants.is_empty() {
            return Err(RaceError::NoParticipants);
        }
        config.validate()?;

        let name = name.into();
        log::info!(
            "Race {:?} set up with {} boats over {}",
            name,
            participants.len(),
            target_distance
        );

        Ok(Self {
            base: Frame::blank(&config),
            entered: participants.len(),
            name,
            participants,
            target_distance,
            config,
            status: RaceStatus::NotStarted,
            ticks: 0,
        })
    }

    /// Override the entry count shown in the banner
    pub fn with_entry_count(mut self, entered: usize) -> Self {
        self.entered = entered;
        self
    }

    /// Get race label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get boats in draw order
    pub fn participants(&self) -> &[Racer] {
        &self.participants
    }

    /// Get progress a boat must exceed to win
    pub fn target_distance(&self) -> f64 {
        self.target_distance
    }

    /// Get track configuration
    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    /// Get current race status
    pub fn status(&self) -> RaceStatus {
        self.status
    }

    /// Get ticks run so far
    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    /// Column of a boat's trailing edge.
    ///
    /// Never less than the sprite's anchor width and never clamped to the
    /// frame; cells past the edge are dropped while drawing.
    pub fn draw_position(&self, racer: &Racer) -> usize {
        let scaled = racer.progress() * self.config.frame_width as f64 / self.target_distance;
        // progress and distance are non-negative, so the cast only saturates
        racer.sprite().anchor_width().max(scaled.floor() as usize)
    }

    /// Compose the current frame from a fresh copy of the base grid
    pub fn frame(&self) -> Frame {
        let mut frame = self.base.clone();

        for racer in &self.participants {
            let pos = self.draw_position(racer);
            frame.draw_sprite(racer.sprite(), pos, self.config.frame_width);
        }

        frame.draw_finish_line(&self.config.finish_line);
        frame
    }

    /// Every boat past the target distance, in draw order
    pub fn winners(&self) -> Vec<&Racer> {
        self.participants
            .iter()
            .filter(|racer| racer.progress() > self.target_distance)
            .collect()
    }

    /// Winner line, or `None` while nobody has finished
    pub fn announcement(&self) -> Option<String> {
        let winners = self.winners();
        if winners.is_empty() {
            return None;
        }

        let names: Vec<&str> = winners.iter().map(|racer| racer.name()).collect();
        let verb = if names.len() == 1 { "wins" } else { "win" };
        Some(format!(
            "The {} {} {}!",
            names.join(" and the "),
            verb,
            title_case(&self.name)
        ))
    }

    /// Get current leader
    pub fn leader(&self) -> Option<&Racer> {
        self.participants
            .iter()
            .max_by(|a, b| a.progress().total_cmp(&b.progress()))
    }

    /// Get compact snapshot for logging
    pub fn snapshot(&self) -> RaceSnapshot {
        RaceSnapshot {
            name: self.name.clone(),
            status: self.status,
            ticks: self.ticks,
            target_distance: self.target_distance,
            racers: self.participants.iter().map(RacerSnapshot::from).collect(),
        }
    }
}

/// Compact race snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceSnapshot {
    pub name: String,
    pub status: RaceStatus,
    pub ticks: u32,
    pub target_distance: f64,
    pub racers: Vec<RacerSnapshot>,
}

/// Capitalise the first letter of every alphabetic run and lower-case the rest
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;

    for ch in text.chars() {
        if ch.is_alphabetic() {
            if in_word {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(ch);
            in_word = false;
        }
    }
    out
}
