//! Error - Failures surfaced while setting up or running a race

use thiserror::Error;

/// Result alias carrying [`RaceError`].
pub type Result<T> = std::result::Result<T, RaceError>;

/// Everything that can go wrong building or running a race
#[derive(Debug, Error)]
pub enum RaceError {
    /// Positions are computed by dividing by the distance
    #[error("race distance must be positive, got {0}")]
    NonPositiveDistance(f64),

    /// A race without boats can never produce a winner
    #[error("a race needs at least one participant")]
    NoParticipants,

    #[error("boat {name:?} needs at least one rower")]
    ZeroRowers { name: String },

    #[error("boat {name:?} cannot start at progress {progress}")]
    InvalidProgress { name: String, progress: f64 },

    #[error("boat {name:?} has an empty sprite")]
    EmptySprite { name: String },

    /// Stroke multipliers must be finite with `0 <= min < max`
    #[error("invalid stroke range [{min}, {max})")]
    InvalidStrokeRange { min: f64, max: f64 },

    #[error("frame width must be at least one column")]
    ZeroFrameWidth,

    #[error("finish line has {glyphs} glyphs but the frame only has {rows} rows")]
    FinishLineTooTall { glyphs: usize, rows: usize },

    /// A pool used to assemble a fleet ran dry
    #[error("ran out of {0} while assembling the fleet")]
    RosterExhausted(&'static str),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}
