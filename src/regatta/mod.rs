//! Regatta Module
//!
//! Boats, the track they race on, and the loop that animates the race
//! on the console.

pub mod racer;
pub mod roster;
pub mod simulation;
pub mod track;

pub use racer::{Racer, RacerSnapshot, Sprite, StrokeRange};
pub use roster::{assemble_fleet, pick, pick_exclusive, RacerSpec, Shipyard};
pub use simulation::{NoPause, Pacer, RaceOutcome, SleepPacer};
pub use track::{Frame, RaceSnapshot, RaceStatus, RaceTrack, TrackConfig};
