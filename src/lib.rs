//! Boat Race - Console race animation
//!
//! Builds a small fleet, then prints one frame per tick until a boat
//! crosses the finish line.

pub mod error;
pub mod regatta;

pub use error::{RaceError, Result};
pub use regatta::{
    assemble_fleet, pick, Frame, NoPause, Pacer, RaceOutcome, RaceStatus, RaceTrack, Racer,
    RacerSpec, Shipyard, SleepPacer, Sprite, StrokeRange, TrackConfig,
};

use tracing_subscriber::EnvFilter;

const FLEET_SIZE: usize = 3;
const RACE_DISTANCE: f64 = 160.0;
const RACE_NAMES: [&str; 2] = ["The Annual Game", "The Generic Race"];
const BOAT_NAMES: [&str; 3] = ["Mayflower", "Codfather", "Hooker"];
const ROWER_COUNTS: [u32; 3] = [6, 7, 8];

/// Send log records to stderr, filtered by `RUST_LOG` (default `warn`)
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Race the default fleet on stdout
pub fn run() -> Result<()> {
    init_logging();

    let mut rng = rand::thread_rng();
    let mut shipyard = Shipyard::new();
    let fleet = assemble_fleet(
        &mut shipyard,
        FLEET_SIZE,
        &BOAT_NAMES,
        &ROWER_COUNTS,
        &[Sprite::default()],
        &mut rng,
    )?;
    let name = pick(&RACE_NAMES, &mut rng).copied().unwrap_or(RACE_NAMES[0]);

    let mut race = RaceTrack::new(name, fleet, RACE_DISTANCE, TrackConfig::default())?
        .with_entry_count(shipyard.launched());
    let outcome = race.run()?;
    log::info!("{} finished in {} ticks", race.name(), outcome.ticks);
    Ok(())
}
