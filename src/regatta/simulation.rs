//! Simulation - Race loop
//!
//! Rows every boat, prints a frame, pauses, and repeats until somebody
//! crosses the line. Runs to completion on the calling thread.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::regatta::racer::Racer;
use crate::regatta::track::{RaceStatus, RaceTrack, TrackConfig};

/// Paces the animation between frames
pub trait Pacer {
    fn pause(&mut self, delay: Duration);
}

/// Blocks the thread for the full refresh delay
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn pause(&mut self, delay: Duration) {
        thread::sleep(delay);
    }
}

/// Never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPause;

impl Pacer for NoPause {
    fn pause(&mut self, _delay: Duration) {}
}

/// How a finished race ended
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RaceOutcome {
    /// Names of every boat past the line, in draw order
    pub winners: Vec<String>,
    pub ticks: u32,
    pub announcement: String,
}

impl RaceTrack {
    /// Build a race and run it on stdout straight away
    pub fn launch(
        name: impl Into<String>,
        participants: Vec<Racer>,
        target_distance: f64,
        config: TrackConfig,
    ) -> Result<Self> {
        let mut track = Self::new(name, participants, target_distance, config)?;
        track.run()?;
        Ok(track)
    }

    /// Run the race on stdout with real pauses
    pub fn run(&mut self) -> Result<RaceOutcome> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.race_on(&mut out, &mut rand::thread_rng(), &mut SleepPacer)
    }

    /// Row every boat once, in draw order
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let stroke = self.config.stroke;
        for racer in &mut self.participants {
            racer.advance(rng, &stroke);
        }
        self.ticks += 1;
        self.status = RaceStatus::Racing;
    }

    /// Run ticks until at least one boat passes the target distance.
    ///
    /// The finish check comes after the frame is written, so the winning
    /// positions are always shown.
    pub fn race_on<W, R, P>(&mut self, out: &mut W, rng: &mut R, pacer: &mut P) -> Result<RaceOutcome>
    where
        W: Write + ?Sized,
        R: Rng + ?Sized,
        P: Pacer + ?Sized,
    {
        writeln!(out, "Total boats entered: {}", self.entered)?;
        writeln!(out, "Beginning race!")?;
        log::info!("Race {:?} started", self.name);

        let delay = self.config.refresh_delay();

        let announcement = loop {
            self.tick(rng);

            writeln!(out, "{}", self.frame())?;
            out.flush()?;
            pacer.pause(delay);

            if let Some(leader) = self.leader() {
                log::debug!(
                    "tick {}: {} leads at {:.1}/{}",
                    self.ticks,
                    leader.name(),
                    leader.progress(),
                    self.target_distance
                );
            }

            if let Some(line) = self.announcement() {
                break line;
            }
        };

        self.status = RaceStatus::Finished;
        writeln!(out, "{announcement}")?;
        out.flush()?;

        let winners: Vec<String> = self
            .winners()
            .into_iter()
            .map(|racer| racer.name().to_string())
            .collect();
        log::info!("Race {:?} won by {:?} after {} ticks", self.name, winners, self.ticks);

        Ok(RaceOutcome {
            winners,
            ticks: self.ticks,
            announcement,
        })
    }
}
