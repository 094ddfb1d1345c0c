//! Roster - Building boats and drawing random entries
//!
//! The shipyard counts every boat it launches; the pick helpers choose
//! names, crews and sprites for a randomly assembled fleet.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{RaceError, Result};
use crate::regatta::racer::{Racer, Sprite};

/// Everything needed to build one boat
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RacerSpec {
    pub name: String,
    pub rower_count: u32,
    #[serde(default)]
    pub sprite: Option<Sprite>,
    #[serde(default)]
    pub progress: f64,
}

impl RacerSpec {
    pub fn new(name: impl Into<String>, rower_count: u32) -> Self {
        Self {
            name: name.into(),
            rower_count,
            sprite: None,
            progress: 0.0,
        }
    }
}

/// Builds boats and keeps count of how many it has launched
#[derive(Debug, Default)]
pub struct Shipyard {
    launched: usize,
}

impl Shipyard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boats successfully built so far
    pub fn launched(&self) -> usize {
        self.launched
    }

    /// Build a boat; failed builds are not counted
    pub fn launch(&mut self, spec: RacerSpec) -> Result<Racer> {
        let racer = Racer::with_options(spec.name, spec.rower_count, spec.sprite, spec.progress)?;
        self.launched += 1;
        log::debug!(
            "Launched {:?} with {} rowers ({} so far)",
            racer.name(),
            racer.rower_count(),
            self.launched
        );
        Ok(racer)
    }
}

/// Pick one item at random, leaving the pool as it is
pub fn pick<'a, T, R: Rng + ?Sized>(values: &'a [T], rng: &mut R) -> Option<&'a T> {
    values.choose(rng)
}

/// Pick one item at random and return it with the rest of the pool.
///
/// The caller's slice is never modified.
pub fn pick_exclusive<T: Clone, R: Rng + ?Sized>(values: &[T], rng: &mut R) -> Option<(T, Vec<T>)> {
    if values.is_empty() {
        return None;
    }
    let mut rest = values.to_vec();
    let chosen = rest.remove(rng.gen_range(0..rest.len()));
    Some((chosen, rest))
}

/// Build `count` boats from random picks.
///
/// Names and sprites are drawn without replacement, crew sizes with
/// replacement. Once the sprites run out the default sprite is used.
pub fn assemble_fleet<N, R>(
    shipyard: &mut Shipyard,
    count: usize,
    names: &[N],
    rowers: &[u32],
    sprites: &[Sprite],
    rng: &mut R,
) -> Result<Vec<Racer>>
where
    N: AsRef<str>,
    R: Rng + ?Sized,
{
    let mut names: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
    let mut sprites = sprites.to_vec();
    let mut fleet = Vec::with_capacity(count);

    for _ in 0..count {
        let (name, rest) = pick_exclusive(&names, rng).ok_or(RaceError::RosterExhausted("names"))?;
        names = rest;

        let rower_count = *pick(rowers, rng).ok_or(RaceError::RosterExhausted("rower counts"))?;

        let sprite = pick_exclusive(&sprites, rng).map(|(sprite, rest)| {
            sprites = rest;
            sprite
        });

        fleet.push(shipyard.launch(RacerSpec {
            name: name.to_string(),
            rower_count,
            sprite,
            progress: 0.0,
        })?);
    }

    Ok(fleet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn pick_exclusive_leaves_input_alone() {
        let mut rng = StdRng::seed_from_u64(9);
        let pool = vec![1, 2, 3, 4];

        let (chosen, rest) = pick_exclusive(&pool, &mut rng).unwrap();

        assert_eq!(pool, vec![1, 2, 3, 4]);
        assert_eq!(rest.len(), 3);
        assert!(!rest.contains(&chosen));
        assert!(pool.contains(&chosen));
    }

    #[test]
    fn picks_from_empty_pools_are_none() {
        let mut rng = StdRng::seed_from_u64(9);
        let empty: Vec<u32> = Vec::new();
        assert_eq!(pick(&empty, &mut rng), None);
        assert_eq!(pick_exclusive(&empty, &mut rng), None);
    }

    #[test]
    fn shipyard_counts_only_successful_launches() {
        let mut yard = Shipyard::new();
        yard.launch(RacerSpec::new("Mayflower", 6)).unwrap();
        assert!(yard.launch(RacerSpec::new("Sunk", 0)).is_err());
        yard.launch(RacerSpec::new("Hooker", 8)).unwrap();
        assert_eq!(yard.launched(), 2);
    }

    #[test]
    fn fleet_has_unique_names_and_known_crews() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut yard = Shipyard::new();
        let names = ["Mayflower", "Codfather", "Hooker"];
        let rowers = [6, 7, 8];

        let fleet = assemble_fleet(&mut yard, 3, &names, &rowers, &[], &mut rng).unwrap();

        assert_eq!(fleet.len(), 3);
        assert_eq!(yard.launched(), 3);
        let unique: HashSet<&str> = fleet.iter().map(Racer::name).collect();
        assert_eq!(unique.len(), 3);
        assert!(fleet.iter().all(|r| rowers.contains(&r.rower_count())));
        assert!(fleet.iter().all(|r| *r.sprite() == Sprite::default()));
    }

    #[test]
    fn sprites_fall_back_to_default_once_used_up() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut yard = Shipyard::new();
        let custom = Sprite::from_lines(&["/\\", "~~"]);

        let fleet = assemble_fleet(
            &mut yard,
            2,
            &["a", "b"],
            &[1],
            std::slice::from_ref(&custom),
            &mut rng,
        )
        .unwrap();

        let customs = fleet.iter().filter(|r| *r.sprite() == custom).count();
        assert_eq!(customs, 1);
    }

    #[test]
    fn running_out_of_names_is_an_error() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut yard = Shipyard::new();

        let err = assemble_fleet(&mut yard, 3, &["a", "b"], &[1], &[], &mut rng).unwrap_err();
        assert!(matches!(err, RaceError::RosterExhausted("names")));
        assert_eq!(yard.launched(), 2);

        let err = assemble_fleet(&mut yard, 1, &["c"], &[], &[], &mut rng).unwrap_err();
        assert!(matches!(err, RaceError::RosterExhausted("rower counts")));
    }
}
