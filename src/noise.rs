use crate::model::{Agent, Observations, Trajectory};
use anyhow::{Context, Result};
use rand::prelude::*;
use rand_distr::Bernoulli;

/// Observation noise.
///
/// An agent in the "on" state is observed "on" with probability `p_on`,
/// an agent in the "off" state with probability `p_off`.
/// Unlike the switching probabilities of the engine, which are compared
/// against draws without clamping, both values must lie in `[0, 1]`.
#[derive(Debug, Clone)]
pub struct Noise {
    obs_on_dist: Bernoulli,
    obs_off_dist: Bernoulli,
}

impl Noise {
    /// Create a new `Noise`.
    ///
    /// # Errors
    /// Returns an error if either value is not a probability.
    pub fn new(p_on: f64, p_off: f64) -> Result<Self> {
        let obs_on_dist = Bernoulli::new(p_on)
            .with_context(|| format!("invalid observation probability p_on = {p_on}"))?;
        let obs_off_dist = Bernoulli::new(p_off)
            .with_context(|| format!("invalid observation probability p_off = {p_off}"))?;
        Ok(Self {
            obs_on_dist,
            obs_off_dist,
        })
    }

    /// Replace every latent state of `traj` by an independent noisy observation.
    pub fn observe<R: Rng + ?Sized>(&self, traj: &Trajectory, rng: &mut R) -> Observations {
        let obs_vec = traj
            .state_vec
            .iter()
            .map(|state| {
                state
                    .agt_vec
                    .iter()
                    .map(|&agt| {
                        let dist = match agt {
                            Agent::On => &self.obs_on_dist,
                            Agent::Off => &self.obs_off_dist,
                        };
                        u8::from(dist.sample(rng))
                    })
                    .collect::<Vec<_>>()
            })
            .collect();

        Observations {
            n_agt: traj.n_agt,
            obs_vec,
        }
    }
}
