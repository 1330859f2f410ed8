use crate::model::{Agent, Observations, State, Trajectory};
use crate::noise::Noise;
use crate::params::Params;
use crate::prob::switch_prob;
use anyhow::{Context, Result};
use rand::prelude::*;
use rand_chacha::ChaCha12Rng;
use rand_distr::Bernoulli;

/// Simulation engine.
///
/// Holds the model parameters and the random number generator all draws come from.
/// The population size is always taken from the state passed in, and the
/// parameters are never checked against it (see [`Params::validate`]).
pub struct Engine<R = ChaCha12Rng> {
    params: Params,
    rng: R,
}

impl Engine<ChaCha12Rng> {
    /// Create a new `Engine` seeded from `seed`, or from the OS if there is none.
    pub fn from_seed(params: Params, seed: Option<u64>) -> Result<Self> {
        let rng = match seed {
            Some(seed) => ChaCha12Rng::seed_from_u64(seed),
            None => ChaCha12Rng::try_from_os_rng().context("failed to seed rng from OS")?,
        };
        Ok(Self::new(params, rng))
    }
}

impl<R: Rng> Engine<R> {
    pub fn new(params: Params, rng: R) -> Self {
        Self { params, rng }
    }

    /// Generate a random state where each agent is "on" with probability `prob_on`.
    pub fn random_state(&mut self, n_agt: usize, prob_on: f64) -> Result<State> {
        let on_dist = Bernoulli::new(prob_on)
            .with_context(|| format!("invalid initial probability prob_on = {prob_on}"))?;
        let agt_vec = (0..n_agt)
            .map(|_| {
                if on_dist.sample(&mut self.rng) {
                    Agent::On
                } else {
                    Agent::Off
                }
            })
            .collect();
        Ok(State::new(agt_vec))
    }

    /// Perform a single synchronous step and return the new state.
    ///
    /// Switching probabilities come from the counts before the step. One uniform
    /// draw in `[0, 1)` is taken per agent, in order, and the agent flips if the
    /// draw is below its probability. Probabilities are not clamped: at 1 or
    /// above an agent always flips, at 0 or below (or NaN) it never does.
    pub fn step(&mut self, state: &State) -> State {
        let Params { s_on, s_off, herd } = self.params;

        let prob_on_off = switch_prob(s_off, herd, state.n_off());
        let prob_off_on = switch_prob(s_on, herd, state.n_on());

        let agt_vec = state
            .agt_vec
            .iter()
            .map(|&agt| {
                let prob = match agt {
                    Agent::On => prob_on_off,
                    Agent::Off => prob_off_on,
                };
                let draw: f64 = self.rng.random();
                if draw < prob { agt.flipped() } else { agt }
            })
            .collect();

        State::new(agt_vec)
    }

    /// Run `warmup` discarded steps followed by `n_points` recorded steps.
    ///
    /// The initial state itself is never recorded.
    pub fn raw_series(&mut self, n_points: usize, state: &State, warmup: usize) -> Trajectory {
        let mut traj = Trajectory::with_capacity(n_points, state.n_agt());

        let mut state = state.clone();
        for _ in 0..warmup {
            state = self.step(&state);
        }
        if warmup > 0 {
            log::debug!("completed {warmup} warmup steps");
        }

        for _ in 0..n_points {
            state = self.step(&state);
            traj.state_vec.push(state.clone());
        }

        traj
    }

    /// Run [`Engine::raw_series`] and observe the result through `noise`.
    pub fn noisy_series(
        &mut self,
        n_points: usize,
        noise: &Noise,
        state: &State,
        warmup: usize,
    ) -> Observations {
        let traj = self.raw_series(n_points, state, warmup);
        noise.observe(&traj, &mut self.rng)
    }
}
