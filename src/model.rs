//! Simulation data types.

use anyhow::{Error, bail};
use serde::{Deserialize, Serialize};

/// Binary state of a single agent.
///
/// Encoded as `+1` ("on") and `-1` ("off") wherever it leaves the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "i8", into = "i8")]
pub enum Agent {
    On,
    Off,
}

impl Agent {
    /// Get the opposite state.
    pub fn flipped(self) -> Self {
        match self {
            Agent::On => Agent::Off,
            Agent::Off => Agent::On,
        }
    }

    pub fn is_on(self) -> bool {
        self == Agent::On
    }
}

impl From<Agent> for i8 {
    fn from(agt: Agent) -> Self {
        match agt {
            Agent::On => 1,
            Agent::Off => -1,
        }
    }
}

impl TryFrom<i8> for Agent {
    type Error = Error;

    fn try_from(sign: i8) -> Result<Self, Self::Error> {
        match sign {
            1 => Ok(Agent::On),
            -1 => Ok(Agent::Off),
            _ => bail!("agent state must be 1 or -1, but is {sign}"),
        }
    }
}

/// Population state vector.
///
/// The population size of a run is the length of `agt_vec`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State {
    pub agt_vec: Vec<Agent>,
}

impl State {
    pub fn new(agt_vec: Vec<Agent>) -> Self {
        Self { agt_vec }
    }

    pub fn n_agt(&self) -> usize {
        self.agt_vec.len()
    }

    /// Number of agents currently "on".
    pub fn n_on(&self) -> usize {
        self.agt_vec.iter().filter(|agt| agt.is_on()).count()
    }

    /// Number of agents currently "off".
    pub fn n_off(&self) -> usize {
        self.n_agt() - self.n_on()
    }

    pub fn signs(&self) -> Vec<i8> {
        self.agt_vec.iter().map(|&agt| agt.into()).collect()
    }
}

impl TryFrom<&[i8]> for State {
    type Error = Error;

    fn try_from(signs: &[i8]) -> Result<Self, Self::Error> {
        let agt_vec = signs
            .iter()
            .map(|&sign| Agent::try_from(sign))
            .collect::<Result<_, _>>()?;
        Ok(Self { agt_vec })
    }
}

/// Latent states recorded over time.
///
/// Row `i` is the state after recorded step `i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trajectory {
    pub n_agt: usize,
    pub state_vec: Vec<State>,
}

impl Trajectory {
    pub fn with_capacity(n_points: usize, n_agt: usize) -> Self {
        Self {
            n_agt,
            state_vec: Vec::with_capacity(n_points),
        }
    }

    /// Get the shape `(n_points, n_agt)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.state_vec.len(), self.n_agt)
    }

    /// Indicator matrix of the "on" agents (`1` on, `0` off).
    pub fn on_indicator(&self) -> Vec<Vec<u8>> {
        self.state_vec
            .iter()
            .map(|state| {
                state
                    .agt_vec
                    .iter()
                    .map(|&agt| u8::from(agt.is_on()))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}

/// Noisy observations of a [`Trajectory`].
///
/// Entries are observation outcomes, `1` for observed "on" and `0` for observed "off".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observations {
    pub n_agt: usize,
    pub obs_vec: Vec<Vec<u8>>,
}

impl Observations {
    /// Get the shape `(n_points, n_agt)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.obs_vec.len(), self.n_agt)
    }
}

/// Verdict on a parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Worst-case switching probability is below 0.5.
    Valid,
    /// Worst-case switching probability is in `[0.5, 1)`.
    Risky,
    /// Worst-case switching probability is at least 1.
    Invalid,
}

impl Verdict {
    pub fn name(self) -> &'static str {
        match self {
            Verdict::Valid => "valid",
            Verdict::Risky => "risky",
            Verdict::Invalid => "invalid",
        }
    }
}
