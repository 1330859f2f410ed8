use crate::model::State;
use crate::noise::Noise;
use crate::params::Params;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

/// Run configuration.
///
/// Loaded from a TOML file and validated before use.
/// See [`Config::from_file`] for loading.
#[derive(Debug, PartialEq, Clone, Deserialize)]
pub struct Config {
    pub model: Params,
    pub init: InitConfig,
    pub noise: Option<NoiseConfig>,
    pub output: OutputConfig,
}

/// Initial condition parameters.
#[derive(Debug, PartialEq, Clone, Deserialize)]
pub struct InitConfig {
    /// Number of agents, shared by the validator and the engine.
    pub n_agt: usize,
    /// Probability of a random initial agent being "on".
    #[serde(default = "default_prob_on")]
    pub prob_on: f64,
    /// Explicit initial state, overriding `prob_on`.
    pub state: Option<State>,
    /// Random number generator seed.
    pub seed: Option<u64>,
}

/// Observation noise parameters.
#[derive(Debug, PartialEq, Clone, Deserialize)]
pub struct NoiseConfig {
    /// Probability of observing an "on" agent as "on".
    pub p_on: f64,
    /// Probability of observing an "off" agent as "on".
    pub p_off: f64,
}

/// Output parameters.
#[derive(Debug, PartialEq, Clone, Deserialize)]
pub struct OutputConfig {
    /// Number of recorded steps.
    pub n_points: usize,
    /// Number of discarded steps before recording.
    #[serde(default)]
    pub warmup: usize,
}

/// Upper bound on the number of recorded cells, `n_points * n_agt`.
const MAX_N_CELLS: usize = 100_000_000;

fn default_prob_on() -> f64 {
    0.5
}

impl Config {
    /// Load a [`Config`] from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, deserialized,
    /// or if the configuration values are invalid.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;
        Self::from_toml(&contents)
    }

    /// Parse and validate a [`Config`] from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("failed to deserialize config")?;

        config.validate().context("failed to validate config")?;

        Ok(config)
    }

    /// Build the observation noise, if configured.
    pub fn noise(&self) -> Result<Option<Noise>> {
        self.noise
            .as_ref()
            .map(|noise| Noise::new(noise.p_on, noise.p_off))
            .transpose()
    }

    // Model parameters are left unchecked: their verdict is advisory only.
    fn validate(&self) -> Result<()> {
        check_num(self.init.n_agt, 0..=1_000_000).context("invalid number of agents")?;
        check_num(self.init.prob_on, 0.0..=1.0).context("invalid initial probability")?;
        if let Some(state) = &self.init.state {
            let n_agt = self.init.n_agt;
            let len = state.n_agt();
            if len != n_agt {
                bail!("initial state must have {n_agt} agents, but has {len}");
            }
        }

        if let Some(noise) = &self.noise {
            check_num(noise.p_on, 0.0..=1.0).context("invalid observation probability p_on")?;
            check_num(noise.p_off, 0.0..=1.0).context("invalid observation probability p_off")?;
        }

        check_num(self.output.n_points, 0..=10_000_000).context("invalid number of points")?;
        check_num(self.output.warmup, 0..=10_000_000).context("invalid number of warmup steps")?;
        check_num(
            self.output.n_points.saturating_mul(self.init.n_agt),
            0..=MAX_N_CELLS,
        )
        .context("invalid trajectory size")?;

        Ok(())
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}
