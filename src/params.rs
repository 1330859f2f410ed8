use crate::model::Verdict;
use crate::prob::switch_prob;
use serde::Deserialize;

/// Model parameters.
///
/// Values are not range-checked: [`Params::validate`] only reports how safe they are.
#[derive(Debug, PartialEq, Clone, Copy, Deserialize)]
pub struct Params {
    /// Propensity to switch from "off" to "on".
    pub s_on: f64,
    /// Propensity to switch from "on" to "off".
    pub s_off: f64,
    /// Herding coefficient, shared by both directions.
    pub herd: f64,
}

impl Params {
    pub fn new(s_on: f64, s_off: f64, herd: f64) -> Self {
        Self { s_on, s_off, herd }
    }

    /// Upper bound of the switching probability for a population of `n_agt` agents.
    pub fn max_prob(&self, n_agt: usize) -> f64 {
        switch_prob(self.s_on.max(self.s_off), self.herd, n_agt)
    }

    /// Switching probability of the least likely transition when no agent opposes.
    pub fn min_prob(&self) -> f64 {
        switch_prob(self.s_on.min(self.s_off), self.herd, 0)
    }

    /// Classify the parameters for a population of `n_agt` agents.
    ///
    /// The verdict is advisory and nothing in the engine enforces it.
    /// With `verbose` set, the parameters and the verdict are logged.
    pub fn validate(&self, n_agt: usize, verbose: bool) -> Verdict {
        let max_prob = self.max_prob(n_agt);

        let verdict = if max_prob >= 1.0 {
            Verdict::Invalid
        } else if max_prob >= 0.5 {
            Verdict::Risky
        } else {
            Verdict::Valid
        };

        if verbose {
            let Self { s_on, s_off, herd } = self;
            log::info!("s_on = {s_on}, s_off = {s_off}, herd = {herd}, n_agt = {n_agt}");
            match verdict {
                Verdict::Invalid => {
                    log::error!("maximum probability is at least 1: {max_prob:.2}")
                }
                Verdict::Risky => {
                    log::warn!("maximum probability is at least 0.5: {max_prob:.2}")
                }
                Verdict::Valid => log::info!(
                    "probability is within [{:.2}; {max_prob:.2}]",
                    self.min_prob()
                ),
            }
        }

        verdict
    }
}
