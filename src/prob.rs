/// Compute the probability of switching state.
///
/// `n_opp` is the number of agents currently in the state being switched into.
/// The result is not bounded to `[0, 1]`.
pub fn switch_prob(propensity: f64, herd: f64, n_opp: usize) -> f64 {
    propensity + herd * n_opp as f64
}
