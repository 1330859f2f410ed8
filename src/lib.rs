//! Stochastic herding model of binary-state agents.
//!
//! Each agent is "on" or "off" and switches with a probability made of a private
//! propensity plus a herding term proportional to the number of agents already in
//! the target state. [`Engine`] generates latent trajectories and noisy
//! observations of them, [`Params::validate`] reports how safe a parameter set is.

pub mod config;
pub mod engine;
pub mod manager;
pub mod model;
pub mod noise;
pub mod params;
pub mod prob;
pub mod stats;

pub use engine::Engine;
pub use model::{Agent, Observations, State, Trajectory, Verdict};
pub use noise::Noise;
pub use params::Params;
pub use prob::switch_prob;
