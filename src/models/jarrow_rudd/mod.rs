//! Jarrow-Rudd binomial lattice
//!
//! Discretizes geometric Brownian motion on a recombining tree whose up and down factors
//! carry the risk-neutral drift (r − σ²/2)·h. Terminal payoffs are discounted back
//! through the tree by risk-neutral expectation, with an optional early-exercise check at
//! every node. Converges to the Black-Scholes-Merton value as the step count grows.

pub mod lattice;
pub mod pricer;

pub use lattice::*;
pub use pricer::*;
