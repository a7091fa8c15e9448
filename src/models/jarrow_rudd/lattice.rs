//! Lattice building blocks: per-step moments and triangular node storage.
//!
//! Node `(i, j)` is the state after `i` time steps of which `j` were down-moves, so
//! only `j <= i` exists. Both grids are stored as flat triangular buffers with node
//! `(i, j)` at offset `i(i+1)/2 + j`.

use crate::error::{PricingError, PricingResult};
use crate::models::utils::exercise_value;
use crate::pricing::types::ContractParameters;

/// Per-step constants of a Jarrow-Rudd lattice, shared by every node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeMoments {
    /// Up factor, exp((r − σ²/2)h + σ√h)
    pub up: f64,
    /// Down factor, exp((r − σ²/2)h − σ√h)
    pub down: f64,
    /// One-step risk-free growth, exp(rh)
    pub drift: f64,
    /// Risk-neutral probability of an up-move
    pub q: f64,
}

impl LatticeMoments {
    /// Derives the moments for `steps` steps over the contract's life.
    ///
    /// Fails with [`PricingError::DegenerateLattice`] when `u <= d` or `q` falls outside
    /// `[0, 1]`; `q` is never clamped.
    pub fn new(contract: &ContractParameters, steps: usize) -> PricingResult<Self> {
        let (up, down, drift) = step_factors(contract, steps);
        let q = (drift - down) / (up - down);

        if up <= down || !(0.0..=1.0).contains(&q) {
            tracing::warn!(q, up, down, drift, steps, "degenerate Jarrow-Rudd lattice");
            return Err(PricingError::DegenerateLattice {
                q,
                up,
                down,
                drift,
            });
        }

        Ok(Self {
            up,
            down,
            drift,
            q,
        })
    }

    /// True when the volatility is positive but σ√h is too small to separate `u` from
    /// `d` in f64. The tree then carries no information beyond intrinsic value.
    pub fn collapses(contract: &ContractParameters, steps: usize) -> bool {
        let (up, down, _) = step_factors(contract, steps);
        contract.volatility > 0.0 && up == down
    }
}

/// Up factor, down factor and risk-free growth for one step.
fn step_factors(contract: &ContractParameters, steps: usize) -> (f64, f64, f64) {
    let h = contract.time_to_maturity / steps as f64;
    let sigma = contract.volatility;
    let r = contract.rate;

    let mean = (r - 0.5 * sigma * sigma) * h;
    let spread = sigma * h.sqrt();
    ((mean + spread).exp(), (mean - spread).exp(), (r * h).exp())
}

/// Number of nodes in a triangular lattice with `steps` steps.
#[inline]
pub fn node_count(steps: usize) -> usize {
    (steps + 1) * (steps + 2) / 2
}

#[inline]
fn offset(i: usize, j: usize) -> usize {
    debug_assert!(j <= i);
    i * (i + 1) / 2 + j
}

/// Underlying and option values at every node of a recombining tree.
#[derive(Debug, Clone, Default)]
pub struct PriceTree {
    steps: usize,
    underlying: Vec<f64>,
    option: Vec<f64>,
}

impl PriceTree {
    /// Allocates a zeroed tree with `steps` time steps.
    pub fn new(steps: usize) -> Self {
        let mut tree = Self::default();
        tree.reset(steps);
        tree
    }

    /// Resizes for `steps` time steps, keeping the existing allocation when it is
    /// large enough.
    pub fn reset(&mut self, steps: usize) {
        let nodes = node_count(steps);
        self.steps = steps;
        self.underlying.clear();
        self.underlying.resize(nodes, 0.0);
        self.option.clear();
        self.option.resize(nodes, 0.0);
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Allocated node capacity of each grid.
    pub fn capacity(&self) -> usize {
        self.underlying.capacity().min(self.option.capacity())
    }

    /// Underlying price at step `i` after `j` down-moves.
    ///
    /// # Panics
    ///
    /// If `i > steps` or `j > i`.
    pub fn underlying_value(&self, i: usize, j: usize) -> f64 {
        assert!(i <= self.steps && j <= i, "node ({i}, {j}) outside lattice");
        self.underlying[offset(i, j)]
    }

    /// Option value at step `i` after `j` down-moves.
    ///
    /// # Panics
    ///
    /// If `i > steps` or `j > i`.
    pub fn option_value(&self, i: usize, j: usize) -> f64 {
        assert!(i <= self.steps && j <= i, "node ({i}, {j}) outside lattice");
        self.option[offset(i, j)]
    }

    /// Value at the root node.
    pub fn root_value(&self) -> f64 {
        self.option[0]
    }

    /// Forward pass: fills underlying prices from the spot.
    ///
    /// Node `(i, j)` holds `S·u^(i−j)·d^j`, evaluated in log space per node. Chaining
    /// `×u` along the top edge and `×d` down each row would carry an overflowed top
    /// node into every node below it; here only nodes that really exceed f64 are `inf`.
    pub(crate) fn fill_underlying(&mut self, spot: f64, moments: &LatticeMoments) {
        let ln_up = moments.up.ln();
        let ln_down = moments.down.ln();
        for i in 0..=self.steps {
            let row = offset(i, 0);
            for j in 0..=i {
                let log_move = (i - j) as f64 * ln_up + j as f64 * ln_down;
                self.underlying[row + j] = spot * log_move.exp();
            }
        }
    }

    /// Backward pass: terminal payoffs, then discounted expectations back to the root.
    ///
    /// With `american` set, each node takes the larger of its continuation value and
    /// immediate exercise.
    pub(crate) fn fill_option(
        &mut self,
        strike: f64,
        cp: f64,
        moments: &LatticeMoments,
        american: bool,
    ) {
        let n = self.steps;
        let last = offset(n, 0);
        for j in 0..=n {
            let payoff = exercise_value(cp, self.underlying[last + j], strike);
            self.option[last + j] = payoff.max(0.0);
        }

        let q = moments.q;
        let q_down = 1.0 - q;
        for i in (0..n).rev() {
            let row = offset(i, 0);
            let next = offset(i + 1, 0);
            for j in 0..=i {
                let up = self.option[next + j];
                let down = self.option[next + j + 1];
                let continuation = (q * up + q_down * down) / moments.drift;
                self.option[row + j] = if american {
                    continuation.max(exercise_value(cp, self.underlying[row + j], strike))
                } else {
                    continuation
                };
            }
        }
    }
}

/// Reusable lattice buffers for callers that price many contracts in a row.
///
/// The tree only reallocates when a larger step count than any seen before is
/// requested.
#[derive(Debug, Clone, Default)]
pub struct LatticeWorkspace {
    pub(crate) tree: PriceTree,
}

impl LatticeWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-sizes the buffers for `steps` time steps.
    pub fn with_steps(steps: usize) -> Self {
        Self {
            tree: PriceTree::new(steps),
        }
    }

    /// Tree left behind by the last pricing call.
    pub fn tree(&self) -> &PriceTree {
        &self.tree
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::types::OptionType;

    fn contract() -> ContractParameters {
        ContractParameters::new(100.0, 100.0, 0.05, 0.2, 1.0, OptionType::Call).unwrap()
    }

    #[test]
    fn test_node_count_and_offsets() {
        assert_eq!(node_count(0), 1);
        assert_eq!(node_count(1), 3);
        assert_eq!(node_count(3), 10);
        assert_eq!(offset(0, 0), 0);
        assert_eq!(offset(1, 1), 2);
        assert_eq!(offset(3, 0), 6);
        assert_eq!(offset(3, 3), node_count(3) - 1);
    }

    #[test]
    fn test_moments_are_sane() {
        let m = LatticeMoments::new(&contract(), 100).unwrap();
        assert!(m.up > 1.0);
        assert!(m.down < 1.0);
        assert!(m.down < m.drift && m.drift < m.up);
        assert!(m.q > 0.0 && m.q < 1.0);
        // Jarrow-Rudd probabilities sit close to one half
        assert!((m.q - 0.5).abs() < 0.05);
        // Expected one-step growth matches the risk-free drift
        let expected = m.q * m.up + (1.0 - m.q) * m.down;
        assert!((expected - m.drift).abs() < 1e-12);
    }

    #[test]
    fn test_zero_volatility_is_degenerate() {
        let c = ContractParameters {
            volatility: 0.0,
            ..contract()
        };
        assert!(matches!(
            LatticeMoments::new(&c, 10),
            Err(PricingError::DegenerateLattice { .. })
        ));
    }

    #[test]
    fn test_wide_step_is_degenerate() {
        // σ√h > 2 pushes the drift above the up factor
        let c = ContractParameters {
            volatility: 5.0,
            ..contract()
        };
        match LatticeMoments::new(&c, 1) {
            Err(PricingError::DegenerateLattice { q, .. }) => assert!(q > 1.0),
            other => panic!("expected degenerate lattice, got {other:?}"),
        }
    }

    #[test]
    fn test_forward_pass_matches_closed_node_formula() {
        let c = contract();
        let steps = 8;
        let m = LatticeMoments::new(&c, steps).unwrap();
        let mut tree = PriceTree::new(steps);
        tree.fill_underlying(c.spot, &m);

        for i in 0..=steps {
            for j in 0..=i {
                let expected = c.spot * m.up.powi((i - j) as i32) * m.down.powi(j as i32);
                let got = tree.underlying_value(i, j);
                assert!(
                    ((got - expected) / expected).abs() < 1e-12,
                    "node ({i}, {j}): {got} vs {expected}"
                );
            }
        }
    }

    #[test]
    fn test_overflowed_top_edge_stays_local() {
        // ln u ≈ 0.375, ln d ≈ -2.625: the top edge leaves f64 around step 51
        let c = ContractParameters::new(1e300, 1e300, 0.05, 15.0, 1.0, OptionType::Put).unwrap();
        let steps = 100;
        let m = LatticeMoments::new(&c, steps).unwrap();
        let mut tree = PriceTree::new(steps);
        tree.fill_underlying(c.spot, &m);

        assert!(tree.underlying_value(steps, 0).is_infinite());
        // Sixty up-moves and forty down-moves end far below the spot
        let node = tree.underlying_value(steps, 40);
        assert!(node.is_finite() && node < c.spot, "node (100, 40) = {node}");
        for j in 45..=steps {
            assert!(tree.underlying_value(steps, j).is_finite());
        }
    }

    #[test]
    fn test_vanishing_step_collapses() {
        let tiny = ContractParameters {
            time_to_maturity: 1e-30,
            ..contract()
        };
        assert!(LatticeMoments::collapses(&tiny, 100));
        assert!(!LatticeMoments::collapses(&contract(), 100));

        // Zero volatility is a degenerate lattice, not a collapsed one
        let flat = ContractParameters {
            volatility: 0.0,
            ..contract()
        };
        assert!(!LatticeMoments::collapses(&flat, 100));
    }

    #[test]
    fn test_terminal_payoffs_are_floored() {
        let c = contract().with_option_type(OptionType::Put);
        let steps = 4;
        let m = LatticeMoments::new(&c, steps).unwrap();
        let mut tree = PriceTree::new(steps);
        tree.fill_underlying(c.spot, &m);
        tree.fill_option(c.strike, c.option_type.sign(), &m, false);

        for j in 0..=steps {
            let s = tree.underlying_value(steps, j);
            assert_eq!(tree.option_value(steps, j), (c.strike - s).max(0.0));
        }
    }

    #[test]
    fn test_reset_reuses_allocation() {
        let mut tree = PriceTree::new(50);
        let cap = tree.capacity();
        tree.reset(10);
        assert_eq!(tree.steps(), 10);
        assert_eq!(tree.capacity(), cap);
    }

    #[test]
    #[should_panic]
    fn test_upper_triangle_is_not_addressable() {
        let tree = PriceTree::new(3);
        tree.underlying_value(1, 2);
    }
}
