use crate::error::{PricingError, PricingResult};
use crate::models::jarrow_rudd::lattice::{node_count, LatticeMoments, LatticeWorkspace, PriceTree};
use crate::models::traits::OptionPricer;
use crate::pricing::types::{ContractParameters, ExerciseStyle, LatticeConfig, OptionType};

/// Jarrow-Rudd binomial lattice pricer.
///
/// Builds a recombining tree from drift-adjusted Jarrow-Rudd factors, rolls
/// terminal payoffs back by discounted risk-neutral expectation, and for American
/// exercise compares against immediate exercise at every node.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinomialLatticePricer {
    config: LatticeConfig,
}

impl BinomialLatticePricer {
    pub fn new(config: LatticeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LatticeConfig {
        &self.config
    }

    /// Lattice moments this pricer would use for `contract`.
    pub fn moments(&self, contract: &ContractParameters) -> PricingResult<LatticeMoments> {
        contract.validate()?;
        self.config.validate()?;
        LatticeMoments::new(contract, self.config.steps)
    }

    /// Builds and fully populates the price tree for `contract`.
    ///
    /// Useful for inspecting node values; [`OptionPricer::price`] reads the root of the
    /// same tree. The tree needs up and down factors that differ in f64. At `T = 0`, or
    /// when σ√h rounds away, every factor collapses to one and the lattice is reported
    /// as degenerate; [`OptionPricer::price`] returns intrinsic value in that case.
    ///
    /// Fails with [`PricingError::NonFiniteValue`] when the root overflows f64.
    pub fn build_tree(&self, contract: &ContractParameters) -> PricingResult<PriceTree> {
        contract.validate()?;
        self.config.validate()?;
        let mut workspace = LatticeWorkspace::new();
        self.populate(contract, &mut workspace)?;
        Ok(workspace.tree)
    }

    /// Prices `contract` reusing the buffers held by `workspace`.
    ///
    /// With `T = 0`, or with a maturity so short that `u` and `d` round to the same
    /// value, the option is worth its intrinsic value and no tree is built.
    pub fn price_with_workspace(
        &self,
        contract: &ContractParameters,
        workspace: &mut LatticeWorkspace,
    ) -> PricingResult<f64> {
        contract.validate()?;
        self.config.validate()?;

        if contract.time_to_maturity == 0.0 {
            tracing::warn!("zero time to maturity, returning intrinsic value");
            return Ok(contract.intrinsic_value(contract.spot));
        }
        if LatticeMoments::collapses(contract, self.config.steps) {
            tracing::warn!(
                time_to_maturity = contract.time_to_maturity,
                steps = self.config.steps,
                "step factors collapse to one, returning intrinsic value"
            );
            return Ok(contract.intrinsic_value(contract.spot));
        }

        self.populate(contract, workspace)?;
        Ok(workspace.tree.root_value())
    }

    fn populate(
        &self,
        contract: &ContractParameters,
        workspace: &mut LatticeWorkspace,
    ) -> PricingResult<()> {
        let steps = self.config.steps;
        let moments = LatticeMoments::new(contract, steps)?;
        tracing::debug!(
            steps,
            up = moments.up,
            down = moments.down,
            drift = moments.drift,
            q = moments.q,
            "jarrow-rudd lattice moments"
        );

        let tree = &mut workspace.tree;
        tree.reset(steps);
        tracing::trace!(nodes = node_count(steps), "lattice buffers ready");

        tree.fill_underlying(contract.spot, &moments);
        tree.fill_option(
            contract.strike,
            contract.option_type.sign(),
            &moments,
            self.config.exercise == ExerciseStyle::American,
        );

        let root = tree.root_value();
        if !root.is_finite() {
            tracing::warn!(root, steps, "lattice root overflowed");
            return Err(PricingError::NonFiniteValue(format!(
                "root value {root} with {steps} steps"
            )));
        }
        Ok(())
    }
}

impl OptionPricer for BinomialLatticePricer {
    fn name(&self) -> &'static str {
        "Jarrow-Rudd"
    }

    fn price(&self, contract: &ContractParameters) -> PricingResult<f64> {
        self.price_with_workspace(contract, &mut LatticeWorkspace::new())
    }
}

/// Prices an option on a Jarrow-Rudd lattice from flat inputs.
#[allow(non_snake_case, clippy::too_many_arguments)]
pub fn jarrow_rudd_price(
    S: f64,
    K: f64,
    r: f64,
    sigma: f64,
    T: f64,
    option_type: OptionType,
    exercise: ExerciseStyle,
    steps: usize,
) -> PricingResult<f64> {
    let contract = ContractParameters::new(S, K, r, sigma, T, option_type)?;
    BinomialLatticePricer::new(LatticeConfig::new(steps, exercise)).price(&contract)
}
