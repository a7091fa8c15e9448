pub mod bs;
pub mod jarrow_rudd;

/// Common traits implemented by every pricer
pub mod traits {
    use crate::error::PricingResult;
    use crate::pricing::types::ContractParameters;

    /// A pricing method that values a single contract.
    pub trait OptionPricer: Send + Sync {
        /// Short human-readable name (e.g. "Jarrow-Rudd")
        fn name(&self) -> &'static str;

        /// Fair value of the contract.
        fn price(&self, contract: &ContractParameters) -> PricingResult<f64>;
    }
}

/// Numerical helpers shared by the pricers
pub mod utils {
    use statrs::function::erf::erfc;
    use std::f64::consts::SQRT_2;

    /// Standard normal cumulative distribution function, Φ(x) = ½·erfc(−x/√2).
    ///
    /// The erfc form keeps relative precision in the far left tail.
    pub fn norm_cdf(x: f64) -> f64 {
        0.5 * erfc(-x / SQRT_2)
    }

    /// Value of immediate exercise, `cp·(S − K)`, which may be negative.
    #[inline]
    pub fn exercise_value(cp: f64, underlying: f64, strike: f64) -> f64 {
        cp * (underlying - strike)
    }
}
