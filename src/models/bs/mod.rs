// Closed-form Black-Scholes-Merton pricing for European options on a non-dividend
// paying underlying. Serves as the reference value the lattice converges to.

use crate::error::{PricingError, PricingResult};
use crate::models::traits::OptionPricer;
use crate::models::utils::norm_cdf;
use crate::pricing::types::{ContractParameters, OptionType};

/// Black-Scholes-Merton analytic pricer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClosedFormPricer;

impl ClosedFormPricer {
    pub fn new() -> Self {
        Self
    }
}

impl OptionPricer for ClosedFormPricer {
    fn name(&self) -> &'static str {
        "Black-Scholes-Merton"
    }

    fn price(&self, contract: &ContractParameters) -> PricingResult<f64> {
        contract.validate()?;

        let s = contract.spot;
        let k = contract.strike;
        let r = contract.rate;
        let t = contract.time_to_maturity;
        let cp = contract.option_type.sign();

        let vol_sqrt_t = contract.volatility * t.sqrt();
        if vol_sqrt_t == 0.0 {
            return Err(PricingError::NumericSingularity(format!(
                "σ·√T is zero (σ={}, T={})",
                contract.volatility, t
            )));
        }

        let d1 = ((s / k).ln() + (r + 0.5 * contract.volatility.powi(2)) * t) / vol_sqrt_t;
        let d2 = d1 - vol_sqrt_t;

        Ok(cp * (s * norm_cdf(cp * d1) - k * (-r * t).exp() * norm_cdf(cp * d2)))
    }
}

/// Prices a European option in closed form from flat inputs.
///
/// `cp` is the payoff sign: +1 for a call, -1 for a put.
#[allow(non_snake_case)]
pub fn black_scholes_price(
    S: f64,
    K: f64,
    r: f64,
    sigma: f64,
    T: f64,
    cp: f64,
) -> PricingResult<f64> {
    let contract = ContractParameters::new(S, K, r, sigma, T, OptionType::from_sign(cp)?)?;
    ClosedFormPricer.price(&contract)
}
