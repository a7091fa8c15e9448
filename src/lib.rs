//! # Lattice-Lib: Binomial Lattice and Closed-Form Option Pricing
//!
//! `lattice-lib` prices vanilla options on a non-dividend paying underlying with two
//! independent methods:
//!
//! - **Jarrow-Rudd binomial lattice**: recombining tree, backward induction, optional
//!   early exercise at every node (European or American)
//! - **Black-Scholes-Merton closed form**: analytic European value, used as the
//!   reference the lattice converges to
//!
//! ## Quick Start
//!
//! ```rust
//! use lattice_lib::{compare_pricers, default_configs, ContractParameters, OptionType};
//!
//! let contract = ContractParameters::new(100.0, 100.0, 0.05, 0.2, 1.0, OptionType::Call)?;
//! let report = compare_pricers(&contract, default_configs::coarse())?;
//!
//! println!("lattice {:.4} vs closed form {:.4}", report.lattice_price, report.closed_form_price);
//! assert!(report.abs_difference() < 0.1);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Configuration Presets
//!
//! Step-count presets for the lattice:
//! - `coarse()`: 100 steps, quick checks
//! - `standard()`: 1,000 steps, the default
//! - `fine()`: 5,000 steps, high accuracy

// ================================================================================================
// MODULES
// ================================================================================================

pub mod error;
pub mod models;
pub mod pricing;

// ================================================================================================
// IMPORTS
// ================================================================================================

use anyhow::{Context, Result};

use models::traits::OptionPricer;

// ================================================================================================
// PUBLIC RE-EXPORTS
// ================================================================================================

// Errors
pub use error::{PricingError, PricingResult};

// Contract, lattice and report types
pub use pricing::{
    config::{ContractConfig, PricingConfig},
    day_count::DayCount,
    types::{
        ContractParameters, ExerciseStyle, LatticeConfig, OptionType, PriceReport, MAX_STEPS,
    },
};

// Pricers
pub use models::bs::{black_scholes_price, ClosedFormPricer};
pub use models::jarrow_rudd::{
    jarrow_rudd_price, BinomialLatticePricer, LatticeMoments, LatticeWorkspace, PriceTree,
};

// ================================================================================================
// DEFAULT CONFIGURATIONS
// ================================================================================================

/// Pre-configured lattice settings.
///
/// All presets use European exercise; call [`LatticeConfig::american`] on the result to
/// switch.
pub mod default_configs {
    use crate::pricing::types::LatticeConfig;

    /// 100 steps. Enough for sanity checks and unit tests, error typically a few cents
    /// on a 100-strike option.
    pub fn coarse() -> LatticeConfig {
        LatticeConfig::coarse()
    }

    /// 1,000 steps. Default for one-shot pricing.
    ///
    /// # Example
    ///
    /// ```rust
    /// use lattice_lib::default_configs;
    ///
    /// let config = default_configs::standard();
    /// assert_eq!(config.steps, 1000);
    /// ```
    pub fn standard() -> LatticeConfig {
        LatticeConfig::standard()
    }

    /// 5,000 steps. About 12.5M nodes per grid; use for reference values, not in hot
    /// loops.
    pub fn fine() -> LatticeConfig {
        LatticeConfig::fine()
    }
}

/// Price a contract on a Jarrow-Rudd binomial lattice.
///
/// # Arguments
///
/// * `contract` - Spot, strike, rate, volatility, time to maturity (years) and option type
/// * `lattice` - Step count and exercise style. Use [`default_configs`] for presets.
///
/// # Errors
///
/// * [`PricingError::InvalidParameter`] for out-of-domain inputs or step counts
/// * [`PricingError::DegenerateLattice`] when the risk-neutral probability is not in `[0, 1]`
/// * [`PricingError::NonFiniteValue`] when the lattice value overflows f64
///
/// # Example
///
/// ```rust
/// use lattice_lib::{price_jarrow_rudd, ContractParameters, LatticeConfig, OptionType};
///
/// let contract = ContractParameters::new(100.0, 110.0, 0.05, 0.3, 0.5, OptionType::Put)?;
/// let american = price_jarrow_rudd(&contract, LatticeConfig::coarse().american())?;
/// let european = price_jarrow_rudd(&contract, LatticeConfig::coarse())?;
/// assert!(american >= european);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn price_jarrow_rudd(contract: &ContractParameters, lattice: LatticeConfig) -> Result<f64> {
    let price = BinomialLatticePricer::new(lattice)
        .price(contract)
        .context("Jarrow-Rudd lattice pricing failed")?;
    Ok(price)
}

/// Price a European contract with the Black-Scholes-Merton formula.
///
/// # Errors
///
/// * [`PricingError::InvalidParameter`] for out-of-domain inputs
/// * [`PricingError::NumericSingularity`] when `σ·√T` is zero
pub fn price_black_scholes(contract: &ContractParameters) -> Result<f64> {
    let price = ClosedFormPricer
        .price(contract)
        .context("Black-Scholes-Merton pricing failed")?;
    Ok(price)
}

/// Price one contract with both methods and report the values side by side.
///
/// The two pricers run independently on the same inputs. The closed form is always
/// European, so with American exercise the gap includes the early-exercise premium.
pub fn compare_pricers(
    contract: &ContractParameters,
    lattice: LatticeConfig,
) -> Result<PriceReport> {
    let lattice_price = price_jarrow_rudd(contract, lattice)?;
    let closed_form_price = price_black_scholes(contract)?;

    tracing::info!(
        lattice_price,
        closed_form_price,
        steps = lattice.steps,
        "priced contract with both methods"
    );

    Ok(PriceReport {
        contract: *contract,
        lattice,
        lattice_price,
        closed_form_price,
    })
}
