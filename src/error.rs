//! Error types shared by both pricers.

use thiserror::Error;

/// Failures reported by the pricing core.
///
/// Every variant is deterministic: the same inputs fail the same way on every call,
/// so callers should not retry.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PricingError {
    /// An input is outside its domain (non-positive spot or strike, negative volatility
    /// or maturity, non-finite value, bad step count, ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The risk-neutral up-probability is not a probability for this (r, σ, h).
    #[error("degenerate lattice: q={q} (u={up}, d={down}, drift={drift})")]
    DegenerateLattice {
        q: f64,
        up: f64,
        down: f64,
        drift: f64,
    },

    /// The closed form would divide by σ·√T = 0.
    #[error("numeric singularity: {0}")]
    NumericSingularity(String),

    /// A lattice value overflowed f64, so no finite price exists at this step count.
    #[error("non-finite lattice value: {0}")]
    NonFiniteValue(String),
}

/// Shorthand result type used by the pricing core.
pub type PricingResult<T> = std::result::Result<T, PricingError>;

/// Returns `InvalidParameter` from the enclosing function when `$cond` is false.
macro_rules! require {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::error::PricingError::InvalidParameter(format!($($msg)*)));
        }
    };
}

pub(crate) use require;
