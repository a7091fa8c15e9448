use serde::{Deserialize, Serialize};

use crate::error::{require, PricingError, PricingResult};

/// Upper bound on lattice steps; the tree holds O(n²) nodes per grid.
pub const MAX_STEPS: usize = 10_000;

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Payoff sign: +1 for a call, -1 for a put.
    pub fn sign(self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Builds an option type from a ±1 payoff sign.
    pub fn from_sign(cp: f64) -> PricingResult<Self> {
        if cp == 1.0 {
            Ok(OptionType::Call)
        } else if cp == -1.0 {
            Ok(OptionType::Put)
        } else {
            Err(PricingError::InvalidParameter(format!(
                "option sign must be +1 (call) or -1 (put), got {cp}"
            )))
        }
    }
}

/// When the holder may exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseStyle {
    /// Exercise at maturity only
    #[default]
    European,
    /// Exercise at any lattice node
    American,
}

/// Market and contract inputs shared by both pricers.
///
/// Time to maturity, rate and volatility are all annualized. Fields are public so the
/// struct can be built literally; every pricer calls [`ContractParameters::validate`]
/// before doing any work.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContractParameters {
    /// Underlying price at valuation
    pub spot: f64,
    /// Strike price
    pub strike: f64,
    /// Continuously compounded risk-free rate
    pub rate: f64,
    /// Annualized volatility (σ)
    pub volatility: f64,
    /// Time to maturity in years
    pub time_to_maturity: f64,
    /// Call or put
    pub option_type: OptionType,
}

impl ContractParameters {
    /// Creates validated contract parameters.
    pub fn new(
        spot: f64,
        strike: f64,
        rate: f64,
        volatility: f64,
        time_to_maturity: f64,
        option_type: OptionType,
    ) -> PricingResult<Self> {
        let params = Self {
            spot,
            strike,
            rate,
            volatility,
            time_to_maturity,
            option_type,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks the domain of every field.
    pub fn validate(&self) -> PricingResult<()> {
        require!(
            self.spot > 0.0 && self.spot.is_finite(),
            "spot must be > 0 and finite, got {}",
            self.spot
        );
        require!(
            self.strike > 0.0 && self.strike.is_finite(),
            "strike must be > 0 and finite, got {}",
            self.strike
        );
        require!(self.rate.is_finite(), "rate must be finite, got {}", self.rate);
        require!(
            self.volatility >= 0.0 && self.volatility.is_finite(),
            "volatility must be >= 0 and finite, got {}",
            self.volatility
        );
        require!(
            self.time_to_maturity >= 0.0 && self.time_to_maturity.is_finite(),
            "time to maturity must be >= 0 and finite, got {}",
            self.time_to_maturity
        );
        Ok(())
    }

    /// Payoff of immediate exercise at the given underlying price, floored at zero.
    pub fn intrinsic_value(&self, underlying: f64) -> f64 {
        (self.option_type.sign() * (underlying - self.strike)).max(0.0)
    }

    /// Same contract with a different option type.
    pub fn with_option_type(self, option_type: OptionType) -> Self {
        Self {
            option_type,
            ..self
        }
    }
}

/// Step count and exercise style for the binomial lattice.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatticeConfig {
    /// Number of time steps (n >= 1)
    #[serde(default = "default_steps")]
    pub steps: usize,
    /// European or American exercise
    #[serde(default)]
    pub exercise: ExerciseStyle,
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            exercise: ExerciseStyle::European,
        }
    }
}

impl LatticeConfig {
    pub fn new(steps: usize, exercise: ExerciseStyle) -> Self {
        Self { steps, exercise }
    }

    /// 100 steps, European.
    pub fn coarse() -> Self {
        Self::new(100, ExerciseStyle::European)
    }

    /// 1000 steps, European.
    pub fn standard() -> Self {
        Self::new(1000, ExerciseStyle::European)
    }

    /// 5000 steps, European.
    pub fn fine() -> Self {
        Self::new(5000, ExerciseStyle::European)
    }

    /// Same step count with American exercise.
    pub fn american(self) -> Self {
        Self {
            exercise: ExerciseStyle::American,
            ..self
        }
    }

    /// Same step count with European exercise.
    pub fn european(self) -> Self {
        Self {
            exercise: ExerciseStyle::European,
            ..self
        }
    }

    pub fn validate(&self) -> PricingResult<()> {
        require!(self.steps >= 1, "step count must be >= 1, got {}", self.steps);
        require!(
            self.steps <= MAX_STEPS,
            "step count must be <= {}, got {}",
            MAX_STEPS,
            self.steps
        );
        Ok(())
    }
}

fn default_steps() -> usize {
    1000
}

/// Both prices for one contract, reported side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceReport {
    pub contract: ContractParameters,
    pub lattice: LatticeConfig,
    /// Jarrow-Rudd lattice value
    pub lattice_price: f64,
    /// Black-Scholes-Merton value (European)
    pub closed_form_price: f64,
}

impl PriceReport {
    /// Absolute gap between the two prices.
    pub fn abs_difference(&self) -> f64 {
        (self.lattice_price - self.closed_form_price).abs()
    }
}
