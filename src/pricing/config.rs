use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::pricing::day_count::DayCount;
use crate::pricing::types::{ContractParameters, LatticeConfig, OptionType};

/// Contract section of a pricing file.
///
/// Maturity is given either directly in years (`time_to_maturity`) or as a
/// `maturity_date`, converted with `day_count` from `valuation_date` (or the date the
/// caller passes as today).
#[derive(Debug, Clone, Deserialize)]
pub struct ContractConfig {
    pub spot: f64,
    pub strike: f64,
    pub rate: f64,
    pub volatility: f64,
    #[serde(default = "default_option_type")]
    pub option_type: OptionType,
    #[serde(default)]
    pub time_to_maturity: Option<f64>,
    #[serde(default)]
    pub valuation_date: Option<NaiveDate>,
    #[serde(default)]
    pub maturity_date: Option<NaiveDate>,
    #[serde(default)]
    pub day_count: DayCount,
}

/// Full pricing configuration: one contract and the lattice settings.
#[derive(Debug, Clone, Deserialize)]
pub struct PricingConfig {
    pub contract: ContractConfig,
    #[serde(default)]
    pub lattice: LatticeConfig,
}

impl PricingConfig {
    /// Parses a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PricingConfig =
            toml::from_str(text).context("failed to parse pricing configuration")?;
        config.lattice.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("invalid config {}", path.display()))
    }

    /// Resolves the contract section into validated parameters.
    ///
    /// `today` is used as the valuation date when the file does not pin one.
    pub fn contract_parameters(&self, today: NaiveDate) -> Result<ContractParameters> {
        let c = &self.contract;
        let time_to_maturity = match (c.time_to_maturity, c.maturity_date) {
            (Some(years), None) => years,
            (None, Some(maturity)) => {
                let valuation = c.valuation_date.unwrap_or(today);
                c.day_count.year_fraction(valuation, maturity)?
            }
            (Some(_), Some(_)) => {
                return Err(anyhow!(
                    "contract sets both time_to_maturity and maturity_date; pick one"
                ))
            }
            (None, None) => {
                return Err(anyhow!(
                    "contract needs either time_to_maturity or maturity_date"
                ))
            }
        };

        let params = ContractParameters::new(
            c.spot,
            c.strike,
            c.rate,
            c.volatility,
            time_to_maturity,
            c.option_type,
        )?;
        Ok(params)
    }
}

fn default_option_type() -> OptionType {
    OptionType::Call
}
