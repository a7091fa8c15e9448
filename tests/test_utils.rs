#![allow(dead_code)]

use lattice_lib::{ContractParameters, OptionType};

/// At-the-money one-year contract used across the test suite
/// (S=100, K=100, r=5%, σ=20%, T=1).
pub fn atm_contract(option_type: OptionType) -> ContractParameters {
    contract(100.0, 100.0, 0.05, 0.2, 1.0, option_type)
}

/// Builds a contract, panicking on invalid inputs.
pub fn contract(
    spot: f64,
    strike: f64,
    rate: f64,
    volatility: f64,
    time_to_maturity: f64,
    option_type: OptionType,
) -> ContractParameters {
    ContractParameters::new(spot, strike, rate, volatility, time_to_maturity, option_type)
        .expect("valid test contract")
}
