// demos/pricing_demo.rs

//! Prices one contract with the Jarrow-Rudd lattice and the Black-Scholes-Merton formula
//!
//! This example shows how to:
//! 1. Load a pricing configuration from TOML
//! 2. Resolve the maturity date into a year fraction
//! 3. Price with both methods and compare the results
//! 4. Watch the lattice converge as the step count grows
//!
//! Run with `cargo run --example pricing_demo [path/to/config.toml]`.
//! Set `RUST_LOG=lattice_lib=debug` to see lattice moments.

use anyhow::Result;
use lattice_lib::{
    compare_pricers, price_jarrow_rudd, ExerciseStyle, LatticeConfig, OptionType, PricingConfig,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "demos/reference.toml".to_string());

    println!("Jarrow-Rudd vs Black-Scholes-Merton");
    println!("===================================");

    let config = PricingConfig::load(&path)?;
    let today = chrono::Local::now().date_naive();
    let contract = config.contract_parameters(today)?;

    println!("Config: {}", path);
    println!("  Spot:       {:.4}", contract.spot);
    println!("  Strike:     {:.4}", contract.strike);
    println!("  Rate:       {:.4}%", contract.rate * 100.0);
    println!("  Volatility: {:.4}%", contract.volatility * 100.0);
    println!(
        "  Maturity:   {:.4} years ({:?})",
        contract.time_to_maturity, config.contract.day_count
    );
    println!("  Type:       {:?}", contract.option_type);

    println!("\nStep 1: Pricing with configured lattice...");
    let report = compare_pricers(&contract, config.lattice)?;
    println!(
        "  Jarrow-Rudd ({} steps, {:?}): {:.6}",
        report.lattice.steps, report.lattice.exercise, report.lattice_price
    );
    println!("  Black-Scholes-Merton:            {:.6}", report.closed_form_price);
    println!("  Difference:                      {:.6}", report.abs_difference());

    println!("\nStep 2: Convergence in step count...");
    println!("{:<8} {:<14} {:<14}", "Steps", "Lattice", "Gap");
    println!("{}", "-".repeat(36));
    for steps in [10, 50, 100, 500, 1000, 2000] {
        let lattice = LatticeConfig::new(steps, ExerciseStyle::European);
        let price = price_jarrow_rudd(&contract, lattice)?;
        println!(
            "{:<8} {:<14.6} {:<14.6}",
            steps,
            price,
            (price - report.closed_form_price).abs()
        );
    }

    println!("\nStep 3: Early exercise premium on the put...");
    let put = contract.with_option_type(OptionType::Put);
    let european = price_jarrow_rudd(&put, config.lattice.european())?;
    let american = price_jarrow_rudd(&put, config.lattice.american())?;
    println!("  European put: {:.6}", european);
    println!("  American put: {:.6}", american);
    println!("  Premium:      {:.6}", american - european);

    Ok(())
}
