//! Hospital/Resident - Demo Entry Point
//!
//! Generates a small instance, solves it, and prints the result. Set
//! `RUST_LOG=debug` (or `trace`) to see the solver's log output.

use hospital_resident::codec::to_text;
use hospital_resident::{DeferredAcceptance, InstanceConfig};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> hospital_resident::Result<()> {
    println!("===========================================");
    println!("  Hospital/Resident - Deferred Acceptance");
    println!("===========================================");
    println!();

    let config = InstanceConfig::new(12, 4).with_seed(12345678);
    let instance = config.build()?;

    println!("Instance:");
    print!("{instance}");
    println!();

    println!("Text encoding:");
    print!("{}", to_text(&instance));
    println!();

    let (matching, receipt) = DeferredAcceptance::new().solve_with_receipt(&instance);

    println!("Matching (resident -> hospital):");
    println!("  {:?}", matching.to_sentinel_vec());
    for h in 0..matching.num_hospitals() {
        println!("  h{h}: {:?}", matching.roster(h));
    }
    println!();

    println!("Receipt:");
    println!("  Proposals:   {:>6}", receipt.proposals);
    println!("  Evictions:   {:>6}", receipt.evictions);
    println!("  Matched:     {:>6}", receipt.matched);
    println!("  Unmatched:   {:>6}", receipt.unmatched);
    println!("  Stable:      {:>6}", matching.is_stable(&instance));
    println!("  Root:        {}", receipt.matching_root_hex());

    Ok(())
}
