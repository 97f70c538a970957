//! Detune curve table dump.

use clap::Args;
use supersaw_synth::{DetuneTable, MAX_DETUNE_INDEX};

#[derive(Args)]
pub struct DetuneArgs {
    /// Print every K-th table entry
    #[arg(long, default_value = "10", value_parser = clap::value_parser!(u16).range(1..=100))]
    step: u16,
}

pub fn run(args: DetuneArgs) -> anyhow::Result<()> {
    let table = DetuneTable::new();

    println!("Detune Curve:");
    println!("=============");
    println!("{:>5}  {:>6}  {:>12}", "index", "knob", "detune");

    for index in (0..=MAX_DETUNE_INDEX).step_by(usize::from(args.step)) {
        println!(
            "{:>5}  {:>6.2}  {:>12.10}",
            index,
            index as f32 * 0.01,
            table.get(index)
        );
    }

    Ok(())
}
