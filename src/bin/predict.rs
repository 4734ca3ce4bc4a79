//! Predictor: loads a persisted network and a data file, prints one
//! 20-decimal prediction per input row. Targets in the data file are
//! ignored; row order is preserved.
//!
//! Usage: predict <network file> <data file>

use std::env;
use std::process;

use bullpen::predict::{format_prediction, predict_rows};
use bullpen::{Dataset, Network, Result};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!(
            "Insufficient arguments\nUsage: {} <network file> <data file>",
            args[0]
        );
        process::exit(1);
    }

    if let Err(err) = run(&args[1], &args[2]) {
        eprintln!("{}: {}", args[0], err);
        process::exit(1);
    }
}

fn run(network_path: &str, data_path: &str) -> Result<()> {
    let (mut network, output_range) = Network::load_with_output_range(network_path)?;
    let data = Dataset::from_file(data_path)?;

    for prediction in predict_rows(&mut network, output_range, &data) {
        println!("{}", format_prediction(prediction));
    }
    Ok(())
}
