//! Model-selection trainer: several independently-initialized networks,
//! each trained with early stopping on its own shuffled train/validation
//! split; the best one is persisted.
//!
//! Usage: train_es <training data file> <output network filename>
//!
//! Per epoch a tab-separated diagnostic line is printed (epoch, patience
//! counter, previously recorded error, combined error, validation error,
//! train error); after each trial the running best error is printed as
//! `MSE: <value>`.

use std::env;
use std::process;

use rand::rngs::StdRng;
use rand::SeedableRng;

use bullpen::{run_selection, Dataset, Result, SelectionEvent, TrainOptions};

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!(
            "Insufficient arguments\nUsage: {} <training data file> <output network filename>",
            args[0]
        );
        process::exit(1);
    }

    if let Err(err) = run(&args[1], &args[2]) {
        eprintln!("{}: {}", args[0], err);
        process::exit(1);
    }
}

fn run(data_path: &str, network_path: &str) -> Result<()> {
    let data = Dataset::from_file(data_path)?;
    let opts = TrainOptions::default();
    let mut rng = StdRng::from_entropy();

    let outcome = run_selection(&data, &opts, &mut rng, |event| match event {
        SelectionEvent::Epoch(r) => println!(
            "{}\t{}\t{:.6}\t{:.6}\t{:.6}\t{:.6}",
            r.epoch, r.patience, r.recorded_error, r.combined_error, r.validation_error, r.train_error
        ),
        SelectionEvent::TrialFinished { best_error, .. } => println!("MSE: {:.6}", best_error),
        SelectionEvent::TrialSkipped { trial, reason } => {
            eprintln!("warning: trial {} skipped: {}", trial, reason)
        }
    })?;

    outcome.network.save_json(network_path)?;
    Ok(())
}
