//! Plain trainer: one network, trained on the whole dataset until the
//! desired error or the epoch limit, then persisted with the observed
//! output range appended.
//!
//! Usage: train <training data file> <output network filename>

use std::env;
use std::process;

use rand::rngs::StdRng;
use rand::SeedableRng;

use bullpen::{
    train_to_target, Dataset, Network, Result, Sgd, SgdEngine, TrainOptions,
};

const EPOCHS_BETWEEN_REPORTS: usize = 10;

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

    let mut network = Network::standard(
        data.num_inputs(),
        opts.hidden_size_for(data.num_inputs()),
        data.num_outputs(),
        opts.hidden_activation,
        opts.output_activation,
        &mut rng,
    );
    network.set_input_scaling(&data, 0.0, 1.0);
    let scaled = network.scale_dataset(&data);

    {
        let mut engine = SgdEngine::new(&mut network, Sgd::new(opts.learning_rate), &mut rng);
        train_to_target(
            &mut engine,
            &scaled,
            opts.max_epochs,
            EPOCHS_BETWEEN_REPORTS,
            opts.desired_error,
            |report| println!("Epochs {:8}. Current error: {:.10}", report.epoch, report.error),
        );
    }

    // Run the training data back through the network and persist the
    // observed output range with the model; the predictor uses it to bring
    // raw outputs onto a common scale.
    let range = network.output_range(&scaled);
    network.save_with_output_range(network_path, range)?;

    Ok(())
}
