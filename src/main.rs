// Prints the shape and memory footprint of a network configuration.
// Usage:
//   ferrite-mcu [spec.json]
// Without an argument the on-device default topology is used.
// Run the training demo with:
//   cargo run --example xor
use ferrite_mcu::{Network, NetworkError, NetworkSpec};

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("ferrite-mcu: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), NetworkError> {
    let spec = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("loading network spec from {path}");
            NetworkSpec::load_json(&path)?
        }
        None => NetworkSpec::default(),
    };

    let network = Network::from_spec(&spec)?;

    println!("topology:     {:?}", network.widths());
    println!("activations:  {:?}", spec.layers.iter().skip(1).map(|l| l.activation).collect::<Vec<_>>());
    println!("parameters:   {}", network.parameter_count());
    println!("buffer bytes: {}", network.buffer_bytes());
    println!(
        "training:     lr = {}, ideal error = {}, max epochs = {}",
        spec.training.learning_rate, spec.training.ideal_error, spec.training.max_epochs
    );
    Ok(())
}
