use ferrite_mcu::{train_loop, Network, Sample, TrainConfig};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let samples = vec![
        Sample::new(vec![0.0, 0.0], vec![0.0]),
        Sample::new(vec![0.0, 1.0], vec![1.0]),
        Sample::new(vec![1.0, 0.0], vec![1.0]),
        Sample::new(vec![1.0, 1.0], vec![0.0]),
    ];

    // A 2-2-1 net can stall in a local minimum; retry with a fresh init.
    for attempt in 1..=5 {
        let mut network = Network::new(&[2, 2, 1]).expect("valid topology");
        let report = train_loop(&mut network, &samples, &TrainConfig::new(1.0, 0.05, 2000));

        println!("attempt {attempt}: {:?} after {} epochs, mean loss = {:.4}",
            report.state, report.epochs, report.final_loss);

        for sample in &samples {
            let out = network.forward(&sample.inputs).expect("sample fits network")[0];
            println!("  {:?} -> {:.4} (target {})", sample.inputs, out, sample.targets[0]);
        }

        if report.final_loss <= 0.05 {
            break;
        }
    }
}
