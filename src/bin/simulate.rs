/*
   Simulate a BooleanNet model and print the resulting trajectory.

   Usage: simulate <mode> <model file> <steps> [seed]

   Every state is printed together with its fingerprint (equal states have equal
   fingerprints), followed by the detected transient length and cycle period.
   Nodes that are never initialized start as `False`. Diagnostics are written to
   stderr and can be enabled using `RUST_LOG=debug` (or `trace` for every rank).
*/

use biodivine_lib_booleannet::util::always;
use biodivine_lib_booleannet::{Model, Value};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).compact())
        .init();

    let args = std::env::args().collect::<Vec<_>>();
    if args.len() < 4 {
        eprintln!("Usage: simulate <mode> <model file> <steps> [seed]");
        std::process::exit(1);
    }

    let text = std::fs::read_to_string(args[2].as_str()).unwrap();
    let steps = args[3].parse::<usize>().unwrap();
    let mut model = match args.get(4) {
        Some(seed) => Model::with_seed(args[1].as_str(), &text, seed.parse().unwrap()),
        None => Model::new(args[1].as_str(), &text),
    }
    .unwrap();

    println!(
        "Loaded {} model with {} nodes.",
        model.mode(),
        model.nodes().len()
    );
    model.initialize_with(always(Value::Bool(false))).unwrap();
    model.iterate_shuffled(steps).unwrap();

    let fingerprints = model.fingerprints();
    for (state, fingerprint) in model.states().iter().zip(fingerprints) {
        println!("[{}] {}", fingerprint, state);
    }

    let (transient, period) = model.detect_cycles();
    if period == 0 {
        println!("No cycle detected in {} states.", model.states().len());
    } else {
        println!("Transient: {}, period: {}.", transient, period);
    }
}
