//! Chain Expression Demo
//!
//! Applies a chain such as `ghz[0:3].m[:]` to an empty circuit, with the
//! demo macros attached, then runs and optionally samples it.

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use qsv_ir::SimulatorConfig;
use tracing::info;

use qsv_demos::circuits::standard_macros;
use qsv_demos::{
    init_logging, print_counts, print_header, print_info, print_result, print_section,
    print_state, print_success,
};

#[derive(Parser, Debug)]
#[command(name = "demo-chain")]
#[command(about = "Build and run a circuit from a chain expression")]
struct Args {
    /// Chain expression, e.g. "h[0].cx[0, 1].m[:]"
    chain: String,

    /// Minimum register width
    #[arg(short = 'n', long, default_value = "0")]
    qubits: usize,

    /// Number of shots to sample after the first run (0 = skip)
    #[arg(short, long, default_value = "0")]
    shots: u32,

    /// RNG seed for reproducible measurements
    #[arg(long, env = "QSV_SEED")]
    seed: Option<u64>,

    /// Refuse to run registers wider than this
    #[arg(long, env = "QSV_MAX_QUBITS")]
    max_qubits: Option<usize>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    print_header("Chain Expression Demo");

    let mut config = SimulatorConfig::new();
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(max) = args.max_qubits {
        config = config.with_max_qubits(max);
    }

    let mut circuit = qsv_gates::circuit()
        .with_qubits(args.qubits)
        .with_macros(Arc::new(standard_macros()?))
        .with_config(config);
    qsv_chain::apply(&mut circuit, &args.chain)
        .with_context(|| format!("failed to apply chain '{}'", args.chain))?;
    info!(
        "Chain expanded to {} operations on {} qubits",
        circuit.ops().len(),
        circuit.n_qubits()
    );

    print_section("Circuit");
    print_result("Input", &args.chain);
    print_result("Expanded", &circuit);
    print_result("Qubits", circuit.n_qubits());
    print_result("Operations", circuit.ops().len());

    print_section("Final State");
    let state = circuit.run()?;
    print_state(&state, circuit.n_qubits());
    print_result("Register", circuit.last_result()?);

    if args.shots > 0 {
        print_section("Sampling");
        info!("Sampling {} shots", args.shots);
        let counts = circuit.sample(args.shots)?;
        print_counts(&counts);
        if let Some(top) = counts.most_frequent() {
            print_result("Most frequent", top);
        }
    }

    println!();
    print_success("Chain demo complete!");
    print_info("Set RUST_LOG=qsv::dbg=info to see dbg[...] output.");
    Ok(())
}
