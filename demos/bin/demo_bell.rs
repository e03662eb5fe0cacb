//! Bell State Demo
//!
//! Builds `h[0].cx[0, 1].measure[:]`, shows the final state of one run and
//! the outcome distribution over many shots.

use clap::Parser;
use qsv_ir::{Counts, SimulatorConfig};
use tracing::{debug, info};

use qsv_demos::circuits::bell;
use qsv_demos::{
    create_progress_bar, init_logging, print_counts, print_header, print_info, print_result,
    print_section, print_state, print_success,
};

#[derive(Parser, Debug)]
#[command(name = "demo-bell")]
#[command(about = "Prepare and sample a Bell pair")]
struct Args {
    /// Number of shots
    #[arg(short, long, default_value = "1000")]
    shots: u32,

    /// RNG seed for reproducible measurements
    #[arg(long, env = "QSV_SEED")]
    seed: Option<u64>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    print_header("Bell State Demo");

    let mut config = SimulatorConfig::new();
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    debug!("Simulator config: {:?}", config);
    let mut circuit = bell(config)?;

    print_section("Circuit");
    print_result("Chain", &circuit);
    print_result("Qubits", circuit.n_qubits());
    print_result("Operations", circuit.ops().len());

    print_section("Single Run");
    let state = circuit.run()?;
    print_state(&state, circuit.n_qubits());
    print_result("Register", circuit.last_result()?);

    print_section("Sampling");
    info!("Sampling {} shots", args.shots);
    let pb = create_progress_bar(u64::from(args.shots), "shots");
    let mut counts = Counts::new();
    for _ in 0..args.shots {
        circuit.run()?;
        counts.record(circuit.last_result()?);
        pb.inc(1);
    }
    pb.finish_and_clear();
    print_counts(&counts);

    let correlated = counts.get("00") + counts.get("11");
    print_result(
        "Correlated outcomes",
        format!("{correlated}/{}", counts.total()),
    );

    println!();
    print_success("Bell demo complete!");
    print_info("Measuring one qubit of the pair always fixes the other.");
    Ok(())
}
