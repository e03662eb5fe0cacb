//! qsv Demo Suite
//!
//! Small programs showing the engine end to end:
//!
//! - **demo-bell**: builds a Bell pair with the fluent API, prints the final
//!   state and samples it.
//! - **demo-chain**: applies a chain expression such as
//!   `h[0].cx[0, 1].m[:]`, with the demo macros from [`circuits`] attached.

pub mod circuits;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use num_complex::Complex64;
use qsv_ir::Counts;
use tracing_subscriber::EnvFilter;

/// Initialise `tracing` output for a demo binary.
///
/// `RUST_LOG` takes precedence over the verbosity flag.
pub fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

/// Create a progress bar for shot loops.
pub fn create_progress_bar(len: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let template = "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}";
    let progress_style = ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(progress_style);
    pb.set_message(message.to_string());
    pb
}

/// Print a demo header.
pub fn print_header(title: &str) {
    println!();
    println!("{}", style("═".repeat(60)).cyan());
    println!("{}", style(format!("  {title}")).cyan().bold());
    println!("{}", style("═".repeat(60)).cyan());
    println!();
}

/// Print a demo section.
pub fn print_section(title: &str) {
    println!();
    println!("{}", style(format!("▶ {title}")).green().bold());
    println!("{}", style("─".repeat(40)).dim());
}

/// Print a result line.
pub fn print_result(label: &str, value: impl std::fmt::Display) {
    println!("  {} {}", style(format!("{label}:")).dim(), value);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("✓").green().bold(), message);
}

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("ℹ").blue(), message);
}

/// Format a basis index as a ket, qubit 0 leftmost.
pub fn ket(index: usize, n_qubits: usize) -> String {
    let bits: String = (0..n_qubits)
        .map(|q| if index & (1 << q) == 0 { '0' } else { '1' })
        .collect();
    format!("|{bits}⟩")
}

/// Print every amplitude with probability above `1e-12`.
pub fn print_state(state: &[Complex64], n_qubits: usize) {
    for (i, amp) in state.iter().enumerate() {
        let p = amp.norm_sqr();
        if p > 1e-12 {
            println!(
                "  {} {:+.4} {:+.4}i  (p = {:.4})",
                style(ket(i, n_qubits)).yellow(),
                amp.re,
                amp.im,
                p
            );
        }
    }
}

/// Print sampled counts as a small histogram.
pub fn print_counts(counts: &Counts) {
    let total = counts.total().max(1);
    for (bits, n) in counts.sorted() {
        #[allow(clippy::cast_precision_loss)]
        let share = n as f64 / total as f64;
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let bar = "█".repeat((share * 40.0).round() as usize);
        println!(
            "  {} {:>6}  {:>5.1}%  {}",
            style(bits).yellow(),
            n,
            share * 100.0,
            style(bar).cyan()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ket_is_qubit_zero_first() {
        assert_eq!(ket(0, 2), "|00⟩");
        assert_eq!(ket(1, 3), "|100⟩");
        assert_eq!(ket(6, 3), "|011⟩");
    }
}
