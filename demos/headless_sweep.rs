//! Runs a short sweep against the headless host and prints the results file.
//!
//! Run with: RUST_LOG=info cargo run --example headless_sweep [config.toml]

use contact_sweep::*;

fn main() {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match SweepConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("{err}");
                std::process::exit(1);
            }
        },
        None => SweepConfig {
            minimum_spawn_count: 200,
            maximum_spawn_count: 800,
            spawn_count_increment: 300,
            extra_spawn_counts: vec![1000],
            warmup_duration: 0.5,
            measurement_duration: 2.0,
            output_dir: Some(std::env::temp_dir().join("contact_sweep_demo")),
            ..SweepConfig::default()
        },
    };

    let mut host = HeadlessHost::new("HeadlessCube", 1.0 / 60.0).with_contacts_per_instance(3);
    match run_sweep(&mut host, config) {
        Ok(summary) => {
            println!(
                "{} rows written, {} failed runs",
                summary.rows.len(),
                summary.failed_runs.len()
            );
            if let Ok(contents) = std::fs::read_to_string(&summary.output_path) {
                print!("{contents}");
            }
        }
        Err(err) => {
            eprintln!("sweep failed: {err}");
            std::process::exit(1);
        }
    }
}
