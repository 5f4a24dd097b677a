//! Deferred-value runtime CLI
//!
//! Entry point for the scenario driver. Parses CLI arguments and delegates
//! to the Runtime for execution.

use clap::Parser as ClapParser;
use deferred_cli::{runtime::SCENARIOS, Cli, CliError, Runtime};

fn main() {
    let cli = Cli::parse();
    let runtime = Runtime::new();

    if cli.list {
        for name in SCENARIOS {
            println!("{name}");
        }
    } else if let Some(scenario) = cli.scenario {
        match runtime.run_scenario(&scenario) {
            Ok(result) => {
                // Print result if not undefined
                if !matches!(result, core_types::Value::Undefined) {
                    println!("{result}");
                }
            }
            Err(CliError::UnknownScenario(name)) => {
                eprintln!("Error: unknown scenario '{}'", name);
                eprintln!("Run 'deferral --list' to see the available scenarios.");
                std::process::exit(1);
            }
            Err(CliError::Rejected(reason)) => {
                eprintln!("Rejected: {}", reason);
                std::process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("Deferred-value runtime v0.1.0");
        println!();
        println!("Usage:");
        println!("  deferral <SCENARIO>    Run a named scenario");
        println!("  deferral --list        List available scenarios");
        println!();
        println!("Run 'deferral --help' for more options.");
    }
}
