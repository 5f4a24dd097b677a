//! Command-line argument definitions.

use clap::Parser;

/// Scenario driver for the deferred-value runtime.
#[derive(Debug, Parser)]
#[command(
    name = "deferral",
    version,
    about = "Run deferred-value demonstration scenarios"
)]
pub struct Cli {
    /// Name of the scenario to run
    pub scenario: Option<String>,

    /// List available scenarios and exit
    #[arg(long)]
    pub list: bool,
}
