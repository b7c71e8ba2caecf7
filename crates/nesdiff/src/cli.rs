//! CLI definitions.

use std::path::PathBuf;

use clap::Parser;

/// Exit code for success.
pub const EXIT_SUCCESS: i32 = 0;
/// Exit code for failure.
pub const EXIT_FAILURE: i32 = 1;

/// Default location of the golden trace inside a `nes-test-roms` checkout.
pub const DEFAULT_REFERENCE: &str = "./nes-test-roms/other/nestest.log";
/// Default location of the emulator's trace output.
pub const DEFAULT_CANDIDATE: &str = "./out";

#[derive(Parser)]
#[command(name = "nesdiff")]
#[command(about = "Compare an emulator CPU trace against the nestest reference log")]
#[command(version)]
pub struct Cli {
    /// Golden reference trace (nestest.log format)
    #[arg(long, value_name = "PATH", default_value = DEFAULT_REFERENCE)]
    pub reference: PathBuf,

    /// Emulator trace to check
    #[arg(long, value_name = "PATH", default_value = DEFAULT_CANDIDATE)]
    pub candidate: PathBuf,

    /// Show metrics summary after the run
    #[arg(long)]
    pub metrics: bool,

    /// Enable verbose output (sets RUST_LOG=debug)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress output (only show errors)
    #[arg(short, long, conflicts_with = "verbose")]
    pub silent: bool,
}

impl Cli {
    /// Default `tracing` directive for the selected verbosity.
    pub const fn log_directive(&self) -> &'static str {
        if self.verbose {
            "nesdiff=debug"
        } else if self.silent {
            "nesdiff=warn"
        } else {
            "nesdiff=info"
        }
    }
}
