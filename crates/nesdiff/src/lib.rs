//! nesdiff - CPU trace differential testing against `nestest.log`.
//!
//! Parses the golden reference trace and the emulator's own trace line by
//! line, compares the CPU state of each pair, and reports where the emulator
//! first goes wrong.
//!
//! # Example
//!
//! ```
//! use nesdiff::report::{RunState, run};
//!
//! let reference = ["C72E  EA        NOP        A:00 X:00 Y:00 P:26 SP:FB CYC: 33 SL:241"];
//! let candidate = ["0xC72E 0xEA 0x00 0x00 0x00 0x26 0xFB CYC: 33 SL:241"];
//!
//! let mut out = Vec::new();
//! let summary = run(&reference, &candidate, &mut out)?;
//! assert_eq!(summary.state, RunState::Completed);
//! assert_eq!(summary.errors, 0);
//! # Ok::<(), std::io::Error>(())
//! ```

pub mod compare;
mod error;
mod load;
pub mod metrics;
pub mod report;

#[cfg(test)]
mod test_log;

pub use compare::{Comparison, FieldMismatch, Severity, compare};
pub use error::{Error, Result};
pub use load::load_trace;
pub use nesdiff_trace::{
    CandidateFormat, Field, Format, InstructionRecord, ParseError, ReferenceFormat, TraceFormat,
};
pub use report::{Reporter, RunState, RunSummary, run};
