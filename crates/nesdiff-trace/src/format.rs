use std::fmt;

use crate::{InstructionRecord, Result};

/// Which side of the comparison a line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Golden `nestest.log` trace.
    Reference,
    /// Trace printed by the emulator under test.
    Candidate,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Reference => write!(f, "reference"),
            Self::Candidate => write!(f, "candidate"),
        }
    }
}

/// A trace line grammar that produces canonical instruction records.
pub trait TraceFormat {
    /// Format tag carried by errors from this grammar.
    const FORMAT: Format;

    /// Parse one raw trace line.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`](crate::ParseError) when the line is too short
    /// or a required field token is malformed.
    fn parse_line(line: &str) -> Result<InstructionRecord>;
}
