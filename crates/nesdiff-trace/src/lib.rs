//! Trace record parsing for CPU differential testing.
//!
//! Two line formats are understood:
//! - the golden `nestest.log` reference trace (`ReferenceFormat`)
//! - the trace printed by the emulator under test (`CandidateFormat`)
//!
//! Both parse into the same [`InstructionRecord`], so the two streams can be
//! compared field by field.
//!
//! # Example
//!
//! ```
//! use nesdiff_trace::InstructionRecord;
//!
//! let reference = InstructionRecord::from_reference(
//!     "C5F5 A2 00 LDX #$00 A:00 X:00 Y:00 P:24 SP:FD CYC: 9 SL:241",
//! )?;
//! let candidate = InstructionRecord::from_candidate(
//!     "0xC5F5 0xA2 0x00 0x00 0x00 0x00 0x24 0xFD CYC: 9 SL:241",
//! )?;
//! assert_eq!(reference.operand1, candidate.operand1);
//! # Ok::<(), nesdiff_trace::ParseError>(())
//! ```

mod candidate;
mod field;
mod format;
mod record;
mod reference;
mod tokens;

pub use candidate::CandidateFormat;
pub use field::Field;
pub use format::{Format, TraceFormat};
pub use record::InstructionRecord;
pub use reference::ReferenceFormat;

use thiserror::Error;

/// Trace line parsing errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("{format} line has {found} tokens, need at least {required}")]
    TooFewTokens {
        format: Format,
        found: usize,
        required: usize,
    },
    #[error("{format} field {field}: token '{token}' has no '{delimiter}' delimiter")]
    MissingDelimiter {
        format: Format,
        field: Field,
        token: String,
        delimiter: char,
    },
    #[error("{format} field {field}: token '{token}' has an empty value")]
    EmptyValue {
        format: Format,
        field: Field,
        token: String,
    },
    #[error("{format} field {field}: token '{token}' names the wrong register")]
    UnexpectedName {
        format: Format,
        field: Field,
        token: String,
    },
}

impl ParseError {
    /// Format of the line that failed to parse.
    #[must_use]
    pub const fn format(&self) -> Format {
        match self {
            Self::TooFewTokens { format, .. }
            | Self::MissingDelimiter { format, .. }
            | Self::EmptyValue { format, .. }
            | Self::UnexpectedName { format, .. } => *format,
        }
    }

    /// Field whose token was rejected, if the line got that far.
    #[must_use]
    pub const fn field(&self) -> Option<Field> {
        match self {
            Self::TooFewTokens { .. } => None,
            Self::MissingDelimiter { field, .. }
            | Self::EmptyValue { field, .. }
            | Self::UnexpectedName { field, .. } => Some(*field),
        }
    }

    /// Same failure at the same position, whatever the offending token.
    #[must_use]
    pub fn same_kind(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
            && self.format() == other.format()
            && self.field() == other.field()
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;
