//! Field-by-field comparison of two instruction records.

use std::fmt;

use nesdiff_trace::{Field, InstructionRecord};

/// How far two records disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    /// Every field agrees.
    Match = 0,
    /// Same instruction, different CPU state. The streams are still aligned.
    Divergence = 1,
    /// Program counters differ: the streams no longer describe the same
    /// instruction.
    Desync = 2,
}

impl Severity {
    /// Numeric level (0, 1 or 2).
    #[must_use]
    pub const fn level(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Match => write!(f, "match"),
            Self::Divergence => write!(f, "state divergence"),
            Self::Desync => write!(f, "stream desynchronization"),
        }
    }
}

/// One field that differs between candidate and reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMismatch {
    pub field: Field,
    /// Candidate value (`None` for an absent operand).
    pub candidate: Option<String>,
    /// Reference value (`None` for an absent operand).
    pub reference: Option<String>,
}

impl fmt::Display for FieldMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {}",
            self.field,
            self.candidate.as_deref().unwrap_or_default(),
            self.reference.as_deref().unwrap_or_default()
        )
    }
}

/// Result of comparing a candidate record against a reference record.
///
/// Two comparisons are equal exactly when their severity and rendered message
/// are equal, which is what report deduplication keys on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comparison {
    pub severity: Severity,
    /// Mismatching fields, program counter first when present.
    pub mismatches: Vec<FieldMismatch>,
}

impl Comparison {
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self.severity, Severity::Match)
    }

    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self.severity, Severity::Desync)
    }

    /// Human-readable discrepancy description.
    ///
    /// State divergences render as `" A: 01 00 X: ..."`; a desync leads with
    /// `"PC: <candidate> <reference>"` followed by the other fragments.
    #[must_use]
    pub fn message(&self) -> String {
        let mut message = String::new();
        for (i, mismatch) in self.mismatches.iter().enumerate() {
            if i > 0 || mismatch.field != Field::ProgramCounter {
                message.push(' ');
            }
            message.push_str(&mismatch.to_string());
        }
        message
    }
}

/// Compare a candidate record against the reference record for the same line.
#[must_use]
pub fn compare(candidate: &InstructionRecord, reference: &InstructionRecord) -> Comparison {
    let mut mismatches = Vec::new();

    if candidate.program_counter != reference.program_counter {
        mismatches.push(mismatch(Field::ProgramCounter, candidate, reference));
    }
    let pc_differs = !mismatches.is_empty();

    for field in Field::COMPARED {
        if candidate.get(field) != reference.get(field) {
            mismatches.push(mismatch(field, candidate, reference));
        }
    }

    let severity = if pc_differs {
        Severity::Desync
    } else if mismatches.is_empty() {
        Severity::Match
    } else {
        Severity::Divergence
    };

    Comparison {
        severity,
        mismatches,
    }
}

fn mismatch(
    field: Field,
    candidate: &InstructionRecord,
    reference: &InstructionRecord,
) -> FieldMismatch {
    FieldMismatch {
        field,
        candidate: candidate.get(field).map(str::to_string),
        reference: reference.get(field).map(str::to_string),
    }
}
