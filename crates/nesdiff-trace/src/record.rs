use crate::{CandidateFormat, Field, ReferenceFormat, Result, TraceFormat};

/// CPU state at one traced instruction.
///
/// Hex fields are upper-cased strings and are compared as strings, never as
/// numbers. `ppu_position` and `cycle_count` are kept as opaque tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionRecord {
    /// Address of the executed instruction.
    pub program_counter: String,
    /// First operand byte, if the instruction encodes one.
    pub operand1: Option<String>,
    /// Second operand byte. Never present without `operand1`.
    pub operand2: Option<String>,
    /// Raw instruction token (mnemonic or opcode, depending on the format).
    pub instruction: String,
    pub accumulator: String,
    pub index_x: String,
    pub index_y: String,
    pub status_flags: String,
    pub stack_pointer: String,
    pub ppu_position: String,
    pub cycle_count: String,
}

impl InstructionRecord {
    /// Parse a `nestest.log` reference line.
    ///
    /// # Errors
    ///
    /// See [`ReferenceFormat`].
    pub fn from_reference(line: &str) -> Result<Self> {
        ReferenceFormat::parse_line(line)
    }

    /// Parse an emulator trace line.
    ///
    /// # Errors
    ///
    /// See [`CandidateFormat`].
    pub fn from_candidate(line: &str) -> Result<Self> {
        CandidateFormat::parse_line(line)
    }

    /// Value of a field, `None` for an absent operand.
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::ProgramCounter => Some(&self.program_counter),
            Field::Operand1 => self.operand1.as_deref(),
            Field::Operand2 => self.operand2.as_deref(),
            Field::Accumulator => Some(&self.accumulator),
            Field::IndexX => Some(&self.index_x),
            Field::IndexY => Some(&self.index_y),
            Field::StackPointer => Some(&self.stack_pointer),
            Field::StatusFlags => Some(&self.status_flags),
            Field::CycleCount => Some(&self.cycle_count),
            Field::PpuPosition => Some(&self.ppu_position),
        }
    }
}
