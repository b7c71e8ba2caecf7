use crate::tokens::Tokens;
use crate::{Field, Format, InstructionRecord, Result, TraceFormat};

/// Token count of a line without operand bytes.
const BASE_TOKENS: usize = 10;

/// Emulator trace grammar.
///
/// ```text
/// 0xC000 0x4C 0xF5 0xC5 0x00 0x00 0x00 0x24 0xFD CYC: 0 SL:241
/// ```
///
/// Values are written `0xHH`. There is no explicit operand marker: an
/// 11-token line carries one operand byte and a 12-token line carries two.
/// Registers, PPU position and cycle counter sit at fixed offsets from the end.
#[derive(Debug, Clone, Copy, Default)]
pub struct CandidateFormat;

impl TraceFormat for CandidateFormat {
    const FORMAT: Format = Format::Candidate;

    fn parse_line(line: &str) -> Result<InstructionRecord> {
        let tokens = Tokens::new(Self::FORMAT, line);
        tokens.require(BASE_TOKENS)?;

        let hex = |field: Field, token: &str| tokens.split_value(field, token, 'x');

        let operand1 = if tokens.len() > BASE_TOKENS {
            Some(hex(Field::Operand1, tokens.front(2)?)?)
        } else {
            None
        };
        let operand2 = if tokens.len() == BASE_TOKENS + 2 {
            Some(hex(Field::Operand2, tokens.front(3)?)?)
        } else {
            None
        };

        Ok(InstructionRecord {
            program_counter: hex(Field::ProgramCounter, tokens.front(0)?)?,
            operand1,
            operand2,
            instruction: tokens.front(1)?.to_string(),
            accumulator: hex(Field::Accumulator, tokens.back(8)?)?,
            index_x: hex(Field::IndexX, tokens.back(7)?)?,
            index_y: hex(Field::IndexY, tokens.back(6)?)?,
            status_flags: hex(Field::StatusFlags, tokens.back(5)?)?,
            stack_pointer: hex(Field::StackPointer, tokens.back(4)?)?,
            ppu_position: tokens.back(2)?.to_string(),
            cycle_count: tokens.back(1)?.to_string(),
        })
    }
}
