use crate::tokens::Tokens;
use crate::{Field, Format, InstructionRecord, Result, TraceFormat};

/// Number of fixed tokens at the end of a reference line (`A:` through the
/// cycle counter).
const TAIL_TOKENS: usize = 8;

/// Golden `nestest.log` grammar.
///
/// ```text
/// C000  4C F5 C5  JMP $C5F5      A:00 X:00 Y:00 P:24 SP:FD CYC:  0 SL:241
/// ```
///
/// Operand bytes are the bare two-character tokens after the opcode; the
/// mnemonic follows them. Registers are `NAME:VALUE` tokens counted from the
/// end of the line, followed by an unused token, the PPU position and the
/// cycle counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceFormat;

impl TraceFormat for ReferenceFormat {
    const FORMAT: Format = Format::Reference;

    fn parse_line(line: &str) -> Result<InstructionRecord> {
        let tokens = Tokens::new(Self::FORMAT, line);

        let operand1 = operand_byte(tokens.front(2)?);
        // A second operand only counts when the first one was an operand too.
        let operand2 = match operand1 {
            Some(_) => operand_byte(tokens.front(3)?),
            None => None,
        };
        let mnemonic_index = 2 + usize::from(operand1.is_some()) + usize::from(operand2.is_some());
        tokens.require(mnemonic_index + 1 + TAIL_TOKENS)?;

        Ok(InstructionRecord {
            program_counter: tokens.front(0)?.to_ascii_uppercase(),
            operand1,
            operand2,
            instruction: tokens.front(mnemonic_index)?.to_string(),
            accumulator: tokens.named_value(Field::Accumulator, tokens.back(8)?)?,
            index_x: tokens.named_value(Field::IndexX, tokens.back(7)?)?,
            index_y: tokens.named_value(Field::IndexY, tokens.back(6)?)?,
            status_flags: tokens.named_value(Field::StatusFlags, tokens.back(5)?)?,
            stack_pointer: tokens.named_value(Field::StackPointer, tokens.back(4)?)?,
            ppu_position: tokens.back(2)?.to_string(),
            cycle_count: tokens.back(1)?.to_string(),
        })
    }
}

/// Operand bytes are exactly two characters; anything else is the mnemonic.
fn operand_byte(token: &str) -> Option<String> {
    (token.len() == 2).then(|| token.to_ascii_uppercase())
}
