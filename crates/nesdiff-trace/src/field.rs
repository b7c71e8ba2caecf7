use std::fmt;

/// A named field of an [`InstructionRecord`](crate::InstructionRecord).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    ProgramCounter,
    Operand1,
    Operand2,
    Accumulator,
    IndexX,
    IndexY,
    StackPointer,
    StatusFlags,
    CycleCount,
    PpuPosition,
}

impl Field {
    /// Fields compared after the program counter, in report order.
    pub const COMPARED: [Self; 9] = [
        Self::Operand1,
        Self::Operand2,
        Self::Accumulator,
        Self::IndexX,
        Self::IndexY,
        Self::StackPointer,
        Self::StatusFlags,
        Self::CycleCount,
        Self::PpuPosition,
    ];

    /// Label used in discrepancy reports.
    ///
    /// Register labels double as the `NAME` part of reference-format
    /// `NAME:VALUE` tokens.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ProgramCounter => "PC",
            Self::Operand1 => "OP1",
            Self::Operand2 => "OP2",
            Self::Accumulator => "A",
            Self::IndexX => "X",
            Self::IndexY => "Y",
            Self::StackPointer => "SP",
            Self::StatusFlags => "P",
            Self::CycleCount => "cycle",
            Self::PpuPosition => "PPU",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
