use num_enum::{IntoPrimitive, TryFromPrimitive};

// =============================================================================
// OPCODE - Bytecode instructions
// =============================================================================

/// A single-byte operation code.
///
/// Operands follow the opcode byte inline in the chunk's code stream; each
/// variant knows its own encoded width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u8)]
pub enum OpCode {
    // literals
    /// `OP_CONSTANT <u8 index>`
    Constant = 0,
    /// `OP_CONSTANT_LONG <u8 low> <u8 mid> <u8 high>`, 24-bit little-endian index.
    ConstantLong = 1,

    // arithmetic
    Negate = 2,

    Return = 3,
}

impl OpCode {
    /// Decode a raw byte, `None` for bytes that are not an opcode.
    pub fn from_byte(byte: u8) -> Option<OpCode> {
        OpCode::try_from(byte).ok()
    }

    /// Total encoded width in bytes, opcode included.
    pub fn width(self) -> usize {
        match self {
            OpCode::Constant => 2,
            OpCode::ConstantLong => 4,
            OpCode::Negate => 1,
            OpCode::Return => 1,
        }
    }

    /// Mnemonic used in disassembly.
    pub fn name(self) -> &'static str {
        match self {
            OpCode::Constant => "OP_CONSTANT",
            OpCode::ConstantLong => "OP_CONSTANT_LONG",
            OpCode::Negate => "OP_NEGATE",
            OpCode::Return => "OP_RETURN",
        }
    }
}

impl std::fmt::Display for OpCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_values() {
        assert_eq!(u8::from(OpCode::Constant), 0);
        assert_eq!(u8::from(OpCode::ConstantLong), 1);
        assert_eq!(u8::from(OpCode::Negate), 2);
        assert_eq!(u8::from(OpCode::Return), 3);
    }

    #[test]
    fn test_from_byte() {
        assert_eq!(OpCode::from_byte(2), Some(OpCode::Negate));
        assert_eq!(OpCode::from_byte(123), None);
        assert_eq!(OpCode::from_byte(u8::MAX), None);
    }

    #[test]
    fn test_widths() {
        assert_eq!(OpCode::Constant.width(), 2);
        assert_eq!(OpCode::ConstantLong.width(), 4);
        assert_eq!(OpCode::Negate.width(), 1);
        assert_eq!(OpCode::Return.width(), 1);
    }
}
